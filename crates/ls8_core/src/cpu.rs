use anyhow::{bail, Result};
use bitflags::bitflags;

use crate::alu::{self, AluOp};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::{INTERRUPT_VECTOR, NUM_REGS, RAM_SIZE, REG_IM, REG_IS, REG_SP, SP_START};

bitflags! {
    /// Comparison outcomes (the FL register). Set by CMP, consumed by the
    /// conditional jumps.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u8 {
        const EQUAL = 0b0000_0001;
        const GREATER = 0b0000_0010;
        const LESS = 0b0000_0100;
    }
}

/// Console sink for the print instructions.
///
/// The CPU emits through this trait instead of writing to stdout directly
/// so tests can capture exactly what a program printed.
pub trait Output {
    /// PRN: emit the decimal value of a register.
    fn print_value(&mut self, value: u8);
    /// PRA: emit a register value as a character code.
    fn print_char(&mut self, value: u8);
}

/// The LS-8 CPU: register file, special-purpose registers, and RAM.
pub struct Cpu {
    /// General-purpose registers R0-R7. R5 doubles as the interrupt mask,
    /// R6 as the interrupt status, R7 as the stack pointer.
    pub reg: [u8; NUM_REGS],
    /// program counter
    pub pc: u8,
    /// flags register
    pub fl: Flags,
    /// Set by HLT; the scheduler stops issuing ticks once this is true.
    pub halted: bool,
    ram: Memory,
}

impl Default for Cpu {
    fn default() -> Self {
        let mut cpu = Self {
            reg: [0; NUM_REGS],
            pc: 0,
            fl: Flags::empty(),
            halted: false,
            ram: Memory::default(),
        };
        cpu.reg[REG_SP] = SP_START;
        cpu
    }
}

/// Register operands ignore their high five bits.
fn reg_index(operand: u8) -> usize {
    (operand & 0x07) as usize
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all state to power-on values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Store one byte in memory. Used by program loading and by tests
    /// that need to plant an interrupt vector or handler.
    pub fn poke(&mut self, address: u8, value: u8) {
        self.ram.write(address, value);
    }

    /// Read one byte of memory without executing anything.
    pub fn peek(&self, address: u8) -> u8 {
        self.ram.read(address)
    }

    /// Copy a program into memory starting at address 0.
    pub fn load_program(&mut self, program: &[u8]) {
        assert!(
            program.len() <= RAM_SIZE,
            "program does not fit in memory: {} bytes",
            program.len()
        );
        for (address, byte) in program.iter().enumerate() {
            self.ram.write(address as u8, *byte);
        }
    }

    /// Assert the timer interrupt line (bit 0 of IS). The scheduler calls
    /// this periodically; the next tick services it if IM allows.
    pub fn raise_interrupt(&mut self) {
        self.reg[REG_IS] |= 0x01;
    }

    fn clear_interrupt(&mut self) {
        self.reg[REG_IS] &= !0x01;
    }

    /// Advance the CPU one cycle: service a pending interrupt if one is
    /// raised and unmasked, otherwise fetch, decode, and execute the
    /// instruction at the PC.
    ///
    /// A byte that does not decode to an LS-8 instruction is fatal.
    pub fn tick(&mut self, out: &mut impl Output) -> Result<()> {
        if self.reg[REG_IS] & 0x01 != 0 {
            let pending = self.reg[REG_IM] & self.reg[REG_IS];
            if pending != 0 {
                self.clear_interrupt();
                self.save_state();
                self.pc = self.ram.read(INTERRUPT_VECTOR);
                log::debug!("interrupt taken, handler at {:#04x}", self.pc);
                return Ok(());
            }
        }

        // Fetch the opcode and the two bytes after it, whether or not the
        // instruction uses them.
        let ir = self.ram.read(self.pc);
        let operand_a = self.ram.read(self.pc.wrapping_add(1));
        let operand_b = self.ram.read(self.pc.wrapping_add(2));

        let Some(op) = Opcode::decode(ir) else {
            bail!(
                "{:#010b} at address {:#04x} is not a recognized op code",
                ir,
                self.pc
            );
        };
        log::trace!("{:#04x}: {:?}", self.pc, op);

        // A handler returns the new PC when it transfers control; the
        // default advance is operand count (the opcode's two high bits)
        // plus one for the opcode byte itself.
        match self.execute(op, operand_a, operand_b, out) {
            Some(target) => self.pc = target,
            None => self.pc = self.pc.wrapping_add((ir >> 6) + 1),
        }
        Ok(())
    }

    fn execute(&mut self, op: Opcode, a: u8, b: u8, out: &mut impl Output) -> Option<u8> {
        match op {
            Opcode::Ldi => {
                self.reg[reg_index(a)] = b;
                None
            }
            Opcode::Prn => {
                out.print_value(self.reg[reg_index(a)]);
                None
            }
            Opcode::Pra => {
                out.print_char(self.reg[reg_index(a)]);
                None
            }
            Opcode::Hlt => {
                log::debug!("halt at {:#04x}", self.pc);
                self.halted = true;
                None
            }
            Opcode::Push => {
                self.push(self.reg[reg_index(a)]);
                None
            }
            Opcode::Pop => {
                let value = self.pop();
                self.reg[reg_index(a)] = value;
                None
            }
            Opcode::Call => {
                // CALL is opcode plus one operand, so the return address
                // is two bytes past the PC.
                self.push(self.pc.wrapping_add(2));
                Some(self.reg[reg_index(a)])
            }
            Opcode::Ret => Some(self.pop()),
            Opcode::Add => {
                let (a, b) = (reg_index(a), reg_index(b));
                self.reg[a] = self.reg[a].wrapping_add(self.reg[b]);
                None
            }
            Opcode::Mul => {
                alu::apply(&mut self.reg, AluOp::Mul, reg_index(a), reg_index(b));
                None
            }
            Opcode::St => {
                self.ram.write(self.reg[reg_index(a)], self.reg[reg_index(b)]);
                None
            }
            Opcode::Iret => Some(self.restore_state()),
            Opcode::Jmp => Some(self.reg[reg_index(a)]),
            Opcode::Cmp => {
                let (a, b) = (self.reg[reg_index(a)], self.reg[reg_index(b)]);
                self.fl.set(Flags::LESS, a < b);
                self.fl.set(Flags::GREATER, a > b);
                self.fl.set(Flags::EQUAL, a == b);
                None
            }
            Opcode::Jeq => {
                if self.fl.contains(Flags::EQUAL) {
                    Some(self.reg[reg_index(a)])
                } else {
                    None
                }
            }
            Opcode::Jne => {
                if self.fl.contains(Flags::EQUAL) {
                    None
                } else {
                    Some(self.reg[reg_index(a)])
                }
            }
        }
    }

    fn push(&mut self, value: u8) {
        self.reg[REG_SP] = self.reg[REG_SP].wrapping_sub(1);
        self.ram.write(self.reg[REG_SP], value);
    }

    fn pop(&mut self) -> u8 {
        let value = self.ram.read(self.reg[REG_SP]);
        self.reg[REG_SP] = self.reg[REG_SP].wrapping_add(1);
        value
    }

    /// Interrupt entry: push PC, push FL, then R0-R6 in ascending order.
    fn save_state(&mut self) {
        self.push(self.pc);
        self.push(self.fl.bits());
        for i in 0..=REG_IS {
            self.push(self.reg[i]);
        }
    }

    /// IRET: mirror of `save_state`. Returns the restored PC, which is
    /// the control transfer back into the interrupted stream.
    fn restore_state(&mut self) -> u8 {
        for i in (0..=REG_IS).rev() {
            self.reg[i] = self.pop();
        }
        self.fl = Flags::from_bits_truncate(self.pop());
        self.pop()
    }
}
