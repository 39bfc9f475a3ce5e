use std::io::{self, Write};

use anyhow::Result;

use crate::cpu::{Cpu, Output};

/// Number of CPU cycles between timer interrupts.
pub const INTERRUPT_PERIOD: u64 = 1000;

/// Stdout-backed console: PRN output is line-oriented, PRA output is a
/// bare character.
#[derive(Debug, Default)]
pub struct Console;

impl Output for Console {
    fn print_value(&mut self, value: u8) {
        println!("{}", value);
    }

    fn print_char(&mut self, value: u8) {
        print!("{}", value as char);
        io::stdout().flush().ok();
    }
}

/// The LS-8 machine: a CPU plus the clock that drives it.
///
/// The original design ran two free asynchronous timers, a 1 ms
/// instruction clock and a 1 s interrupt clock. Both are modelled here as
/// a single cycle counter that asserts the interrupt line every
/// [`INTERRUPT_PERIOD`] ticks, which makes execution deterministic and
/// replayable.
#[derive(Default)]
pub struct Machine {
    pub cpu: Cpu,
    cycles: u64,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a program into memory starting at address 0.
    pub fn load_program(&mut self, program: &[u8]) {
        log::info!("loading {} byte program", program.len());
        self.cpu.load_program(program);
    }

    /// Number of cycles issued so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Issue one cycle: advance the clocks, then tick the CPU.
    pub fn step(&mut self, out: &mut impl Output) -> Result<()> {
        self.cycles += 1;
        if self.cycles % INTERRUPT_PERIOD == 0 {
            self.cpu.raise_interrupt();
        }
        self.cpu.tick(out)
    }

    /// Run until the CPU halts. Returns the number of cycles executed.
    /// An unrecognized opcode aborts the run with an error.
    pub fn run(&mut self, out: &mut impl Output) -> Result<u64> {
        while !self.cpu.halted {
            self.step(out)?;
        }
        Ok(self.cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::{Machine, INTERRUPT_PERIOD};
    use crate::cpu::Output;
    use crate::{opcode, INTERRUPT_VECTOR, REG_IM};

    #[derive(Default)]
    struct TestConsole {
        values: Vec<u8>,
        chars: Vec<char>,
    }

    impl Output for TestConsole {
        fn print_value(&mut self, value: u8) {
            self.values.push(value);
        }

        fn print_char(&mut self, value: u8) {
            self.chars.push(value as char);
        }
    }

    #[test]
    fn print8_emits_8_in_three_cycles() {
        let mut machine = Machine::new();
        machine.load_program(&[opcode::LDI, 0, 8, opcode::PRN, 0, opcode::HLT]);
        let mut out = TestConsole::default();
        let cycles = machine.run(&mut out).unwrap();
        assert_eq!(out.values, vec![8]);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn timer_interrupt_fires_after_the_interrupt_period() {
        let mut machine = Machine::new();
        // Spin: 0: LDI R2,3   3: JMP R2
        machine.load_program(&[opcode::LDI, 2, 3, opcode::JMP, 2]);
        // Handler at 0x40 prints 'A' and halts so the run terminates.
        for (i, byte) in [opcode::LDI, 3, b'A', opcode::PRA, 3, opcode::HLT]
            .iter()
            .enumerate()
        {
            machine.cpu.poke(0x40 + i as u8, *byte);
        }
        machine.cpu.poke(INTERRUPT_VECTOR, 0x40);
        machine.cpu.reg[REG_IM] = 0x01;

        let mut out = TestConsole::default();
        let cycles = machine.run(&mut out).unwrap();
        assert_eq!(out.chars, vec!['A']);
        // Interrupt entry at cycle 1000, then LDI, PRA, HLT.
        assert_eq!(cycles, INTERRUPT_PERIOD + 3);
    }

    #[test]
    fn run_surfaces_an_unrecognized_opcode() {
        let mut machine = Machine::new();
        machine.load_program(&[0b1110_0000]);
        let mut out = TestConsole::default();
        assert!(machine.run(&mut out).is_err());
    }
}
