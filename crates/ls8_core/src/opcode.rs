//! LS-8 instruction encodings.
//!
//! The two high bits of every opcode byte encode its operand count (0-2),
//! which is how the cycle knows how far to advance the PC.

pub const LDI: u8 = 0b1001_1001;
pub const PRN: u8 = 0b0100_0011;
pub const PRA: u8 = 0b0100_0010;
pub const HLT: u8 = 0b0000_0001;
pub const PUSH: u8 = 0b0100_1101;
pub const POP: u8 = 0b0100_1100;
pub const CALL: u8 = 0b0100_1000;
pub const RET: u8 = 0b0000_1001;
pub const ADD: u8 = 0b1010_1000;
pub const MUL: u8 = 0b1010_1010;
pub const ST: u8 = 0b1001_1010;
pub const IRET: u8 = 0b0000_1011;
pub const JMP: u8 = 0b0101_0000;
pub const CMP: u8 = 0b1010_0000;
pub const JEQ: u8 = 0b0101_0001;
pub const JNE: u8 = 0b0101_0010;

/// The closed LS-8 instruction set. There is no runtime extension point;
/// every executable byte decodes to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Ldi,
    Prn,
    Pra,
    Hlt,
    Push,
    Pop,
    Call,
    Ret,
    Add,
    Mul,
    St,
    Iret,
    Jmp,
    Cmp,
    Jeq,
    Jne,
}

impl Opcode {
    /// Decode one opcode byte. Returns `None` for bytes outside the
    /// instruction set.
    pub fn decode(byte: u8) -> Option<Opcode> {
        match byte {
            LDI => Some(Opcode::Ldi),
            PRN => Some(Opcode::Prn),
            PRA => Some(Opcode::Pra),
            HLT => Some(Opcode::Hlt),
            PUSH => Some(Opcode::Push),
            POP => Some(Opcode::Pop),
            CALL => Some(Opcode::Call),
            RET => Some(Opcode::Ret),
            ADD => Some(Opcode::Add),
            MUL => Some(Opcode::Mul),
            ST => Some(Opcode::St),
            IRET => Some(Opcode::Iret),
            JMP => Some(Opcode::Jmp),
            CMP => Some(Opcode::Cmp),
            JEQ => Some(Opcode::Jeq),
            JNE => Some(Opcode::Jne),
            _ => None,
        }
    }
}
