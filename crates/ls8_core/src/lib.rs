mod alu;
mod cpu;
mod loader;
mod machine;
mod memory;
pub mod opcode;

pub use cpu::{Cpu, Flags, Output};
pub use loader::parse_program;
pub use machine::{Console, Machine, INTERRUPT_PERIOD};
pub use memory::Memory;
pub use opcode::Opcode;

/// Total addressable memory size in bytes.
pub const RAM_SIZE: usize = 256;
/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;
/// Power-on value of the stack pointer. The stack lives in the top region
/// of memory and grows downward from here.
pub const SP_START: u8 = 0xF4;
/// Memory address holding the PC of the timer interrupt handler.
pub const INTERRUPT_VECTOR: u8 = 0xF8;
/// Register repurposed as the interrupt mask (IM).
pub const REG_IM: usize = 5;
/// Register repurposed as the interrupt status (IS).
pub const REG_IS: usize = 6;
/// Register reserved as the stack pointer (SP).
pub const REG_SP: usize = 7;
