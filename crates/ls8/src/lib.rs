use anyhow::Result;
use ls8_core::{parse_program, Console, Machine};

/// Parse program text, load it into a fresh machine, and run it until it
/// halts, with PRN/PRA wired to stdout.
pub fn run(source: &str) -> Result<()> {
    let program = parse_program(source);
    let mut machine = Machine::new();
    machine.load_program(&program);

    let mut console = Console;
    let cycles = machine.run(&mut console)?;
    log::debug!("halted after {} cycles", cycles);
    Ok(())
}
