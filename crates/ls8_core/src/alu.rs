use crate::NUM_REGS;

/// Operations the ALU performs on the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Mul,
}

/// Apply a register-to-register math op: `reg[a] = reg[a] <op> reg[b]`.
/// Results are truncated to 8 bits.
pub(crate) fn apply(reg: &mut [u8; NUM_REGS], op: AluOp, a: usize, b: usize) {
    match op {
        AluOp::Mul => reg[a] = reg[a].wrapping_mul(reg[b]),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, AluOp};

    #[test]
    fn mul_multiplies_registers() {
        let mut reg = [0u8; 8];
        reg[0] = 8;
        reg[1] = 9;
        apply(&mut reg, AluOp::Mul, 0, 1);
        assert_eq!(reg[0], 72);
        assert_eq!(reg[1], 9);
    }

    #[test]
    fn mul_wraps_at_256() {
        let mut reg = [0u8; 8];
        reg[0] = 200;
        reg[1] = 2;
        apply(&mut reg, AluOp::Mul, 0, 1);
        assert_eq!(reg[0], 144);
    }
}
