use crate::RAM_SIZE;

/// Byte-addressable RAM.
///
/// Addresses are `u8`, so every access is in bounds by construction; the
/// CPU's address arithmetic wraps modulo 256 instead of faulting.
pub struct Memory {
    cells: [u8; RAM_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: [0; RAM_SIZE],
        }
    }
}

impl Memory {
    pub fn read(&self, address: u8) -> u8 {
        self.cells[address as usize]
    }

    pub fn write(&mut self, address: u8, value: u8) {
        self.cells[address as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::Memory;

    #[test]
    fn read_returns_written_value() {
        let mut ram = Memory::default();
        ram.write(0x00, 0x99);
        ram.write(0xFF, 0x42);
        assert_eq!(ram.read(0x00), 0x99);
        assert_eq!(ram.read(0xFF), 0x42);
    }

    #[test]
    fn starts_zeroed() {
        let ram = Memory::default();
        assert_eq!(ram.read(0x00), 0);
        assert_eq!(ram.read(0xF4), 0);
        assert_eq!(ram.read(0xFF), 0);
    }
}
