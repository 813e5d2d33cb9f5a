use crate::consts;
use crate::utils;

/// Flat 4 KiB address space. Addresses wrap at the top of memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ram {
    pub buffer: [u8; consts::RAM_BYTES],
}

impl Default for Ram {
    fn default() -> Self {
        Ram {
            buffer: [0; consts::RAM_BYTES],
        }
    }
}

impl Ram {
    pub fn read(&self, addr: u16) -> u8 {
        self.buffer[(addr & consts::ADDR_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.buffer[(addr & consts::ADDR_MASK) as usize] = value;
    }

    /// big-endian opcode at `addr`
    pub fn read_word(&self, addr: u16) -> u16 {
        utils::word_from_bytes(&[self.read(addr), self.read(addr.wrapping_add(1))])
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    pub buffer: [[bool; consts::DISPL_WIDTH]; consts::DISPL_HEIGHT],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        DisplayBuffer {
            buffer: [[false; consts::DISPL_WIDTH]; consts::DISPL_HEIGHT],
        }
    }
}

impl DisplayBuffer {
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.buffer[y][x]
    }

    pub fn clear(&mut self) {
        self.buffer
            .iter_mut()
            .for_each(|row| *row = [false; consts::DISPL_WIDTH]);
    }

    pub fn lit_count(&self) -> usize {
        self.buffer.iter().flatten().filter(|px| **px).count()
    }
}

/// One flag per hex key. Written by the input adapter, read by the processor.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct KeyboardBuffer {
    pub buffer: [bool; consts::KEYBOARD_SIZE],
}

impl KeyboardBuffer {
    pub fn is_pressed(&self, key: u8) -> bool {
        self.buffer[(key & 0x0F) as usize]
    }

    /// Keys outside 0x0-0xF are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(state) = self.buffer.get_mut(key as usize) {
            *state = pressed;
        }
    }

    /// lowest-numbered key currently held
    pub fn first_pressed(&self) -> Option<u8> {
        self.buffer.iter().position(|k| *k).map(|i| i as u8)
    }

    pub fn release_all(&mut self) {
        self.buffer = [false; consts::KEYBOARD_SIZE];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_wraps_addresses() {
        let mut ram = Ram::default();
        ram.write(0x1005, 0xAB);
        assert_eq!(ram.buffer[0x005], 0xAB);
        assert_eq!(ram.read(0x0005), 0xAB);
    }

    #[test]
    fn test_read_word() {
        let mut ram = Ram::default();
        ram.buffer[0x200] = 0x12;
        ram.buffer[0x201] = 0x34;
        assert_eq!(ram.read_word(0x200), 0x1234);
    }

    #[test]
    fn test_read_word_at_top_of_memory() {
        let mut ram = Ram::default();
        ram.buffer[0xFFF] = 0x00;
        ram.buffer[0x000] = 0xE0;
        assert_eq!(ram.read_word(0xFFF), 0x00E0);
    }

    #[test]
    fn test_display_clear() {
        let mut display = DisplayBuffer::default();
        display.buffer[3][7] = true;
        display.buffer[31][63] = true;
        assert_eq!(display.lit_count(), 2);
        display.clear();
        assert_eq!(display.lit_count(), 0);
    }

    #[test]
    fn test_keyboard_first_pressed() {
        let mut keys = KeyboardBuffer::default();
        assert_eq!(keys.first_pressed(), None);
        keys.set(0xC, true);
        keys.set(0x3, true);
        assert_eq!(keys.first_pressed(), Some(0x3));
        keys.set(0x3, false);
        assert_eq!(keys.first_pressed(), Some(0xC));
        assert!(keys.is_pressed(0x1C));
    }

    #[test]
    fn test_keyboard_ignores_out_of_range_keys() {
        let mut keys = KeyboardBuffer::default();
        keys.set(0x17, true);
        keys.set(0xFF, true);
        assert_eq!(keys.first_pressed(), None);
        assert_eq!(keys, KeyboardBuffer::default());
    }
}
