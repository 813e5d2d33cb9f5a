use std::fmt;

use crate::utils;

/// Fields of one fetched opcode. Rebuilt every cycle, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u16,
    /// top nibble, selects the instruction group
    pub group: u8,
    pub nnn: u16,
    pub nn: u8,
    pub n: u8,
    pub x: u8,
    pub y: u8,
}

impl Instruction {
    pub fn decode(opcode: u16) -> Self {
        let (group, x, y, n) = utils::nibble_split(opcode);
        Instruction {
            opcode,
            group,
            nnn: opcode & 0x0FFF,
            nn: (opcode & 0x00FF) as u8,
            n,
            x,
            y,
        }
    }
}

/// Assembly-style rendering used by the execution trace.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Instruction {
            group,
            nnn,
            nn,
            n,
            x,
            y,
            ..
        } = *self;
        match (group, nn, n) {
            (0x0, 0xE0, _) => write!(f, "CLS"),
            (0x0, 0xEE, _) => write!(f, "RET"),
            (0x1, _, _) => write!(f, "JP {:#05x}", nnn),
            (0x2, _, _) => write!(f, "CALL {:#05x}", nnn),
            (0x3, _, _) => write!(f, "SE V{:X}, {:#04x}", x, nn),
            (0x4, _, _) => write!(f, "SNE V{:X}, {:#04x}", x, nn),
            (0x5, _, _) => write!(f, "SE V{:X}, V{:X}", x, y),
            (0x6, _, _) => write!(f, "LD V{:X}, {:#04x}", x, nn),
            (0x7, _, _) => write!(f, "ADD V{:X}, {:#04x}", x, nn),
            (0x8, _, 0x0) => write!(f, "LD V{:X}, V{:X}", x, y),
            (0x8, _, 0x1) => write!(f, "OR V{:X}, V{:X}", x, y),
            (0x8, _, 0x2) => write!(f, "AND V{:X}, V{:X}", x, y),
            (0x8, _, 0x3) => write!(f, "XOR V{:X}, V{:X}", x, y),
            (0x8, _, 0x4) => write!(f, "ADD V{:X}, V{:X}", x, y),
            (0x8, _, 0x5) => write!(f, "SUB V{:X}, V{:X}", x, y),
            (0x8, _, 0x6) => write!(f, "SHR V{:X}, V{:X}", x, y),
            (0x8, _, 0x7) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            (0x8, _, 0xE) => write!(f, "SHL V{:X}, V{:X}", x, y),
            (0x9, _, _) => write!(f, "SNE V{:X}, V{:X}", x, y),
            (0xA, _, _) => write!(f, "LD I, {:#05x}", nnn),
            (0xB, _, _) => write!(f, "JP V0, {:#05x}", nnn),
            (0xC, _, _) => write!(f, "RND V{:X}, {:#04x}", x, nn),
            (0xD, _, _) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            (0xE, 0x9E, _) => write!(f, "SKP V{:X}", x),
            (0xE, 0xA1, _) => write!(f, "SKNP V{:X}", x),
            (0xF, 0x07, _) => write!(f, "LD V{:X}, DT", x),
            (0xF, 0x0A, _) => write!(f, "LD V{:X}, K", x),
            (0xF, 0x15, _) => write!(f, "LD DT, V{:X}", x),
            (0xF, 0x18, _) => write!(f, "LD ST, V{:X}", x),
            (0xF, 0x1E, _) => write!(f, "ADD I, V{:X}", x),
            (0xF, 0x29, _) => write!(f, "LD F, V{:X}", x),
            (0xF, 0x33, _) => write!(f, "LD B, V{:X}", x),
            (0xF, 0x55, _) => write!(f, "LD [I], V{:X}", x),
            (0xF, 0x65, _) => write!(f, "LD V{:X}, [I]", x),
            _ => write!(f, "DW {:#06x}", self.opcode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fields() {
        let inst = Instruction::decode(0xD12F);
        assert_eq!(inst.opcode, 0xD12F);
        assert_eq!(inst.group, 0xD);
        assert_eq!(inst.nnn, 0x12F);
        assert_eq!(inst.nn, 0x2F);
        assert_eq!(inst.n, 0xF);
        assert_eq!(inst.x, 0x1);
        assert_eq!(inst.y, 0x2);
    }

    #[test]
    fn test_decode_extremes() {
        let zero = Instruction::decode(0x0000);
        assert_eq!((zero.group, zero.nnn, zero.nn, zero.n), (0, 0, 0, 0));
        let ones = Instruction::decode(0xFFFF);
        assert_eq!(ones.nnn, 0xFFF);
        assert_eq!(ones.nn, 0xFF);
        assert_eq!((ones.x, ones.y, ones.n), (0xF, 0xF, 0xF));
    }

    #[test]
    fn test_disassembly() {
        assert_eq!(Instruction::decode(0x00E0).to_string(), "CLS");
        assert_eq!(Instruction::decode(0x1234).to_string(), "JP 0x234");
        assert_eq!(Instruction::decode(0x8AB4).to_string(), "ADD VA, VB");
        assert_eq!(Instruction::decode(0xD015).to_string(), "DRW V0, V1, 5");
        assert_eq!(Instruction::decode(0xF30A).to_string(), "LD V3, K");
        assert_eq!(Instruction::decode(0x6C07).to_string(), "LD VC, 0x07");
    }

    #[test]
    fn test_disassembly_of_undefined_opcode() {
        assert_eq!(Instruction::decode(0xE000).to_string(), "DW 0xe000");
        assert_eq!(Instruction::decode(0x8008).to_string(), "DW 0x8008");
    }
}
