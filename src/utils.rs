use crate::consts;

pub fn nibble_split(word: u16) -> (u8, u8, u8, u8) {
    let bytes = word.to_be_bytes();
    (
        (bytes[0] & 0xF0) >> 4,
        bytes[0] & 0x0F,
        (bytes[1] & 0xF0) >> 4,
        bytes[1] & 0x0F,
    )
}

pub fn word_from_bytes(bytes: &[u8]) -> u16 {
    assert!(bytes.len() == consts::OP_CODE_BYTES);
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// hundreds, tens, ones
pub fn bcd_split(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}

pub fn bounds_check(x: usize, y: usize, width: usize, height: usize) -> bool {
    x < width && y < height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_split() {
        assert_eq!(nibble_split(0xD12F), (0xD, 0x1, 0x2, 0xF));
        assert_eq!(nibble_split(0x0000), (0, 0, 0, 0));
    }

    #[test]
    fn test_word_from_bytes_big_endian() {
        assert_eq!(word_from_bytes(&[0xA2, 0xF0]), 0xA2F0);
    }

    #[test]
    #[should_panic]
    fn test_word_from_bytes_wrong_len() {
        word_from_bytes(&[0x00, 0x01, 0x02]);
    }

    #[test]
    fn test_bcd_split() {
        assert_eq!(bcd_split(0), [0, 0, 0]);
        assert_eq!(bcd_split(7), [0, 0, 7]);
        assert_eq!(bcd_split(42), [0, 4, 2]);
        assert_eq!(bcd_split(255), [2, 5, 5]);
    }

    #[test]
    fn test_bounds_check() {
        assert!(bounds_check(0, 0, 64, 32));
        assert!(bounds_check(63, 31, 64, 32));
        assert!(!bounds_check(64, 0, 64, 32));
        assert!(!bounds_check(0, 32, 64, 32));
    }
}
