/// Behaviors that differ between historical interpreters. The defaults are
/// the CHIP-48/SUPER-CHIP ("modern") variants.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6 / 8XYE copy VY into VX before shifting (COSMAC VIP).
    /// When false only VX is shifted and VY is ignored.
    pub shift_uses_vy: bool,
    /// FX55 / FX65 leave I pointing past the last register transferred
    /// (I = I + X + 1).
    pub load_store_increments_index: bool,
}

impl Quirks {
    pub fn legacy() -> Self {
        Quirks {
            shift_uses_vy: true,
            load_store_increments_index: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_modern() {
        let q = Quirks::default();
        assert!(!q.shift_uses_vy);
        assert!(!q.load_store_increments_index);
    }

    #[test]
    fn test_legacy() {
        let q = Quirks::legacy();
        assert!(q.shift_uses_vy && q.load_store_increments_index);
    }
}
