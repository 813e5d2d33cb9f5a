use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::core::quirks::Quirks;

#[derive(Parser, Debug, Clone)]
#[command(name = "chip8vm")]
#[command(about = "A CHIP-8 virtual machine")]
pub struct Args {
    /// Program image to run
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock_hz: u32,

    /// Frames per second; timers tick once per frame
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Window pixels per machine pixel
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Lit pixel color, RRGGBBAA hex
    #[arg(long, default_value = "FFFFFFFF", value_parser = parse_rgba)]
    pub foreground: u32,

    /// Background color, RRGGBBAA hex
    #[arg(long, default_value = "000000FF", value_parser = parse_rgba)]
    pub background: u32,

    /// Tone amplitude
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(i16).range(0..))]
    pub volume: i16,

    /// Tone frequency
    #[arg(long, default_value_t = 440)]
    pub tone_hz: u32,

    /// Shift VY into VX for 8XY6/8XYE (COSMAC VIP behavior)
    #[arg(long)]
    pub shift_uses_vy: bool,

    /// Advance I past the registers moved by FX55/FX65 (COSMAC VIP behavior)
    #[arg(long)]
    pub load_store_increments_index: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn quirks(&self) -> Quirks {
        Quirks {
            shift_uses_vy: self.shift_uses_vy,
            load_store_increments_index: self.load_store_increments_index,
        }
    }

    pub fn cycles_per_frame(&self) -> u32 {
        (self.clock_hz / self.fps).max(1)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

/// Accepts `RRGGBBAA` or `RRGGBB` (opaque), with an optional `#` or `0x`.
pub fn parse_rgba(s: &str) -> Result<u32, String> {
    let digits = s
        .trim_start_matches('#')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    let value = u32::from_str_radix(digits, 16).map_err(|e| format!("{s:?}: {e}"))?;
    match digits.len() {
        8 => Ok(value),
        6 => Ok((value << 8) | 0xFF),
        _ => Err(format!("{s:?}: expected RRGGBB or RRGGBBAA")),
    }
}
