use crate::error::EmulatorError;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44100;

/// Square wave generator fed to the SDL audio thread.
pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: i16,
}

impl SquareWave {
    pub fn new(tone_hz: u32, sample_rate: i32, volume: i16) -> Self {
        SquareWave {
            phase_inc: tone_hz as f32 / sample_rate as f32,
            phase: 0.0,
            volume,
        }
    }
}

impl AudioCallback for SquareWave {
    type Channel = i16;

    fn callback(&mut self, out: &mut [i16]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                self.volume.saturating_neg()
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// Continuous tone, gated by the sound timer.
pub struct AudioDriver {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl AudioDriver {
    pub fn new(context: &sdl2::Sdl, tone_hz: u32, volume: i16) -> Result<Self, EmulatorError> {
        let audio_subsystem = context.audio().map_err(EmulatorError::Sdl)?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem
            .open_playback(None, &desired, |spec| {
                SquareWave::new(tone_hz, spec.freq, volume)
            })
            .map_err(EmulatorError::Sdl)?;
        Ok(AudioDriver {
            device,
            playing: false,
        })
    }

    pub fn gate(&mut self, on: bool) {
        if on == self.playing {
            return;
        }
        if on {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave_alternates() {
        // 4 samples per period
        let mut wave = SquareWave::new(11025, SAMPLE_RATE, 100);
        let mut out = [0i16; 8];
        wave.callback(&mut out);
        assert_eq!(out, [100, 100, -100, -100, 100, 100, -100, -100]);
    }

    #[test]
    fn test_square_wave_min_volume_saturates() {
        let mut wave = SquareWave::new(11025, SAMPLE_RATE, i16::MIN);
        let mut out = [0i16; 4];
        wave.callback(&mut out);
        assert_eq!(out, [i16::MIN, i16::MIN, i16::MAX, i16::MAX]);
    }

    #[test]
    fn test_square_wave_continues_across_buffers() {
        let mut wave = SquareWave::new(11025, SAMPLE_RATE, 7);
        let mut first = [0i16; 3];
        let mut second = [0i16; 3];
        wave.callback(&mut first);
        wave.callback(&mut second);
        assert_eq!(first, [7, 7, -7]);
        assert_eq!(second, [-7, 7, 7]);
    }
}
