use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::config::Args;
use crate::core::processor::{CycleStatus, Processor};
use crate::error::EmulatorError;
use crate::external::audio::AudioDriver;
use crate::external::input::{Command, KeyboardDriver};
use crate::external::output::DisplayDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulatorState {
    Running,
    Paused,
    Quit,
}

/// Owns the machine and its SDL collaborators, and paces them: every frame
/// it polls input, runs a fixed batch of cycles, ticks the timers once, gates
/// the tone and renders.
pub struct Emulator {
    processor: Processor,
    display: DisplayDriver,
    keyboard: KeyboardDriver,
    audio: AudioDriver,
    state: EmulatorState,
    cycles_per_frame: u32,
    frame: Duration,
    _context: sdl2::Sdl,
}

impl Emulator {
    pub fn new(args: &Args, processor: Processor) -> Result<Self, EmulatorError> {
        let context = sdl2::init().map_err(EmulatorError::Sdl)?;
        let display = DisplayDriver::new(
            &context,
            &processor.display_buffer,
            args.scale,
            args.foreground,
            args.background,
        )?;
        let keyboard = KeyboardDriver::new(&context, &processor.keyboard_buffer)?;
        let audio = AudioDriver::new(&context, args.tone_hz, args.volume)?;
        Ok(Emulator {
            processor,
            display,
            keyboard,
            audio,
            state: EmulatorState::Running,
            cycles_per_frame: args.cycles_per_frame(),
            frame: args.frame_duration(),
            _context: context,
        })
    }

    pub fn run(&mut self) -> Result<(), EmulatorError> {
        while self.state != EmulatorState::Quit {
            let frame_start = Instant::now();

            match self.keyboard.poll() {
                Command::Quit => self.state = EmulatorState::Quit,
                Command::TogglePause => self.toggle_pause(),
                Command::Continue => {}
            }

            if self.state == EmulatorState::Running {
                self.run_frame()?;
            }

            if let Some(rest) = self.frame.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
        self.audio.gate(false);
        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            EmulatorState::Running => {
                info!("paused");
                self.audio.gate(false);
                EmulatorState::Paused
            }
            EmulatorState::Paused => {
                info!("resumed");
                EmulatorState::Running
            }
            EmulatorState::Quit => EmulatorState::Quit,
        };
    }

    fn run_frame(&mut self) -> Result<(), EmulatorError> {
        for _ in 0..self.cycles_per_frame {
            if let CycleStatus::Halted(fault) = self.processor.cycle() {
                self.audio.gate(false);
                self.display.draw()?;
                return Err(fault.into());
            }
        }
        let beeping = self.processor.tick_timers();
        self.audio.gate(beeping);
        self.display.draw()
    }
}
