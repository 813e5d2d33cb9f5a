use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use crate::core::ram::KeyboardBuffer;
use crate::error::EmulatorError;
use std::cell::RefCell;
use std::rc::Rc;

/// What the driver loop should do after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Continue,
    TogglePause,
    Quit,
}

/// Hex keypad on the left side of a QWERTY keyboard:
///
/// ```text
/// 1 2 3 C    1 2 3 4
/// 4 5 6 D    Q W E R
/// 7 8 9 E    A S D F
/// A 0 B F    Z X C V
/// ```
pub fn keypad_index(key: Keycode) -> Option<u8> {
    match key {
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Num4 => Some(0xC),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::R => Some(0xD),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::F => Some(0xE),
        Keycode::Z => Some(0xA),
        Keycode::X => Some(0x0),
        Keycode::C => Some(0xB),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

pub struct KeyboardDriver {
    events: sdl2::EventPump,
    pub keyboard_buffer: Rc<RefCell<KeyboardBuffer>>,
}

impl KeyboardDriver {
    pub fn new(
        context: &sdl2::Sdl,
        keyboard_buffer_: &Rc<RefCell<KeyboardBuffer>>,
    ) -> Result<Self, EmulatorError> {
        Ok(KeyboardDriver {
            events: context.event_pump().map_err(EmulatorError::Sdl)?,
            keyboard_buffer: Rc::clone(keyboard_buffer_),
        })
    }

    /// Drains pending events into the keypad.
    pub fn poll(&mut self) -> Command {
        let mut command = Command::Continue;
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return Command::Quit,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    repeat: false,
                    ..
                } => {
                    command = match command {
                        Command::TogglePause => Command::Continue,
                        _ => Command::TogglePause,
                    };
                }
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(i) = keypad_index(key) {
                        self.keyboard_buffer.borrow_mut().set(i, true);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(i) = keypad_index(key) {
                        self.keyboard_buffer.borrow_mut().set(i, false);
                    }
                }
                _ => continue,
            }
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_layout() {
        let rows = [
            [Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4],
            [Keycode::Q, Keycode::W, Keycode::E, Keycode::R],
            [Keycode::A, Keycode::S, Keycode::D, Keycode::F],
            [Keycode::Z, Keycode::X, Keycode::C, Keycode::V],
        ];
        let expected = [
            [0x1, 0x2, 0x3, 0xC],
            [0x4, 0x5, 0x6, 0xD],
            [0x7, 0x8, 0x9, 0xE],
            [0xA, 0x0, 0xB, 0xF],
        ];
        for (keys, hex) in rows.iter().zip(expected.iter()) {
            for (key, value) in keys.iter().zip(hex.iter()) {
                assert_eq!(keypad_index(*key), Some(*value));
            }
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(keypad_index(Keycode::P), None);
        assert_eq!(keypad_index(Keycode::Space), None);
        assert_eq!(keypad_index(Keycode::Escape), None);
    }
}
