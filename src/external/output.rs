use crate::consts;
use crate::core::ram::DisplayBuffer;
use crate::error::EmulatorError;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::cell::RefCell;
use std::rc::Rc;

const WINDOW_TITLE: &str = "CHIP-8 Emulator";

/// RRGGBBAA packed color
pub fn rgba(color: u32) -> Color {
    let [r, g, b, a] = color.to_be_bytes();
    Color::RGBA(r, g, b, a)
}

/// Renders the shared display buffer, one `scale`-sized square per pixel.
pub struct DisplayDriver {
    pub screen: Canvas<Window>,
    pub display_buffer: Rc<RefCell<DisplayBuffer>>,
    scale: u32,
    foreground: Color,
    background: Color,
}

impl DisplayDriver {
    pub fn new(
        context: &sdl2::Sdl,
        display_buffer_: &Rc<RefCell<DisplayBuffer>>,
        scale: u32,
        foreground: u32,
        background: u32,
    ) -> Result<Self, EmulatorError> {
        let video_subsystem = context.video().map_err(EmulatorError::Sdl)?;
        let window = video_subsystem
            .window(
                WINDOW_TITLE,
                consts::DISPL_WIDTH as u32 * scale,
                consts::DISPL_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| EmulatorError::Sdl(e.to_string()))?;
        let mut canvas: Canvas<Window> = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| EmulatorError::Sdl(e.to_string()))?;

        let background = rgba(background);
        canvas.set_draw_color(background);
        canvas.clear();
        canvas.present();

        Ok(DisplayDriver {
            screen: canvas,
            display_buffer: Rc::clone(display_buffer_),
            scale,
            foreground: rgba(foreground),
            background,
        })
    }

    pub fn draw(&mut self) -> Result<(), EmulatorError> {
        self.screen.set_draw_color(self.background);
        self.screen.clear();

        for (y, row) in self.display_buffer.borrow().buffer.iter().enumerate() {
            for (x, &lit) in row.iter().enumerate() {
                if !lit {
                    continue;
                }
                let rect = Rect::new(
                    (x as u32 * self.scale) as i32,
                    (y as u32 * self.scale) as i32,
                    self.scale,
                    self.scale,
                );
                self.screen.set_draw_color(self.foreground);
                self.screen.fill_rect(rect).map_err(EmulatorError::Sdl)?;
                // pixel outline
                self.screen.set_draw_color(self.background);
                self.screen.draw_rect(rect).map_err(EmulatorError::Sdl)?;
            }
        }
        self.screen.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_unpacks_channels() {
        assert_eq!(rgba(0x11223344), Color::RGBA(0x11, 0x22, 0x33, 0x44));
        assert_eq!(rgba(0x000000FF), Color::RGBA(0, 0, 0, 255));
    }
}
