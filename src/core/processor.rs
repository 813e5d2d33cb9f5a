use crate::consts;
use crate::core::instruction::Instruction;
use crate::core::quirks::Quirks;
use crate::core::{ram, rom};
use crate::error::{LoadError, MachineFault};
use crate::utils;
use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Ref, RefCell};
use std::io::Read;
use std::rc::Rc;

const OP: u16 = consts::OP_CODE_BYTES as u16;
const VF: usize = consts::FLAG_REGISTER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    RedrawScreen,
    Continue,
    /// FX0A found no key held; the same instruction runs again next cycle
    Waiting,
    /// latched until the next load
    Halted(MachineFault),
}

/// The whole machine. VF (`registers[0xF]`) is an ordinary register that
/// also receives carry, borrow, shifted-out bit and sprite collision.
///
/// The display and keyboard buffers are shared with the frontend: the
/// renderer only reads the display and the input adapter only writes keys,
/// always between cycles.
#[derive(Debug)]
pub struct Processor {
    pub stack: [u16; consts::STACK_SIZE],
    pub registers: [u8; consts::REG_COUNT],
    pub idx_register: u16,
    pub pc: u16,
    pub stack_pointer: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub ram: ram::Ram,
    pub display_buffer: Rc<RefCell<ram::DisplayBuffer>>,
    pub keyboard_buffer: Rc<RefCell<ram::KeyboardBuffer>>,
    pub quirks: Quirks,
    fault: Option<MachineFault>,
    seed: Option<u64>,
    rng: StdRng,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new(Quirks::default())
    }
}

impl Processor {
    pub fn new(quirks: Quirks) -> Self {
        Processor {
            stack: [0; consts::STACK_SIZE],
            registers: [0; consts::REG_COUNT],
            idx_register: 0,
            pc: consts::PROG_OFFSET as u16,
            stack_pointer: 0,
            delay_timer: 0,
            sound_timer: 0,
            ram: ram::Ram::default(),
            display_buffer: Rc::new(RefCell::new(ram::DisplayBuffer::default())),
            keyboard_buffer: Rc::new(RefCell::new(ram::KeyboardBuffer::default())),
            quirks,
            fault: None,
            seed: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed RNG stream for reproducible runs. The stream restarts on
    /// every load.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Puts every register, buffer and timer back to power-on state. The
    /// shared buffers are cleared in place so frontend handles stay valid.
    pub fn reset(&mut self) {
        self.stack = [0; consts::STACK_SIZE];
        self.registers = [0; consts::REG_COUNT];
        self.idx_register = 0;
        self.pc = consts::PROG_OFFSET as u16;
        self.stack_pointer = 0;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.ram.clear();
        self.display_buffer.borrow_mut().clear();
        self.keyboard_buffer.borrow_mut().release_all();
        self.fault = None;
        self.rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
    }

    /// Resets the machine, then copies the font and the program image.
    /// An oversized image is rejected before anything is touched.
    pub fn load(&mut self, rom: &rom::Rom) -> Result<(), LoadError> {
        if !rom.fits() {
            return Err(LoadError::TooLarge {
                size: rom.len(),
                max: consts::MAX_ROM_BYTES,
            });
        }
        self.reset();
        self.ram.buffer[consts::FONT_ADDR..consts::FONT_ADDR + consts::FONT_SET_SIZE]
            .copy_from_slice(&consts::FONT_SET);
        self.ram.buffer[consts::PROG_OFFSET..consts::PROG_OFFSET + rom.len()]
            .copy_from_slice(&rom.buffer);
        debug!("loaded {} byte program at {:#05x}", rom.len(), consts::PROG_OFFSET);
        Ok(())
    }

    pub fn load_program(&mut self, reader: &mut impl Read) -> Result<(), LoadError> {
        let rom = rom::Rom::from_reader(reader)?;
        self.load(&rom)
    }

    pub fn fault(&self) -> Option<MachineFault> {
        self.fault
    }

    pub fn display(&self) -> Ref<'_, ram::DisplayBuffer> {
        self.display_buffer.borrow()
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keyboard_buffer.borrow_mut().set(key, pressed);
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// One 60 Hz tick. Returns whether the tone should be playing.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
        self.sound_active()
    }

    fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(OP) & consts::ADDR_MASK;
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.advance();
        }
    }

    fn halt(&mut self, fault: MachineFault) -> CycleStatus {
        error!("{}", fault);
        self.fault = Some(fault);
        CycleStatus::Halted(fault)
    }

    /// Fetch, decode and execute exactly one instruction.
    pub fn cycle(&mut self) -> CycleStatus {
        if let Some(fault) = self.fault {
            return CycleStatus::Halted(fault);
        }

        let inst_pc = self.pc & consts::ADDR_MASK;
        let inst = Instruction::decode(self.ram.read_word(inst_pc));
        self.pc = inst_pc;
        self.advance();
        trace!("{:#05x}: {:04x} {}", inst_pc, inst.opcode, inst);

        let (x, y) = (inst.x as usize, inst.y as usize);
        let (vx, vy) = (self.registers[x], self.registers[y]);

        match (inst.group, inst.x, inst.y, inst.n) {
            // Clears screen
            (0, _, 0xE, 0) => {
                self.display_buffer.borrow_mut().clear();
                return CycleStatus::RedrawScreen;
            }

            // Subroutines: exit and enter
            (0, _, 0xE, 0xE) => {
                let top = (self.stack_pointer as usize).checked_sub(1);
                match top.and_then(|i| self.stack.get(i).copied()) {
                    Some(addr) => {
                        self.stack_pointer -= 1;
                        self.pc = addr;
                    }
                    None if self.stack_pointer == 0 => {
                        self.pc = inst_pc;
                        return self.halt(MachineFault::StackUnderflow { pc: inst_pc });
                    }
                    // stack pointer set past the stack from outside
                    None => {
                        self.pc = inst_pc;
                        return self.halt(MachineFault::StackOverflow { pc: inst_pc });
                    }
                }
            }
            (2, _, _, _) => {
                if self.stack_pointer as usize >= consts::STACK_SIZE {
                    self.pc = inst_pc;
                    return self.halt(MachineFault::StackOverflow { pc: inst_pc });
                }
                self.stack[self.stack_pointer as usize] = self.pc;
                self.stack_pointer += 1;
                self.pc = inst.nnn;
            }

            // Jumps
            (1, _, _, _) => {
                self.pc = inst.nnn;
            }
            (0xB, _, _, _) => {
                self.pc = inst.nnn.wrapping_add(self.registers[0] as u16) & consts::ADDR_MASK;
            }

            // Conditional skips
            (3, _, _, _) => self.skip_if(vx == inst.nn),
            (4, _, _, _) => self.skip_if(vx != inst.nn),
            (5, _, _, _) => self.skip_if(vx == vy),
            (9, _, _, _) => self.skip_if(vx != vy),

            // Set register
            (6, _, _, _) => {
                self.registers[x] = inst.nn;
            }
            (8, _, _, 0) => {
                self.registers[x] = vy;
            }
            (0xA, _, _, _) => {
                self.idx_register = inst.nnn;
            }

            // Add/subtract instructions. VF is written before VX, from the
            // operand values read above.
            (7, _, _, _) => {
                self.registers[x] = vx.wrapping_add(inst.nn);
            }
            (8, _, _, 4) => {
                let (sum, carry) = vx.overflowing_add(vy);
                self.registers[VF] = carry as u8;
                self.registers[x] = sum;
            }
            (8, _, _, 5) => {
                self.registers[VF] = (vx >= vy) as u8;
                self.registers[x] = vx.wrapping_sub(vy);
            }
            (8, _, _, 7) => {
                self.registers[VF] = (vy >= vx) as u8;
                self.registers[x] = vy.wrapping_sub(vx);
            }

            // Logical instructions
            (8, _, _, 1) => {
                self.registers[x] = vx | vy;
            }
            (8, _, _, 2) => {
                self.registers[x] = vx & vy;
            }
            (8, _, _, 3) => {
                self.registers[x] = vx ^ vy;
            }

            // Shifting instructions
            (8, _, _, 6) => {
                let src = if self.quirks.shift_uses_vy { vy } else { vx };
                self.registers[VF] = src & 0b0000_0001;
                self.registers[x] = src >> 1;
            }
            (8, _, _, 0xE) => {
                let src = if self.quirks.shift_uses_vy { vy } else { vx };
                self.registers[VF] = (src & 0b1000_0000) >> 7;
                self.registers[x] = src << 1;
            }

            // Generate randomness
            (0xC, _, _, _) => {
                let rand_val: u8 = self.rng.gen();
                self.registers[x] = rand_val & inst.nn;
            }

            // Draw on display
            (0xD, _, _, _) => {
                self.draw_sprite(vx, vy, inst.n);
                return CycleStatus::RedrawScreen;
            }

            // Skip on keypress
            (0xE, _, 9, 0xE) => {
                let pressed = self.keyboard_buffer.borrow().is_pressed(vx);
                self.skip_if(pressed);
            }
            (0xE, _, 0xA, 1) => {
                let pressed = self.keyboard_buffer.borrow().is_pressed(vx);
                self.skip_if(!pressed);
            }

            // Halt till keypress, re-running this instruction meanwhile
            (0xF, _, 0, 0xA) => {
                let first = self.keyboard_buffer.borrow().first_pressed();
                match first {
                    Some(key) => self.registers[x] = key,
                    None => {
                        self.pc = inst_pc;
                        return CycleStatus::Waiting;
                    }
                }
            }

            // Change timers (delay/sound)
            (0xF, _, 0, 7) => {
                self.registers[x] = self.delay_timer;
            }
            (0xF, _, 1, 5) => {
                self.delay_timer = vx;
            }
            (0xF, _, 1, 8) => {
                self.sound_timer = vx;
            }

            // Update index register, VF untouched
            (0xF, _, 1, 0xE) => {
                self.idx_register = self.idx_register.wrapping_add(vx as u16);
            }

            // Point index to font character
            (0xF, _, 2, 9) => {
                self.idx_register =
                    (consts::FONT_ADDR + (vx & 0x0F) as usize * consts::FONT_GLYPH_BYTES) as u16;
            }

            // Binary byte to decimal digits
            (0xF, _, 3, 3) => {
                for (offset, digit) in utils::bcd_split(vx).into_iter().enumerate() {
                    self.ram
                        .write(self.idx_register.wrapping_add(offset as u16), digit);
                }
            }

            // Store and load memory
            (0xF, _, 5, 5) => {
                for i in 0..=x {
                    self.ram
                        .write(self.idx_register.wrapping_add(i as u16), self.registers[i]);
                }
                if self.quirks.load_store_increments_index {
                    self.idx_register = self.idx_register.wrapping_add(x as u16 + 1);
                }
            }
            (0xF, _, 6, 5) => {
                for i in 0..=x {
                    self.registers[i] = self.ram.read(self.idx_register.wrapping_add(i as u16));
                }
                if self.quirks.load_store_increments_index {
                    self.idx_register = self.idx_register.wrapping_add(x as u16 + 1);
                }
            }

            // Machine language routines (0NNN) and everything else: no-op
            (_, _, _, _) => {
                debug!("ignoring undefined opcode {:04x} at {:#05x}", inst.opcode, inst_pc);
            }
        }
        CycleStatus::Continue
    }

    /// XOR `height` rows from I onto the display at (vx, vy), origin taken
    /// modulo the screen. Rows past the bottom edge and columns past the
    /// right edge are clipped, never wrapped. VF = 1 on any collision.
    fn draw_sprite(&mut self, vx: u8, vy: u8, height: u8) {
        let x_coord = vx as usize % consts::DISPL_WIDTH;
        let y_coord = vy as usize % consts::DISPL_HEIGHT;
        let mut collision = false;
        {
            let mut display = self.display_buffer.borrow_mut();
            for row in 0..height as usize {
                let py = y_coord + row;
                if py >= consts::DISPL_HEIGHT {
                    break;
                }
                let sprite_val = self.ram.read(self.idx_register.wrapping_add(row as u16));
                for shift_pos in 0..8 {
                    let px = x_coord + shift_pos;
                    if !utils::bounds_check(px, py, consts::DISPL_WIDTH, consts::DISPL_HEIGHT) {
                        break;
                    }
                    if sprite_val & (0x80 >> shift_pos) != 0 {
                        let pixel = &mut display.buffer[py][px];
                        collision |= *pixel;
                        *pixel = !*pixel;
                    }
                }
            }
        }
        self.registers[VF] = collision as u8;
    }
}
