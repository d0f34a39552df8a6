// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements the deterministic core of a Chip-8 interpreter:
//! memory, registers, the fetch-decode-execute cycle, the display, and the timers.
//!
//! Rendering, keyboard capture, ROM acquisition and pacing are left to the host,
//! which drives a [Chip8] with [Chip8::step] and [Chip8::tick_timers].

pub mod cpu;
pub mod dump;
pub mod error;
pub mod font;
pub mod keypad;
pub mod screen;
pub mod state;
pub mod timer;

use cpu::{mem::Mem, CPU};
use error::Result;
use keypad::Keypad;
use screen::Screen;
use state::RunState;
use timer::Timers;

/// A whole Chip-8 machine: memory, CPU, screen, timers, and keypad
///
/// # Examples
/// ```rust
/// # use chip8_core::prelude::*;
/// # fn main() -> Result<()> {
/// let mut ch8 = Chip8::default();
/// ch8.load_program(&[
///     0x60, 0x05, // mov #05, v0
///     0x12, 0x02, // jmp 202
/// ])?;
/// ch8.multistep(8)?;
/// assert_eq!(5, ch8.cpu.v()[0]);
/// assert_eq!(RunState::Running, ch8.run_state());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chip8 {
    pub cpu: CPU,
    pub mem: Mem,
    pub screen: Screen,
    pub timers: Timers,
    pub keypad: Keypad,
    state: RunState,
}

impl Chip8 {
    /// Constructs a machine with a blank `width`x`height` screen,
    /// and the built-in font loaded.  
    /// If either dimension is zero, returns [error::Error::InvalidScreenSize]
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Chip8::with_screen(Screen::new(width, height)?))
    }

    fn with_screen(screen: Screen) -> Self {
        let mut mem = Mem::new();
        mem.load(&font::FONT, &[])
            .expect("The built-in font should fit in the charset region");
        Chip8 {
            cpu: CPU::default(),
            mem,
            screen,
            timers: Timers::default(),
            keypad: Keypad::default(),
            state: RunState::Running,
        }
    }

    /// Loads a font and a program, and resets the machine to run it from 0x200
    ///
    /// On error, the machine is left untouched.
    pub fn load(&mut self, font: &[u8], program: &[u8]) -> Result<&mut Self> {
        self.mem.load(font, program)?;
        self.cpu.reset();
        self.screen.clear();
        self.timers = Timers::default();
        self.state = RunState::Running;
        Ok(self)
    }

    /// Loads a program alongside the built-in font
    pub fn load_program(&mut self, program: &[u8]) -> Result<&mut Self> {
        self.load(&font::FONT, program)
    }

    /// Executes one instruction, and reports the resulting [RunState]
    ///
    /// Does nothing while paused or quit. Any fault moves the machine
    /// to [RunState::Quit] and is returned. Landing on a breakpoint pauses.
    /// # Examples
    /// ```rust
    /// # use chip8_core::prelude::*;
    /// let mut ch8 = Chip8::default();
    /// ch8.load_program(&[0xff, 0xff]).unwrap();
    /// assert!(ch8.step().is_err());
    /// assert_eq!(RunState::Quit, ch8.run_state());
    /// ```
    pub fn step(&mut self) -> Result<RunState> {
        if self.state != RunState::Running {
            return Ok(self.state);
        }
        if let Err(e) = self.cpu.tick(&mut self.mem, &mut self.screen) {
            self.state = RunState::Quit;
            return Err(e);
        }
        if self.cpu.at_breakpoint() {
            self.state = RunState::Paused;
        }
        Ok(self.state)
    }

    /// Executes up to `steps` instructions, stopping early if the machine
    /// stops running
    pub fn multistep(&mut self, steps: usize) -> Result<RunState> {
        for _ in 0..steps {
            if self.step()? != RunState::Running {
                break;
            }
        }
        Ok(self.state)
    }

    /// Counts the delay and sound timers down by one.
    ///
    /// The host should call this at 60Hz, independent of [Chip8::step]
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Gets the current [RunState]
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Pauses a running machine
    /// # Examples
    /// ```rust
    /// # use chip8_core::prelude::*;
    /// let mut ch8 = Chip8::default();
    /// ch8.pause();
    /// assert_eq!(RunState::Paused, ch8.step().unwrap());
    /// assert_eq!(0x200, ch8.cpu.pc());
    /// ch8.resume();
    /// assert_eq!(RunState::Running, ch8.run_state());
    /// ```
    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
        }
    }

    /// Resumes a paused machine. A quit machine stays quit.
    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
        }
    }
}

impl Default for Chip8 {
    /// A 64x32 machine with the built-in font
    fn default() -> Self {
        Chip8::with_screen(Screen::default())
    }
}

/// Common imports for chip8_core
pub mod prelude {
    pub use super::Chip8;
    use super::*;
    pub use cpu::{
        flags::Flags,
        instruction::{decode, Insn, InstructionWord},
        mem::{Mem, Region},
        CPU,
    };
    pub use dump::{Dumpable, HexDump};
    pub use error::{Error, Result};
    pub use keypad::Keypad;
    pub use screen::Screen;
    pub use state::RunState;
    pub use timer::Timers;
}
