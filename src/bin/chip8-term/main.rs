// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! chip8-term: runs a Chip-8 program headless, then prints the screen to the terminal

use chip8_core::{cpu::mem::PROGRAM_START, error::Result, prelude::*};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{
    fs::read,
    path::PathBuf,
    time::{Duration, Instant},
};

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let mut state = State::new(options)?;
    if let Err(e) = state.run() {
        eprintln!("{}", e.bold().red());
    }
    print!("{}", state.ch8.screen);
    if state.debug {
        state.ch8.cpu.dump();
    }
    Ok(())
}

/// Parses a hexadecimal string into a u16
fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

/// Parses a hexadecimal key name
fn parse_key(value: &str) -> std::result::Result<usize, std::num::ParseIntError> {
    usize::from_str_radix(value, 16)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,

    #[options(help = "Set the number of frames to run.", default = "600", meta = "N")]
    pub frames: usize,
    #[options(help = "Set the instructions-per-frame rate.", default = "10", meta = "IPF")]
    pub ipf: usize,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub rate: u64,
    #[options(no_short, help = "Sleep between frames, to run in real time.")]
    pub realtime: bool,
    #[options(no_short, help = "Print a hexdump of the ROM before running it.")]
    pub dump: bool,

    #[options(
        long = "break",
        help = "Set breakpoints for the emulator to stop at.",
        parse(try_from_str = "parse_hex"),
        meta = "BP"
    )]
    pub breakpoints: Vec<u16>,
    #[options(
        short = "k",
        help = "Hold down a key for the whole run.",
        parse(try_from_str = "parse_key"),
        meta = "KEY"
    )]
    pub press: Vec<usize>,
}

#[derive(Debug)]
struct State {
    pub frames: usize,
    pub ipf: usize,
    pub rate: u64,
    pub realtime: bool,
    pub debug: bool,
    pub ch8: Chip8,
    pub ft: Instant,
}

impl State {
    fn new(options: Arguments) -> Result<Self> {
        let mut ch8 = Chip8::default();
        let rom = read(&options.file)?;
        ch8.load_program(&rom)?;
        if options.dump {
            let start = PROGRAM_START as usize;
            ch8.mem.dump(start..start + rom.len())?;
        }
        ch8.cpu.flags = Flags {
            debug: options.debug,
        };
        for point in options.breakpoints {
            ch8.cpu.set_break(point);
        }
        for key in options.press {
            ch8.keypad.press(key)?;
        }
        Ok(State {
            frames: options.frames,
            ipf: options.ipf,
            rate: options.rate.max(1),
            realtime: options.realtime,
            debug: options.debug,
            ch8,
            ft: Instant::now(),
        })
    }

    /// Runs the machine for the configured number of frames,
    /// ticking the timers once per frame
    fn run(&mut self) -> Result<()> {
        for _ in 0..self.frames {
            if self.realtime {
                self.wait_for_next_frame();
            }
            match self.ch8.multistep(self.ipf)? {
                RunState::Paused => {
                    eprintln!("Breakpoint hit: {:03x}", self.ch8.cpu.pc());
                    if self.debug {
                        self.ch8.cpu.dump();
                    }
                    self.ch8.resume();
                }
                RunState::Quit => break,
                RunState::Running => (),
            }
            self.ch8.tick_timers();
        }
        Ok(())
    }

    fn wait_for_next_frame(&mut self) {
        let rate = Duration::from_nanos(1_000_000_000 / self.rate + 1);
        std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
        self.ft += rate;
    }
}
