// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Dumps memory to stdout as big-endian words

use crate::{cpu::mem::Mem, error::Result};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Number of words printed on each line of a [HexDump]
pub const WORDS_PER_LINE: usize = 8;

/// Prints a hexdump of a range within the `Dumpable`
///
/// # Examples
/// ```rust
/// # use chip8_core::prelude::*;
/// # fn main() -> Result<()> {
/// let mut mem = Mem::new();
/// mem.load(&[], &[0x00, 0xe0, 0x12, 0x00])?;
/// // Dumps the loaded program
/// mem.dump(0x200..0x204)?;
/// # Ok(())
/// # }
/// ```
pub trait Dumpable {
    /// Formats a range within the object, without printing it.
    /// If the range isn't valid, returns the object's error
    fn hexdump(&self, range: Range<usize>) -> Result<HexDump<'_>>;
    /// Prints a hexdump of a range within the object
    fn dump(&self, range: Range<usize>) -> Result<()> {
        print!("{}", self.hexdump(range)?);
        Ok(())
    }
}

impl Dumpable for Mem {
    fn hexdump(&self, range: Range<usize>) -> Result<HexDump<'_>> {
        let start = range.start;
        Ok(HexDump::new(start, self.grab(range)?))
    }
}

/// A block of bytes, shown as lines of [WORDS_PER_LINE] big-endian words,
/// each line led by the address of its first byte
///
/// A trailing odd byte is shown as the high byte of a word.
/// # Examples
/// ```rust
/// # use chip8_core::dump::HexDump;
/// let dump = HexDump::new(0x200, &[0x00, 0xe0, 0x12]).to_string();
/// assert!(dump.contains("000200"));
/// assert!(dump.ends_with("00e0 1200\n"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexDump<'a> {
    start: usize,
    data: &'a [u8],
}

impl<'a> HexDump<'a> {
    /// Wraps `data`, which lives at address `start`
    pub fn new(start: usize, data: &'a [u8]) -> Self {
        HexDump { start, data }
    }
}

impl Display for HexDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let term = Style::new().bold().green().on_black();
        for (line, bytes) in self.data.chunks(2 * WORDS_PER_LINE).enumerate() {
            let addr = self.start + line * 2 * WORDS_PER_LINE;
            write!(f, "{:06x}", addr.style(term))?;
            for word in bytes.chunks(2) {
                let word = u16::from_be_bytes([word[0], *word.get(1).unwrap_or(&0)]);
                write!(f, " {word:04x}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
