// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Memory is a flat, fixed-size byte store split into two named [Region]s:
//! the character set lives below [PROGRAM_START], and programs are loaded at it.

use crate::error::{Error, Result};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Total addressable memory, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// The address programs are loaded at, and where execution begins
pub const PROGRAM_START: u16 = 0x200;

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// Gets the address range covered by this [Region]
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::mem::Region;
    /// assert_eq!(0x000..0x200, Region::Charset.range());
    /// assert_eq!(0x200..0x1000, Region::Program.range());
    /// ```
    pub fn range(self) -> Range<usize> {
        match self {
            Region::Charset => 0..PROGRAM_START as usize,
            Region::Program => PROGRAM_START as usize..MEM_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Stores memory as one contiguous block of [MEM_SIZE] bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Mem {
    memory: Box<[u8; MEM_SIZE]>,
}

impl Mem {
    /// Constructs a new, zeroed mem
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::mem::*;
    /// let mem = Mem::new();
    /// assert_eq!(MEM_SIZE, mem.len());
    /// ```
    pub fn new() -> Self {
        Mem {
            memory: Box::new([0; MEM_SIZE]),
        }
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Loads a font into the [Region::Charset] and a program into [Region::Program].
    ///
    /// Both sizes are validated before anything is written, so on error the
    /// mem is left exactly as it was.
    /// # Examples
    /// ```rust
    /// # use chip8_core::{cpu::mem::*, error::Result};
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load(&[0xf0, 0x90], &[0x61, 0x05])?;
    /// assert_eq!(0x6105, mem.read_word(0x200)?);
    /// assert!(mem.load(&[], &[0; 0xe01]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(&mut self, font: &[u8], program: &[u8]) -> Result<&mut Self> {
        let (charset, programs) = (Region::Charset.range(), Region::Program.range());
        if font.len() > charset.len() {
            return Err(Error::FontTooLarge {
                size: font.len(),
                max: charset.len(),
            });
        }
        if program.len() > programs.len() {
            return Err(Error::RomTooLarge {
                size: program.len(),
                max: programs.len(),
            });
        }
        self.clear_region(Region::Charset);
        self.clear_region(Region::Program);
        self.memory[charset.start..charset.start + font.len()].copy_from_slice(font);
        self.memory[programs.start..programs.start + program.len()].copy_from_slice(program);
        Ok(self)
    }

    /// Zeroes every byte in a [Region]
    pub fn clear_region(&mut self, region: Region) -> &mut Self {
        self.memory[region.range()].fill(0);
        self
    }

    /// Gets a slice of the bytes in a [Region]
    pub fn get_region(&self, region: Region) -> &[u8] {
        &self.memory[region.range()]
    }

    /// Gets a slice of memory, or [Error::OutOfBounds] if any of it falls outside the mem
    pub fn grab(&self, range: Range<usize>) -> Result<&[u8]> {
        let addr = Self::first_invalid(&range);
        self.memory.get(range).ok_or(Error::OutOfBounds { addr })
    }

    /// Gets a mutable slice of memory, or [Error::OutOfBounds] if any of it falls outside the mem
    pub fn grab_mut(&mut self, range: Range<usize>) -> Result<&mut [u8]> {
        let addr = Self::first_invalid(&range);
        self.memory.get_mut(range).ok_or(Error::OutOfBounds { addr })
    }

    /// Reads a byte from memory
    pub fn read(&self, addr: usize) -> Result<u8> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(Error::OutOfBounds { addr })
    }

    /// Writes a byte to memory
    pub fn write(&mut self, addr: usize, data: u8) -> Result<()> {
        let byte = self.memory.get_mut(addr).ok_or(Error::OutOfBounds { addr })?;
        *byte = data;
        Ok(())
    }

    /// Reads a big-endian word from memory
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let bytes = self.grab(addr..addr + 2)?;
        // Chip-8 is a big-endian system
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Writes a big-endian word to memory
    pub fn write_word(&mut self, addr: usize, data: u16) -> Result<()> {
        self.grab_mut(addr..addr + 2)?
            .copy_from_slice(&data.to_be_bytes());
        Ok(())
    }

    fn first_invalid(range: &Range<usize>) -> usize {
        range.start.max(MEM_SIZE)
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
