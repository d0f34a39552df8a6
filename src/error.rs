// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for the Chip-8 core

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the Chip-8 core.
///
/// Every variant other than the host-facing ones ([Error::InvalidScreenSize],
/// [Error::InvalidKey], [Error::InvalidRegister], [Error::IoError])
/// is fatal to the machine that raised it.
#[derive(Debug, Error)]
pub enum Error {
    /// Tried to touch memory outside `0x000..0x1000`
    #[error("address {addr:03x} is out of bounds")]
    OutOfBounds {
        /// The first offending address
        addr: usize,
    },
    /// Called a subroutine with a full stack
    #[error("stack overflow calling {addr:03x}")]
    StackOverflow {
        /// The address the program tried to call
        addr: u16,
    },
    /// Returned from a subroutine with an empty stack
    #[error("stack underflow returning from {pc:03x}")]
    StackUnderflow {
        /// The address of the offending `ret`
        pc: u16,
    },
    /// Represents an unimplemented operation
    #[error("opcode {word:04x} not recognized")]
    UnimplementedOpcode {
        /// The offending word
        word: u16,
    },
    /// The program doesn't fit in program memory
    #[error("rom of {size} bytes does not fit in {max} bytes of program memory")]
    RomTooLarge {
        /// Size of the rejected program
        size: usize,
        /// Space available for programs
        max: usize,
    },
    /// The font doesn't fit below the program origin
    #[error("font of {size} bytes does not fit in {max} bytes of font memory")]
    FontTooLarge {
        /// Size of the rejected font
        size: usize,
        /// Space available for the font
        max: usize,
    },
    /// Tried to build a screen with no pixels
    #[error("screen of {width}x{height} pixels has no area")]
    InvalidScreenSize {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
