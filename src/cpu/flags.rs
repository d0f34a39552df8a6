//! Represents flags that aid in implementation but aren't part of the Chip-8 machine

/// Represents flags that aid in operation, but aren't inherent to the CPU
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flags {
    /// Set when debug (live disassembly) mode enabled
    pub debug: bool,
}

impl Flags {
    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use chip8_core::cpu::flags::Flags;
    /// let mut flags = Flags::default();
    /// assert_eq!(false, flags.debug);
    /// // Toggle debug mode
    /// flags.debug();
    /// assert_eq!(true, flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }
}
