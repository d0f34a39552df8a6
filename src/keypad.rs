// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The 16-key hexadecimal keypad

use crate::error::{Error, Result};

/// Holds the pressed state of keys `0`..=`F`, as reported by the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    /// Presses a key, and reports whether the key's state changed.  
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chip8_core::keypad::Keypad;
    /// let mut keypad = Keypad::default();
    ///
    /// // press key `7`
    /// let did_press = keypad.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = keypad.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.set(key, true)
    }

    /// Releases a key, and reports whether the key's state changed.  
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    /// # Examples
    /// ```rust
    /// # use chip8_core::keypad::Keypad;
    /// let mut keypad = Keypad::default();
    /// keypad.press(0x7).unwrap();
    /// assert!(keypad.release(0x7).unwrap());
    /// // key was not held
    /// assert!(!keypad.release(0x7).unwrap());
    /// assert!(keypad.release(0x10).is_err());
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.set(key, false)
    }

    /// Releases every key
    pub fn release_all(&mut self) {
        self.keys = [false; 16];
    }

    /// Reports whether a key is held. Keys that don't exist are never held.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or_default()
    }

    /// Gets the state of every key
    pub fn keys(&self) -> &[bool; 16] {
        &self.keys
    }

    fn set(&mut self, key: usize, state: bool) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref != state;
        *keyref = state;
        Ok(changed)
    }
}
