// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The delay and sound timers
//!
//! Timers are ticked by the host at a fixed rate (60Hz on real hardware),
//! never by the instruction cycle.

/// The delay and sound countdown registers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    /// Counts both timers down by one, stopping at zero
    /// # Examples
    /// ```rust
    /// # use chip8_core::timer::Timers;
    /// let mut timers = Timers::default();
    /// timers.set_delay(1);
    /// timers.set_sound(2);
    /// timers.tick();
    /// assert_eq!((0, 1), (timers.delay(), timers.sound()));
    /// timers.tick();
    /// timers.tick();
    /// assert_eq!((0, 0), (timers.delay(), timers.sound()));
    /// ```
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// True while the sound timer is running; the host should play a tone
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }
}
