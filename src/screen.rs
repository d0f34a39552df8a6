// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use crate::error::{Error, Result as ChipResult};
use owo_colors::{OwoColorize, Style};
use std::fmt::{Display, Formatter, Result};

/// Width of the canonical Chip-8 display
pub const WIDTH: usize = 64;
/// Height of the canonical Chip-8 display
pub const HEIGHT: usize = 32;

/// A monochrome framebuffer, stored row-major as one bool per pixel
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Screen {
    pixels: Vec<bool>,
    width: usize,
    height: usize,
}

impl Screen {
    /// Creates a blank screen with the given dimensions.  
    /// If either dimension is zero, returns [Error::InvalidScreenSize]
    /// # Examples
    /// ```rust
    /// # use chip8_core::screen::Screen;
    /// let screen = Screen::new(64, 32).unwrap();
    /// assert_eq!(64 * 32, screen.pixels().len());
    /// assert!(screen.pixels().iter().all(|px| !px));
    /// assert!(Screen::new(0, 32).is_err());
    /// ```
    pub fn new(width: usize, height: usize) -> ChipResult<Screen> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidScreenSize { width, height });
        }
        Ok(Screen {
            pixels: vec![false; width * height],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Gets every pixel, row-major (`y * width + x`)
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Gets the pixel at (x, y), if it's on the screen
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// XORs an 8-pixel-wide sprite onto the screen at (x, y).
    ///
    /// The origin wraps around the screen, but the sprite itself is clipped
    /// at the right and bottom edges. Returns true if any lit pixel was turned off.
    /// # Examples
    /// ```rust
    /// # use chip8_core::screen::Screen;
    /// let mut screen = Screen::default();
    /// // Origin wraps to (1, 0)
    /// assert!(!screen.draw(65, 32, &[0x80]));
    /// assert_eq!(Some(true), screen.get(1, 0));
    /// // Drawing it again turns it back off, and collides
    /// assert!(screen.draw(1, 0, &[0x80]));
    /// assert_eq!(Some(false), screen.get(1, 0));
    /// ```
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let (x0, mut y) = (x % self.width, y % self.height);
        let mut collision = false;
        for &row in sprite {
            let mut x = x0;
            for bit in (0..8).rev() {
                let sprite_bit = (row >> bit) & 1 == 1;
                let pixel = &mut self.pixels[y * self.width + x];
                if *pixel && sprite_bit {
                    collision = true;
                }
                *pixel ^= sprite_bit;
                x += 1;
                if x >= self.width {
                    break;
                }
            }
            y += 1;
            if y >= self.height {
                break;
            }
        }
        collision
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            pixels: vec![false; WIDTH * HEIGHT],
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        // Green phosphor style formatting, for taste
        let term: Style = Style::new().bold().green().on_black();
        for row in self.pixels.chunks(self.width) {
            let line: String = row
                .iter()
                .map(|&px| if px { '█' } else { ' ' })
                .collect();
            writeln!(f, "{}", line.style(term))?;
        }
        Ok(())
    }
}
