//! Backlight colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB triple, full scale 255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const OFF: Self = Self::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Storage form: red, green, blue
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [red, green, blue] => Some(Self::new(*red, *green, *blue)),
            _ => None,
        }
    }

    /// Neighbouring palette entry; colors not in the palette start over
    pub fn palette_step(self, forward: bool) -> Self {
        let len = PALETTE.len();
        let next = match PALETTE.iter().position(|&c| c == self) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        PALETTE[next]
    }
}

/// Colors reachable with the long-press gestures
pub const PALETTE: [Color; 8] = [
    Color::new(255, 96, 16),
    Color::new(255, 0, 0),
    Color::new(0, 255, 0),
    Color::new(0, 0, 255),
    Color::new(0, 255, 255),
    Color::new(255, 0, 255),
    Color::new(255, 255, 255),
    Color::OFF,
];

/// Default backlight of the clock task
pub const DEFAULT_CLOCK_COLOR: Color = PALETTE[0];

/// Default backlight of the countdown task
pub const DEFAULT_COUNTDOWN_COLOR: Color = PALETTE[1];

/// Backlight used while a flash is shown
pub const FLASH_COLOR: Color = PALETTE[6];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(PALETTE[7].palette_step(true), PALETTE[0]);
        assert_eq!(PALETTE[0].palette_step(false), PALETTE[7]);
        assert_eq!(PALETTE[2].palette_step(true), PALETTE[3]);
    }

    #[test]
    fn test_unknown_color_restarts_palette() {
        assert_eq!(Color::new(1, 2, 3).palette_step(true), PALETTE[0]);
    }

    #[test]
    fn test_bytes() {
        let color = Color::new(10, 20, 30);
        assert_eq!(Color::from_bytes(&color.to_bytes()), Some(color));
        assert_eq!(Color::from_bytes(&[1, 2]), None);
    }
}
