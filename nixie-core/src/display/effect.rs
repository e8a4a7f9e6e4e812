//! Display transition effects

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the driver blends new content with the previous content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum DisplayEffect {
    /// Switch straight to the new digits
    #[default]
    None = 0,
    /// Interleave old and new digits for a short window after a change
    Transition = 1,
}

impl DisplayEffect {
    /// Number of effects
    pub const COUNT: u8 = 2;

    /// Effect from its stored byte, unknown values fall back to `None`
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => DisplayEffect::Transition,
            _ => DisplayEffect::None,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Next effect, wrapping after the last one
    pub const fn next(self) -> Self {
        Self::from_u8((self.as_u8() + 1) % Self::COUNT)
    }

    /// Previous effect, wrapping before the first one
    pub const fn prev(self) -> Self {
        Self::from_u8((self.as_u8() + Self::COUNT - 1) % Self::COUNT)
    }
}
