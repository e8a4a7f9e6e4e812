//! UI state shared by the display tasks
//!
//! Owned by the scheduler and lent to task operations through
//! [`crate::task::TaskContext`].

use crate::display::DisplayEffect;
use crate::task::edit::EDIT_DIGITS;

/// Edit mode flag and digit cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditMode {
    active: bool,
    pos: u8,
}

impl EditMode {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Digit under the cursor, 0 = leftmost tube
    pub fn pos(&self) -> u8 {
        self.pos
    }

    pub fn enter(&mut self) {
        self.active = true;
        self.pos = 0;
    }

    pub fn exit(&mut self) {
        self.active = false;
    }

    pub fn next_digit(&mut self) {
        self.pos = (self.pos + 1) % EDIT_DIGITS;
    }
}

/// Anti-poison run: every tube steps through all ten digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AntiPoison {
    started_ms: u64,
    steps: u16,
    fired: u32,
}

impl AntiPoison {
    /// Start `passes` runs through the digits
    pub fn trigger(&mut self, passes: u8, now_ms: u64) {
        self.started_ms = now_ms;
        self.steps = u16::from(passes) * 10;
        self.fired = self.fired.wrapping_add(1);
    }

    pub fn cancel(&mut self) {
        self.steps = 0;
    }

    pub fn is_active(&self) -> bool {
        self.steps > 0
    }

    /// Times a sequence was started
    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Digit to force on every tube, or `None` once the run is over
    pub fn digit(&mut self, now_ms: u64, step_ms: u16) -> Option<u8> {
        if self.steps == 0 {
            return None;
        }
        let step = now_ms.saturating_sub(self.started_ms) / u64::from(step_ms.max(1));
        if step >= u64::from(self.steps) {
            self.steps = 0;
            return None;
        }
        Some((step % 10) as u8)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub edit: EditMode,
    pub effect: DisplayEffect,
    pub anti_poison: AntiPoison,
    advance_requested: bool,
}

impl UiState {
    pub fn new(effect: DisplayEffect) -> Self {
        Self {
            effect,
            ..Self::default()
        }
    }

    /// Ask the scheduler to move on to the next eligible task
    pub fn request_advance(&mut self) {
        self.advance_requested = true;
    }

    pub fn take_advance_request(&mut self) -> bool {
        core::mem::take(&mut self.advance_requested)
    }
}
