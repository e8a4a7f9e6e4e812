//! Transition bookkeeping
//!
//! Remembers what each anode group showed before its last change and how
//! much of the effect time is left. The driver turns the remaining time
//! into a window of phases that still show the old pair.

use super::{DisplayBuffer, DisplayEffect, ANODE_GROUPS, TICKS_PER_GROUP};
use crate::tube::BLANK_PAIR;

/// Widest window: every phase after the blanking phase
pub const MAX_WINDOW: u8 = TICKS_PER_GROUP - 1;

#[derive(Debug, Clone)]
pub struct TransitionTracker {
    last: [u8; ANODE_GROUPS],
    previous: [u8; ANODE_GROUPS],
    remaining_ms: [u16; ANODE_GROUPS],
}

impl Default for TransitionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTracker {
    pub const fn new() -> Self {
        Self {
            last: [BLANK_PAIR; ANODE_GROUPS],
            previous: [BLANK_PAIR; ANODE_GROUPS],
            remaining_ms: [0; ANODE_GROUPS],
        }
    }

    /// Account for `elapsed_ms` and start transitions for changed groups
    ///
    /// Changes only animate while `effect` is [`DisplayEffect::Transition`].
    pub fn update(
        &mut self,
        current: &DisplayBuffer,
        effect: DisplayEffect,
        speed_ms: u16,
        elapsed_ms: u32,
    ) {
        let elapsed = u16::try_from(elapsed_ms).unwrap_or(u16::MAX);

        for group in 0..ANODE_GROUPS {
            self.remaining_ms[group] = self.remaining_ms[group].saturating_sub(elapsed);

            let pair = current.group(group);
            if pair == self.last[group] {
                continue;
            }

            if effect == DisplayEffect::Transition && speed_ms > 0 {
                self.previous[group] = self.last[group];
                self.remaining_ms[group] = speed_ms;
            } else {
                self.previous[group] = pair;
                self.remaining_ms[group] = 0;
            }
            self.last[group] = pair;
        }
    }

    /// Pair shown before the group's most recent change
    pub fn previous(&self, group: usize) -> u8 {
        self.previous.get(group).copied().unwrap_or(BLANK_PAIR)
    }

    /// Number of phases (1..=window) that still show the previous pair
    pub fn window(&self, group: usize, speed_ms: u16) -> u8 {
        let unit = speed_ms / u16::from(MAX_WINDOW);
        if unit == 0 {
            return 0;
        }
        let remaining = self.remaining_ms.get(group).copied().unwrap_or(0);
        u8::try_from(remaining / unit)
            .unwrap_or(MAX_WINDOW)
            .min(MAX_WINDOW)
    }

    /// Whether any group is still mid-transition
    pub fn is_active(&self) -> bool {
        self.remaining_ms.iter().any(|&ms| ms > 0)
    }
}
