//! Display state shared with the interrupt context
//!
//! Every cell is a single byte, so the multiplex interrupt can never see
//! a torn tube pattern. At worst it reads one group a frame late.

use portable_atomic::{AtomicU8, Ordering};

use super::{DisplayBuffer, DisplayEffect, TransitionTracker, ANODE_GROUPS};
use crate::tube::BLANK_PAIR;

/// What the driver needs to render one anode group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupSnapshot {
    pub pair: u8,
    pub previous: u8,
    pub window: u8,
}

pub struct SharedDisplay {
    groups: [AtomicU8; ANODE_GROUPS],
    previous: [AtomicU8; ANODE_GROUPS],
    windows: [AtomicU8; ANODE_GROUPS],
    dots: AtomicU8,
    effect: AtomicU8,
}

impl Default for SharedDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedDisplay {
    pub const fn new() -> Self {
        Self {
            groups: [
                AtomicU8::new(BLANK_PAIR),
                AtomicU8::new(BLANK_PAIR),
                AtomicU8::new(BLANK_PAIR),
            ],
            previous: [
                AtomicU8::new(BLANK_PAIR),
                AtomicU8::new(BLANK_PAIR),
                AtomicU8::new(BLANK_PAIR),
            ],
            windows: [AtomicU8::new(0), AtomicU8::new(0), AtomicU8::new(0)],
            dots: AtomicU8::new(0),
            effect: AtomicU8::new(DisplayEffect::None.as_u8()),
        }
    }

    /// Publish a rendered buffer, one group at a time
    ///
    /// A group's previous pair and window are stored before its current
    /// pair so a transition never starts from stale data.
    pub fn publish(
        &self,
        buffer: &DisplayBuffer,
        transition: &TransitionTracker,
        effect: DisplayEffect,
        speed_ms: u16,
    ) {
        for group in 0..ANODE_GROUPS {
            self.previous[group].store(transition.previous(group), Ordering::Relaxed);
            self.windows[group].store(transition.window(group, speed_ms), Ordering::Relaxed);
            self.groups[group].store(buffer.group(group), Ordering::Release);
        }
        self.dots.store(buffer.dots().bits(), Ordering::Relaxed);
        self.effect.store(effect.as_u8(), Ordering::Relaxed);
    }

    /// Read one group; out of range groups read as blank
    pub fn group(&self, group: usize) -> GroupSnapshot {
        if group >= ANODE_GROUPS {
            return GroupSnapshot {
                pair: BLANK_PAIR,
                previous: BLANK_PAIR,
                window: 0,
            };
        }
        let pair = self.groups[group].load(Ordering::Acquire);
        GroupSnapshot {
            pair,
            previous: self.previous[group].load(Ordering::Relaxed),
            window: self.windows[group].load(Ordering::Relaxed),
        }
    }

    pub fn dots(&self) -> u8 {
        self.dots.load(Ordering::Relaxed)
    }

    pub fn effect(&self) -> DisplayEffect {
        DisplayEffect::from_u8(self.effect.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DotMask;

    #[test]
    fn test_starts_blank() {
        let shared = SharedDisplay::new();
        assert_eq!(shared.group(0).pair, BLANK_PAIR);
        assert_eq!(shared.group(5).window, 0);
        assert_eq!(shared.effect(), DisplayEffect::None);
    }

    #[test]
    fn test_publish_copies_groups_and_dots() {
        let shared = SharedDisplay::new();
        let mut buf = DisplayBuffer::blank();
        buf.set_tubes(&[1, 2, 3, 4, 5, 6]);
        buf.set_dots(DotMask::LEFT);

        let mut tracker = TransitionTracker::new();
        tracker.update(&buf, DisplayEffect::Transition, 500, 0);
        shared.publish(&buf, &tracker, DisplayEffect::Transition, 500);

        let snapshot = shared.group(1);
        assert_eq!(snapshot.pair, 0x43);
        assert_eq!(snapshot.previous, BLANK_PAIR);
        assert_eq!(snapshot.window, 10);
        assert_eq!(shared.dots(), 1);
        assert_eq!(shared.effect(), DisplayEffect::Transition);
    }
}
