//! Tube content buffer
//!
//! Tube `p` (0 = leftmost) lives in anode group `p / 2`: even positions
//! in the low nibble, odd positions in the high nibble.

use super::{ANODE_GROUPS, TUBE_COUNT};
use crate::tube::{pack_pair, BLANK_PAIR, NO_TUBES};

/// Dot indicator bits sent as the first byte of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DotMask(u8);

impl DotMask {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const BOTH: Self = Self(Self::LEFT.0 | Self::RIGHT.0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::BOTH.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Per-anode-group tube selectors plus the dot mask
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    groups: [u8; ANODE_GROUPS],
    dots: DotMask,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::blank()
    }
}

impl DisplayBuffer {
    /// A buffer with every tube dark
    pub const fn blank() -> Self {
        Self {
            groups: [BLANK_PAIR; ANODE_GROUPS],
            dots: DotMask::NONE,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::blank();
    }

    /// Set the selector of one tube; out of range positions are ignored
    pub fn set_tube(&mut self, pos: usize, tube: u8) {
        if pos >= TUBE_COUNT {
            return;
        }
        let group = &mut self.groups[pos / 2];
        *group = if pos % 2 == 0 {
            (*group & 0xF0) | (tube & 0x0F)
        } else {
            (*group & 0x0F) | ((tube & 0x0F) << 4)
        };
    }

    pub fn tube(&self, pos: usize) -> Option<u8> {
        let group = *self.groups.get(pos / 2)?;
        if pos >= TUBE_COUNT {
            return None;
        }
        Some(if pos % 2 == 0 { group & 0x0F } else { group >> 4 })
    }

    /// Write the units digit of `value` at `pos`
    ///
    /// With `trim` set a zero renders as a dark tube.
    pub fn insert1(&mut self, pos: usize, value: u8, trim: bool) {
        let digit = value % 10;
        let tube = if trim && digit == 0 { NO_TUBES } else { digit };
        self.set_tube(pos, tube);
    }

    /// Write a two digit value at `pos` (tens) and `pos + 1` (units)
    ///
    /// With `trim` set a leading zero renders as a dark tube.
    pub fn insert2(&mut self, pos: usize, value: u8, trim: bool) {
        let value = value % 100;
        self.insert1(pos, value / 10, trim);
        self.insert1(pos + 1, value, false);
    }

    /// Set every tube to the same selector
    pub fn fill(&mut self, tube: u8) {
        self.groups = [pack_pair(tube, tube); ANODE_GROUPS];
    }

    /// Copy six selectors, leftmost first
    pub fn set_tubes(&mut self, tubes: &[u8; TUBE_COUNT]) {
        for (group, pair) in self.groups.iter_mut().zip(tubes.chunks_exact(2)) {
            *group = pack_pair(pair[0], pair[1]);
        }
    }

    pub fn group(&self, group: usize) -> u8 {
        self.groups.get(group).copied().unwrap_or(BLANK_PAIR)
    }

    pub fn groups(&self) -> &[u8; ANODE_GROUPS] {
        &self.groups
    }

    pub fn dots(&self) -> DotMask {
        self.dots
    }

    pub fn set_dots(&mut self, dots: DotMask) {
        self.dots = dots;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tube::ALL_TUBES;

    #[test]
    fn test_position_to_group_mapping() {
        let mut buf = DisplayBuffer::blank();
        buf.set_tube(0, 1);
        buf.set_tube(1, 2);
        buf.set_tube(5, 9);

        assert_eq!(buf.group(0), 0x21);
        assert_eq!(buf.group(2) >> 4, 9);
        assert_eq!(buf.group(2) & 0x0F, NO_TUBES);
        assert_eq!(buf.tube(1), Some(2));
        assert_eq!(buf.tube(6), None);
    }

    #[test]
    fn test_insert2_with_trim() {
        let mut buf = DisplayBuffer::blank();
        buf.insert2(0, 7, true);
        assert_eq!(buf.tube(0), Some(NO_TUBES));
        assert_eq!(buf.tube(1), Some(7));

        buf.insert2(0, 7, false);
        assert_eq!(buf.tube(0), Some(0));

        // Trimming only affects the tens digit
        buf.insert2(2, 40, true);
        assert_eq!(buf.tube(2), Some(4));
        assert_eq!(buf.tube(3), Some(0));
    }

    #[test]
    fn test_out_of_range_position_ignored() {
        let mut buf = DisplayBuffer::blank();
        buf.set_tube(6, 3);
        buf.insert2(5, 42, false);
        assert_eq!(buf.tube(5), Some(4));
        assert_eq!(buf.groups(), &[BLANK_PAIR, BLANK_PAIR, 0x4B]);
    }

    #[test]
    fn test_fill_and_set_tubes() {
        let mut buf = DisplayBuffer::blank();
        buf.fill(ALL_TUBES);
        assert_eq!(buf.group(1), 0xAA);

        buf.set_tubes(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.groups(), &[0x21, 0x43, 0x65]);
    }

    #[test]
    fn test_dot_mask_bits() {
        assert_eq!(DotMask::BOTH.bits(), 0b11);
        assert_eq!(DotMask::from_bits(0xFF), DotMask::BOTH);
    }
}
