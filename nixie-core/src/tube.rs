//! Tube encoder
//!
//! Maps a tube selector to the 10-bit cathode pattern shifted out to the
//! driver chain. A group byte carries two selectors, one per nibble.

/// Light every cathode of the tube at once
pub const ALL_TUBES: u8 = 10;

/// Leave the tube dark
pub const NO_TUBES: u8 = 11;

/// Selector that never matches a published value
pub const INVALID_TUBE: u8 = 0x0F;

/// Group byte with both nibbles invalid
pub const INVALID_PAIR: u8 = INVALID_TUBE | (INVALID_TUBE << 4);

/// Group byte with both tubes dark
pub const BLANK_PAIR: u8 = NO_TUBES | (NO_TUBES << 4);

/// All ten cathode lines
pub const CATHODE_MASK: u16 = 0x3FF;

/// Cathode activation pattern for a tube selector
///
/// Digits 0-9 select one cathode. [`ALL_TUBES`] selects all of them.
/// Everything else, [`NO_TUBES`] included, selects none.
#[inline]
pub const fn mk_tube(idx: u8) -> u16 {
    match idx {
        0..=9 => 1 << idx,
        ALL_TUBES => CATHODE_MASK,
        _ => 0,
    }
}

/// Pack a left and right selector into a group byte
#[inline]
pub const fn pack_pair(left: u8, right: u8) -> u8 {
    (left & 0x0F) | ((right & 0x0F) << 4)
}

/// Split a group byte into its (left, right) selectors
#[inline]
pub const fn split_pair(pair: u8) -> (u8, u8) {
    (pair & 0x0F, pair >> 4)
}
