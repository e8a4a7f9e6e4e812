//! Multiplex display driver
//!
//! Called once per render step from the timer context. The counter walks
//! 34 ticks: three anode groups of 11 phases each, then one dark slot.
//! Phases 0 and 1 always shift a frame out (phase 0 with the anode off),
//! later phases only when the group's tube pair changed since it was
//! last latched.

use super::{SharedDisplay, ANODE_GROUPS, CYCLE_TICKS, FRAME_LEN, TICKS_PER_GROUP};
use crate::display::DisplayEffect;
use crate::traits::DisplayBus;
use crate::tube::{mk_tube, split_pair, INVALID_PAIR};

/// One latched burst: dots, anode/right-high, right-low/left-high, left-low
pub type Frame = [u8; FRAME_LEN];

/// Encode a group's tube pair into the four shift-register bytes
///
/// With `anode_on` cleared the anode enable bit is left out, which
/// produces a blanked frame carrying the same cathode pattern.
pub fn encode_frame(dots: u8, group: usize, pair: u8, anode_on: bool) -> Frame {
    let (left, right) = split_pair(pair);
    let tube_l = mk_tube(left);
    let tube_r = mk_tube(right);

    let mut anode = (tube_r >> 6) as u8;
    if anode_on && group < ANODE_GROUPS {
        anode |= 1 << (group + 4);
    }

    [
        dots,
        anode,
        ((tube_r << 2) | (tube_l >> 8)) as u8,
        tube_l as u8,
    ]
}

/// Frame for the slot between cycles: dots only, nothing lit
pub const fn dark_frame(dots: u8) -> Frame {
    [dots, 0, 0, 0]
}

pub struct MultiplexDriver<B> {
    bus: B,
    ctr: u8,
    last_sent: [u8; ANODE_GROUPS],
    bus_errors: u32,
}

impl<B: DisplayBus> MultiplexDriver<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            ctr: 0,
            last_sent: [INVALID_PAIR; ANODE_GROUPS],
            bus_errors: 0,
        }
    }

    /// Run one render step, returns whether a frame was shifted out
    pub fn tick(&mut self, shared: &SharedDisplay) -> bool {
        let phase = self.ctr % TICKS_PER_GROUP;
        let group = usize::from(self.ctr / TICKS_PER_GROUP);

        let emitted = if group < ANODE_GROUPS {
            self.render_group(shared, group, phase)
        } else {
            self.send(&dark_frame(shared.dots()));
            true
        };

        self.ctr += 1;
        if self.ctr >= CYCLE_TICKS {
            self.ctr = 0;
        }
        emitted
    }

    fn render_group(&mut self, shared: &SharedDisplay, group: usize, phase: u8) -> bool {
        let snapshot = shared.group(group);

        let in_transition = phase != 0
            && shared.effect() == DisplayEffect::Transition
            && phase <= snapshot.window;
        let pair = if in_transition {
            snapshot.previous
        } else {
            snapshot.pair
        };

        if phase > 1 && self.last_sent[group] == pair {
            return false;
        }

        let anode_on = phase != 0;
        if anode_on {
            self.last_sent[group] = pair;
        }
        self.send(&encode_frame(shared.dots(), group, pair, anode_on));
        true
    }

    fn send(&mut self, frame: &Frame) {
        if self.bus.send_frame(frame).is_err() {
            self.bus_errors = self.bus_errors.wrapping_add(1);
        }
    }

    /// Position within the 34 tick cycle
    pub fn counter(&self) -> u8 {
        self.ctr
    }

    /// Frames the bus failed to send since start
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn release(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayBuffer, DotMask, TransitionTracker};
    use crate::tube::{pack_pair, BLANK_PAIR};
    use heapless::Vec;

    /// Records every frame it is asked to latch
    struct MockBus {
        frames: Vec<Frame, 128>,
        fail: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                frames: Vec::new(),
                fail: false,
            }
        }
    }

    impl DisplayBus for MockBus {
        type Error = ();

        fn send_frame(&mut self, frame: &Frame) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            let _ = self.frames.push(*frame);
            Ok(())
        }
    }

    fn publish(shared: &SharedDisplay, tubes: &[u8; 6]) {
        let mut buf = DisplayBuffer::blank();
        buf.set_tubes(tubes);
        buf.set_dots(DotMask::BOTH);
        shared.publish(&buf, &TransitionTracker::new(), DisplayEffect::None, 500);
    }

    #[test]
    fn test_frame_layout() {
        let frame = encode_frame(0b11, 1, pack_pair(9, 2), true);
        assert_eq!(frame, [0x03, 0x20, 0x12, 0x00]);

        let blanked = encode_frame(0b11, 1, pack_pair(9, 2), false);
        assert_eq!(blanked, [0x03, 0x00, 0x12, 0x00]);
    }

    #[test]
    fn test_right_tube_high_bits_in_anode_byte() {
        // Right tube digit 8 sets cathode bit 8, which lands in the anode byte
        let frame = encode_frame(0, 0, pack_pair(0, 8), true);
        assert_eq!(frame, [0x00, 0x14, 0x00, 0x01]);
    }

    #[test]
    fn test_blank_pair_encodes_no_cathodes() {
        let frame = encode_frame(0, 2, BLANK_PAIR, true);
        assert_eq!(frame, [0x00, 0x40, 0x00, 0x00]);
    }

    #[test]
    fn test_static_content_cycle() {
        let shared = SharedDisplay::new();
        publish(&shared, &[1, 2, 3, 4, 5, 6]);
        let mut driver = MultiplexDriver::new(MockBus::new());

        let emitted = (0..CYCLE_TICKS).filter(|_| driver.tick(&shared)).count();

        // Phases 0 and 1 of each group plus the dark slot
        assert_eq!(emitted, 7);
        assert_eq!(driver.counter(), 0);

        let frames = &driver.bus().frames;
        assert_eq!(frames[0], encode_frame(0b11, 0, 0x21, false));
        assert_eq!(frames[1], encode_frame(0b11, 0, 0x21, true));
        assert_eq!(frames[6], dark_frame(0b11));
    }

    #[test]
    fn test_unchanged_pair_is_sent_once() {
        let shared = SharedDisplay::new();
        publish(&shared, &[1, 2, 3, 4, 5, 6]);
        let mut driver = MultiplexDriver::new(MockBus::new());

        // Phases 0 and 1 of group 0
        assert!(driver.tick(&shared));
        assert!(driver.tick(&shared));

        publish(&shared, &[7, 8, 3, 4, 5, 6]);
        assert!(driver.tick(&shared));
        assert!(!driver.tick(&shared));
        assert!(!driver.tick(&shared));

        assert_eq!(driver.bus().frames.len(), 3);
        assert_eq!(driver.bus().frames[2], encode_frame(0b11, 0, 0x87, true));
    }

    #[test]
    fn test_transition_shows_previous_pair() {
        let shared = SharedDisplay::new();
        let mut tracker = TransitionTracker::new();
        let mut buf = DisplayBuffer::blank();

        buf.set_tubes(&[1, 1, 0, 0, 0, 0]);
        tracker.update(&buf, DisplayEffect::Transition, 500, 0);
        buf.set_tubes(&[2, 2, 0, 0, 0, 0]);
        tracker.update(&buf, DisplayEffect::Transition, 500, 0);
        shared.publish(&buf, &tracker, DisplayEffect::Transition, 500);

        let mut driver = MultiplexDriver::new(MockBus::new());
        driver.tick(&shared);
        driver.tick(&shared);

        let frames = &driver.bus().frames;
        // Blanking phase carries the new pair, the window phases the old one
        assert_eq!(frames[0], encode_frame(0, 0, 0x22, false));
        assert_eq!(frames[1], encode_frame(0, 0, 0x11, true));
    }

    #[test]
    fn test_transition_ignored_without_effect() {
        let shared = SharedDisplay::new();
        let mut tracker = TransitionTracker::new();
        let mut buf = DisplayBuffer::blank();

        buf.set_tubes(&[1, 1, 0, 0, 0, 0]);
        tracker.update(&buf, DisplayEffect::Transition, 500, 0);
        buf.set_tubes(&[2, 2, 0, 0, 0, 0]);
        tracker.update(&buf, DisplayEffect::Transition, 500, 0);
        shared.publish(&buf, &tracker, DisplayEffect::None, 500);

        let mut driver = MultiplexDriver::new(MockBus::new());
        driver.tick(&shared);
        driver.tick(&shared);
        assert_eq!(driver.bus().frames[1], encode_frame(0, 0, 0x22, true));
    }

    #[test]
    fn test_bus_errors_are_counted() {
        let shared = SharedDisplay::new();
        let mut bus = MockBus::new();
        bus.fail = true;
        let mut driver = MultiplexDriver::new(bus);

        assert!(driver.tick(&shared));
        assert!(driver.tick(&shared));
        assert_eq!(driver.bus_errors(), 2);
    }
}
