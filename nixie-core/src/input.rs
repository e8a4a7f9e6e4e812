//! Button input
//!
//! Three buttons drive the UI. Raw levels are sampled periodically and
//! turned into click / long-press gestures by [`ButtonTracker`].

/// Physical button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// First button: mode, edit mode and digit selection
    Set,
    /// Second button: increment
    Up,
    /// Third button: decrement
    Down,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Set, Button::Up, Button::Down];
}

/// Gesture recognised on a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressType {
    /// Pressed and released before the long-press threshold
    Click,
    /// Held past the long-press threshold (fires once per press)
    LongPressStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub press: PressType,
}

impl ButtonEvent {
    pub const fn new(button: Button, press: PressType) -> Self {
        Self { button, press }
    }
}

/// Per-button gesture detector
#[derive(Debug, Clone)]
pub struct ButtonTracker {
    pressed_since: Option<u64>,
    long_fired: bool,
    debounce_ms: u16,
    long_press_ms: u16,
}

impl ButtonTracker {
    pub const fn new(debounce_ms: u16, long_press_ms: u16) -> Self {
        Self {
            pressed_since: None,
            long_fired: false,
            debounce_ms,
            long_press_ms,
        }
    }

    /// Feed one sample of the button level
    ///
    /// A click is reported on release when the press lasted at least the
    /// debounce time and no long press was reported for it.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<PressType> {
        match (pressed, self.pressed_since) {
            (true, None) => {
                self.pressed_since = Some(now_ms);
                self.long_fired = false;
                None
            }
            (true, Some(start)) => {
                let held = now_ms.saturating_sub(start);
                if !self.long_fired && held >= u64::from(self.long_press_ms) {
                    self.long_fired = true;
                    Some(PressType::LongPressStart)
                } else {
                    None
                }
            }
            (false, Some(start)) => {
                self.pressed_since = None;
                let held = now_ms.saturating_sub(start);
                if !self.long_fired && held >= u64::from(self.debounce_ms) {
                    Some(PressType::Click)
                } else {
                    None
                }
            }
            (false, None) => None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hold the button from `from` to `to` in 10 ms samples, then release
    fn press(tracker: &mut ButtonTracker, from: u64, to: u64) -> heapless::Vec<PressType, 4> {
        let mut events = heapless::Vec::new();
        let mut t = from;
        while t < to {
            if let Some(e) = tracker.update(true, t) {
                let _ = events.push(e);
            }
            t += 10;
        }
        if let Some(e) = tracker.update(false, to) {
            let _ = events.push(e);
        }
        events
    }

    #[test]
    fn test_short_press_is_click() {
        let mut tracker = ButtonTracker::new(40, 1000);
        let events = press(&mut tracker, 0, 100);
        assert_eq!(events.as_slice(), &[PressType::Click]);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut tracker = ButtonTracker::new(40, 1000);
        let events = press(&mut tracker, 0, 20);
        assert!(events.is_empty());
    }

    #[test]
    fn test_long_press_fires_once_without_click() {
        let mut tracker = ButtonTracker::new(40, 1000);
        let events = press(&mut tracker, 0, 3000);
        assert_eq!(events.as_slice(), &[PressType::LongPressStart]);
    }

    #[test]
    fn test_consecutive_presses() {
        let mut tracker = ButtonTracker::new(40, 1000);
        assert_eq!(press(&mut tracker, 0, 1500).as_slice(), &[PressType::LongPressStart]);
        assert_eq!(press(&mut tracker, 2000, 2100).as_slice(), &[PressType::Click]);
    }
}
