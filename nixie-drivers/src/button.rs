//! Front panel buttons
//!
//! The buttons short their input to ground, so a low level means
//! pressed. [`ButtonPanel`] samples all three and turns the levels into
//! gestures.

use embedded_hal::digital::InputPin;
use heapless::Vec;
use nixie_core::input::{Button, ButtonEvent, ButtonTracker};

/// Active-low push button
pub struct ButtonInput<P> {
    pin: P,
}

impl<P: InputPin> ButtonInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Current level; a pin that cannot be read counts as released
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}

/// The Set, Up and Down buttons with their gesture trackers
pub struct ButtonPanel<P> {
    inputs: [ButtonInput<P>; 3],
    trackers: [ButtonTracker; 3],
}

impl<P: InputPin> ButtonPanel<P> {
    pub fn new(set: P, up: P, down: P, debounce_ms: u16, long_press_ms: u16) -> Self {
        Self {
            inputs: [
                ButtonInput::new(set),
                ButtonInput::new(up),
                ButtonInput::new(down),
            ],
            trackers: core::array::from_fn(|_| ButtonTracker::new(debounce_ms, long_press_ms)),
        }
    }

    /// Sample every button once and return the gestures completed
    pub fn poll(&mut self, now_ms: u64) -> Vec<ButtonEvent, 3> {
        let mut events = Vec::new();
        for ((input, tracker), button) in self
            .inputs
            .iter_mut()
            .zip(self.trackers.iter_mut())
            .zip(Button::ALL)
        {
            if let Some(press) = tracker.update(input.is_pressed(), now_ms) {
                // Capacity matches the button count
                let _ = events.push(ButtonEvent::new(button, press));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use nixie_core::input::PressType;

    /// Mock input whose level is set from the test
    struct MockPin<'a> {
        low: &'a Cell<bool>,
    }

    impl ErrorType for MockPin<'_> {
        type Error = Infallible;
    }

    impl InputPin for MockPin<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low.get())
        }
    }

    #[test]
    fn test_input_is_active_low() {
        let level = Cell::new(false);
        let mut input = ButtonInput::new(MockPin { low: &level });
        assert!(!input.is_pressed());
        level.set(true);
        assert!(input.is_pressed());
    }

    #[test]
    fn test_panel_reports_gestures() {
        let set = Cell::new(false);
        let up = Cell::new(false);
        let down = Cell::new(false);
        let mut panel = ButtonPanel::new(
            MockPin { low: &set },
            MockPin { low: &up },
            MockPin { low: &down },
            40,
            1000,
        );

        up.set(true);
        set.set(true);
        assert!(panel.poll(0).is_empty());
        up.set(false);
        let events = panel.poll(100);
        assert_eq!(
            events.as_slice(),
            &[ButtonEvent::new(Button::Up, PressType::Click)]
        );

        let events = panel.poll(1000);
        assert_eq!(
            events.as_slice(),
            &[ButtonEvent::new(Button::Set, PressType::LongPressStart)]
        );
        assert!(panel.poll(1010).is_empty());
    }
}
