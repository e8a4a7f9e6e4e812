//! Flash task: transient digits pushed over the serial line

use super::TaskContext;
use crate::command::{parse_flash_payload, CommandError};
use crate::display::{DisplayBuffer, DotMask, TUBE_COUNT};
use crate::input::{Button, PressType};
use crate::traits::TimeSource;
use crate::tube::NO_TUBES;

#[derive(Debug, Clone)]
pub struct FlashTask {
    tubes: [u8; TUBE_COUNT],
    dots: DotMask,
    end_ms: u64,
    pub allow_effects: bool,
}

impl Default for FlashTask {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashTask {
    pub const fn new() -> Self {
        Self {
            tubes: [NO_TUBES; TUBE_COUNT],
            dots: DotMask::NONE,
            end_ms: 0,
            allow_effects: true,
        }
    }

    /// Show `tubes` until `duration_ms` after `now_ms` (uptime)
    pub fn set_data(&mut self, tubes: [u8; TUBE_COUNT], dots: DotMask, now_ms: u64, duration_ms: u32) {
        self.tubes = tubes;
        self.dots = dots;
        self.end_ms = now_ms + u64::from(duration_ms);
    }

    /// Parse a flash payload (the part after `F`) and show it
    pub fn set_data_from_serial(
        &mut self,
        payload: &[u8],
        now_ms: u64,
        duration_ms: u32,
    ) -> Result<(), CommandError> {
        let (tubes, dots) = parse_flash_payload(payload)?;
        self.set_data(tubes, dots, now_ms, duration_ms);
        Ok(())
    }

    pub fn tubes(&self) -> &[u8; TUBE_COUNT] {
        &self.tubes
    }

    pub fn can_show(&self, now_ms: u64) -> bool {
        now_ms < self.end_ms
    }

    pub fn dismiss(&mut self) {
        self.end_ms = 0;
    }

    pub(super) fn render<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        buf: &mut DisplayBuffer,
        dots: &mut DotMask,
    ) -> bool {
        if !self.can_show(ctx.now_ms) {
            return false;
        }
        buf.set_tubes(&self.tubes);
        *dots = self.dots;
        true
    }

    pub(super) fn handle_button_press<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        _button: Button,
        press: PressType,
    ) -> bool {
        if press != PressType::Click {
            return false;
        }
        self.dismiss();
        ctx.ui.request_advance();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockConfig;
    use crate::time::mock::MockClock;
    use crate::time::TimeOfDay;
    use crate::tube::ALL_TUBES;
    use crate::ui::UiState;

    #[test]
    fn test_expires_after_duration() {
        let mut task = FlashTask::new();
        assert!(!task.can_show(0));

        task.set_data([1, 2, 3, 4, 5, 6], DotMask::NONE, 1_000, 5_000);
        assert!(task.can_show(5_999));
        assert!(!task.can_show(6_000));
    }

    #[test]
    fn test_serial_payload() {
        let mut task = FlashTask::new();
        task.set_data_from_serial(b"*9.1", 0, 100).unwrap();
        assert_eq!(task.tubes(), &[ALL_TUBES, 9, NO_TUBES, NO_TUBES, NO_TUBES, NO_TUBES]);

        // A bad payload keeps the previous content
        assert_eq!(
            task.set_data_from_serial(b"9x", 0, 100),
            Err(CommandError::InvalidDigit)
        );
        assert_eq!(task.tubes()[1], 9);
    }

    #[test]
    fn test_click_dismisses() {
        let mut clock = MockClock::at((2024, 1, 1), TimeOfDay::new(0, 0, 0));
        let mut ui = UiState::default();
        let config = ClockConfig::default();
        let mut ctx = TaskContext {
            time: &mut clock,
            now_ms: 10,
            ui: &mut ui,
            config: &config,
        };

        let mut task = FlashTask::new();
        task.set_data([0; TUBE_COUNT], DotMask::BOTH, 0, 1_000);
        assert!(!task.handle_button_press(&mut ctx, Button::Up, PressType::LongPressStart));
        assert!(task.handle_button_press(&mut ctx, Button::Up, PressType::Click));
        assert!(!task.can_show(ctx.now_ms));
        assert!(ctx.ui.take_advance_request());
    }
}
