//! Countdown task: remaining time to an absolute wall-clock target

use super::edit::step_field;
use super::TaskContext;
use crate::command::MAX_COUNTDOWN_S;
use crate::display::{DisplayBuffer, DotMask};
use crate::input::{Button, PressType};
use crate::time::MS_PER_SECOND;
use crate::traits::TimeSource;

#[derive(Debug, Clone, Default)]
pub struct CountdownTask {
    target_ms: Option<u64>,
    remaining_s: u32,
}

/// Split seconds into hours, minutes, seconds
fn split_hms(total: u32) -> (u8, u8, u8) {
    let total = total.min(MAX_COUNTDOWN_S);
    ((total / 3_600) as u8, (total / 60 % 60) as u8, (total % 60) as u8)
}

impl CountdownTask {
    pub const fn new() -> Self {
        Self {
            target_ms: None,
            remaining_s: 0,
        }
    }

    /// Arm for an absolute wall-clock target
    pub fn start(&mut self, target_ms: u64) {
        self.target_ms = Some(target_ms);
    }

    pub fn cancel(&mut self) {
        self.target_ms = None;
        self.remaining_s = 0;
    }

    pub fn target_ms(&self) -> Option<u64> {
        self.target_ms
    }

    pub fn can_show(&self, wall_ms: u64) -> bool {
        self.target_ms.is_some_and(|target| target > wall_ms)
    }

    pub(super) fn render<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        buf: &mut DisplayBuffer,
        dots: &mut DotMask,
    ) -> bool {
        if !ctx.editing() {
            let now = ctx.time.now_ms();
            let Some(target) = self.target_ms.filter(|&t| t > now) else {
                return false;
            };
            let left_ms = target - now;
            let seconds = left_ms.div_ceil(MS_PER_SECOND);
            self.remaining_s = u32::try_from(seconds).unwrap_or(u32::MAX);
        }

        let (h, m, s) = split_hms(self.remaining_s);
        *dots = if s % 2 == 1 || ctx.editing() {
            DotMask::BOTH
        } else {
            DotMask::NONE
        };

        buf.insert2(0, h, false);
        buf.insert2(2, m, false);
        buf.insert2(4, s, false);
        true
    }

    pub(super) fn handle_button_press<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        button: Button,
        press: PressType,
    ) -> bool {
        match (button, press) {
            (Button::Down, PressType::LongPressStart) if !ctx.editing() => {
                self.cancel();
                ctx.ui.request_advance();
                true
            }
            _ => false,
        }
    }

    /// Edit one digit of the remaining time and re-arm from now
    pub(super) fn handle_edit<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        digit: u8,
        up: bool,
    ) {
        let (mut h, mut m, mut s) = split_hms(self.remaining_s);
        let tens = digit % 2 == 0;
        match digit / 2 {
            0 => h = step_field(h, 99, tens, up),
            1 => m = step_field(m, 59, tens, up),
            2 => s = step_field(s, 59, tens, up),
            _ => return,
        }

        self.remaining_s = u32::from(h) * 3_600 + u32::from(m) * 60 + u32::from(s);
        self.target_ms = Some(ctx.time.now_ms() + u64::from(self.remaining_s) * MS_PER_SECOND);
    }
}
