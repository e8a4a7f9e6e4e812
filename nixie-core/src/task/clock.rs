//! Clock task: shows the time of day and lets edit mode set it

use super::edit::step_digit;
use super::TaskContext;
use crate::display::{DisplayBuffer, DotMask};
use crate::input::{Button, PressType};
use crate::time::TimeOfDay;
use crate::traits::TimeSource;

#[derive(Debug, Clone, Default)]
pub struct ClockTask {
    time: TimeOfDay,
    synced: bool,
}

impl ClockTask {
    pub const fn new() -> Self {
        Self {
            time: TimeOfDay::new(0, 0, 0),
            synced: false,
        }
    }

    /// Time shown by the last refresh (or being edited)
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub(super) fn render<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        buf: &mut DisplayBuffer,
        dots: &mut DotMask,
    ) -> bool {
        if !ctx.editing() {
            let now = TimeOfDay::from_epoch_ms(ctx.time.now_ms());
            if self.synced && ctx.config.anti_poison {
                self.check_anti_poison(ctx, now);
            }
            self.time = now;
            self.synced = true;
        }

        *dots = if self.time.second % 2 == 1 || ctx.editing() {
            DotMask::BOTH
        } else {
            DotMask::NONE
        };

        buf.insert2(0, self.time.hour, ctx.config.trim_hours);
        buf.insert2(2, self.time.minute, false);
        buf.insert2(4, self.time.second, false);
        true
    }

    /// Start an anti-poison run on the boundaries that call for one
    fn check_anti_poison<T: TimeSource>(&self, ctx: &mut TaskContext<'_, T>, now: TimeOfDay) {
        if now.hour < 4 && now.second != self.time.second && now.second % 5 == 2 {
            ctx.ui.anti_poison.trigger(1, ctx.now_ms);
        } else if now.minute != self.time.minute && now.minute % 10 == 2 {
            ctx.ui.anti_poison.trigger(2, ctx.now_ms);
        }
    }

    pub(super) fn handle_button_press<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        button: Button,
        press: PressType,
    ) -> bool {
        match (button, press) {
            (Button::Up | Button::Down, PressType::Click) if !ctx.editing() => {
                ctx.ui.effect = ctx.ui.effect.next();
                true
            }
            _ => false,
        }
    }

    pub(super) fn handle_edit<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        digit: u8,
        up: bool,
    ) {
        self.time = step_digit(self.time, digit, up);
        ctx.time.set_time_of_day(self.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockConfig;
    use crate::display::DisplayEffect;
    use crate::time::mock::MockClock;
    use crate::tube::NO_TUBES;
    use crate::ui::UiState;

    struct Harness {
        clock: MockClock,
        ui: UiState,
        config: ClockConfig,
        task: ClockTask,
        buf: DisplayBuffer,
        dots: DotMask,
    }

    impl Harness {
        fn at(time: TimeOfDay) -> Self {
            Self {
                clock: MockClock::at((2024, 3, 10), time),
                ui: UiState::default(),
                config: ClockConfig::default(),
                task: ClockTask::new(),
                buf: DisplayBuffer::blank(),
                dots: DotMask::NONE,
            }
        }

        fn refresh(&mut self) -> bool {
            let mut ctx = TaskContext {
                time: &mut self.clock,
                now_ms: 0,
                ui: &mut self.ui,
                config: &self.config,
            };
            self.task.render(&mut ctx, &mut self.buf, &mut self.dots)
        }

        fn edit(&mut self, digit: u8, up: bool) {
            let mut ctx = TaskContext {
                time: &mut self.clock,
                now_ms: 0,
                ui: &mut self.ui,
                config: &self.config,
            };
            self.task.handle_edit(&mut ctx, digit, up);
        }

        fn tubes(&self) -> [u8; 6] {
            let mut out = [0; 6];
            for (pos, tube) in out.iter_mut().enumerate() {
                *tube = self.buf.tube(pos).unwrap_or(NO_TUBES);
            }
            out
        }
    }

    #[test]
    fn test_renders_time() {
        let mut h = Harness::at(TimeOfDay::new(9, 41, 7));
        assert!(h.refresh());
        assert_eq!(h.tubes(), [0, 9, 4, 1, 0, 7]);
        assert_eq!(h.dots, DotMask::BOTH);

        h.clock.advance_ms(1_000);
        h.refresh();
        assert_eq!(h.dots, DotMask::NONE);
    }

    #[test]
    fn test_trim_hours() {
        let mut h = Harness::at(TimeOfDay::new(9, 41, 7));
        h.config.trim_hours = true;
        h.refresh();
        assert_eq!(h.tubes()[0], NO_TUBES);
    }

    #[test]
    fn test_edit_commits_to_time_source() {
        let mut h = Harness::at(TimeOfDay::new(23, 15, 30));
        h.refresh();
        h.ui.edit.enter();

        h.edit(0, true);
        assert_eq!(h.task.time(), TimeOfDay::new(3, 15, 30));
        assert_eq!(TimeOfDay::from_epoch_ms(h.clock.now_ms), TimeOfDay::new(3, 15, 30));
        assert_eq!(h.clock.writes, 1);

        // Edit mode keeps the edited value even if the source moves on
        h.clock.advance_ms(5_000);
        h.refresh();
        assert_eq!(h.tubes(), [0, 3, 1, 5, 3, 0]);
        assert_eq!(h.dots, DotMask::BOTH);
    }

    #[test]
    fn test_anti_poison_on_minute_boundary() {
        let mut h = Harness::at(TimeOfDay::new(12, 41, 59));
        h.refresh();
        assert_eq!(h.ui.anti_poison.fired(), 0);

        h.clock.advance_ms(1_000);
        h.refresh();
        assert_eq!(h.ui.anti_poison.fired(), 1);

        // Same minute again does not re-fire
        h.clock.advance_ms(1_000);
        h.refresh();
        assert_eq!(h.ui.anti_poison.fired(), 1);
    }

    #[test]
    fn test_anti_poison_small_hours() {
        let mut h = Harness::at(TimeOfDay::new(2, 10, 0));
        h.refresh();
        for _ in 0..10 {
            h.clock.advance_ms(1_000);
            h.refresh();
        }
        // Seconds 2 and 7
        assert_eq!(h.ui.anti_poison.fired(), 2);
    }

    #[test]
    fn test_anti_poison_skipped_in_edit_mode() {
        let mut h = Harness::at(TimeOfDay::new(12, 41, 59));
        h.refresh();
        h.ui.edit.enter();
        h.clock.advance_ms(1_000);
        h.refresh();
        assert_eq!(h.ui.anti_poison.fired(), 0);
    }

    #[test]
    fn test_anti_poison_disabled() {
        let mut h = Harness::at(TimeOfDay::new(12, 41, 59));
        h.config.anti_poison = false;
        h.refresh();
        h.clock.advance_ms(1_000);
        h.refresh();
        assert_eq!(h.ui.anti_poison.fired(), 0);
    }

    #[test]
    fn test_click_cycles_effect() {
        let mut h = Harness::at(TimeOfDay::new(12, 0, 0));
        let mut ctx = TaskContext {
            time: &mut h.clock,
            now_ms: 0,
            ui: &mut h.ui,
            config: &h.config,
        };
        assert!(h.task.handle_button_press(&mut ctx, Button::Down, PressType::Click));
        assert_eq!(ctx.ui.effect, DisplayEffect::Transition);
        assert!(!h.task.handle_button_press(&mut ctx, Button::Set, PressType::Click));
    }
}
