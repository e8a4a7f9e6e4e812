//! Display tasks
//!
//! A display task owns the tubes while it is current. The set of task
//! kinds is closed: [`ClockTask`], [`CountdownTask`] and [`FlashTask`].
//! Common attributes and the fallback button handling live on
//! [`DisplayTask`].

pub mod clock;
pub mod countdown;
pub mod edit;
pub mod flash;

pub use clock::ClockTask;
pub use countdown::CountdownTask;
pub use flash::FlashTask;

use crate::config::{ClockConfig, Color, CLOCK_COLOR_SLOT, COUNTDOWN_COLOR_SLOT};
use crate::config::{DEFAULT_CLOCK_COLOR, DEFAULT_COUNTDOWN_COLOR, FLASH_COLOR};
use crate::display::{DisplayBuffer, DotMask};
use crate::input::{Button, PressType};
use crate::traits::TimeSource;
use crate::tube::NO_TUBES;
use crate::ui::UiState;

/// Blink period of the digit under the edit cursor
pub const EDIT_BLINK_MS: u64 = 500;

/// Everything a task operation may look at or change
pub struct TaskContext<'a, T> {
    /// Wall clock
    pub time: &'a mut T,
    /// Monotonic uptime
    pub now_ms: u64,
    pub ui: &'a mut UiState,
    pub config: &'a ClockConfig,
}

impl<'a, T: TimeSource> TaskContext<'a, T> {
    pub fn editing(&self) -> bool {
        self.ui.edit.is_active()
    }

    /// Blank the digit under the edit cursor during the first half period
    fn blink_edit_digit(&self, buf: &mut DisplayBuffer) {
        if self.editing() && self.now_ms % EDIT_BLINK_MS < EDIT_BLINK_MS / 2 {
            buf.set_tube(usize::from(self.ui.edit.pos()), NO_TUBES);
        }
    }
}

#[derive(Debug, Clone)]
pub enum TaskKind {
    Clock(ClockTask),
    Countdown(CountdownTask),
    Flash(FlashTask),
}

#[derive(Debug, Clone)]
pub struct DisplayTask {
    pub color: Color,
    pub dot_mask: DotMask,
    /// Only shown when no other task is eligible
    pub lo_pri: bool,
    /// Drop from the ring as soon as it stops being eligible
    pub remove_on_cant_show: bool,
    /// Slot under which the color is persisted
    pub color_slot: Option<u8>,
    pub color_dirty: bool,
    pub kind: TaskKind,
}

impl DisplayTask {
    fn with_kind(kind: TaskKind, color: Color) -> Self {
        Self {
            color,
            dot_mask: DotMask::NONE,
            lo_pri: false,
            remove_on_cant_show: false,
            color_slot: None,
            color_dirty: false,
            kind,
        }
    }

    pub fn clock() -> Self {
        Self {
            lo_pri: true,
            color_slot: Some(CLOCK_COLOR_SLOT),
            ..Self::with_kind(TaskKind::Clock(ClockTask::new()), DEFAULT_CLOCK_COLOR)
        }
    }

    pub fn countdown() -> Self {
        Self {
            color_slot: Some(COUNTDOWN_COLOR_SLOT),
            ..Self::with_kind(
                TaskKind::Countdown(CountdownTask::new()),
                DEFAULT_COUNTDOWN_COLOR,
            )
        }
    }

    pub fn flash() -> Self {
        Self {
            remove_on_cant_show: true,
            ..Self::with_kind(TaskKind::Flash(FlashTask::new()), FLASH_COLOR)
        }
    }

    /// Render into `buf`; returns false when there is nothing to show
    pub fn refresh<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        buf: &mut DisplayBuffer,
    ) -> bool {
        let rendered = match &mut self.kind {
            TaskKind::Clock(clock) => clock.render(ctx, buf, &mut self.dot_mask),
            TaskKind::Countdown(countdown) => countdown.render(ctx, buf, &mut self.dot_mask),
            TaskKind::Flash(flash) => flash.render(ctx, buf, &mut self.dot_mask),
        };
        if rendered {
            ctx.blink_edit_digit(buf);
            buf.set_dots(self.dot_mask);
        }
        rendered
    }

    pub fn handle_button_press<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        button: Button,
        press: PressType,
    ) {
        let consumed = match &mut self.kind {
            TaskKind::Clock(clock) => clock.handle_button_press(ctx, button, press),
            TaskKind::Countdown(countdown) => countdown.handle_button_press(ctx, button, press),
            TaskKind::Flash(flash) => flash.handle_button_press(ctx, button, press),
        };
        if !consumed {
            self.base_button_press(ctx, button, press);
        }
    }

    /// Navigation shared by every task
    fn base_button_press<T: TimeSource>(
        &mut self,
        ctx: &mut TaskContext<'_, T>,
        button: Button,
        press: PressType,
    ) {
        match (button, press) {
            (Button::Set, PressType::Click) => ctx.ui.request_advance(),
            (Button::Up, PressType::Click) => ctx.ui.effect = ctx.ui.effect.next(),
            (Button::Down, PressType::Click) => ctx.ui.effect = ctx.ui.effect.prev(),
            (Button::Up, PressType::LongPressStart) => self.step_color(true),
            (Button::Down, PressType::LongPressStart) => self.step_color(false),
            (Button::Set, PressType::LongPressStart) => {}
        }
    }

    fn step_color(&mut self, forward: bool) {
        self.color = self.color.palette_step(forward);
        self.color_dirty = self.color_slot.is_some();
    }

    pub fn handle_edit<T: TimeSource>(&mut self, ctx: &mut TaskContext<'_, T>, digit: u8, up: bool) {
        match &mut self.kind {
            TaskKind::Clock(clock) => clock.handle_edit(ctx, digit, up),
            TaskKind::Countdown(countdown) => countdown.handle_edit(ctx, digit, up),
            TaskKind::Flash(_) => {}
        }
    }

    /// Whether the task may be shown right now
    pub fn can_show<T: TimeSource>(&self, time: &T, now_ms: u64) -> bool {
        match &self.kind {
            TaskKind::Clock(_) => true,
            TaskKind::Countdown(countdown) => countdown.can_show(time.now_ms()),
            TaskKind::Flash(flash) => flash.can_show(now_ms),
        }
    }

    pub fn supports_edit(&self) -> bool {
        matches!(self.kind, TaskKind::Clock(_) | TaskKind::Countdown(_))
    }

    pub fn allows_effects(&self) -> bool {
        match &self.kind {
            TaskKind::Flash(flash) => flash.allow_effects,
            _ => true,
        }
    }

    pub fn as_countdown_mut(&mut self) -> Option<&mut CountdownTask> {
        match &mut self.kind {
            TaskKind::Countdown(countdown) => Some(countdown),
            _ => None,
        }
    }

    pub fn as_flash_mut(&mut self) -> Option<&mut FlashTask> {
        match &mut self.kind {
            TaskKind::Flash(flash) => Some(flash),
            _ => None,
        }
    }

    pub fn is_clock(&self) -> bool {
        matches!(self.kind, TaskKind::Clock(_))
    }
}
