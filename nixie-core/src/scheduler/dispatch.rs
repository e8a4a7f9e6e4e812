//! Task rotation, rendering and input routing
//!
//! [`Scheduler::update`] runs once per UI tick on the main context. It
//! picks the current task, lets it render into the display buffer, and
//! overlays the anti-poison run. [`Scheduler::publish`] then hands the
//! result to the multiplex driver.

use heapless::Vec;

use super::{SchedulerError, TaskId, TaskRing};
use crate::command::SerialCommand;
use crate::config::{ClockConfig, Color, MAX_TASKS};
use crate::display::{
    DisplayBuffer, DisplayEffect, DotMask, SharedDisplay, TransitionTracker, TUBE_COUNT,
};
use crate::input::{Button, ButtonEvent, PressType};
use crate::task::{DisplayTask, TaskContext, TaskKind};
use crate::time::MS_PER_SECOND;
use crate::traits::TimeSource;
use crate::ui::UiState;

pub struct Scheduler {
    ring: TaskRing<DisplayTask, MAX_TASKS>,
    current: Option<TaskId>,
    next_cycle_ms: u64,
    ui: UiState,
    config: ClockConfig,
    buffer: DisplayBuffer,
    transition: TransitionTracker,
    last_update_ms: Option<u64>,
    last_button_ms: u64,
}

impl Scheduler {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            ring: TaskRing::new(),
            current: None,
            next_cycle_ms: 0,
            ui: UiState::new(config.effect),
            config,
            buffer: DisplayBuffer::blank(),
            transition: TransitionTracker::new(),
            last_update_ms: None,
            last_button_ms: 0,
        }
    }

    /// Store a task without showing it
    pub fn insert(&mut self, task: DisplayTask) -> Result<TaskId, SchedulerError> {
        self.ring.insert(task)
    }

    /// Link a stored task into the rotation
    pub fn add(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        self.ring.add(id)
    }

    /// Store and link a task
    pub fn spawn(&mut self, task: DisplayTask) -> Result<TaskId, SchedulerError> {
        let id = self.ring.insert(task)?;
        self.ring.add(id)?;
        Ok(id)
    }

    /// Take a task out of the rotation; the current task moves to its successor
    pub fn remove(&mut self, id: TaskId) -> Result<(), SchedulerError> {
        if self.current == Some(id) {
            self.current = self.ring.next(id).filter(|&next| next != id);
            self.ui.edit.exit();
        }
        self.ring.remove(id)
    }

    /// Remove a task and free its slot
    pub fn release(&mut self, id: TaskId) -> Option<DisplayTask> {
        self.remove(id).ok()?;
        self.ring.release(id)
    }

    pub fn task(&self, id: TaskId) -> Option<&DisplayTask> {
        self.ring.get(id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut DisplayTask> {
        self.ring.get_mut(id)
    }

    pub fn current(&self) -> Option<TaskId> {
        self.current
    }

    pub fn current_task(&self) -> Option<&DisplayTask> {
        self.current.and_then(|id| self.ring.get(id))
    }

    pub fn ring(&self) -> &TaskRing<DisplayTask, MAX_TASKS> {
        &self.ring
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Next linked task after `start`, optionally only eligible ones
    ///
    /// Walks at most one revolution and returns `None` when nothing
    /// qualifies.
    pub fn find_next_valid<T: TimeSource>(
        &self,
        start: Option<TaskId>,
        must_can_show: bool,
        time: &T,
        now_ms: u64,
    ) -> Option<TaskId> {
        self.ring
            .find(start, |_, task| !must_can_show || task.can_show(time, now_ms))
    }

    /// Rotate to the next eligible task
    ///
    /// Tasks that are not low priority win. Low priority tasks are only
    /// picked when nothing else can show. With no eligible task the
    /// current one stays.
    pub fn cycle_display_updater<T: TimeSource>(&mut self, time: &T, now_ms: u64) {
        let start = self.current;
        let pick = self
            .ring
            .find(start, |_, task| !task.lo_pri && task.can_show(time, now_ms))
            .or_else(|| {
                self.ring
                    .find(start, |_, task| task.lo_pri && task.can_show(time, now_ms))
            });

        if let Some(id) = pick {
            self.current = Some(id);
        }
        self.next_cycle_ms = now_ms + u64::from(self.config.display_cycle_ms);
    }

    /// Make a linked task current immediately
    pub fn show_now(&mut self, id: TaskId, now_ms: u64) -> Result<(), SchedulerError> {
        if !self.ring.is_linked(id) {
            return Err(SchedulerError::InvalidTask);
        }
        if self.current != Some(id) {
            self.ui.edit.exit();
        }
        self.current = Some(id);
        self.next_cycle_ms = now_ms + u64::from(self.config.display_cycle_ms);
        Ok(())
    }

    /// Move to the next eligible task regardless of priority
    fn advance<T: TimeSource>(&mut self, time: &T, now_ms: u64) {
        if let Some(id) = self.find_next_valid(self.current, true, time, now_ms) {
            self.current = Some(id);
        }
        self.ui.edit.exit();
        self.next_cycle_ms = now_ms + u64::from(self.config.display_cycle_ms);
    }

    /// One main-loop step; returns the buffer to publish
    pub fn update<T: TimeSource>(&mut self, time: &mut T, now_ms: u64) -> &DisplayBuffer {
        let elapsed = self
            .last_update_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_update_ms = Some(now_ms);

        if self.ui.edit.is_active()
            && now_ms.saturating_sub(self.last_button_ms) >= u64::from(self.config.edit_timeout_ms)
        {
            self.ui.edit.exit();
        }

        self.reap(&*time, now_ms);

        // The task under edit stays current even while its value passes
        // through an ineligible state such as a zero countdown
        let editing = self.ui.edit.is_active();
        let current_ok = self.current_task().is_some_and(|task| {
            (editing && task.supports_edit()) || task.can_show(&*time, now_ms)
        });
        if !current_ok {
            self.ui.edit.exit();
            self.cycle_display_updater(&*time, now_ms);
        } else if !self.ui.edit.is_active() && now_ms >= self.next_cycle_ms {
            self.cycle_display_updater(&*time, now_ms);
        }

        if self.ui.take_advance_request() {
            self.advance(&*time, now_ms);
        }

        self.render(time, now_ms);

        if self.ui.edit.is_active() {
            self.ui.anti_poison.cancel();
        }
        if let Some(digit) = self
            .ui
            .anti_poison
            .digit(now_ms, self.config.anti_poison_step_ms)
        {
            self.buffer.fill(digit);
        }

        self.transition.update(
            &self.buffer,
            self.active_effect(),
            self.config.effect_speed_ms,
            u32::try_from(elapsed).unwrap_or(u32::MAX),
        );
        &self.buffer
    }

    /// Release transient tasks that can no longer show
    fn reap<T: TimeSource>(&mut self, time: &T, now_ms: u64) {
        let expired: Vec<TaskId, MAX_TASKS> = self
            .ring
            .iter()
            .filter(|(id, task)| {
                self.ring.is_linked(*id) && task.remove_on_cant_show && !task.can_show(time, now_ms)
            })
            .map(|(id, _)| id)
            .collect();

        for id in expired {
            if self.current == Some(id) {
                self.current = None;
            }
            self.ring.release(id);
        }
    }

    fn render<T: TimeSource>(&mut self, time: &mut T, now_ms: u64) {
        self.buffer.clear();
        if self.refresh_current(time, now_ms) {
            return;
        }

        self.cycle_display_updater(&*time, now_ms);
        self.buffer.clear();
        if !self.refresh_current(time, now_ms) {
            self.buffer.clear();
        }
    }

    fn refresh_current<T: TimeSource>(&mut self, time: &mut T, now_ms: u64) -> bool {
        let Some(task) = self.current.and_then(|id| self.ring.get_mut(id)) else {
            return false;
        };
        let mut ctx = TaskContext {
            time,
            now_ms,
            ui: &mut self.ui,
            config: &self.config,
        };
        task.refresh(&mut ctx, &mut self.buffer)
    }

    fn active_effect(&self) -> DisplayEffect {
        if self.current_task().is_some_and(DisplayTask::allows_effects) {
            self.ui.effect
        } else {
            DisplayEffect::None
        }
    }

    /// Copy the rendered frame to the interrupt-side display state
    pub fn publish(&self, shared: &SharedDisplay) {
        shared.publish(
            &self.buffer,
            &self.transition,
            self.active_effect(),
            self.config.effect_speed_ms,
        );
    }

    /// Route one button gesture
    ///
    /// A long press of Set toggles edit mode on tasks that support it.
    /// While editing, Set clicks move the cursor and Up/Down clicks
    /// change the digit under it. Everything else goes to the current
    /// task.
    pub fn handle_button<T: TimeSource>(&mut self, time: &mut T, now_ms: u64, event: ButtonEvent) {
        self.last_button_ms = now_ms;

        let Some(task) = self.current.and_then(|id| self.ring.get_mut(id)) else {
            return;
        };
        let mut ctx = TaskContext {
            time: &mut *time,
            now_ms,
            ui: &mut self.ui,
            config: &self.config,
        };

        if event.button == Button::Set
            && event.press == PressType::LongPressStart
            && task.supports_edit()
        {
            if ctx.ui.edit.is_active() {
                ctx.ui.edit.exit();
            } else {
                ctx.ui.edit.enter();
                ctx.ui.anti_poison.cancel();
            }
            return;
        }

        if ctx.ui.edit.is_active() {
            let pos = ctx.ui.edit.pos();
            match (event.button, event.press) {
                (Button::Set, PressType::Click) => ctx.ui.edit.next_digit(),
                (Button::Up, PressType::Click) => task.handle_edit(&mut ctx, pos, true),
                (Button::Down, PressType::Click) => task.handle_edit(&mut ctx, pos, false),
                _ => {}
            }
            return;
        }

        task.handle_button_press(&mut ctx, event.button, event.press);

        if self.ui.take_advance_request() {
            self.advance(&*time, now_ms);
        }
    }

    /// Apply a parsed serial command
    pub fn apply_command<T: TimeSource>(
        &mut self,
        time: &T,
        now_ms: u64,
        command: SerialCommand,
    ) -> Result<TaskId, SchedulerError> {
        match command {
            SerialCommand::Flash { tubes, dots } => self.show_flash(tubes, dots, now_ms),
            SerialCommand::Countdown { seconds } => {
                let target = time.now_ms() + u64::from(seconds) * MS_PER_SECOND;
                let id = self.find_countdown()?;
                if let Some(countdown) = self.ring.get_mut(id).and_then(DisplayTask::as_countdown_mut) {
                    countdown.start(target);
                }
                self.show_now(id, now_ms)?;
                Ok(id)
            }
            SerialCommand::CancelCountdown => {
                let id = self.find_countdown()?;
                if let Some(countdown) = self.ring.get_mut(id).and_then(DisplayTask::as_countdown_mut) {
                    countdown.cancel();
                }
                Ok(id)
            }
        }
    }

    fn find_countdown(&self) -> Result<TaskId, SchedulerError> {
        self.ring
            .iter()
            .find(|(id, task)| self.ring.is_linked(*id) && matches!(task.kind, TaskKind::Countdown(_)))
            .map(|(id, _)| id)
            .ok_or(SchedulerError::NoSuchTask)
    }

    /// Show digits on a flash task, reusing a live one when present
    pub fn show_flash(
        &mut self,
        tubes: [u8; TUBE_COUNT],
        dots: DotMask,
        now_ms: u64,
    ) -> Result<TaskId, SchedulerError> {
        let existing = self
            .ring
            .iter()
            .find(|(id, task)| self.ring.is_linked(*id) && matches!(task.kind, TaskKind::Flash(_)))
            .map(|(id, _)| id);

        let id = match existing {
            Some(id) => id,
            None => self.spawn(DisplayTask::flash())?,
        };

        let duration = self.config.flash_duration_ms;
        if let Some(flash) = self.ring.get_mut(id).and_then(DisplayTask::as_flash_mut) {
            flash.set_data(tubes, dots, now_ms, duration);
        }
        self.show_now(id, now_ms)?;
        Ok(id)
    }

    /// Backlight color of the current task
    pub fn current_color(&self) -> Color {
        self.current_task().map_or(Color::OFF, |task| task.color)
    }

    /// Apply a persisted color to the task owning `slot`
    pub fn set_slot_color(&mut self, slot: u8, color: Color) {
        for (_, task) in self.ring.iter_mut() {
            if task.color_slot == Some(slot) {
                task.color = color;
                task.color_dirty = false;
            }
        }
    }

    /// Flag the color of the task owning `slot` as unsaved again
    pub fn mark_color_dirty(&mut self, slot: u8) {
        for (_, task) in self.ring.iter_mut() {
            if task.color_slot == Some(slot) {
                task.color_dirty = true;
            }
        }
    }

    /// Take one changed color that needs saving
    pub fn take_color_change(&mut self) -> Option<(u8, Color)> {
        self.ring.iter_mut().find_map(|(_, task)| {
            let slot = task.color_slot.filter(|_| task.color_dirty)?;
            task.color_dirty = false;
            Some((slot, task.color))
        })
    }
}
