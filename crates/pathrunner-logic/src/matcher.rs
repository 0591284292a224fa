//! Direction buffer and prefix matching against the path library.
//!
//! The matcher is `Idle` while the buffer is empty and `Accumulating`
//! otherwise. Every buffer edit recomputes the match set from scratch
//! (unlocked paths whose direction key starts with the buffer, in library
//! order) and restarts preview cycling at the first match. Anything that
//! clears the buffer also clears the matches, the preview cursor and the
//! preview timer in the same call.

use rand::Rng;

use crate::config::InputConfig;
use crate::direction::{is_prefix_of, Direction};
use crate::events::{Notification, Notifier};
use crate::library::{PathId, PathLibrary};
use crate::stamina::StaminaPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherState {
    Idle,
    Accumulating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Accepted,
    /// A keystroke arrived inside the cooldown window.
    CoolingDown,
    /// The longer sequence would cost more stamina than is available.
    Insufficient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Nothing matched; the click is consumed and goes nowhere.
    Swallowed,
    /// Matches exist but the typed sequence is unaffordable. No state change.
    Insufficient,
    /// A path was picked and the matcher is back to idle.
    Selected { path: PathId, directions: usize },
}

#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    buffer: Vec<Direction>,
    matches: Vec<PathId>,
    preview_index: usize,
    preview_timer: f32,
    cooldown_timer: f32,
    keystroke_cooldown: f32,
    cycle_interval: f32,
}

impl Default for SequenceMatcher {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

impl SequenceMatcher {
    pub fn new(keystroke_cooldown: f32, cycle_interval: f32) -> Self {
        Self {
            buffer: Vec::new(),
            matches: Vec::new(),
            preview_index: 0,
            preview_timer: 0.0,
            cooldown_timer: 0.0,
            keystroke_cooldown,
            cycle_interval,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.keystroke_cooldown, config.preview_cycle_interval)
    }

    pub fn state(&self) -> MatcherState {
        if self.buffer.is_empty() {
            MatcherState::Idle
        } else {
            MatcherState::Accumulating
        }
    }

    pub fn buffer(&self) -> &[Direction] {
        &self.buffer
    }

    pub fn matches(&self) -> &[PathId] {
        &self.matches
    }

    /// Currently previewed match.
    pub fn preview(&self) -> Option<PathId> {
        self.matches.get(self.preview_index).copied()
    }

    pub fn cooldown_active(&self) -> bool {
        self.cooldown_timer > 0.0
    }

    pub fn try_append(
        &mut self,
        direction: Direction,
        library: &PathLibrary,
        stamina: &StaminaPool,
        events: &mut Notifier,
    ) -> AppendOutcome {
        if self.cooldown_active() {
            return AppendOutcome::CoolingDown;
        }
        if !stamina.can_afford(self.buffer.len() + 1) {
            log::debug!(
                "rejected {:?}: {} directions would cost {}, have {}",
                direction,
                self.buffer.len() + 1,
                stamina.cost(self.buffer.len() + 1),
                stamina.current()
            );
            events.emit(Notification::StaminaInsufficient);
            return AppendOutcome::Insufficient;
        }

        self.buffer.push(direction);
        self.cooldown_timer = self.keystroke_cooldown;
        self.buffer_edited(library, stamina, events);
        AppendOutcome::Accepted
    }

    /// Drop the last direction. Returns false if the buffer was already empty.
    pub fn remove_last(
        &mut self,
        library: &PathLibrary,
        stamina: &StaminaPool,
        events: &mut Notifier,
    ) -> bool {
        if self.buffer.pop().is_none() {
            return false;
        }
        self.cooldown_timer = self.keystroke_cooldown;
        if self.buffer.is_empty() {
            self.reset(events);
        } else {
            self.buffer_edited(library, stamina, events);
        }
        true
    }

    fn buffer_edited(&mut self, library: &PathLibrary, stamina: &StaminaPool, events: &mut Notifier) {
        events.emit(Notification::BufferChanged(self.buffer.clone()));
        self.refresh(library, events);
        let n = self.buffer.len();
        events.emit(Notification::StaminaPreview {
            cost: stamina.cost(n),
            remaining: stamina.preview_remaining(n),
        });
    }

    /// Recompute the match set against the library, e.g. after an unlock.
    /// Does nothing while idle.
    pub fn refresh(&mut self, library: &PathLibrary, events: &mut Notifier) {
        if self.buffer.is_empty() {
            return;
        }
        self.matches = library
            .unlocked()
            .filter(|(_, def)| is_prefix_of(&self.buffer, def.direction_key()))
            .filter(|(_, def)| !def.points().is_empty())
            .map(|(id, _)| id)
            .collect();
        self.preview_index = 0;
        self.preview_timer = 0.0;

        events.emit(Notification::MatchSetChanged(self.matches.clone()));
        events.emit(Notification::PreviewChanged(self.preview()));
    }

    /// Count down the keystroke cooldown.
    pub fn tick_timers(&mut self, dt: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        }
    }

    /// Rotate the preview through tied matches every `cycle_interval`.
    pub fn update_preview(&mut self, dt: f32, events: &mut Notifier) {
        if self.matches.is_empty() {
            return;
        }
        self.preview_timer += dt;
        if self.preview_timer >= self.cycle_interval {
            self.preview_timer = 0.0;
            self.preview_index = (self.preview_index + 1) % self.matches.len();
            events.emit(Notification::PreviewChanged(self.preview()));
        }
    }

    /// Handle a confirm click: pick uniformly among the matches.
    pub fn confirm(
        &mut self,
        rng: &mut impl Rng,
        stamina: &StaminaPool,
        events: &mut Notifier,
    ) -> ConfirmOutcome {
        if self.matches.is_empty() {
            log::debug!("confirm with no matches, click consumed");
            events.emit(Notification::ClickConsumed);
            return ConfirmOutcome::Swallowed;
        }
        let directions = self.buffer.len();
        if !stamina.can_afford(directions) {
            log::debug!("confirm rejected: cannot afford {} directions", directions);
            events.emit(Notification::StaminaInsufficient);
            return ConfirmOutcome::Insufficient;
        }

        let path = self.matches[rng.gen_range(0..self.matches.len())];
        log::info!("selected {} from {} matches", path, self.matches.len());
        self.reset(events);
        ConfirmOutcome::Selected { path, directions }
    }

    /// Clear buffer, matches and preview cycling.
    pub fn reset(&mut self, events: &mut Notifier) {
        self.buffer.clear();
        self.matches.clear();
        self.preview_index = 0;
        self.preview_timer = 0.0;
        events.emit(Notification::InputReset);
    }
}
