//! Stamina pool gating direction input and path execution.
//!
//! Cost of an `n`-direction sequence: `base_cost + n`.
//! A consume is check-then-act inside one call, so nothing can mutate the
//! pool between the affordability check and the subtraction.

use crate::config::StaminaConfig;
use crate::events::{Notification, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaminaPool {
    current: u32,
    max: u32,
    base_cost: u32,
}

impl StaminaPool {
    /// `current` is clamped to `max`.
    pub fn new(current: u32, max: u32, base_cost: u32) -> Self {
        Self {
            current: current.min(max),
            max,
            base_cost,
        }
    }

    pub fn from_config(config: &StaminaConfig) -> Self {
        Self::new(
            config.initial.unwrap_or(config.max),
            config.max,
            config.base_cost,
        )
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn base_cost(&self) -> u32 {
        self.base_cost
    }

    pub fn cost(&self, directions: usize) -> u32 {
        let n = u32::try_from(directions).unwrap_or(u32::MAX);
        self.base_cost.saturating_add(n)
    }

    pub fn can_afford(&self, directions: usize) -> bool {
        self.current >= self.cost(directions)
    }

    /// Stamina left after paying for `directions`, floored at zero.
    pub fn preview_remaining(&self, directions: usize) -> u32 {
        self.current.saturating_sub(self.cost(directions))
    }

    /// Pay for `directions`. On failure the pool is untouched and
    /// `StaminaInsufficient` is emitted.
    pub fn consume(&mut self, directions: usize, events: &mut Notifier) -> bool {
        if !self.can_afford(directions) {
            log::debug!(
                "stamina insufficient: need {}, have {}",
                self.cost(directions),
                self.current
            );
            events.emit(Notification::StaminaInsufficient);
            return false;
        }
        self.current -= self.cost(directions);
        events.emit(Notification::StaminaChanged {
            current: self.current,
            max: self.max,
        });
        true
    }

    pub fn restore(&mut self, amount: u32, events: &mut Notifier) {
        self.current = self.current.saturating_add(amount).min(self.max);
        events.emit(Notification::StaminaChanged {
            current: self.current,
            max: self.max,
        });
    }
}
