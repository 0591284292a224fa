//! Notifications emitted by the path-running services.
//!
//! [`Notifier`] is an explicit observer registry: subscribers are called
//! synchronously, in registration order, at the moment a notification is
//! emitted. A notifier built with [`Notifier::recording`] also appends every
//! notification to a log the owner drains; without it nothing is retained.

use crate::direction::Direction;
use crate::library::PathId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The typed buffer changed (append or backspace to a non-empty buffer).
    BufferChanged(Vec<Direction>),
    /// The matched set was recomputed; ids are in library order.
    MatchSetChanged(Vec<PathId>),
    /// The previewed path changed; `None` when nothing matches.
    PreviewChanged(Option<PathId>),
    /// Buffer, matches and preview were all cleared.
    InputReset,
    /// Projected stamina cost of the typed sequence and what would remain.
    StaminaPreview { cost: u32, remaining: u32 },
    StaminaChanged { current: u32, max: u32 },
    StaminaInsufficient,
    /// A click was swallowed because there was nothing to confirm.
    ClickConsumed,
    /// A path was picked on confirm; execution starts on the next tick.
    PathSelected(PathId),
    ExecutionStarted(PathId),
    ExecutionFinished(PathId),
    /// A path was unlocked or locked.
    InventoryChanged,
}

pub type Subscriber = Box<dyn FnMut(&Notification)>;

/// Observer registry plus an optional drainable log of emitted notifications.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Subscriber>,
    log: Vec<Notification>,
    recording: bool,
}

impl Notifier {
    /// Subscribers only; nothing is logged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribers plus a log that [`drain`](Self::drain) empties.
    pub fn recording() -> Self {
        Self {
            recording: true,
            ..Self::default()
        }
    }

    /// Turning recording off discards anything not yet drained.
    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
        if !recording {
            self.log.clear();
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Notification) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn emit(&mut self, notification: Notification) {
        for subscriber in &mut self.subscribers {
            subscriber(&notification);
        }
        if self.recording {
            self.log.push(notification);
        }
    }

    /// Notifications emitted since the last drain.
    pub fn pending(&self) -> &[Notification] {
        &self.log
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.log)
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .field("recording", &self.recording)
            .field("log", &self.log)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribers_see_notifications_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        let sink = Rc::clone(&seen);
        notifier.subscribe(move |n| sink.borrow_mut().push(n.clone()));

        notifier.emit(Notification::InputReset);
        notifier.emit(Notification::StaminaInsufficient);

        assert_eq!(
            *seen.borrow(),
            vec![Notification::InputReset, Notification::StaminaInsufficient]
        );
    }

    #[test]
    fn drain_empties_the_log() {
        let mut notifier = Notifier::recording();
        notifier.emit(Notification::ClickConsumed);
        assert_eq!(notifier.pending().len(), 1);
        assert_eq!(notifier.drain(), vec![Notification::ClickConsumed]);
        assert!(notifier.pending().is_empty());
    }

    #[test]
    fn subscriber_only_notifier_keeps_no_log() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();
        let sink = Rc::clone(&count);
        notifier.subscribe(move |_| *sink.borrow_mut() += 1);

        for _ in 0..1000 {
            notifier.emit(Notification::PreviewChanged(None));
        }
        assert_eq!(*count.borrow(), 1000);
        assert!(notifier.pending().is_empty());
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn stopping_recording_discards_the_log() {
        let mut notifier = Notifier::recording();
        notifier.emit(Notification::InventoryChanged);
        notifier.set_recording(false);
        assert!(notifier.pending().is_empty());
        notifier.emit(Notification::InventoryChanged);
        assert!(notifier.drain().is_empty());
    }
}
