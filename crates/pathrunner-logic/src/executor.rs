//! Drives an actor along a frozen world-space path at constant speed.
//!
//! Per tick while moving: step toward the next point by `speed * dt`
//! without overshooting, report the new position to the reveal callback,
//! and advance to the following point once within `arrive_epsilon`. Reaching
//! the last point returns the executor to idle. Only one path runs at a time.

use crate::config::MovementConfig;
use crate::events::{Notification, Notifier};
use crate::library::PathId;
use crate::transform::TransformedPath;
use crate::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    Idle,
    Moving,
}

#[derive(Debug, Clone)]
struct ActivePath {
    path: PathId,
    points: Vec<Vec2>,
    index: usize,
}

#[derive(Debug, Clone)]
pub struct MovementExecutor {
    speed: f32,
    arrive_epsilon: f32,
    active: Option<ActivePath>,
    last_executed: Vec<Vec2>,
}

impl Default for MovementExecutor {
    fn default() -> Self {
        Self::from_config(&MovementConfig::default())
    }
}

impl MovementExecutor {
    pub fn new(speed: f32, arrive_epsilon: f32) -> Self {
        Self {
            speed,
            arrive_epsilon,
            active: None,
            last_executed: Vec::new(),
        }
    }

    pub fn from_config(config: &MovementConfig) -> Self {
        Self::new(config.speed, config.arrive_epsilon)
    }

    pub fn state(&self) -> ExecutorState {
        if self.active.is_some() {
            ExecutorState::Moving
        } else {
            ExecutorState::Idle
        }
    }

    pub fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    /// Path currently being executed.
    pub fn current_path(&self) -> Option<PathId> {
        self.active.as_ref().map(|a| a.path)
    }

    /// Index of the point the actor last reached.
    pub fn point_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    /// World points of the most recently started execution.
    pub fn last_executed(&self) -> &[Vec2] {
        &self.last_executed
    }

    /// Start executing `path`. Rejected (returns false) while already moving
    /// or if the path has fewer than two points.
    pub fn begin(&mut self, path: &TransformedPath, events: &mut Notifier) -> bool {
        if let Some(active) = &self.active {
            log::debug!("begin {} ignored: {} still executing", path.path, active.path);
            return false;
        }
        if path.points.len() < 2 {
            log::warn!("begin {} ignored: {} points", path.path, path.points.len());
            return false;
        }

        self.last_executed = path.points.clone();
        self.active = Some(ActivePath {
            path: path.path,
            points: path.points.clone(),
            index: 0,
        });
        log::debug!(
            "executing {} ({} points, scale {:.2})",
            path.path,
            path.points.len(),
            path.scale
        );
        events.emit(Notification::ExecutionStarted(path.path));
        true
    }

    /// Advance one tick. Returns the path id on the tick it completes.
    pub fn tick(
        &mut self,
        position: &mut Vec2,
        dt: f32,
        mut reveal: impl FnMut(Vec2),
        events: &mut Notifier,
    ) -> Option<PathId> {
        let active = self.active.as_mut()?;

        let target = active.points[active.index + 1];
        *position = position.move_towards(target, self.speed * dt);
        reveal(*position);

        if position.distance(&target) <= self.arrive_epsilon {
            active.index += 1;
        }
        if active.index + 1 < active.points.len() {
            return None;
        }

        let finished = active.path;
        self.active = None;
        log::debug!("{} finished at {}", finished, position);
        events.emit(Notification::ExecutionFinished(finished));
        Some(finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(points: Vec<Vec2>) -> TransformedPath {
        TransformedPath {
            path: PathId(3),
            anchor: points[0],
            points,
            scale: 1.0,
        }
    }

    #[test]
    fn walks_to_the_end_and_goes_idle() {
        let mut exec = MovementExecutor::new(2.0, 0.01);
        let mut events = Notifier::recording();
        let path = straight(vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)]);
        assert!(exec.begin(&path, &mut events));
        assert_eq!(exec.state(), ExecutorState::Moving);

        let mut pos = Vec2::ZERO;
        let mut reveals = Vec::new();
        let mut finished = None;
        for _ in 0..20 {
            if let Some(id) = exec.tick(&mut pos, 0.25, |p| reveals.push(p), &mut events) {
                finished = Some(id);
                break;
            }
        }
        assert_eq!(finished, Some(PathId(3)));
        assert_eq!(exec.state(), ExecutorState::Idle);
        assert!(pos.approx_eq(&Vec2::new(1.0, 1.0), 1e-5));
        // 0.5 units per tick: two ticks per unit segment
        assert_eq!(reveals.len(), 4);
        assert_eq!(
            events.drain(),
            vec![
                Notification::ExecutionStarted(PathId(3)),
                Notification::ExecutionFinished(PathId(3))
            ]
        );
        // idle: no more work
        assert_eq!(exec.tick(&mut pos, 0.25, |_| panic!("revealed"), &mut events), None);
    }

    #[test]
    fn never_overshoots_a_point() {
        let mut exec = MovementExecutor::new(100.0, 0.01);
        let mut events = Notifier::recording();
        exec.begin(
            &straight(vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]),
            &mut events,
        );
        let mut pos = Vec2::ZERO;
        exec.tick(&mut pos, 1.0, |_| {}, &mut events);
        assert_eq!(pos, Vec2::new(1.0, 0.0));
        assert_eq!(exec.point_index(), Some(1));
    }

    #[test]
    fn begin_while_moving_is_rejected() {
        let mut exec = MovementExecutor::new(1.0, 0.01);
        let mut events = Notifier::recording();
        let first = straight(vec![Vec2::ZERO, Vec2::new(5.0, 0.0)]);
        let mut second = straight(vec![Vec2::ZERO, Vec2::new(0.0, 5.0)]);
        second.path = PathId(4);
        assert!(exec.begin(&first, &mut events));
        assert!(!exec.begin(&second, &mut events));
        assert_eq!(exec.current_path(), Some(PathId(3)));
        assert_eq!(exec.last_executed(), first.points.as_slice());
        assert_eq!(events.drain().len(), 1);
    }

    #[test]
    fn degenerate_path_is_rejected() {
        let mut exec = MovementExecutor::default();
        let mut events = Notifier::recording();
        assert!(!exec.begin(&straight(vec![Vec2::ZERO]), &mut events));
        assert_eq!(exec.state(), ExecutorState::Idle);
    }

    #[test]
    fn duplicate_points_are_stepped_over() {
        let mut exec = MovementExecutor::new(1.0, 0.01);
        let mut events = Notifier::recording();
        exec.begin(
            &straight(vec![Vec2::ZERO, Vec2::ZERO, Vec2::new(0.5, 0.0)]),
            &mut events,
        );
        let mut pos = Vec2::ZERO;
        assert_eq!(exec.tick(&mut pos, 0.1, |_| {}, &mut events), None);
        assert_eq!(exec.point_index(), Some(1));
        assert_eq!(exec.tick(&mut pos, 1.0, |_| {}, &mut events), Some(PathId(3)));
    }

    #[test]
    fn exact_arrival_counts_with_zero_epsilon() {
        let mut exec = MovementExecutor::new(1.0, 0.0);
        let mut events = Notifier::recording();
        exec.begin(&straight(vec![Vec2::ZERO, Vec2::new(1.0, 0.0)]), &mut events);
        let mut pos = Vec2::ZERO;
        assert_eq!(exec.tick(&mut pos, 1.0, |_| {}, &mut events), Some(PathId(3)));
        assert_eq!(pos, Vec2::new(1.0, 0.0));
        assert_eq!(exec.state(), ExecutorState::Idle);
    }
}
