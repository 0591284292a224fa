//! Movement system - steps every executing entity along its frozen path

use hecs::{Entity, World};
use pathrunner_logic::events::Notifier;
use pathrunner_logic::fog::FogRaster;
use pathrunner_logic::transform::TransformedPath;
use pathrunner_logic::PathId;

use crate::components::{Explorer, MovementExecutor, Position};

/// Advance every moving entity by `delta_seconds`, revealing fog at each new
/// position. Returns the entities that reached the end of their path.
pub fn movement_system(
    world: &mut World,
    fog: &mut FogRaster,
    events: &mut Notifier,
    delta_seconds: f32,
) -> Vec<(Entity, PathId)> {
    let mut finished = Vec::new();

    for (entity, (pos, executor, explorer)) in
        world.query_mut::<(&mut Position, &mut MovementExecutor, Option<&Explorer>)>()
    {
        if !executor.is_moving() {
            continue;
        }
        let radius = explorer.map(|e| e.reveal_radius);
        let done = executor.tick(
            &mut pos.world,
            delta_seconds,
            |p| {
                if let Some(r) = radius {
                    fog.reveal(p, r);
                }
            },
            events,
        );
        if let Some(path) = done {
            finished.push((entity, path));
        }
    }

    finished
}

/// Start `entity` on `path`. False if the entity has no executor, is already
/// moving, or the path is degenerate.
pub fn begin_execution(
    world: &mut World,
    entity: Entity,
    path: &TransformedPath,
    events: &mut Notifier,
) -> bool {
    match world.get::<&mut MovementExecutor>(entity) {
        Ok(mut executor) => executor.begin(path, events),
        Err(_) => {
            log::warn!("{:?} cannot execute {}: no movement executor", entity, path.path);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathrunner_logic::events::Notification;
    use pathrunner_logic::Vec2;

    fn fog() -> FogRaster {
        FogRaster::new(100, Vec2::new(-50.0, -50.0), 100.0, 0.9, 1.0)
    }

    fn line(to: Vec2) -> TransformedPath {
        TransformedPath {
            path: PathId(1),
            points: vec![Vec2::ZERO, to],
            scale: 1.0,
            anchor: Vec2::ZERO,
        }
    }

    #[test]
    fn moves_and_reveals_until_arrival() {
        let mut world = World::new();
        let mut fog = fog();
        let mut events = Notifier::recording();
        let e = world.spawn((
            Position::default(),
            MovementExecutor::new(10.0, 0.01),
            Explorer { reveal_radius: 2.0 },
        ));
        assert!(begin_execution(&mut world, e, &line(Vec2::new(20.0, 0.0)), &mut events));

        let mut finished = Vec::new();
        for _ in 0..10 {
            finished.extend(movement_system(&mut world, &mut fog, &mut events, 0.5));
        }
        assert_eq!(finished, vec![(e, PathId(1))]);
        assert_eq!(world.get::<&Position>(e).unwrap().world, Vec2::new(20.0, 0.0));
        assert_eq!(fog.explored().len(), 4);
        assert_eq!(fog.alpha_at_world(Vec2::new(15.0, 0.0)), Some(0.0));
        assert_eq!(
            events.drain().last(),
            Some(&Notification::ExecutionFinished(PathId(1)))
        );
    }

    #[test]
    fn entity_without_explorer_moves_without_revealing() {
        let mut world = World::new();
        let mut fog = fog();
        let mut events = Notifier::recording();
        let e = world.spawn((Position::default(), MovementExecutor::new(10.0, 0.01)));
        begin_execution(&mut world, e, &line(Vec2::new(1.0, 0.0)), &mut events);
        movement_system(&mut world, &mut fog, &mut events, 1.0);
        assert_eq!(world.get::<&Position>(e).unwrap().world, Vec2::new(1.0, 0.0));
        assert!(fog.explored().is_empty());
    }

    #[test]
    fn begin_without_executor_fails() {
        let mut world = World::new();
        let mut events = Notifier::recording();
        let e = world.spawn((Position::default(),));
        assert!(!begin_execution(&mut world, e, &line(Vec2::new(1.0, 0.0)), &mut events));
        assert!(events.drain().is_empty());
    }
}
