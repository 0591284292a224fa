//! Game engine - main entry point for running a session

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pathrunner_logic::config::{validate_config, GameConfig};
use pathrunner_logic::error::ConfigError;
use pathrunner_logic::events::{Notification, Notifier};
use pathrunner_logic::fog::FogRaster;
use pathrunner_logic::library::{PathId, PathLibrary};
use pathrunner_logic::matcher::{ConfirmOutcome, SequenceMatcher};
use pathrunner_logic::stamina::StaminaPool;
use pathrunner_logic::transform::{PathTransformer, TransformedPath};
use pathrunner_logic::Vec2;

use crate::components::*;
use crate::input::{arbitrate, InputEvent, KeyInput};
use crate::systems::*;

/// A path picked on confirm, started on the following tick.
#[derive(Debug, Clone)]
struct PendingExecution {
    path: TransformedPath,
    directions: usize,
}

/// Main game engine
pub struct GameEngine {
    /// ECS world containing the player entity
    pub world: World,
    player: Entity,
    library: PathLibrary,
    matcher: SequenceMatcher,
    stamina: StaminaPool,
    transformer: PathTransformer,
    fog: FogRaster,
    events: Notifier,
    rng: StdRng,

    inputs: Vec<InputEvent>,
    cursor: Vec2,
    preview: Option<TransformedPath>,
    pending: Option<PendingExecution>,
    trails: Vec<TransformedPath>,
    sim_time: f64,
}

impl GameEngine {
    /// Create a session. Uses `config.seed` for path selection when set.
    /// Fails if `config` does not pass [`validate_config`].
    pub fn new(config: &GameConfig, library: PathLibrary) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, library, rng)
    }

    pub fn with_seed(
        config: &GameConfig,
        library: PathLibrary,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, library, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: &GameConfig,
        library: PathLibrary,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        let issues = validate_config(config);
        if !issues.is_empty() {
            log::error!("rejecting config with {} issue(s)", issues.len());
            return Err(ConfigError::Invalid(issues));
        }

        let mut world = World::new();
        let player = world.spawn((
            Player,
            Position::new(config.spawn),
            MovementExecutor::from_config(&config.movement),
            Explorer {
                reveal_radius: config.fog.reveal_radius,
            },
        ));

        let mut fog = FogRaster::from_config(&config.fog);
        fog.reveal(config.spawn, config.fog.reveal_radius);

        log::info!(
            "session started at {} with {} paths ({} unlocked)",
            config.spawn,
            library.len(),
            library.unlocked().count()
        );

        Ok(Self {
            world,
            player,
            library,
            matcher: SequenceMatcher::from_config(&config.input),
            stamina: StaminaPool::from_config(&config.stamina),
            transformer: PathTransformer::from_config(&config.transform),
            fog,
            events: Notifier::new(),
            rng,
            inputs: Vec::new(),
            cursor: config.spawn,
            preview: None,
            pending: None,
            trails: Vec::new(),
            sim_time: 0.0,
        })
    }

    /// Queue input for the next update.
    pub fn push_input(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    /// Advance the session by `delta_seconds`.
    pub fn update(&mut self, delta_seconds: f32) {
        self.sim_time += delta_seconds as f64;

        // 0: start whatever was selected last tick
        if let Some(pending) = self.pending.take() {
            self.start_pending(pending);
        }

        // 1: arbitration, then dispatch
        let busy = self.is_busy();
        let input = arbitrate(self.inputs.drain(..), busy);
        if let Some(cursor) = input.cursor {
            self.cursor = cursor;
        }
        for key in &input.keys {
            match *key {
                KeyInput::Direction(d) => {
                    self.matcher
                        .try_append(d, &self.library, &self.stamina, &mut self.events);
                }
                KeyInput::Backspace => {
                    self.matcher
                        .remove_last(&self.library, &self.stamina, &mut self.events);
                }
            }
        }
        for _ in 0..input.dropped_clicks {
            log::debug!("click dropped");
            self.events.emit(Notification::ClickConsumed);
        }

        // 2: timers
        self.matcher.tick_timers(delta_seconds);

        // 3: preview
        self.matcher.update_preview(delta_seconds, &mut self.events);
        self.refresh_preview();

        // 4: confirm
        if let Some(cursor) = input.confirm {
            self.confirm(cursor);
        }

        // 5: movement
        for (_, path) in movement_system(
            &mut self.world,
            &mut self.fog,
            &mut self.events,
            delta_seconds,
        ) {
            log::info!("{} complete at {}", path, self.player_position());
        }
    }

    fn start_pending(&mut self, pending: PendingExecution) {
        let id = pending.path.path;
        if !self.stamina.consume(pending.directions, &mut self.events) {
            log::info!("{} abandoned: stamina ran out before it started", id);
            return;
        }
        if begin_execution(&mut self.world, self.player, &pending.path, &mut self.events) {
            self.trails.push(pending.path);
        } else {
            log::warn!("{} could not start", id);
        }
    }

    fn refresh_preview(&mut self) {
        let anchor = self.player_position();
        self.preview = self.matcher.preview().and_then(|id| {
            let definition = self.library.get(id)?;
            self.transformer.transform(id, definition, anchor, self.cursor)
        });
    }

    fn confirm(&mut self, cursor: Vec2) {
        let outcome = self
            .matcher
            .confirm(&mut self.rng, &self.stamina, &mut self.events);
        let ConfirmOutcome::Selected { path, directions } = outcome else {
            return;
        };
        self.preview = None;

        let anchor = self.player_position();
        let Some(transformed) = self
            .library
            .get(path)
            .and_then(|def| self.transformer.transform(path, def, anchor, cursor))
        else {
            log::warn!("{} selected but has no geometry", path);
            return;
        };

        log::debug!(
            "{} frozen at {} (scale {:.2}), starting next tick",
            path,
            anchor,
            transformed.scale
        );
        self.pending = Some(PendingExecution {
            path: transformed,
            directions,
        });
        self.events.emit(Notification::PathSelected(path));
    }

    /// External regeneration trigger.
    pub fn restore_stamina(&mut self, amount: u32) {
        self.stamina.restore(amount, &mut self.events);
    }

    /// Unlock a path and re-match the current buffer against it.
    pub fn unlock(&mut self, id: PathId) -> bool {
        let changed = self.library.unlock(id, &mut self.events);
        if changed {
            self.matcher.refresh(&self.library, &mut self.events);
        }
        changed
    }

    pub fn lock(&mut self, id: PathId) -> bool {
        let changed = self.library.lock(id, &mut self.events);
        if changed {
            self.matcher.refresh(&self.library, &mut self.events);
        }
        changed
    }

    /// Restore full fog, keeping the area around the player clear at the
    /// player's own reveal radius.
    pub fn reset_fog(&mut self) {
        self.fog.reset();
        let at = self.player_position();
        match self.world.get::<&Explorer>(self.player) {
            Ok(explorer) => {
                self.fog.reveal(at, explorer.reveal_radius);
            }
            Err(_) => log::warn!("player has no explorer, fog left fully covered"),
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Notification) + 'static) {
        self.events.subscribe(subscriber);
    }

    /// Keep emitted notifications for [`drain_notifications`](Self::drain_notifications).
    /// Off by default; long sessions that only use subscribers retain nothing.
    pub fn record_notifications(&mut self, on: bool) {
        self.events.set_recording(on);
    }

    /// Notifications emitted since the last drain. Empty unless recording.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.events.drain()
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_position(&self) -> Vec2 {
        self.world
            .get::<&Position>(self.player)
            .map(|p| p.world)
            .unwrap_or_default()
    }

    pub fn is_moving(&self) -> bool {
        self.world
            .get::<&MovementExecutor>(self.player)
            .map(|e| e.is_moving())
            .unwrap_or(false)
    }

    /// A path was selected and starts on the next update.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn is_busy(&self) -> bool {
        self.is_moving() || self.has_pending()
    }

    pub fn library(&self) -> &PathLibrary {
        &self.library
    }

    pub fn matcher(&self) -> &SequenceMatcher {
        &self.matcher
    }

    pub fn stamina(&self) -> &StaminaPool {
        &self.stamina
    }

    pub fn fog(&self) -> &FogRaster {
        &self.fog
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// World-space preview of the currently previewed match.
    pub fn preview(&self) -> Option<&TransformedPath> {
        self.preview.as_ref()
    }

    /// Every path started this session, oldest first.
    pub fn trails(&self) -> &[TransformedPath] {
        &self.trails
    }

    pub fn last_executed(&self) -> Option<&TransformedPath> {
        self.trails.last()
    }

    /// Seconds since the session started.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}
