//! Pathrunner Headless Simulation Harness
//!
//! Validates the bundled path library and config, the pure logic, and
//! scripted sessions through the tick engine. Runs entirely in-process:
//! no window, no input device, no rendering.
//!
//! Usage:
//!   cargo run -p pathrunner-simtest
//!   cargo run -p pathrunner-simtest -- --verbose

use pathrunner_core::prelude::*;
use pathrunner_logic::config::{validate_config, GameConfig};
use pathrunner_logic::direction::{format_sequence, parse_sequence};
use pathrunner_logic::error::ConfigError;
use pathrunner_logic::events::Notification;
use pathrunner_logic::fog::FogRaster;
use pathrunner_logic::geometry::{generate, CurveKind};
use pathrunner_logic::library::PathLibrary;
use pathrunner_logic::path::ORIGIN_EPSILON;
use pathrunner_logic::{Direction, Vec2};

// ── Bundled data (same files a front end loads) ────────────────────────
const PATHS_JSON: &str = include_str!("../../../data/paths.json");
const CONFIG_JSON: &str = include_str!("../../../data/config.json");

/// Frame length used for scripted sessions. Longer than the keystroke
/// cooldown so one key per frame is always accepted.
const FRAME: f32 = 0.25;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    println!("=== Pathrunner Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Bundled data
    let data = load_data(&mut results, verbose);

    // 2. Curve generation
    results.extend(validate_geometry(verbose));

    // 3. Fog raster properties
    results.extend(validate_fog(verbose));

    if let Some((config, library)) = data {
        // 4. Prefix matching on the bundled library
        // 5. Full sessions through the engine
        for outcome in [
            validate_matching(&config, &library, verbose),
            validate_sessions(&config, &library, verbose),
        ] {
            match outcome {
                Ok(checks) => results.extend(checks),
                Err(e) => results.push(TestResult {
                    name: "engine_accepts_config".into(),
                    passed: false,
                    detail: e.to_string(),
                }),
            }
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Bundled data ─────────────────────────────────────────────────────

fn load_data(results: &mut Vec<TestResult>, verbose: bool) -> Option<(GameConfig, PathLibrary)> {
    println!("--- Bundled Data ---");

    let config = match GameConfig::from_json(CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("config.json: {}", e),
            });
            return None;
        }
    };
    let issues = validate_config(&config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: issues.is_empty(),
        detail: if issues.is_empty() {
            "config.json passes validation".into()
        } else {
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let (library, rejected) = match PathLibrary::from_json(PATHS_JSON) {
        Ok(l) => l,
        Err(e) => {
            results.push(TestResult {
                name: "paths_parse".into(),
                passed: false,
                detail: format!("paths.json: {}", e),
            });
            return None;
        }
    };
    results.push(TestResult {
        name: "paths_none_rejected".into(),
        passed: rejected.is_empty(),
        detail: if rejected.is_empty() {
            format!("{} paths loaded", library.len())
        } else {
            rejected
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let unlocked = library.unlocked().count();
    results.push(TestResult {
        name: "paths_some_locked".into(),
        passed: unlocked > 0 && unlocked < library.len(),
        detail: format!("{}/{} unlocked at start", unlocked, library.len()),
    });

    let off_origin: Vec<_> = library
        .iter()
        .filter(|(_, def)| {
            def.points()
                .first()
                .map_or(true, |p| !p.approx_eq(&Vec2::ZERO, ORIGIN_EPSILON))
        })
        .map(|(_, def)| def.name().to_string())
        .collect();
    results.push(TestResult {
        name: "paths_start_at_origin".into(),
        passed: off_origin.is_empty(),
        detail: if off_origin.is_empty() {
            "every path starts at its local origin".into()
        } else {
            format!("off origin: {}", off_origin.join(", "))
        },
    });

    if verbose {
        for (id, def) in library.iter() {
            println!(
                "  {} {:<10} {:<8} {:>3} pts  {}",
                id,
                def.name(),
                def.direction_string(),
                def.points().len(),
                if library.is_unlocked(id) { "" } else { "(locked)" }
            );
        }
    }

    Some((config, library))
}

// ── 2. Geometry ─────────────────────────────────────────────────────────

fn validate_geometry(verbose: bool) -> Vec<TestResult> {
    println!("--- Geometry ---");
    let mut results = Vec::new();

    let mut bad_counts = Vec::new();
    for n in 2..8usize {
        for resolution in [1u32, 5, 10, 17] {
            let cps: Vec<Vec2> = (0..n).map(|i| Vec2::new(i as f32, (i * i) as f32)).collect();
            let points = generate("sweep", CurveKind::Linear, &cps, &[], resolution);
            let expected = (n - 1) * (resolution as usize + 1);
            if points.len() != expected || points[0] != cps[0] {
                bad_counts.push(format!("n={} res={} got {}", n, resolution, points.len()));
            }
        }
    }
    results.push(TestResult {
        name: "linear_point_count".into(),
        passed: bad_counts.is_empty(),
        detail: if bad_counts.is_empty() {
            "(n-1)*(res+1) points, first = p0, for every sweep case".into()
        } else {
            bad_counts.join("; ")
        },
    });

    let four = [
        Vec2::new(-1.0, 0.0),
        Vec2::ZERO,
        Vec2::new(1.0, 1.0),
        Vec2::new(2.0, 0.0),
    ];
    let catmull = generate("four", CurveKind::CatmullRom, &four, &[], 10);
    results.push(TestResult {
        name: "catmull_rom_single_segment".into(),
        passed: catmull.len() == 11
            && catmull[0].approx_eq(&four[1], 1e-5)
            && catmull[10].approx_eq(&four[2], 1e-5),
        detail: format!("{} points from 4 control points", catmull.len()),
    });

    let degenerate = generate("one", CurveKind::Linear, &[Vec2::ZERO], &[], 10);
    results.push(TestResult {
        name: "degenerate_curve_is_empty".into(),
        passed: degenerate.is_empty(),
        detail: format!("{} points from 1 control point", degenerate.len()),
    });

    let parsed = parse_sequence("U R D L");
    let round = parsed.as_deref().map(format_sequence);
    if verbose {
        println!("  glyphs: {:?}", round);
    }
    results.push(TestResult {
        name: "direction_glyphs".into(),
        passed: round.as_deref() == Some("↑→↓←"),
        detail: format!("U R D L -> {:?}", round),
    });

    results
}

// ── 3. Fog ──────────────────────────────────────────────────────────────

fn validate_fog(verbose: bool) -> Vec<TestResult> {
    println!("--- Fog ---");
    let mut results = Vec::new();
    let config = GameConfig::default();

    let mut once = FogRaster::from_config(&config.fog);
    let mut twice = FogRaster::from_config(&config.fog);
    let p = Vec2::new(12.3, -4.5);
    once.reveal(p, 5.0);
    twice.reveal(p, 5.0);
    twice.reveal(p, 5.0);
    results.push(TestResult {
        name: "fog_reveal_idempotent".into(),
        passed: once.alphas() == twice.alphas(),
        detail: format!("{:.4}% revealed", once.revealed_fraction() * 100.0),
    });

    let mut fog = FogRaster::from_config(&config.fog);
    let mut increased = 0usize;
    let mut before = fog.alphas().to_vec();
    for i in 0..40 {
        let t = i as f32 * 0.4;
        fog.reveal(Vec2::new(t.cos() * t, t.sin() * t), 3.0 + (i % 3) as f32);
        increased += before
            .iter()
            .zip(fog.alphas())
            .filter(|(old, new)| new > old)
            .count();
        before = fog.alphas().to_vec();
    }
    results.push(TestResult {
        name: "fog_reveal_monotonic".into(),
        passed: increased == 0,
        detail: format!("{} cell increases over 40 reveals", increased),
    });

    let outside = fog.reveal(Vec2::new(500.0, 0.0), 5.0);
    results.push(TestResult {
        name: "fog_out_of_range_ignored".into(),
        passed: !outside && fog.alphas() == before.as_slice(),
        detail: "reveal outside the map is a no-op".into(),
    });

    fog.reset();
    if verbose {
        println!("  after reset: {:.4}", fog.revealed_fraction());
    }
    results.push(TestResult {
        name: "fog_reset".into(),
        passed: fog.revealed_fraction() == 0.0 && fog.explored().is_empty(),
        detail: "reset restores full fog".into(),
    });

    results
}

// ── 4. Matching ─────────────────────────────────────────────────────────

/// A seeded engine that keeps its notifications for inspection.
fn session(config: &GameConfig, library: &PathLibrary, seed: u64) -> Result<GameEngine, ConfigError> {
    let mut engine = GameEngine::with_seed(config, library.clone(), seed)?;
    engine.record_notifications(true);
    Ok(engine)
}

fn validate_matching(
    config: &GameConfig,
    library: &PathLibrary,
    verbose: bool,
) -> Result<Vec<TestResult>, ConfigError> {
    println!("--- Matching ---");
    let mut results = Vec::new();

    let mut engine = session(config, library, 1)?;
    type_keys(&mut engine, &[Direction::Up]);
    let names: Vec<_> = engine
        .matcher()
        .matches()
        .iter()
        .filter_map(|&id| library.get(id).map(|d| d.name().to_string()))
        .collect();
    if verbose {
        println!("  [↑] matches {:?}", names);
    }
    results.push(TestResult {
        name: "prefix_match_library_order".into(),
        passed: names == ["Dash", "Hook", "Arc"],
        detail: format!("[↑] -> {}", names.join(", ")),
    });

    // preview rotates through the three ties
    let mut previews = Vec::new();
    for _ in 0..12 {
        engine.update(FRAME);
        if let Some(id) = engine.matcher().preview() {
            if previews.last() != Some(&id) {
                previews.push(id);
            }
        }
    }
    results.push(TestResult {
        name: "preview_cycles_ties".into(),
        passed: previews.len() >= 3,
        detail: format!("{} preview changes in 3s", previews.len()),
    });

    // locked paths stay hidden until unlocked
    let loop_id = library.find("Loop");
    let mut engine = session(config, library, 1)?;
    type_keys(&mut engine, &[Direction::Left, Direction::Left]);
    let before = engine.matcher().matches().len();
    let unlocked = loop_id.map(|id| engine.unlock(id)).unwrap_or(false);
    let after = engine.matcher().matches().to_vec();
    results.push(TestResult {
        name: "unlock_refreshes_matches".into(),
        passed: before == 0 && unlocked && loop_id.map_or(false, |id| after == [id]),
        detail: format!("[←←] {} -> {} matches after unlock", before, after.len()),
    });

    Ok(results)
}

// ── 5. Sessions ─────────────────────────────────────────────────────────

fn type_keys(engine: &mut GameEngine, keys: &[Direction]) {
    for &d in keys {
        engine.push_input(InputEvent::Direction(d));
        engine.update(FRAME);
    }
}

fn run_until_idle(engine: &mut GameEngine, max_frames: usize) -> usize {
    let mut frames = 0;
    while (engine.is_moving() || engine.has_pending()) && frames < max_frames {
        engine.update(1.0 / 60.0);
        frames += 1;
    }
    frames
}

fn validate_sessions(
    config: &GameConfig,
    library: &PathLibrary,
    verbose: bool,
) -> Result<Vec<TestResult>, ConfigError> {
    println!("--- Sessions ---");
    let mut results = Vec::new();

    // Hook at double size
    let mut engine = session(config, library, 5)?;
    let start_fog = engine.fog().revealed_fraction();
    type_keys(&mut engine, &[Direction::Up, Direction::Right]);
    engine.push_input(InputEvent::Confirm {
        cursor: Vec2::new(0.0, 20.0),
    });
    engine.update(FRAME);
    let selected = engine.has_pending();
    let frames = run_until_idle(&mut engine, 10_000);
    let end = engine.player_position();
    let notes = engine.drain_notifications();
    if verbose {
        println!("  hook finished at {} after {} frames", end, frames);
    }

    results.push(TestResult {
        name: "session_selects_on_confirm".into(),
        passed: selected,
        detail: "confirm leaves a pending execution".into(),
    });
    results.push(TestResult {
        name: "session_path_completes".into(),
        passed: !engine.is_moving() && end.approx_eq(&Vec2::new(5.0, 6.0), 1e-3),
        detail: format!("ended at {} after {} frames", end, frames),
    });
    results.push(TestResult {
        name: "session_stamina_charged".into(),
        passed: engine.stamina().current() == 93,
        detail: format!("stamina {}/{}", engine.stamina().current(), engine.stamina().max()),
    });
    results.push(TestResult {
        name: "session_fog_revealed".into(),
        passed: engine.fog().revealed_fraction() > start_fog,
        detail: format!(
            "{:.4}% -> {:.4}% revealed",
            start_fog * 100.0,
            engine.fog().revealed_fraction() * 100.0
        ),
    });
    let started = notes
        .iter()
        .position(|n| matches!(n, Notification::ExecutionStarted(_)));
    let finished = notes
        .iter()
        .position(|n| matches!(n, Notification::ExecutionFinished(_)));
    results.push(TestResult {
        name: "session_notification_order".into(),
        passed: matches!((started, finished), (Some(s), Some(f)) if s < f),
        detail: format!("started at #{:?}, finished at #{:?}", started, finished),
    });

    // Empty confirm
    let mut engine = session(config, library, 5)?;
    engine.drain_notifications();
    engine.push_input(InputEvent::Confirm {
        cursor: Vec2::new(3.0, 3.0),
    });
    engine.update(FRAME);
    let notes = engine.drain_notifications();
    results.push(TestResult {
        name: "empty_confirm_swallowed".into(),
        passed: !engine.has_pending()
            && engine.stamina().current() == engine.stamina().max()
            && notes == [Notification::ClickConsumed],
        detail: format!("{:?}", notes),
    });

    // Alternate Dash and Retreat until the pool is dry
    let mut engine = session(config, library, 5)?;
    if let Some(retreat) = library.find("Retreat") {
        engine.unlock(retreat);
    }
    let mut runs = 0;
    while runs < 50 {
        let key = if runs % 2 == 0 {
            Direction::Up
        } else {
            Direction::Down
        };
        type_keys(&mut engine, &[key, key]);
        if engine.matcher().buffer().len() < 2 {
            break;
        }
        engine.push_input(InputEvent::Confirm {
            cursor: engine.player_position(),
        });
        engine.update(FRAME);
        run_until_idle(&mut engine, 10_000);
        runs += 1;
        // clear whatever the next run's typing could not use
        engine.push_input(InputEvent::Backspace);
        engine.update(FRAME);
    }
    // 100 / 7 = 14 full runs, leaving 2
    results.push(TestResult {
        name: "stamina_exhaustion".into(),
        passed: runs == 14 && engine.stamina().current() == 2,
        detail: format!(
            "{} runs, {} stamina left",
            runs,
            engine.stamina().current()
        ),
    });
    results.push(TestResult {
        name: "trail_history".into(),
        passed: engine.trails().len() == runs,
        detail: format!("{} trails recorded", engine.trails().len()),
    });

    Ok(results)
}
