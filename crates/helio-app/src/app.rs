//! Headless orrery session: build the scene from config and drive it frame by frame.

use std::path::{Path, PathBuf};
use std::time::Duration;

use helio_config::{CliArgs, Config, ConfigError, default_config_dir};
use helio_scene::{
    BodySnapshot, FixedStepClock, FrameClock, FrameLoop, MonotonicClock, SceneError, SceneGraph,
    SimulationState, ViewCamera,
};
use tracing::{debug, info, warn};

/// Anything that can stop a session from starting or reporting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the `helio` command end to end.
pub fn run(args: CliArgs) -> Result<(), AppError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };

    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args);

    helio_log::init_logging(
        Some(&log_dir(&config_dir)),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!("Helio orrery");
    info!("Config: {}", config_dir.display());
    info!(
        "Viewport: {}x{} | Frames: {} | Clock: {}",
        config.window.width,
        config.window.height,
        config.simulation.frames,
        if args.realtime {
            "realtime".to_string()
        } else {
            format!("fixed {:.3}ms", config.simulation.frame_ms)
        },
    );

    let snapshot = simulate(&config, args.realtime)?;

    if let Some(changed) = config.reload(&config_dir)? {
        warn!(
            "config.ron changed during the run ({} bodies on disk); restart to apply",
            changed.bodies.len()
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for body in &snapshot {
            info!(
                "{:>8}: angle={:.4} pos=({:.3}, {:.3}, {:.3}) r={:.3}",
                body.name, body.angle, body.world[0], body.world[1], body.world[2], body.distance
            );
            if let Some(sat) = &body.satellite {
                info!(
                    "{:>8}  {}: pos=({:.3}, {:.3}, {:.3})",
                    "", sat.name, sat.world[0], sat.world[1], sat.world[2]
                );
            }
        }
    }

    Ok(())
}

fn log_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("logs")
}

/// Build a scene from `config`, run `config.simulation.frames` frames, and
/// return the final body positions.
pub fn simulate(config: &Config, realtime: bool) -> Result<Vec<BodySnapshot>, AppError> {
    let mut graph = SceneGraph::new();
    let mut state = SimulationState::build(config, &mut graph)?;

    let camera =
        ViewCamera::from_config(&config.camera, config.window.width, config.window.height)?;
    debug!(
        "Camera at {:?} looking at {:?}, aspect {:.3}",
        camera.position, camera.target, camera.aspect_ratio
    );

    let frame_ms = config.simulation.frame_ms;
    let fixed_clock = FixedStepClock::new(frame_ms)?;

    if realtime {
        let pace = Duration::try_from_secs_f64(frame_ms / 1000.0)
            .map_err(|_| SceneError::InvalidFrameInterval(frame_ms))?;
        let frame_loop = FrameLoop::new(MonotonicClock::new());
        drive(frame_loop, &mut state, &mut graph, config, Some(pace));
    } else {
        drive(FrameLoop::new(fixed_clock), &mut state, &mut graph, config, None);
    }

    Ok(state.snapshot(&graph))
}

fn drive<C: FrameClock>(
    mut frame_loop: FrameLoop<C>,
    state: &mut SimulationState<SceneGraph>,
    graph: &mut SceneGraph,
    config: &Config,
    pace: Option<Duration>,
) {
    let report_every = config.simulation.report_every;

    for _ in 0..config.simulation.frames {
        frame_loop.tick(|now| state.update(graph, now));

        let frame = frame_loop.frame_count();
        if report_every > 0 && frame % report_every == 0 {
            report(state, graph, frame);
        }

        if let Some(pace) = pace {
            std::thread::sleep(pace);
        }
    }

    info!(
        "Ran {} frames, clock at {:.1}ms",
        frame_loop.frame_count(),
        frame_loop.last_time_ms()
    );
}

fn report(state: &SimulationState<SceneGraph>, graph: &SceneGraph, frame: u64) {
    for body in state.snapshot(graph) {
        debug!(
            frame,
            body = %body.name,
            x = body.world[0],
            z = body.world[2],
            "position"
        );
    }
    info!("Frame {frame} at {:.1}ms", state.last_time());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_run(frames: u64) -> Config {
        let mut config = Config::default();
        config.simulation.frames = frames;
        config.simulation.frame_ms = 100.0;
        config
    }

    #[test]
    fn test_simulate_reports_every_body() {
        let snapshot = simulate(&short_run(3), false).unwrap();
        let names: Vec<_> = snapshot.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            ["mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune"]
        );
    }

    #[test]
    fn test_simulate_ends_at_last_fixed_step() {
        // Frames are stamped 0, 100, ..., 900 ms.
        let snapshot = simulate(&short_run(10), false).unwrap();
        let mercury = &snapshot[0];
        assert!((mercury.angle - 0.002 * 900.0).abs() < 1e-12);
        assert!((mercury.spin - 10.0 * 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_zero_frames_leaves_bodies_at_placement() {
        let snapshot = simulate(&short_run(0), false).unwrap();
        let mercury = &snapshot[0];
        assert!((mercury.world[0] - 23.7).abs() < 1e-9);
        assert_eq!(mercury.spin, 0.0);
    }

    #[test]
    fn test_invalid_frame_interval_is_an_error() {
        let mut config = short_run(1);
        config.simulation.frame_ms = 0.0;
        let err = simulate(&config, false).unwrap_err();
        assert!(matches!(
            err,
            AppError::Scene(SceneError::InvalidFrameInterval(_))
        ));
    }

    #[test]
    fn test_realtime_rejects_bad_frame_interval() {
        for frame_ms in [f64::INFINITY, f64::NAN, -5.0, 0.0] {
            let mut config = short_run(1);
            config.simulation.frame_ms = frame_ms;
            for realtime in [true, false] {
                assert!(
                    matches!(
                        simulate(&config, realtime),
                        Err(AppError::Scene(SceneError::InvalidFrameInterval(_)))
                    ),
                    "frame_ms={frame_ms} realtime={realtime}"
                );
            }
        }

        // Finite but longer than any sleep can represent.
        let mut config = short_run(1);
        config.simulation.frame_ms = 1.0e300;
        assert!(matches!(
            simulate(&config, true),
            Err(AppError::Scene(SceneError::InvalidFrameInterval(_)))
        ));
    }

    #[test]
    fn test_inverted_clip_planes_are_an_error() {
        let mut config = short_run(1);
        config.camera.near = 2000.0;
        let err = simulate(&config, false).unwrap_err();
        assert!(matches!(
            err,
            AppError::Scene(SceneError::InvalidClipPlanes { .. })
        ));
    }

    #[test]
    fn test_invalid_body_is_an_error() {
        let mut config = short_run(1);
        config.bodies[0].semi_major_axis = -1.0;
        let err = simulate(&config, false).unwrap_err();
        assert!(err.to_string().contains("mercury"), "{err}");
    }

    #[test]
    fn test_realtime_run_advances_clock() {
        let mut config = short_run(3);
        config.simulation.frame_ms = 1.0;
        let snapshot = simulate(&config, true).unwrap();
        assert!(snapshot[0].angle > 0.0);
    }

    #[test]
    fn test_log_dir_is_under_config_dir() {
        let dir = Path::new("/tmp/helio");
        assert_eq!(log_dir(dir), Path::new("/tmp/helio/logs"));
    }
}
