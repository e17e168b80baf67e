#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::PlayerCommand;
    use crate::config::{ConfigError, GameConfig, ParticleDecay};
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::services::SelectEvent;
    use crate::state::FrameSnapshot;
    use crate::types::{Color, Position, Ray, SimTime, Velocity, VisualHandle};

    #[test]
    fn test_default_config_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.spawn.interval_ms, 1000);
        assert_eq!(config.spawn.area_width, 4.0);
        assert_eq!(config.spawn.area_height, 2.0);
        assert_eq!(config.spawn.depth, -3.0);
        assert_eq!(config.bounds.max_abs_x, 3.0);
        assert_eq!(config.bounds.min_y, 0.0);
        assert_eq!(config.bounds.max_y, 4.0);
        assert_eq!(config.particles.count, 10);
        assert_eq!(config.particles.lifetime_secs, 0.5);
        assert_eq!(
            config.particles.decay,
            ParticleDecay::PerTick { factor: 0.95 }
        );
        assert_eq!(config.scoring.points_per_hit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_config_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "spawn": { "interval_ms": 250 } }"#).unwrap();
        assert_eq!(config.spawn.interval_ms, 250);
        assert_eq!(config.spawn.area_width, GAME_AREA_WIDTH);
        assert_eq!(config.particles, GameConfig::default().particles);
    }

    #[test]
    fn test_per_second_decay_from_json() {
        let json = r#"{ "particles": { "decay": { "mode": "PerSecond", "factor": 0.95, "reference_fps": 60.0 } } }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(
            config.particles.decay,
            ParticleDecay::PerSecond {
                factor: 0.95,
                reference_fps: 60.0
            }
        );
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.spawn.interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.bounds.min_y = 5.0;
        assert!(config.validate().is_err(), "min_y above max_y");

        let mut config = GameConfig::default();
        config.particles.count = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.particles.decay = ParticleDecay::PerTick { factor: 1.5 };
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.particles.decay = ParticleDecay::PerSecond {
            factor: 0.95,
            reference_fps: 0.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_particle_speed_names_speed() {
        let mut config = GameConfig::default();
        config.particles.speed = -1.0;
        match config.validate() {
            Err(ConfigError::Invalid(message)) => assert!(message.contains("speed"), "{message}"),
            other => panic!("expected Invalid, got {other:?}"),
        }

        let mut config = GameConfig::default();
        config.particles.speed = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_decay_multiplier() {
        let per_tick = ParticleDecay::PerTick { factor: 0.95 };
        assert_eq!(per_tick.multiplier(0.001), 0.95);
        assert_eq!(per_tick.multiplier(1.0), 0.95);

        let per_second = ParticleDecay::PerSecond {
            factor: 0.95,
            reference_fps: 60.0,
        };
        assert!((per_second.multiplier(1.0 / 60.0) - 0.95).abs() < 1e-5);
        // Two half-frames shrink as much as one full frame.
        let half = per_second.multiplier(1.0 / 120.0);
        assert!((half * half - 0.95).abs() < 1e-5);
    }

    #[test]
    fn test_bounds_predicate() {
        let bounds = GameConfig::default().bounds;
        assert!(!bounds.is_outside(0.0, 2.0));
        assert!(!bounds.is_outside(3.0, 4.0), "bounds are inclusive");
        assert!(!bounds.is_outside(-3.0, 0.0));
        assert!(bounds.is_outside(3.01, 2.0));
        assert!(bounds.is_outside(-3.01, 2.0));
        assert!(bounds.is_outside(0.0, -0.01));
        assert!(bounds.is_outside(0.0, 4.01));
    }

    #[test]
    fn test_position_advance() {
        let mut pos = Position::new(0.0, 2.0, -3.0);
        pos.advance(&Velocity::new(0.0, -3.0, 0.0), 1.0);
        assert_eq!(pos, Position::new(0.0, -1.0, -3.0));
    }

    #[test]
    fn test_color_channels() {
        let color = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(color, Color(0x123456));
        assert_eq!(color.rgb(), [0x12, 0x34, 0x56]);
        assert_eq!(Color::WHITE.to_vec3(), Vec3::ONE);
    }

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = ray.intersect_sphere(Vec3::new(0.0, 0.0, -3.0), 0.2).unwrap();
        assert!((t - 2.8).abs() < 1e-5);
        assert!((ray.at(t) - Vec3::new(0.0, 0.0, -2.8)).length() < 1e-5);

        assert!(ray.intersect_sphere(Vec3::new(1.0, 0.0, -3.0), 0.2).is_none());
        // Sphere behind the origin.
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 3.0), 0.2).is_none());
    }

    #[test]
    fn test_ray_from_inside_sphere_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_ray_never_hits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(0.5, 500);
        time.advance(0.25, 750);
        assert_eq!(time.frame, 2);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-12);
        assert_eq!(time.now_ms, 750);
    }

    #[test]
    fn test_player_command_json_shape() {
        let json = serde_json::to_string(&PlayerCommand::StartSession).unwrap();
        assert_eq!(json, r#"{"type":"StartSession"}"#);
        let back: PlayerCommand = serde_json::from_str(r#"{"type":"Pause"}"#).unwrap();
        assert_eq!(back, PlayerCommand::Pause);
    }

    #[test]
    fn test_select_event_source_defaults_to_pointer() {
        let json = r#"{ "ray": { "origin": [0.0, 1.6, 0.0], "direction": [0.0, 0.0, -1.0] } }"#;
        let event: SelectEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.source, InputSource::Pointer);
        assert_eq!(event.ray.origin, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_snapshot_serializes_events_with_tag() {
        let snapshot = FrameSnapshot {
            phase: GamePhase::Active,
            events: vec![SimEvent::TargetSpawned {
                seq: 7,
                handle: VisualHandle(3),
                position: Position::new(0.0, 1.0, -3.0),
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["phase"], "Active");
        assert_eq!(value["events"][0]["type"], "TargetSpawned");
        assert_eq!(value["events"][0]["seq"], 7);
    }
}
