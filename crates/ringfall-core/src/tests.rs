#[cfg(test)]
mod tests {
    use crate::commands::{Command, InputIntent};
    use crate::enums::*;
    use crate::events::AudioEvent;
    use crate::state::MatchSnapshot;
    use crate::types::{Position, SimTime, Velocity};

    /// Verify all enums round-trip through serde_json.
    #[test]
    fn test_game_phase_serde() {
        let variants = vec![GamePhase::Active, GamePhase::Paused, GamePhase::GameOver];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: GamePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_hostile_archetype_serde() {
        let variants = vec![
            HostileArchetype::Grunt,
            HostileArchetype::Sentry,
            HostileArchetype::Bomber,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: HostileArchetype = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_weapon_kind_serde() {
        let variants = vec![
            WeaponKind::Cannon,
            WeaponKind::RocketPod,
            WeaponKind::ArcCoil,
            WeaponKind::Lance,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: WeaponKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_zone_phase_serde() {
        for v in [
            ContainmentPhase::Dormant,
            ContainmentPhase::Shrinking,
            ContainmentPhase::Holding,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: ContainmentPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        for v in [
            HazardPhase::Inactive,
            HazardPhase::Warning,
            HazardPhase::Bombarding,
            HazardPhase::Cooldown,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: HazardPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Verify Command round-trips through serde (tagged union).
    #[test]
    fn test_command_serde() {
        let commands = vec![
            Command::Restart,
            Command::TogglePause,
            Command::ApplyInput {
                intent: InputIntent {
                    move_x: 1.0,
                    move_y: -0.5,
                    suppress_fire: true,
                },
            },
            Command::UpgradeStat {
                stat: StatId::Damage,
            },
            Command::SelectWeapon {
                weapon: WeaponKind::RocketPod,
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: Command = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since Command doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify AudioEvent round-trips through serde.
    #[test]
    fn test_audio_event_serde() {
        let events = vec![
            AudioEvent::WeaponFired {
                kind: WeaponKind::ArcCoil,
            },
            AudioEvent::HostileDestroyed {
                archetype: HostileArchetype::Grunt,
            },
            AudioEvent::RankUp { rank: 7 },
            AudioEvent::HazardWarning { owner_rank: 4 },
            AudioEvent::HazardCleared,
            AudioEvent::GameOver,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let _back: AudioEvent = serde_json::from_str(&json).unwrap();
        }
    }

    /// Verify MatchSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = MatchSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    /// Verify Position geometry calculations.
    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.planar_distance_to(&b) - 5.0).abs() < 1e-10);

        // Altitude matters for 3D distance, not planar.
        let c = Position::new(3.0, 4.0, 12.0);
        assert!((a.distance_to(&c) - 13.0).abs() < 1e-10);
        assert!((a.planar_distance_to(&c) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_position_bearing() {
        let origin = Position::new(0.0, 0.0, 0.0);

        // Due North (positive Y)
        let north = Position::new(0.0, 100.0, 0.0);
        assert!((origin.bearing_to(&north) - 0.0).abs() < 1e-10);

        // Due East (positive X)
        let east = Position::new(100.0, 0.0, 0.0);
        let expected_east = std::f64::consts::FRAC_PI_2;
        assert!(
            (origin.bearing_to(&east) - expected_east).abs() < 1e-10,
            "East bearing should be PI/2, got {}",
            origin.bearing_to(&east)
        );
    }

    #[test]
    fn test_position_clamp_planar_keeps_altitude() {
        let mut p = Position::new(150.0, -150.0, 6.0);
        p.clamp_planar(100.0);
        assert_eq!(p, Position::new(100.0, -100.0, 6.0));

        let mut inside = Position::ground(10.0, -20.0);
        inside.clamp_planar(100.0);
        assert_eq!(inside, Position::ground(10.0, -20.0));
    }

    #[test]
    fn test_velocity_speed_and_heading() {
        let v = Velocity::new(3.0, 4.0, 0.0);
        assert!((v.speed() - 5.0).abs() < 1e-10);

        let north = Velocity::new(0.0, 10.0, 0.0);
        assert!((north.heading() - 0.0).abs() < 1e-10);
        let east = Velocity::new(10.0, 0.0, 0.0);
        assert!((east.heading() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    }

    /// Verify SimTime advancement.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_secs, 0.0);

        for _ in 0..30 {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        // 30 ticks at 30Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }
}
