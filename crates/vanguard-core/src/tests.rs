#[cfg(test)]
mod tests {
    use crate::commands::FleetCommand;
    use crate::enums::*;
    use crate::events::CombatEvent;
    use crate::state::DecisionSnapshot;
    use crate::types::{normalize_angle_deg, Position, SimTime, Velocity};

    #[test]
    fn test_combat_intent_serde() {
        let variants = vec![
            CombatIntent::Pursuit,
            CombatIntent::Strafe,
            CombatIntent::Evade,
            CombatIntent::Retreat,
            CombatIntent::Locked,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: CombatIntent = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_fleet_order_serde() {
        let orders = vec![
            FleetOrder::FreeEngage,
            FleetOrder::FocusFire { target_id: 7 },
            FleetOrder::Rally {
                point: Position::new(100.0, -50.0),
            },
            FleetOrder::Defend { vip_id: 3 },
        ];
        for order in &orders {
            let json = serde_json::to_string(order).unwrap();
            let back: FleetOrder = serde_json::from_str(&json).unwrap();
            assert_eq!(*order, back);
        }
    }

    #[test]
    fn test_fleet_command_serde() {
        let commands = vec![
            FleetCommand::IssueOrder {
                order: FleetOrder::FocusFire { target_id: 2 },
            },
            FleetCommand::ClearOrder,
            FleetCommand::SetAggression {
                ship_id: 1,
                aggression: 0.4,
            },
            FleetCommand::SetWeaponLock {
                ship_id: 5,
                locked: true,
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: FleetCommand = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since FleetCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_combat_event_serde() {
        let events = vec![
            CombatEvent::AssignmentMade {
                ship_id: 1,
                target_id: 10,
            },
            CombatEvent::TargetDestroyed {
                target_id: 10,
                released_engagers: 3,
            },
            CombatEvent::IntentSwitched {
                ship_id: 1,
                from: CombatIntent::Pursuit,
                to: CombatIntent::Evade,
                situation: TacticalSituation::Overwhelmed,
            },
            CombatEvent::FocusTargetLost { target_id: 4 },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let _back: CombatEvent = serde_json::from_str(&json).unwrap();
        }
    }

    /// Verify DecisionSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = DecisionSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: DecisionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_position_bearing() {
        let origin = Position::new(0.0, 0.0);

        // +X axis is bearing zero
        let east = Position::new(100.0, 0.0);
        assert!((origin.bearing_deg_to(&east) - 0.0).abs() < 1e-10);

        // +Y axis is 90 degrees counter-clockwise
        let north = Position::new(0.0, 100.0);
        assert!((origin.bearing_deg_to(&north) - 90.0).abs() < 1e-10);

        // Coincident positions fall back to zero instead of NaN
        assert_eq!(origin.bearing_deg_to(&origin), 0.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle_deg(0.0), 0.0);
        assert_eq!(normalize_angle_deg(180.0), 180.0);
        // -180 maps onto the closed end of (-180, 180]
        assert_eq!(normalize_angle_deg(-180.0), 180.0);
        assert!((normalize_angle_deg(270.0) - (-90.0)).abs() < 1e-10);
        assert!((normalize_angle_deg(-270.0) - 90.0).abs() < 1e-10);
        assert!((normalize_angle_deg(540.0) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_velocity_speed() {
        let v = Velocity::new(3.0, 4.0);
        assert!((v.speed() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);

        for _ in 0..30 {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        // 30 ticks at 30Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }
}
