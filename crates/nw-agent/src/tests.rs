//! Unit tests for nw-agent.
//!
//! Every test drives agents with `FixedRoll(0.0)`: each probability check
//! with `p > 0` succeeds and every re-armed delay is the configured minimum.

use nw_behavior::PolicySpec;
use nw_core::{AgentId, FixedRoll, Side, ZoneId};
use nw_location::{AccessPolicy, LocationKind, LocationRegistry, LocationSpec};
use nw_signals::SignalGateway;

use crate::{Agent, AgentConfig, AgentEvent, AgentSpec, AgentState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 0 Show Stage · 1 Dining Area (CAM 1) · 2 West Hall (transit, Bonnie, CAM 2)
/// · 3 West Door (threshold, Bonnie) · 4 Pirate Cove (Foxy, CAM 3)
/// · 5 Office (CAM 5)
fn pizzeria() -> LocationRegistry {
    LocationRegistry::from_specs([
        LocationSpec::room("Show Stage"),
        LocationSpec::room("Dining Area").with_zone(ZoneId(1)),
        LocationSpec::room("West Hall")
            .with_kind(LocationKind::TransitZone)
            .with_access(AccessPolicy::allow(["Bonnie"]))
            .with_zone(ZoneId(2)),
        LocationSpec::room("West Door")
            .with_kind(LocationKind::Threshold)
            .with_access(AccessPolicy::allow(["Bonnie"])),
        LocationSpec::room("Pirate Cove")
            .with_access(AccessPolicy::allow(["Foxy"]))
            .with_zone(ZoneId(3)),
        LocationSpec::room("Office").with_zone(ZoneId(5)),
    ])
    .unwrap()
}

/// One-second decisions and a three-second attack countdown.
fn quick_timers() -> AgentConfig {
    AgentConfig {
        min_move_delay_secs:  1.0,
        max_move_delay_secs:  1.0,
        attack_timer_secs:    3.0,
        blocked_retreat_secs: None,
    }
}

fn spawn(
    reg:        &mut LocationRegistry,
    name:       &str,
    home:       &str,
    policy:     PolicySpec,
    difficulty: i32,
) -> Agent {
    let spec = AgentSpec::new(name, home, policy).with_timers(quick_timers());
    let mut agent = Agent::from_spec(AgentId(0), &spec);
    agent.set_difficulty(difficulty);
    agent.reset_to_home(reg, &mut FixedRoll(0.0));
    agent
}

fn bonnie_path() -> PolicySpec {
    PolicySpec::fixed_path(["Dining Area", "West Hall", "West Door"])
        .on_side(Side::Left)
        .paused_when_watched()
}

/// Run `n` one-second updates and collect events.
fn run(
    agent:   &mut Agent,
    reg:     &mut LocationRegistry,
    signals: &SignalGateway<'_>,
    n:       usize,
) -> Vec<AgentEvent> {
    let mut rng = FixedRoll(0.0);
    (0..n)
        .filter_map(|_| agent.update(1.0, reg, signals, "Office", &mut rng))
        .collect()
}

// ── Reset and configuration ───────────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use super::*;

    #[test]
    fn reset_places_agent_idle_at_home() {
        let mut reg = pizzeria();
        let agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 20);
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.location_name(&reg), Some("Show Stage"));
        assert_eq!(agent.next_decision(), 1.0);
        assert_eq!(agent.elapsed(), 0.0);
    }

    #[test]
    fn reset_clears_attack_and_counters() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 20);
        let events = run(&mut agent, &mut reg, &SignalGateway::inert(), 20);
        assert_eq!(events.len(), 1);
        assert_eq!(agent.state(), AgentState::Attacking);

        agent.reset_to_home(&mut reg, &mut FixedRoll(0.0));
        assert_eq!(agent.state(), AgentState::Idle);
        assert!(!agent.breach_reported());
        assert_eq!(agent.countdown(), 0.0);
        assert_eq!(agent.location_name(&reg), Some("Show Stage"));
        assert_eq!(reg.occupied_count(), 1);
    }

    #[test]
    fn difficulty_is_clamped() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 0);
        agent.set_difficulty(-4);
        assert_eq!(agent.difficulty(), 0);
        agent.set_difficulty(35);
        assert_eq!(agent.difficulty(), 20);
    }

    #[test]
    fn unknown_archetype_becomes_noop() {
        let spec = AgentSpec::new(
            "Golden",
            "Show Stage",
            PolicySpec { kind: "hallucination".into(), ..PolicySpec::default() },
        );
        let agent = Agent::from_spec(AgentId(3), &spec);
        assert!(agent.validate().is_err());
        assert_eq!(agent.policy().kind(), "noop");
    }

    #[test]
    fn bad_timers_fail_validation() {
        let spec = AgentSpec::new("Chica", "Show Stage", PolicySpec::cyclic_scan()).with_timers(
            AgentConfig { min_move_delay_secs: 9.0, max_move_delay_secs: 2.0, ..AgentConfig::default() },
        );
        assert!(Agent::from_spec(AgentId(1), &spec).validate().is_err());
    }
}

// ── Idle and Moving ───────────────────────────────────────────────────────────

#[cfg(test)]
mod idle_tests {
    use nw_core::AgentId;
    use nw_location::{Allocator, Requester};

    use super::*;

    #[test]
    fn difficulty_zero_never_moves() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 0);
        let events = run(&mut agent, &mut reg, &SignalGateway::inert(), 400);
        assert!(events.is_empty());
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.location_name(&reg), Some("Show Stage"));
    }

    #[test]
    fn move_then_one_arrival_frame() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 20);
        let g = SignalGateway::inert();

        run(&mut agent, &mut reg, &g, 1);
        assert_eq!(agent.state(), AgentState::Moving);
        assert_eq!(agent.location_name(&reg), Some("Dining Area"));
        // The old slot was released before acquiring.
        assert_eq!(reg.find("Show Stage").and_then(|id| reg.occupant_of(id)), None);

        run(&mut agent, &mut reg, &g, 1);
        assert_eq!(agent.state(), AgentState::Idle);
    }

    #[test]
    fn failed_roll_rearms_without_moving() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 20);
        let mut high = FixedRoll(0.99);
        agent.update(1.0, &mut reg, &SignalGateway::inert(), "Office", &mut high);
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.location_name(&reg), Some("Show Stage"));
        assert_eq!(agent.elapsed(), 0.0);
    }

    #[test]
    fn path_end_with_nothing_free_stays_idle() {
        let mut reg = LocationRegistry::from_specs([
            LocationSpec::room("Backstage"),
            LocationSpec::room("Supply Closet"),
        ])
        .unwrap();
        reg.acquire_exact(Requester::new(AgentId(9), "Freddy"), "Backstage").unwrap();
        let policy = PolicySpec::fixed_path(["Backstage", "Supply Closet"]);
        let mut agent = spawn(&mut reg, "Chica", "Supply Closet", policy, 20);

        run(&mut agent, &mut reg, &SignalGateway::inert(), 3);
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.location_name(&reg), Some("Supply Closet"));
        assert_eq!(agent.elapsed(), 0.0);
        assert_eq!(agent.next_decision(), 1.0);
    }

    #[test]
    fn unplaced_agent_refused_everywhere_stays_idle() {
        let mut reg = LocationRegistry::from_specs([LocationSpec::room("Backstage")]).unwrap();
        let freddy = reg.acquire_exact(Requester::new(AgentId(9), "Freddy"), "Backstage").unwrap();
        let policy = PolicySpec::fixed_path(["Backstage"]);
        let mut agent = spawn(&mut reg, "Chica", "Backstage", policy, 20);
        assert_eq!(agent.location(), None);

        assert!(run(&mut agent, &mut reg, &SignalGateway::inert(), 3).is_empty());
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.location(), None);
        assert_eq!(reg.location_of(agent.id()), None);
        assert_eq!(reg.occupant_of(freddy), Some(AgentId(9)));
        assert_eq!(agent.elapsed(), 0.0);
        assert_eq!(agent.next_decision(), 1.0);
    }

    #[test]
    fn sideless_agent_treats_hallway_as_room() {
        let mut reg = LocationRegistry::from_specs([
            LocationSpec::room("Stage"),
            LocationSpec::room("Hall").with_kind(LocationKind::TransitZone),
        ])
        .unwrap();
        let mut agent = spawn(&mut reg, "Freddy", "Stage", PolicySpec::cyclic_scan(), 20);
        run(&mut agent, &mut reg, &SignalGateway::inert(), 2);
        assert_eq!(agent.location_name(&reg), Some("Hall"));
        assert_eq!(agent.state(), AgentState::Idle);
    }
}

// ── Hallway and door ──────────────────────────────────────────────────────────

#[cfg(test)]
mod threshold_tests {
    use nw_signals::{DoorPanel, LightPanel, PowerSupply};

    use super::*;

    #[test]
    fn full_approach_ends_in_one_breach() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 20);
        let g = SignalGateway::inert();

        // Stage → Dining (2 ticks) → West Hall (2 ticks).
        run(&mut agent, &mut reg, &g, 4);
        assert_eq!(agent.state(), AgentState::InTransitZone);
        assert_eq!(agent.location_name(&reg), Some("West Hall"));

        // Light is off, so the agent goes to the door at once.
        run(&mut agent, &mut reg, &g, 1);
        assert_eq!(agent.state(), AgentState::AtThreshold);
        assert_eq!(agent.countdown(), 3.0);

        let events = run(&mut agent, &mut reg, &g, 10);
        assert_eq!(events, vec![AgentEvent::Breach { agent: AgentId(0) }]);
        assert_eq!(agent.state(), AgentState::Attacking);
    }

    #[test]
    fn light_holds_agent_in_hallway() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Show Stage", bonnie_path(), 20);
        let power = PowerSupply::new();
        let mut lights = LightPanel::new();
        lights.turn_on(Side::Left, &power);

        let g = SignalGateway::inert().with_lights(&lights);
        run(&mut agent, &mut reg, &g, 30);
        assert_eq!(agent.state(), AgentState::InTransitZone);

        lights.turn_off(Side::Left);
        let g = SignalGateway::inert().with_lights(&lights);
        run(&mut agent, &mut reg, &g, 1);
        assert_eq!(agent.state(), AgentState::AtThreshold);
    }

    /// Path straight to the door: arrival arms the countdown.
    fn at_door(reg: &mut LocationRegistry, timers: AgentConfig) -> Agent {
        let spec = AgentSpec::new("Bonnie", "Show Stage", PolicySpec::fixed_path(["West Door"]).on_side(Side::Left))
            .with_timers(timers);
        let mut agent = Agent::from_spec(AgentId(0), &spec);
        agent.set_difficulty(20);
        agent.reset_to_home(reg, &mut FixedRoll(0.0));
        run(&mut agent, reg, &SignalGateway::inert(), 2);
        assert_eq!(agent.state(), AgentState::AtThreshold);
        agent
    }

    #[test]
    fn closed_door_holds_countdown_then_exact_attack() {
        let mut reg = pizzeria();
        let mut agent = at_door(&mut reg, quick_timers());
        let power = PowerSupply::new();
        let mut doors = DoorPanel::new();
        doors.close(Side::Left, &power);

        let g = SignalGateway::inert().with_doors(&doors);
        assert!(run(&mut agent, &mut reg, &g, 500).is_empty());
        assert!(agent.is_blocked());
        assert_eq!(agent.countdown(), 3.0);

        doors.open(Side::Left);
        let g = SignalGateway::inert().with_doors(&doors);
        assert!(run(&mut agent, &mut reg, &g, 2).is_empty());
        assert_eq!(run(&mut agent, &mut reg, &g, 1).len(), 1);
    }

    #[test]
    fn countdown_reaching_zero_attacks_that_tick() {
        let mut reg = pizzeria();
        let mut agent = at_door(&mut reg, quick_timers());
        let g = SignalGateway::inert();
        let mut rng = FixedRoll(0.0);
        assert_eq!(agent.update(1.5, &mut reg, &g, "Office", &mut rng), None);
        assert!(agent.update(1.5, &mut reg, &g, "Office", &mut rng).is_some());
    }

    #[test]
    fn countdown_resumes_where_it_was_held() {
        let mut reg = pizzeria();
        let mut agent = at_door(&mut reg, quick_timers());
        let power = PowerSupply::new();
        let mut doors = DoorPanel::new();

        run(&mut agent, &mut reg, &SignalGateway::inert().with_doors(&doors), 1);
        assert_eq!(agent.countdown(), 2.0);

        doors.close(Side::Left, &power);
        run(&mut agent, &mut reg, &SignalGateway::inert().with_doors(&doors), 10);
        assert_eq!(agent.countdown(), 2.0);

        doors.open(Side::Left);
        let g = SignalGateway::inert().with_doors(&doors);
        assert!(run(&mut agent, &mut reg, &g, 1).is_empty());
        assert_eq!(run(&mut agent, &mut reg, &g, 1).len(), 1);
    }

    #[test]
    fn blocked_agent_retreats_when_configured() {
        let mut reg = pizzeria();
        let timers = AgentConfig { blocked_retreat_secs: Some(2.0), ..quick_timers() };
        let mut agent = at_door(&mut reg, timers);
        let power = PowerSupply::new();
        let mut doors = DoorPanel::new();
        doors.close(Side::Right, &power);
        doors.close(Side::Left, &power);

        let g = SignalGateway::inert().with_doors(&doors);
        run(&mut agent, &mut reg, &g, 2);
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.location_name(&reg), Some("Show Stage"));
        assert!(!agent.is_blocked());
    }
}

// ── Camera pause and safety net ───────────────────────────────────────────────

#[cfg(test)]
mod camera_tests {
    use nw_signals::CameraMonitor;

    use super::*;

    fn watching(zone: u16) -> CameraMonitor {
        let mut cam = CameraMonitor::new([ZoneId(zone)]);
        cam.toggle_tablet();
        cam
    }

    #[test]
    fn watched_agent_freezes() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Dining Area", bonnie_path(), 20);
        let cam = watching(1);
        let g = SignalGateway::inert().with_camera(&cam);

        run(&mut agent, &mut reg, &g, 50);
        assert_eq!(agent.state(), AgentState::Idle);
        assert_eq!(agent.elapsed(), 0.0);
        assert_eq!(agent.location_name(&reg), Some("Dining Area"));

        // Watching another zone does not pause.
        let other = watching(3);
        run(&mut agent, &mut reg, &SignalGateway::inert().with_camera(&other), 1);
        assert_eq!(agent.location_name(&reg), Some("West Hall"));
    }

    #[test]
    fn insensitive_agent_ignores_camera() {
        let mut reg = pizzeria();
        let policy = PolicySpec::fixed_path(["Dining Area", "Show Stage"]);
        let mut agent = spawn(&mut reg, "Chica", "Show Stage", policy, 20);
        let cam = watching(1);
        run(&mut agent, &mut reg, &SignalGateway::inert().with_camera(&cam), 2);
        assert_eq!(agent.location_name(&reg), Some("Dining Area"));
    }

    #[test]
    fn safety_net_ignores_camera_pause() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Bonnie", "Office", bonnie_path(), 0);
        let cam = watching(5);
        let events = run(&mut agent, &mut reg, &SignalGateway::inert().with_camera(&cam), 3);
        assert_eq!(events.len(), 1);
        assert_eq!(agent.state(), AgentState::Attacking);
    }

    #[test]
    fn safety_net_applies_to_inert_agents() {
        let mut reg = pizzeria();
        let mut agent = spawn(&mut reg, "Chica", "Office", PolicySpec::cyclic_scan(), 0);
        agent.set_inert(true);
        assert_eq!(run(&mut agent, &mut reg, &SignalGateway::inert(), 1).len(), 1);
    }

    #[test]
    fn moving_into_endpoint_is_immediate() {
        let mut reg = pizzeria();
        let policy = PolicySpec::fixed_path(["Office"]);
        let mut agent = spawn(&mut reg, "Chica", "Show Stage", policy, 20);
        let events = run(&mut agent, &mut reg, &SignalGateway::inert(), 1);
        assert_eq!(events.len(), 1);
        assert_eq!(agent.location_name(&reg), Some("Office"));
    }
}

// ── Staged ambush ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod ambush_tests {
    use nw_behavior::StageRules;
    use nw_signals::CameraMonitor;

    use super::*;

    fn foxy(reg: &mut LocationRegistry) -> Agent {
        let rules = StageRules { final_stage: 4, stage_interval_secs: 1.0, cooldown_secs: 5.0 };
        spawn(reg, "Foxy", "Pirate Cove", PolicySpec::staged_ambush(rules), 20)
    }

    fn cove_cam() -> CameraMonitor {
        let mut cam = CameraMonitor::new([ZoneId(3)]);
        cam.toggle_tablet();
        cam
    }

    #[test]
    fn observation_resets_stage_in_same_tick() {
        for climb in 1..=3 {
            let mut reg = pizzeria();
            let mut agent = foxy(&mut reg);
            run(&mut agent, &mut reg, &SignalGateway::inert(), climb);
            assert_eq!(agent.stage(), climb as u8);

            let cam = cove_cam();
            run(&mut agent, &mut reg, &SignalGateway::inert().with_camera(&cam), 1);
            assert_eq!(agent.stage(), 0);
        }
    }

    #[test]
    fn camera_shy_ambusher_still_loses_its_stage() {
        let mut reg = pizzeria();
        let rules = StageRules { final_stage: 4, stage_interval_secs: 1.0, cooldown_secs: 5.0 };
        let policy = PolicySpec::staged_ambush(rules).paused_when_watched();
        let mut agent = spawn(&mut reg, "Foxy", "Pirate Cove", policy, 20);

        run(&mut agent, &mut reg, &SignalGateway::inert(), 2);
        assert_eq!(agent.stage(), 2);

        let cam = cove_cam();
        run(&mut agent, &mut reg, &SignalGateway::inert().with_camera(&cam), 1);
        assert_eq!(agent.stage(), 0);
        assert_eq!(agent.location_name(&reg), Some("Pirate Cove"));
    }

    #[test]
    fn final_stage_rushes_once_then_cools_down() {
        let mut reg = pizzeria();
        let mut agent = foxy(&mut reg);
        let g = SignalGateway::inert();

        assert!(run(&mut agent, &mut reg, &g, 3).is_empty());
        let events = run(&mut agent, &mut reg, &g, 1);
        assert_eq!(events, vec![AgentEvent::Breach { agent: AgentId(0) }]);
        assert_eq!(agent.location_name(&reg), Some("Office"));
        assert_eq!(agent.state(), AgentState::Attacking);

        // Cooldown: no second breach, stage held until it expires.
        assert!(run(&mut agent, &mut reg, &g, 4).is_empty());
        assert_eq!(agent.stage(), 4);
        assert!(run(&mut agent, &mut reg, &g, 1).is_empty());
        assert_eq!(agent.stage(), 0);
        assert!(run(&mut agent, &mut reg, &g, 50).is_empty());
    }

    #[test]
    fn never_moves_between_stages() {
        let mut reg = pizzeria();
        let mut agent = foxy(&mut reg);
        run(&mut agent, &mut reg, &SignalGateway::inert(), 3);
        assert_eq!(agent.location_name(&reg), Some("Pirate Cove"));
        assert_eq!(agent.state(), AgentState::Idle);
    }
}

// ── Threaded updates over a shared registry ───────────────────────────────────

#[cfg(test)]
mod shared_tests {
    use std::thread;

    use nw_core::AgentRng;
    use nw_location::SharedRegistry;

    use super::*;

    #[test]
    fn agents_on_threads_never_share_a_location() {
        let specs = (0..6).map(|i| LocationSpec::room(format!("Room {i}")));
        let shared = SharedRegistry::new(LocationRegistry::from_specs(specs).unwrap());

        let handles: Vec<_> = (0..4u32)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let name = format!("agent-{i}");
                    let spec = AgentSpec::new(&name, "Room 0", PolicySpec::cyclic_scan())
                        .with_timers(quick_timers());
                    let mut agent = Agent::from_spec(AgentId(i), &spec);
                    agent.set_difficulty(20);
                    let mut rng = AgentRng::new(7, AgentId(i));
                    agent.reset_to_home(&mut shared.lock(), &mut rng);
                    for _ in 0..200 {
                        let mut reg = shared.lock();
                        agent.update(1.0, &mut reg, &SignalGateway::inert(), "Office", &mut rng);
                    }
                    agent.location()
                })
            })
            .collect();

        let held: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let reg = shared.snapshot();
        assert_eq!(reg.occupied_count(), 4);
        for (i, location) in held.iter().enumerate() {
            assert_eq!(*location, reg.location_of(AgentId(i as u32)));
        }
    }
}

// ── Serde derives ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}

    #[test]
    fn states_events_and_timers_are_serializable() {
        assert_serde::<AgentState>();
        assert_serde::<AgentEvent>();
        assert_serde::<AgentConfig>();
        assert_serde::<AgentSpec>();
    }
}
