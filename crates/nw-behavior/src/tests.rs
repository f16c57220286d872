//! Unit tests for nw-behavior.

use nw_core::{AgentId, LocationId};
use nw_location::{AccessPolicy, Allocator, LocationRegistry, LocationSpec, Requester};

use crate::AgentView;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Stage, Dining, West Hall, West Door (Bonnie only), Office.
fn scene() -> LocationRegistry {
    LocationRegistry::from_specs([
        LocationSpec::room("Show Stage"),
        LocationSpec::room("Dining Area"),
        LocationSpec::room("West Hall"),
        LocationSpec::room("West Door").with_access(AccessPolicy::allow(["Bonnie"])),
        LocationSpec::room("Office"),
    ])
    .unwrap()
}

fn view_at(name: &'static str, location: Option<u32>) -> AgentView<'static> {
    AgentView::new(AgentId(0), name, location.map(LocationId), 10)
}

// ── CyclicScan ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scan_tests {
    use super::*;
    use crate::{CyclicScan, MovementPolicy};

    #[test]
    fn steps_to_next_in_registry_order() {
        let reg = scene();
        let p = CyclicScan::default();
        assert_eq!(p.decide_next_move(&view_at("Freddy", Some(0)), &reg).as_deref(), Some("Dining Area"));
        assert_eq!(p.decide_next_move(&view_at("Freddy", Some(2)), &reg).as_deref(), Some("West Door"));
    }

    #[test]
    fn wraps_at_the_end() {
        let reg = scene();
        let p = CyclicScan::default();
        assert_eq!(p.decide_next_move(&view_at("Freddy", Some(4)), &reg).as_deref(), Some("Show Stage"));
    }

    #[test]
    fn unplaced_starts_at_first() {
        let reg = scene();
        let p = CyclicScan::default();
        assert_eq!(p.decide_next_move(&view_at("Freddy", None), &reg).as_deref(), Some("Show Stage"));
    }

    #[test]
    fn empty_registry_yields_none() {
        let p = CyclicScan::default();
        assert_eq!(p.decide_next_move(&view_at("Freddy", None), &LocationRegistry::empty()), None);
    }
}

// ── FixedPath ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_tests {
    use nw_core::Side;

    use super::*;
    use crate::{BehaviorError, FixedPath, MovementPolicy, PolicyTraits};

    fn bonnie_path() -> FixedPath {
        FixedPath::new(["Dining Area", "West Hall", "West Door"], PolicyTraits::new().on_side(Side::Left))
    }

    #[test]
    fn off_path_goes_to_first_element() {
        let reg = scene();
        let p = bonnie_path();
        assert_eq!(p.decide_next_move(&view_at("Bonnie", Some(0)), &reg).as_deref(), Some("Dining Area"));
        assert_eq!(p.decide_next_move(&view_at("Bonnie", None), &reg).as_deref(), Some("Dining Area"));
    }

    #[test]
    fn on_path_goes_to_next_element() {
        let reg = scene();
        let p = bonnie_path();
        assert_eq!(p.decide_next_move(&view_at("Bonnie", Some(1)), &reg).as_deref(), Some("West Hall"));
        assert_eq!(p.decide_next_move(&view_at("Bonnie", Some(2)), &reg).as_deref(), Some("West Door"));
    }

    #[test]
    fn last_element_explores_by_global_scan() {
        let mut reg = scene();
        let bonnie = Requester::new(AgentId(0), "Bonnie");
        reg.acquire_exact(bonnie, "West Door").unwrap();
        let p = bonnie_path();
        assert_eq!(p.decide_next_move(&view_at("Bonnie", Some(3)), &reg).as_deref(), Some("Show Stage"));
    }

    #[test]
    fn last_element_with_nothing_free_yields_none() {
        let mut reg = scene();
        for (i, name) in ["Show Stage", "Dining Area", "West Hall", "Office"].iter().enumerate() {
            reg.acquire_exact(Requester::new(AgentId(10 + i as u32), "Freddy"), name).unwrap();
        }
        reg.acquire_exact(Requester::new(AgentId(0), "Bonnie"), "West Door").unwrap();
        let p = bonnie_path();
        assert_eq!(p.decide_next_move(&view_at("Bonnie", Some(3)), &reg), None);
    }

    #[test]
    fn empty_path_is_invalid_and_never_moves() {
        let reg = scene();
        let p = FixedPath::new(Vec::<String>::new(), PolicyTraits::new());
        assert_eq!(p.validate(), Err(BehaviorError::EmptyPath("fixed_path")));
        assert_eq!(p.decide_next_move(&view_at("Bonnie", Some(0)), &reg), None);
    }

    #[test]
    fn side_comes_from_traits() {
        assert_eq!(bonnie_path().threat_side(), Some(Side::Left));
    }
}

// ── PowerGatedPath ────────────────────────────────────────────────────────────

#[cfg(test)]
mod power_tests {
    use nw_core::base_move_probability;
    use nw_signals::{PowerSupply, SignalGateway};

    use crate::{FixedPath, MovementPolicy, PolicyTraits, PowerGatedPath};

    fn freddy() -> PowerGatedPath {
        PowerGatedPath::new(FixedPath::new(["Dining Area", "Office"], PolicyTraits::new()), 30.0)
    }

    #[test]
    fn zero_probability_above_threshold() {
        let power = PowerSupply::new();
        let g = SignalGateway::inert().with_power(&power);
        assert_eq!(freddy().move_probability(20, &g), 0.0);
        // Unwired power reads as full.
        assert_eq!(freddy().move_probability(20, &SignalGateway::inert()), 0.0);
    }

    #[test]
    fn half_base_at_or_below_threshold() {
        let mut power = PowerSupply::new();
        power.set(30.0);
        let g = SignalGateway::inert().with_power(&power);
        assert_eq!(freddy().move_probability(20, &g), base_move_probability(20) * 0.5);
        power.set(5.0);
        let g = SignalGateway::inert().with_power(&power);
        assert_eq!(freddy().move_probability(10, &g), base_move_probability(10) * 0.5);
    }

    #[test]
    fn threshold_out_of_range_is_invalid() {
        let p = PowerGatedPath::new(FixedPath::new(["Office"], PolicyTraits::new()), 150.0);
        assert!(p.validate().is_err());
        assert!(freddy().validate().is_ok());
    }
}

// ── StagedAmbush ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod ambush_tests {
    use super::*;
    use crate::{MovementPolicy, PolicyTraits, StageRules, StagedAmbush};

    #[test]
    fn never_wanders_and_exposes_rules() {
        let reg = scene();
        let p = StagedAmbush::new(StageRules::default(), PolicyTraits::new());
        assert_eq!(p.decide_next_move(&view_at("Foxy", Some(0)), &reg), None);
        assert_eq!(p.staging().map(|r| r.final_stage), Some(4));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn bad_rules_are_invalid() {
        let rules = StageRules { final_stage: 0, ..StageRules::default() };
        assert!(StagedAmbush::new(rules, PolicyTraits::new()).validate().is_err());
        let rules = StageRules { stage_interval_secs: 0.0, ..StageRules::default() };
        assert!(StagedAmbush::new(rules, PolicyTraits::new()).validate().is_err());
    }
}

// ── Traits and zones ──────────────────────────────────────────────────────────

#[cfg(test)]
mod traits_tests {
    use nw_core::ZoneId;

    use super::*;
    use crate::{CyclicScan, MovementPolicy, PolicyTraits};

    #[test]
    fn zone_override_beats_registry_zone() {
        let reg = LocationRegistry::from_specs([
            LocationSpec::room("Stage").with_zone(ZoneId(1)),
            LocationSpec::room("Kitchen"),
        ])
        .unwrap();
        let p = CyclicScan::new(PolicyTraits::new().with_zone("Kitchen", ZoneId(6)));
        let stage = reg.get(LocationId(0)).unwrap();
        let kitchen = reg.get(LocationId(1)).unwrap();
        assert_eq!(p.observation_zone(stage), Some(ZoneId(1)));
        assert_eq!(p.observation_zone(kitchen), Some(ZoneId(6)));
        assert!(!p.pauses_when_watched());
    }
}

// ── PolicySpec ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spec_tests {
    use nw_core::Side;

    use crate::{BehaviorError, PolicySpec, StageRules};

    #[test]
    fn builds_each_archetype() {
        let cases = [
            (PolicySpec::cyclic_scan(), "cyclic_scan"),
            (PolicySpec::fixed_path(["A"]), "fixed_path"),
            (PolicySpec::staged_ambush(StageRules::default()), "staged_ambush"),
            (PolicySpec::power_gated_path(["A"], 20.0), "power_gated_path"),
        ];
        for (spec, kind) in cases {
            assert_eq!(spec.build().unwrap().kind(), kind);
        }
    }

    #[test]
    fn kind_is_case_insensitive() {
        let spec = PolicySpec { kind: " Fixed_Path ".into(), ..PolicySpec::fixed_path(["A"]) };
        assert_eq!(spec.build().unwrap().kind(), "fixed_path");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let spec = PolicySpec { kind: "teleporter".into(), ..PolicySpec::default() };
        assert_eq!(
            spec.build().err(),
            Some(BehaviorError::UnknownArchetype("teleporter".into()))
        );
    }

    #[test]
    fn builder_traits_flow_into_policy() {
        let policy = PolicySpec::fixed_path(["A", "B"])
            .on_side(Side::Right)
            .paused_when_watched()
            .build()
            .unwrap();
        assert_eq!(policy.threat_side(), Some(Side::Right));
        assert!(policy.pauses_when_watched());
    }

    #[test]
    fn empty_path_builds_but_fails_validation() {
        let policy = PolicySpec::fixed_path(Vec::<String>::new()).build().unwrap();
        assert!(policy.validate().is_err());
    }
}
