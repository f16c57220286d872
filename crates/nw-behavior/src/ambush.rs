//! Staged ambush: hide, build up while nobody is looking, then rush.

use nw_location::LocationRegistry;

use crate::{AgentView, BehaviorResult, MovementPolicy, PolicyTraits, StageRules};

/// An archetype driven by a stage counter instead of the idle timer.
///
/// The agent never wanders.  Every `stage_interval_secs` it rolls its move
/// probability and, if nobody is watching its zone, climbs one stage.  Being
/// watched drops it straight back to stage 0.  At `final_stage` it relocates
/// directly to the protected endpoint and attacks.  The counter logic runs
/// in the state machine; this type only supplies the rules.
#[derive(Clone, Debug, Default)]
pub struct StagedAmbush {
    pub rules:  StageRules,
    pub traits: PolicyTraits,
}

impl StagedAmbush {
    pub fn new(rules: StageRules, traits: PolicyTraits) -> Self {
        Self { rules, traits }
    }
}

impl MovementPolicy for StagedAmbush {
    fn kind(&self) -> &'static str {
        "staged_ambush"
    }

    fn traits(&self) -> &PolicyTraits {
        &self.traits
    }

    fn decide_next_move(&self, _agent: &AgentView<'_>, _registry: &LocationRegistry) -> Option<String> {
        None
    }

    fn staging(&self) -> Option<&StageRules> {
        Some(&self.rules)
    }

    fn validate(&self) -> BehaviorResult<()> {
        self.rules.validate()
    }
}
