//! Data description of a policy, as it appears in a night file.

use std::collections::BTreeMap;

use nw_core::{Side, ZoneId};

use crate::{
    BehaviorError, BehaviorResult, CyclicScan, FixedPath, MovementPolicy, NoopPolicy,
    PolicyTraits, PowerGatedPath, StageRules, StagedAmbush,
};

/// Default power threshold for `power_gated_path`, in percent.
pub const DEFAULT_POWER_THRESHOLD: f32 = 30.0;

/// Archetype-tagged policy configuration.
///
/// `kind` selects the archetype: `cyclic_scan`, `fixed_path`,
/// `staged_ambush`, `power_gated_path` or `noop`.  Fields an archetype does
/// not use are ignored.
///
/// ```toml
/// kind = "fixed_path"
/// path = ["Dining Area", "West Hall", "West Door"]
/// side = "left"
/// pause_when_watched = true
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolicySpec {
    pub kind:               String,
    pub path:               Vec<String>,
    pub side:               Option<Side>,
    pub pause_when_watched: bool,
    pub zones:              BTreeMap<String, ZoneId>,
    pub staging:            StageRules,
    pub power_threshold:    f32,
}

impl Default for PolicySpec {
    fn default() -> Self {
        Self {
            kind:               "cyclic_scan".to_string(),
            path:               Vec::new(),
            side:               None,
            pause_when_watched: false,
            zones:              BTreeMap::new(),
            staging:            StageRules::default(),
            power_threshold:    DEFAULT_POWER_THRESHOLD,
        }
    }
}

impl PolicySpec {
    fn of_kind(kind: &str) -> Self {
        Self { kind: kind.to_string(), ..Self::default() }
    }

    pub fn cyclic_scan() -> Self {
        Self::of_kind("cyclic_scan")
    }

    pub fn fixed_path<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { path: path.into_iter().map(Into::into).collect(), ..Self::of_kind("fixed_path") }
    }

    pub fn staged_ambush(staging: StageRules) -> Self {
        Self { staging, ..Self::of_kind("staged_ambush") }
    }

    pub fn power_gated_path<I, S>(path: I, threshold: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            power_threshold: threshold,
            ..Self::of_kind("power_gated_path")
        }
    }

    pub fn on_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn paused_when_watched(mut self) -> Self {
        self.pause_when_watched = true;
        self
    }

    pub fn with_zone(mut self, location: impl Into<String>, zone: ZoneId) -> Self {
        self.zones.insert(location.into(), zone);
        self
    }

    fn traits(&self) -> PolicyTraits {
        PolicyTraits {
            side:               self.side,
            pause_when_watched: self.pause_when_watched,
            zones:              self.zones.clone(),
        }
    }

    /// Construct the policy.  Only an unknown `kind` fails here; content
    /// problems such as an empty path are left to
    /// [`MovementPolicy::validate`].
    pub fn build(&self) -> BehaviorResult<Box<dyn MovementPolicy>> {
        let traits = self.traits();
        let policy: Box<dyn MovementPolicy> = match self.kind.trim().to_ascii_lowercase().as_str() {
            "cyclic_scan" => Box::new(CyclicScan::new(traits)),
            "fixed_path" => Box::new(FixedPath::new(self.path.iter().cloned(), traits)),
            "staged_ambush" => Box::new(StagedAmbush::new(self.staging.clone(), traits)),
            "power_gated_path" => Box::new(PowerGatedPath::new(
                FixedPath::new(self.path.iter().cloned(), traits),
                self.power_threshold,
            )),
            "noop" => Box::new(NoopPolicy::on_side(self.side)),
            _ => return Err(BehaviorError::UnknownArchetype(self.kind.clone())),
        };
        Ok(policy)
    }
}
