//! Core data models for plan recommendation

use crate::error::RecommendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How resource-hungry the server's content is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadProfile {
    /// No plugins or mods
    Vanilla,
    /// Basic plugins like EssentialsX
    LightPlugins,
    /// Many plugins, custom maps
    HeavyPlugins,
    /// Forge/Fabric modpacks
    Modded,
}

impl WorkloadProfile {
    pub const ALL: [WorkloadProfile; 4] = [
        WorkloadProfile::Vanilla,
        WorkloadProfile::LightPlugins,
        WorkloadProfile::HeavyPlugins,
        WorkloadProfile::Modded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadProfile::Vanilla => "vanilla",
            WorkloadProfile::LightPlugins => "light_plugins",
            WorkloadProfile::HeavyPlugins => "heavy_plugins",
            WorkloadProfile::Modded => "modded",
        }
    }
}

impl fmt::Display for WorkloadProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadProfile {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkloadProfile::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                RecommendError::InvalidInput(format!(
                    "unknown server type '{}', expected one of vanilla, light_plugins, heavy_plugins, modded",
                    s
                ))
            })
    }
}

/// Physical hardware class a plan runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareTier {
    Budget,
    Performance,
}

impl HardwareTier {
    pub const ALL: [HardwareTier; 2] = [HardwareTier::Budget, HardwareTier::Performance];

    pub fn as_str(&self) -> &'static str {
        match self {
            HardwareTier::Budget => "budget",
            HardwareTier::Performance => "performance",
        }
    }
}

impl fmt::Display for HardwareTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HardwareTier {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HardwareTier::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                RecommendError::InvalidInput(format!(
                    "unknown performance level '{}', expected budget or performance",
                    s
                ))
            })
    }
}

/// A purchasable plan from the price list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPlan {
    pub name: String,
    pub ram_gb: u64,
    /// Percentage points of one core (100 = one full core)
    pub cpu_pct: u64,
    pub storage_gb: u64,
    pub price: u64,
    pub tier: HardwareTier,
}

/// Validated calculator input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationRequest {
    player_count: u64,
    workload_profile: WorkloadProfile,
    hardware_tier: HardwareTier,
}

impl RecommendationRequest {
    /// Build a request, rejecting non-positive player counts
    pub fn new(
        player_count: i64,
        workload_profile: WorkloadProfile,
        hardware_tier: HardwareTier,
    ) -> Result<Self, RecommendError> {
        if player_count <= 0 {
            return Err(RecommendError::InvalidInput(format!(
                "player count must be a positive whole number, got {}",
                player_count
            )));
        }

        Ok(Self {
            player_count: player_count as u64,
            workload_profile,
            hardware_tier,
        })
    }

    /// Build a request from raw wire tags
    pub fn parse(
        player_count: i64,
        server_type: &str,
        performance_level: &str,
    ) -> Result<Self, RecommendError> {
        let profile = server_type.parse()?;
        let tier = performance_level.parse()?;
        Self::new(player_count, profile, tier)
    }

    pub fn player_count(&self) -> u64 {
        self.player_count
    }

    pub fn workload_profile(&self) -> WorkloadProfile {
        self.workload_profile
    }

    pub fn hardware_tier(&self) -> HardwareTier {
        self.hardware_tier
    }
}

/// Engine output for one calculator request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub recommended_ram_gb: u64,
    /// Reported CPU need, capped at 100
    pub recommended_cpu_pct: u64,
    /// Uncapped CPU need used for plan matching
    pub required_cpu_pct: u64,
    /// Present only when a plan satisfies both thresholds
    pub matched_plan: Option<CatalogPlan>,
    /// The matched plan, or the largest plan of the tier on overflow
    pub suggested_plan: CatalogPlan,
    pub plan_tier: HardwareTier,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_warning: Option<String>,
}

impl Recommendation {
    pub fn is_overflow(&self) -> bool {
        self.matched_plan.is_none()
    }
}
