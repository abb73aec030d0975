//! Resource sizing from player count and workload profile
//!
//! All arithmetic is integer and rounds upward: a fractional GB or
//! percentage point always becomes the next whole unit.

use crate::models::WorkloadProfile;
use serde::{Deserialize, Serialize};

/// Fixed RAM reservation before any players join (1 GB)
pub const BASE_RAM_MB: u64 = 1024;

/// Fixed CPU reservation, in hundredths of a percentage point (10%)
pub const BASE_CPU_CENTI_PCT: u64 = 1_000;

/// Reported CPU figures never exceed one full core
pub const MAX_REPORTED_CPU_PCT: u64 = 100;

const MB_PER_GB: u64 = 1024;
const CENTI_PER_PCT: u64 = 100;

/// Per-player resource cost for one workload profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingRule {
    pub ram_per_player_mb: u64,
    /// Hundredths of a percentage point of one core (50 = 0.5%)
    pub cpu_per_player_centi_pct: u64,
}

impl SizingRule {
    pub const fn new(ram_per_player_mb: u64, cpu_per_player_centi_pct: u64) -> Self {
        Self {
            ram_per_player_mb,
            cpu_per_player_centi_pct,
        }
    }
}

/// Sizing constants bound by the engine at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    pub base_ram_mb: u64,
    pub base_cpu_centi_pct: u64,
    pub vanilla: SizingRule,
    pub light_plugins: SizingRule,
    pub heavy_plugins: SizingRule,
    pub modded: SizingRule,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            base_ram_mb: BASE_RAM_MB,
            base_cpu_centi_pct: BASE_CPU_CENTI_PCT,
            vanilla: SizingRule::new(64, 50),
            light_plugins: SizingRule::new(96, 75),
            heavy_plugins: SizingRule::new(160, 125),
            modded: SizingRule::new(256, 200),
        }
    }
}

impl SizingConfig {
    pub fn rule(&self, profile: WorkloadProfile) -> SizingRule {
        match profile {
            WorkloadProfile::Vanilla => self.vanilla,
            WorkloadProfile::LightPlugins => self.light_plugins,
            WorkloadProfile::HeavyPlugins => self.heavy_plugins,
            WorkloadProfile::Modded => self.modded,
        }
    }

    /// Compute the resource requirement for a player count
    pub fn requirement(&self, profile: WorkloadProfile, players: u64) -> ResourceRequirement {
        let rule = self.rule(profile);

        let ram_mb = self
            .base_ram_mb
            .saturating_add(players.saturating_mul(rule.ram_per_player_mb));
        let cpu_centi = self
            .base_cpu_centi_pct
            .saturating_add(players.saturating_mul(rule.cpu_per_player_centi_pct));

        ResourceRequirement {
            ram_mb,
            ram_gb: ceil_div(ram_mb, MB_PER_GB),
            cpu_pct: ceil_div(cpu_centi, CENTI_PER_PCT),
        }
    }
}

/// Raw and rounded resource need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRequirement {
    pub ram_mb: u64,
    pub ram_gb: u64,
    /// Uncapped, may exceed 100
    pub cpu_pct: u64,
}

impl ResourceRequirement {
    pub fn reported_cpu_pct(&self) -> u64 {
        self.cpu_pct.min(MAX_REPORTED_CPU_PCT)
    }
}

fn ceil_div(value: u64, divisor: u64) -> u64 {
    value / divisor + u64::from(value % divisor != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_pinned() {
        let config = SizingConfig::default();
        assert_eq!(config.rule(WorkloadProfile::Vanilla), SizingRule::new(64, 50));
        assert_eq!(config.rule(WorkloadProfile::LightPlugins), SizingRule::new(96, 75));
        assert_eq!(config.rule(WorkloadProfile::HeavyPlugins), SizingRule::new(160, 125));
        assert_eq!(config.rule(WorkloadProfile::Modded), SizingRule::new(256, 200));
        assert_eq!(config.base_ram_mb, 1024);
        assert_eq!(config.base_cpu_centi_pct, 1_000);
    }

    #[test]
    fn test_vanilla_ten_players() {
        let req = SizingConfig::default().requirement(WorkloadProfile::Vanilla, 10);
        assert_eq!(req.ram_mb, 1664);
        assert_eq!(req.ram_gb, 2);
        assert_eq!(req.cpu_pct, 15);
    }

    #[test]
    fn test_modded_two_hundred_players() {
        let req = SizingConfig::default().requirement(WorkloadProfile::Modded, 200);
        assert_eq!(req.ram_mb, 52_224);
        assert_eq!(req.ram_gb, 51);
        assert_eq!(req.cpu_pct, 410);
        assert_eq!(req.reported_cpu_pct(), 100);
    }

    #[test]
    fn test_fractional_values_round_up() {
        // 1024 + 3 * 96 = 1312 MB -> 2 GB; 10 + 3 * 0.75 = 12.25% -> 13%
        let req = SizingConfig::default().requirement(WorkloadProfile::LightPlugins, 3);
        assert_eq!(req.ram_gb, 2);
        assert_eq!(req.cpu_pct, 13);
    }

    #[test]
    fn test_exact_gb_boundary_not_bumped() {
        // 1024 + 16 * 64 = 2048 MB is exactly 2 GB
        let req = SizingConfig::default().requirement(WorkloadProfile::Vanilla, 16);
        assert_eq!(req.ram_gb, 2);
        let req = SizingConfig::default().requirement(WorkloadProfile::Vanilla, 17);
        assert_eq!(req.ram_gb, 3);
    }

    #[test]
    fn test_huge_player_count_saturates() {
        let req = SizingConfig::default().requirement(WorkloadProfile::Modded, u64::MAX);
        assert_eq!(req.ram_mb, u64::MAX);
        assert!(req.ram_gb > 0);
        assert_eq!(req.reported_cpu_pct(), MAX_REPORTED_CPU_PCT);
    }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(0, 1024), 0);
        assert_eq!(ceil_div(1, 1024), 1);
        assert_eq!(ceil_div(1024, 1024), 1);
        assert_eq!(ceil_div(1025, 1024), 2);
        assert_eq!(ceil_div(u64::MAX, 100), u64::MAX / 100 + 1);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: SizingConfig =
            serde_json::from_str(r#"{"base_ram_mb": 2048}"#).unwrap();
        assert_eq!(config.base_ram_mb, 2048);
        assert_eq!(config.modded, SizingRule::new(256, 200));
    }
}
