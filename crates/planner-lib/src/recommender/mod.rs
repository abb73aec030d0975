//! Plan recommendation engine
//!
//! Maps (player count, workload profile, hardware tier) to a RAM/CPU
//! allocation and the cheapest catalog plan that covers it. The engine
//! is pure: it reads only its arguments and the sizing constants bound
//! at construction.

mod matcher;
mod sizing;


pub use matcher::{match_plan, tier_plans, PlanMatch};
pub use sizing::{
    ResourceRequirement, SizingConfig, SizingRule, BASE_CPU_CENTI_PCT, BASE_RAM_MB,
    MAX_REPORTED_CPU_PCT,
};

use crate::error::RecommendError;
use crate::models::{CatalogPlan, HardwareTier, Recommendation, RecommendationRequest};

/// Recommendation engine bound to a sizing table
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: SizingConfig,
}

impl Recommender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SizingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Recommend a plan for `request` from `catalog`.
    ///
    /// `catalog` may hold plans of any tier; only those of the requested
    /// tier are considered.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
        catalog: &[CatalogPlan],
    ) -> Result<Recommendation, RecommendError> {
        let tier = request.hardware_tier();
        let requirement = self
            .config
            .requirement(request.workload_profile(), request.player_count());

        let sorted = tier_plans(catalog, tier);
        let outcome = match_plan(&sorted, requirement.ram_gb, requirement.cpu_pct)
            .ok_or(RecommendError::CatalogUnavailable(tier))?;

        let (matched_plan, suggested_plan, overflow_warning) = match outcome {
            PlanMatch::Fit(plan) => (Some(plan.clone()), plan.clone(), None),
            PlanMatch::Overflow(largest) => {
                (None, largest.clone(), Some(overflow_message(tier, largest)))
            }
        };

        Ok(Recommendation {
            recommended_ram_gb: requirement.ram_gb,
            recommended_cpu_pct: requirement.reported_cpu_pct(),
            required_cpu_pct: requirement.cpu_pct,
            price: suggested_plan.price,
            matched_plan,
            suggested_plan,
            plan_tier: tier,
            overflow_warning,
        })
    }
}

/// Recommend with the default sizing table
pub fn recommend(
    request: &RecommendationRequest,
    catalog: &[CatalogPlan],
) -> Result<Recommendation, RecommendError> {
    Recommender::new().recommend(request, catalog)
}

fn overflow_message(tier: HardwareTier, largest: &CatalogPlan) -> String {
    match tier {
        HardwareTier::Budget => format!(
            "Your requirements exceed our largest budget plan ({}). Consider a performance plan or contact us for a custom solution.",
            largest.name
        ),
        HardwareTier::Performance => format!(
            "Your requirements exceed our largest performance plan ({}). Contact us for a custom solution.",
            largest.name
        ),
    }
}
