//! Catalog matching
//!
//! Picks the cheapest adequate plan: the first plan of the tier, in
//! ascending (ram, cpu) order, that covers both thresholds.

use crate::models::{CatalogPlan, HardwareTier};

/// Outcome of scanning a tier catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanMatch<'a> {
    /// A plan satisfies both thresholds
    Fit(&'a CatalogPlan),
    /// Nothing fits; carries the highest-capacity plan of the tier
    Overflow(&'a CatalogPlan),
}

/// Plans of one tier sorted ascending by (ram_gb, cpu_pct).
///
/// The sort is stable so equal-capacity plans keep catalog order.
pub fn tier_plans(catalog: &[CatalogPlan], tier: HardwareTier) -> Vec<&CatalogPlan> {
    let mut plans: Vec<&CatalogPlan> = catalog.iter().filter(|p| p.tier == tier).collect();
    plans.sort_by_key(|p| (p.ram_gb, p.cpu_pct));
    plans
}

/// Match a requirement against pre-sorted tier plans.
///
/// Returns `None` only when `sorted` is empty.
pub fn match_plan<'a>(
    sorted: &[&'a CatalogPlan],
    ram_gb: u64,
    cpu_pct: u64,
) -> Option<PlanMatch<'a>> {
    let largest = *sorted.last()?;

    let fit = sorted
        .iter()
        .copied()
        .find(|p| p.ram_gb >= ram_gb && p.cpu_pct >= cpu_pct);

    Some(match fit {
        Some(plan) => PlanMatch::Fit(plan),
        None => PlanMatch::Overflow(largest),
    })
}
