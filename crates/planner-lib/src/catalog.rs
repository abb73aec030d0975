//! Plan catalog: the price list grouped by hardware tier
//!
//! The wire shape (`{ budget: { specs, plans }, performance: { .. } }`)
//! is what `GET /api/plans` serves and what a catalog file contains.
//! The engine consumes the flattened [`CatalogPlan`] form.

use crate::models::{CatalogPlan, HardwareTier};
use anyhow::{Context, Result};
pub use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Hardware description shown next to a tier's plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpecs {
    pub processor: String,
    pub memory: String,
    pub storage: String,
    pub uptime: String,
}

/// One plan as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub name: String,
    pub price: u64,
    /// GB
    pub ram: u64,
    /// Percent of one core
    pub cpu: u64,
    /// GB
    pub storage: u64,
}

impl PlanEntry {
    fn new(name: &str, ram: u64, cpu: u64, storage: u64, price: u64) -> Self {
        Self {
            name: name.to_string(),
            price,
            ram,
            cpu,
            storage,
        }
    }

    pub fn to_catalog_plan(&self, tier: HardwareTier) -> CatalogPlan {
        CatalogPlan {
            name: self.name.clone(),
            ram_gb: self.ram,
            cpu_pct: self.cpu,
            storage_gb: self.storage,
            price: self.price,
            tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCatalog {
    pub specs: TierSpecs,
    pub plans: Vec<PlanEntry>,
}

/// Full price list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCatalog {
    pub budget: TierCatalog,
    pub performance: TierCatalog,
}

impl PlanCatalog {
    /// The published HexaCraft price list
    pub fn builtin() -> Self {
        Self {
            budget: TierCatalog {
                specs: TierSpecs {
                    processor: "Intel Platinum 8269-CY".to_string(),
                    memory: "128GB DDR4 3200MHz".to_string(),
                    storage: "NVMe SSD Storage".to_string(),
                    uptime: "80% Uptime Guarantee".to_string(),
                },
                plans: vec![
                    PlanEntry::new("Dirt", 2, 100, 10, 20),
                    PlanEntry::new("Stone", 4, 200, 20, 40),
                    PlanEntry::new("Iron", 8, 300, 30, 80),
                    PlanEntry::new("Redstone", 16, 400, 40, 160),
                    PlanEntry::new("Gold", 32, 450, 40, 320),
                    PlanEntry::new("Emerald", 48, 500, 50, 480),
                    PlanEntry::new("Netherite", 64, 700, 60, 640),
                ],
            },
            performance: TierCatalog {
                specs: TierSpecs {
                    processor: "AMD EPYC 9354P".to_string(),
                    memory: "256GB DDR5 5400MHz".to_string(),
                    storage: "NVMe SSD Storage".to_string(),
                    uptime: "100% Uptime Guarantee".to_string(),
                },
                plans: vec![
                    PlanEntry::new("Performance Dirt", 2, 100, 10, 40),
                    PlanEntry::new("Performance Stone", 4, 200, 20, 80),
                    PlanEntry::new("Performance Iron", 8, 300, 30, 160),
                    PlanEntry::new("Performance Redstone", 16, 400, 40, 320),
                    PlanEntry::new("Performance Gold", 32, 450, 40, 640),
                    PlanEntry::new("Performance Emerald", 48, 500, 50, 960),
                    PlanEntry::new("Performance Netherite", 64, 700, 60, 1280),
                ],
            },
        }
    }

    pub fn tier(&self, tier: HardwareTier) -> &TierCatalog {
        match tier {
            HardwareTier::Budget => &self.budget,
            HardwareTier::Performance => &self.performance,
        }
    }

    /// Plans of one tier in engine form
    pub fn plans_for(&self, tier: HardwareTier) -> Vec<CatalogPlan> {
        self.tier(tier)
            .plans
            .iter()
            .map(|p| p.to_catalog_plan(tier))
            .collect()
    }

    /// Every plan of every tier in engine form
    pub fn to_plans(&self) -> Vec<CatalogPlan> {
        HardwareTier::ALL
            .into_iter()
            .flat_map(|tier| self.plans_for(tier))
            .collect()
    }

    pub fn plan_count(&self) -> usize {
        self.budget.plans.len() + self.performance.plans.len()
    }
}

/// Trait for catalog providers
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load the current catalog
    async fn load(&self) -> Result<PlanCatalog>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// Catalog held in memory
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: PlanCatalog,
}

impl StaticCatalog {
    pub fn new(catalog: PlanCatalog) -> Self {
        Self { catalog }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(PlanCatalog::builtin())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn load(&self) -> Result<PlanCatalog> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// Catalog read from a JSON file on every load, so edits apply without
/// a restart
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn load(&self) -> Result<PlanCatalog> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog file {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Create the catalog source for an optional file path
pub fn create_source(path: Option<&Path>) -> Arc<dyn CatalogSource> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using file-backed plan catalog");
            Arc::new(FileCatalog::new(path))
        }
        None => {
            tracing::info!("Using built-in plan catalog");
            Arc::new(StaticCatalog::default())
        }
    }
}
