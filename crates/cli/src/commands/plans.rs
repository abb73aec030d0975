//! Plan catalog commands

use anyhow::Result;
use colored::Colorize;
use planner_lib::catalog::{PlanCatalog, TierCatalog};
use planner_lib::HardwareTier;
use tabled::{settings::Style, Table, Tabled};

use crate::client::ApiClient;
use crate::output::{format_cpu, format_price, format_ram, print_json, OutputFormat};

/// Row for plans table
#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Plan")]
    name: String,
    #[tabled(rename = "RAM")]
    ram: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Storage")]
    storage: String,
    #[tabled(rename = "Price")]
    price: String,
}

fn plan_rows(tier: &TierCatalog) -> Vec<PlanRow> {
    tier.plans
        .iter()
        .map(|p| PlanRow {
            name: p.name.clone(),
            ram: format_ram(p.ram),
            cpu: format_cpu(p.cpu),
            storage: format!("{} GB", p.storage),
            price: format_price(p.price),
        })
        .collect()
}

fn print_tier(tier: HardwareTier, catalog: &TierCatalog) {
    let title = match tier {
        HardwareTier::Budget => "Budget Plans",
        HardwareTier::Performance => "Performance Plans",
    };
    println!("{}", title.bold());
    println!("{}", "=".repeat(50));
    println!("Processor:  {}", catalog.specs.processor.cyan());
    println!("Memory:     {}", catalog.specs.memory);
    println!("Storage:    {}", catalog.specs.storage);
    println!("Uptime:     {}", catalog.specs.uptime);
    println!();

    if catalog.plans.is_empty() {
        println!("{}", "No plans in this tier.".yellow());
    } else {
        let table = Table::new(plan_rows(catalog)).with(Style::rounded()).to_string();
        println!("{}", table);
    }
}

/// List the plan catalog, optionally one tier only
pub async fn list_plans(
    client: &ApiClient,
    tier: Option<HardwareTier>,
    format: OutputFormat,
) -> Result<()> {
    let catalog: PlanCatalog = client.get("api/plans").await?;

    match format {
        OutputFormat::Json => match tier {
            Some(tier) => print_json(catalog.tier(tier))?,
            None => print_json(&catalog)?,
        },
        OutputFormat::Table => {
            let tiers = match tier {
                Some(tier) => vec![tier],
                None => HardwareTier::ALL.to_vec(),
            };
            for (i, tier) in tiers.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_tier(tier, catalog.tier(tier));
            }
        }
    }

    Ok(())
}
