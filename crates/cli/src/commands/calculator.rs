//! Plan recommendation command

use anyhow::Result;
use colored::Colorize;
use planner_lib::catalog::PlanCatalog;
use planner_lib::{HardwareTier, RecommendationRequest, Recommender, WorkloadProfile};

use crate::client::{ApiClient, CalculatorRequest, CalculatorResponse};
use crate::output::{
    format_cpu, format_price, format_ram, print_info, print_json, print_success, print_warning,
    OutputFormat,
};

/// Recommend a plan, through the API or locally against the built-in catalog
pub async fn recommend(
    client: &ApiClient,
    players: i64,
    server_type: WorkloadProfile,
    tier: HardwareTier,
    offline: bool,
    format: OutputFormat,
) -> Result<()> {
    let result = if offline {
        recommend_offline(players, server_type, tier)?
    } else {
        let request = CalculatorRequest {
            players,
            server_type: server_type.as_str().to_string(),
            performance_level: tier.as_str().to_string(),
        };
        client.post("api/calculator", &request).await?
    };

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_recommendation(players, server_type, &result, offline),
    }

    Ok(())
}

/// Run the engine in-process
pub fn recommend_offline(
    players: i64,
    server_type: WorkloadProfile,
    tier: HardwareTier,
) -> Result<CalculatorResponse> {
    let request = RecommendationRequest::new(players, server_type, tier)?;
    let plans = PlanCatalog::builtin().to_plans();
    let recommendation = Recommender::new().recommend(&request, &plans)?;
    Ok(recommendation.into())
}

fn print_recommendation(
    players: i64,
    server_type: WorkloadProfile,
    result: &CalculatorResponse,
    offline: bool,
) {
    println!("{}", "Plan Recommendation".bold());
    println!("{}", "=".repeat(50));
    println!("Players:          {}", players);
    println!("Server type:      {}", server_type.to_string().cyan());
    println!("Tier:             {}", result.plan_tier.cyan());
    println!();

    println!("{}", "Estimated Requirements".bold());
    println!("{}", "-".repeat(50));
    println!("RAM:              {}", format_ram(result.recommended_ram));
    println!("CPU:              {}", format_cpu(result.recommended_cpu));
    if let Some(required) = result.required_cpu.filter(|r| *r > result.recommended_cpu) {
        println!("CPU (uncapped):   {}", format_cpu(required).dimmed());
    }
    println!();

    let plan_line = format!(
        "{} at {}",
        result.suggested_plan.bold(),
        format_price(result.price)
    );
    match &result.upgrade_warning {
        Some(warning) => {
            println!("Closest plan:     {}", plan_line);
            println!();
            print_warning(warning);
        }
        None => print_success(&format!("Suggested plan: {}", plan_line)),
    }

    if offline {
        println!();
        print_info("Computed locally against the built-in price list");
    }
}
