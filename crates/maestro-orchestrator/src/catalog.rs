use crate::config::{CatalogConfig, EngineConfig};
use crate::types::{AgentCategory, AgentDescriptor};
use crate::workflow::WorkflowDefinition;
use maestro_core::Priority;
use std::collections::BTreeMap;
use std::time::Duration;

/// The built-in hospitality catalog: agents, dependencies and the five
/// standard workflows. Handlers are not included.
pub fn default_catalog() -> CatalogConfig {
    CatalogConfig {
        engine: EngineConfig::default(),
        agents: default_agents(),
        dependencies: default_dependencies(),
        workflows: default_workflows(),
    }
}

fn agent(
    name: &str,
    category: AgentCategory,
    priority: Priority,
    capabilities: &[&str],
    cost_ms: u64,
    description: &str,
) -> AgentDescriptor {
    AgentDescriptor::new(name, category)
        .with_priority(priority)
        .with_capabilities(capabilities.iter().copied())
        .with_average_cost(Duration::from_millis(cost_ms))
        .with_description(description)
}

fn default_agents() -> Vec<AgentDescriptor> {
    use AgentCategory::*;
    vec![
        agent(
            "guest_communication",
            CustomerService,
            Priority::High,
            &["messaging", "multilingual"],
            400,
            "Drafts and sends guest-facing messages.",
        ),
        agent(
            "sentiment_analysis",
            CustomerService,
            Priority::Medium,
            &["sentiment", "classification"],
            250,
            "Scores guest feedback and reviews.",
        ),
        agent(
            "review_response",
            CustomerService,
            Priority::Low,
            &["messaging", "reputation"],
            600,
            "Prepares replies to public reviews.",
        ),
        agent(
            "demand_forecast",
            Revenue,
            Priority::High,
            &["forecasting", "seasonality"],
            900,
            "Projects occupancy for the coming period.",
        ),
        agent(
            "pricing_optimizer",
            Revenue,
            Priority::High,
            &["dynamic_pricing", "rate_parity"],
            700,
            "Recommends room rates.",
        ),
        agent(
            "booking_optimizer",
            Revenue,
            Priority::Medium,
            &["inventory", "overbooking"],
            500,
            "Balances inventory across channels.",
        ),
        agent(
            "upsell_recommender",
            Revenue,
            Priority::Low,
            &["recommendation"],
            300,
            "Suggests upgrades and add-ons.",
        ),
        agent(
            "housekeeping_scheduler",
            Operations,
            Priority::Medium,
            &["scheduling"],
            350,
            "Plans housekeeping shifts.",
        ),
        agent(
            "crisis_coordinator",
            Operations,
            Priority::Critical,
            &["incident_response", "escalation"],
            200,
            "Coordinates the response to an incident.",
        ),
        agent(
            "market_intelligence",
            Marketing,
            Priority::Medium,
            &["competitor_tracking", "market_research"],
            1200,
            "Collects competitor and market signals.",
        ),
        agent(
            "campaign_planner",
            Marketing,
            Priority::Low,
            &["campaigns", "segmentation"],
            800,
            "Plans marketing campaigns.",
        ),
        agent(
            "fraud_detection",
            Security,
            Priority::Critical,
            &["fraud_scoring", "payment_screening"],
            150,
            "Screens bookings and payments.",
        ),
        agent(
            "compliance_monitor",
            Security,
            Priority::High,
            &["regulatory", "audit"],
            450,
            "Checks operations against regulations.",
        ),
        agent(
            "energy_optimizer",
            Sustainability,
            Priority::Medium,
            &["energy", "hvac"],
            650,
            "Tunes energy use to expected occupancy.",
        ),
        agent(
            "carbon_tracker",
            Sustainability,
            Priority::Background,
            &["emissions", "reporting"],
            300,
            "Tracks emissions per stay.",
        ),
    ]
}

fn default_dependencies() -> BTreeMap<String, Vec<String>> {
    let edges: [(&str, &[&str]); 9] = [
        ("pricing_optimizer", &["demand_forecast", "market_intelligence"]),
        ("booking_optimizer", &["pricing_optimizer", "demand_forecast"]),
        ("review_response", &["sentiment_analysis"]),
        ("upsell_recommender", &["sentiment_analysis"]),
        ("crisis_coordinator", &["guest_communication", "compliance_monitor"]),
        ("campaign_planner", &["market_intelligence"]),
        ("housekeeping_scheduler", &["demand_forecast"]),
        ("energy_optimizer", &["demand_forecast"]),
        ("carbon_tracker", &["energy_optimizer"]),
    ];
    edges
        .into_iter()
        .map(|(agent, deps)| {
            (
                agent.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect()
}

fn default_workflows() -> Vec<WorkflowDefinition> {
    vec![
        WorkflowDefinition::new("customer_onboarding")
            .with_description("Screen, welcome and upsell a new guest.")
            .step("fraud_detection", Priority::High)
            .step("guest_communication", Priority::Medium)
            .step("upsell_recommender", Priority::Low),
        WorkflowDefinition::new("booking_optimization")
            .with_description("Forecast demand, set rates, rebalance inventory.")
            .step("demand_forecast", Priority::High)
            .step("pricing_optimizer", Priority::High)
            .step("booking_optimizer", Priority::Medium),
        WorkflowDefinition::new("crisis_response")
            .with_description("Coordinate, inform guests, check obligations.")
            .step("crisis_coordinator", Priority::Critical)
            .step("guest_communication", Priority::Critical)
            .step("compliance_monitor", Priority::High),
        WorkflowDefinition::new("market_expansion")
            .with_description("Research a market, plan campaigns, price entry.")
            .step("market_intelligence", Priority::Medium)
            .step("campaign_planner", Priority::Medium)
            .step("pricing_optimizer", Priority::Low),
        WorkflowDefinition::new("sustainability_audit")
            .with_description("Review energy use and emissions.")
            .step("energy_optimizer", Priority::Medium)
            .step("carbon_tracker", Priority::Medium)
            .step("compliance_monitor", Priority::Low),
    ]
}
