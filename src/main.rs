//! Pension Timeline CLI
//!
//! Loads a household profile, prints the benefit timeline for one insured
//! event and, when spending is given, the coverage gap table.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use pension_timeline::assumptions::loader::DEFAULT_RATES_PATH;
use pension_timeline::household::{load_household, loader::DEFAULT_PROFILE_PATH};
use pension_timeline::{
    Assumptions, CoverageInputs, DisabilityLevel, Event, Planner, PolicyMode, Scenario, TimelineOptions,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Current,
    Revised,
}

impl From<Policy> for PolicyMode {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Current => PolicyMode::Current,
            Policy::Revised => PolicyMode::Revised,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pension_timeline", about = "Public pension timeline and coverage gap for one household")]
struct Cli {
    /// Household profile (JSON)
    #[arg(long, default_value = DEFAULT_PROFILE_PATH)]
    profile: PathBuf,

    /// Insured event, e.g. survivor-husband-dies or disability-wife
    #[arg(long, default_value = "survivor-husband-dies")]
    event: String,

    /// Disability grade for disability events (1-3)
    #[arg(long, default_value_t = 2)]
    level: u8,

    #[arg(long, value_enum, default_value_t = Policy::Current)]
    policy: Policy,

    /// Directory holding pension_rates.csv and eligibility_rules.csv
    #[arg(long, default_value = DEFAULT_RATES_PATH)]
    rates: PathBuf,

    /// Keep the elected claim age instead of searching for a deferral switch
    #[arg(long)]
    no_deferral_search: bool,

    /// Household spending before the event (yen/year); enables the coverage table
    #[arg(long)]
    spending: Option<f64>,

    /// Coverage inputs as JSON (overrides the individual flags below)
    #[arg(long)]
    coverage: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    savings: f64,

    #[arg(long, default_value_t = 0.0)]
    funeral_cost: f64,

    #[arg(long, default_value_t = 0.0)]
    sick_pay_monthly: f64,

    /// Write coverage rows to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = Assumptions::from_csv_path(&cli.rates)
        .with_context(|| format!("loading rate tables from {:?}", cli.rates))?;
    let household = load_household(&cli.profile, &assumptions.rules)
        .with_context(|| format!("loading profile {:?}", cli.profile))?;

    let Some(level) = DisabilityLevel::from_grade(cli.level) else {
        bail!("disability level must be 1, 2 or 3, got {}", cli.level);
    };
    let Some(event) = Event::from_tag(&cli.event, level) else {
        bail!("unknown event '{}'", cli.event);
    };

    let planner = Planner::with_assumptions(assumptions).with_options(TimelineOptions {
        optimize_deferral: !cli.no_deferral_search,
    });
    let scenario = Scenario::new(event, household).with_policy(cli.policy.into());

    println!("Pension Timeline v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Event:  {}", event.tag());
    println!("Policy: {:?}", scenario.policy);
    println!();

    let timeline = planner.build_timeline(&scenario);
    println!("{:>5} {:>5} {:>14}  {}", "From", "To", "Annual (yen)", "Phase");
    println!("{}", "-".repeat(72));
    for segment in &timeline.segments {
        println!(
            "{:>5} {:>5} {:>14.0}  {}",
            segment.start_age, segment.end_age, segment.annual_amount, segment.label
        );
        for (kind, amount) in segment.components.entries() {
            println!("{:>27.0}  - {}", amount, kind.as_str());
        }
    }
    if let Some(deferral) = &timeline.deferral {
        println!(
            "\nDeferral: {:?} (baseline {:.0}, continuing {:.0})",
            deferral.pattern, deferral.baseline, deferral.continuing
        );
    }
    println!("Lifetime total: {:.0}", timeline.lifetime_total());

    let inputs = match (&cli.coverage, cli.spending) {
        (Some(path), _) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            Some(serde_json::from_str::<CoverageInputs>(&json).with_context(|| format!("parsing {:?}", path))?)
        }
        (None, Some(spending)) => Some(CoverageInputs {
            prior_annual_spending: spending,
            savings: cli.savings,
            funeral_cost: cli.funeral_cost,
            sick_pay_monthly: cli.sick_pay_monthly,
            ..Default::default()
        }),
        (None, None) => None,
    };
    let Some(inputs) = inputs else {
        return Ok(());
    };

    let gap = planner.compute_coverage_gap(&scenario, &inputs);
    println!("\nCoverage gap:");
    println!(
        "{:>4} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Age", "Income", "Target", "Shortfall", "Surplus", "Deducted"
    );
    println!("{}", "-".repeat(70));
    for row in &gap.rows {
        println!(
            "{:>4} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>12.0}",
            row.age,
            row.total_income,
            row.target_spending,
            row.shortfall,
            row.surplus,
            row.sick_pay_deduction + row.savings_deduction
        );
    }
    println!("\nTotal shortfall: {:>14.0}", gap.total_shortfall);
    println!("Sick pay:        {:>14.0}", gap.sick_pay_applied);
    println!("Savings:         {:>14.0}", gap.savings_applied);
    println!("Funeral cost:    {:>14.0}", gap.funeral_cost);
    println!("Net shortfall:   {:>14.0}", gap.net_shortfall);

    if let Some(path) = &cli.output {
        let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
        let mut writer = csv::Writer::from_writer(file);
        for row in &gap.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("\nWrote {} rows to {:?}", gap.rows.len(), path);
    }

    Ok(())
}
