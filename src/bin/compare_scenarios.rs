//! Run every applicable event under both policy modes for one profile
//!
//! Outputs one JSON document with each timeline and its coverage gap, for
//! side-by-side comparison of current and revised rules.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use pension_timeline::household::{load_household, loader::DEFAULT_PROFILE_PATH};
use pension_timeline::{
    CoverageInputs, CoverageResult, DisabilityLevel, Event, Planner, PolicyMode, Scenario, Timeline,
};

#[derive(Parser, Debug)]
#[command(name = "compare_scenarios", about = "Compare all events under current and revised rules")]
struct Cli {
    #[arg(long, default_value = DEFAULT_PROFILE_PATH)]
    profile: PathBuf,

    /// Coverage inputs as JSON; defaults apply when omitted
    #[arg(long)]
    coverage: Option<PathBuf>,

    /// Disability grade used for disability events (1-3)
    #[arg(long, default_value_t = 2)]
    level: u8,

    /// Output file (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Comparison {
    event: String,
    policy: PolicyMode,
    lifetime_benefits: f64,
    net_shortfall: f64,
    timeline: Timeline,
    coverage: CoverageResult,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let planner = Planner::from_csv().context("loading rate tables")?;
    let household = load_household(&cli.profile, &planner.assumptions().rules)
        .with_context(|| format!("loading profile {:?}", cli.profile))?;
    let inputs = match &cli.coverage {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            serde_json::from_str(&json).with_context(|| format!("parsing {:?}", path))?
        }
        None => CoverageInputs::default(),
    };
    let level = DisabilityLevel::from_grade(cli.level)
        .with_context(|| format!("disability level must be 1, 2 or 3, got {}", cli.level))?;

    let scenarios: Vec<Scenario> = [PolicyMode::Current, PolicyMode::Revised]
        .into_iter()
        .flat_map(|policy| {
            Event::applicable_to(&household, level)
                .into_iter()
                .map(move |event| (event, policy))
        })
        .map(|(event, policy)| Scenario::new(event, household.clone()).with_policy(policy))
        .collect();

    let comparisons: Vec<Comparison> = scenarios
        .par_iter()
        .map(|scenario| {
            let timeline = planner.build_timeline(scenario);
            let coverage = planner.compute_coverage_gap(scenario, &inputs);
            Comparison {
                event: scenario.event.tag().to_string(),
                policy: scenario.policy,
                lifetime_benefits: timeline.lifetime_total(),
                net_shortfall: coverage.net_shortfall,
                timeline,
                coverage,
            }
        })
        .collect();

    eprintln!("Evaluated {} scenarios in {:?}", comparisons.len(), start.elapsed());
    for c in &comparisons {
        eprintln!(
            "  {:<24} {:<8} benefits {:>14.0}  net shortfall {:>14.0}",
            c.event,
            format!("{:?}", c.policy),
            c.lifetime_benefits,
            c.net_shortfall
        );
    }

    let json = serde_json::to_string_pretty(&comparisons)?;
    match &cli.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path).with_context(|| format!("creating {:?}", path))?);
            writer.write_all(json.as_bytes())?;
            writer.flush()?;
            eprintln!("Wrote {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
