//! sim-runner: headless Monte Carlo runner for the electoral-college simulator.
//!
//! Usage:
//!   sim-runner --seed 12345 --replications 1000 --variant all
//!   sim-runner --config run.json --ballot data/ballot/states_2016.json --json
//!   sim-runner --variant heavy_tailed --parallel

use anyhow::Result;
use electoral_core::{
    ballot::BallotTable,
    config::SimConfig,
    simulator::ErrorModel,
    study::{run_study, run_variant, VariantReport},
};
use std::env;

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    ballot:         &'a str,
    states:         usize,
    total_electors: u32,
    threshold:      u32,
    variants:       Vec<JsonVariant<'a>>,
}

#[derive(serde::Serialize)]
struct JsonVariant<'a> {
    variant:         &'a str,
    win_probability: f64,
    wins:            u64,
    replications:    u64,
    summary:         &'a electoral_core::summary::DistributionSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed)?;
    config.replications = parse_arg(&args, "--replications", config.replications)?;
    config.parallel |= args.iter().any(|a| a == "--parallel");
    if let Some(path) = flag_value(&args, "--ballot") {
        config.ballot_path = path.to_string();
    }
    config.validate()?;
    log::debug!("Effective config: {config:?}");

    let json = args.iter().any(|a| a == "--json");
    let variant = flag_value(&args, "--variant").unwrap_or("all");

    let states = BallotTable::load(&config.ballot_path)?;

    let reports = if variant == "all" {
        run_study(&config, &states)?
    } else {
        vec![run_variant(&config, &states, ErrorModel::parse(variant)?)?]
    };

    if json {
        print_json(&config, &states, &reports)?;
    } else {
        print_summary(&config, &states, &reports);
    }
    Ok(())
}

fn print_summary(config: &SimConfig, states: &BallotTable, reports: &[VariantReport]) {
    println!("Electoral-college Monte Carlo - sim-runner");
    println!("  ballot:       {}", config.ballot_path);
    println!("  states:       {}", states.len());
    println!("  electors:     {}", states.total_electors());
    println!("  threshold:    {}", states.majority_threshold());
    println!("  baseline:     {} electors", states.baseline_electors());
    println!("  seed:         {}", config.seed);
    println!("  replications: {}", config.replications);
    println!();

    println!("=== WIN PROBABILITY BY ERROR MODEL ===");
    for v in reports {
        let s = &v.summary;
        println!(
            "  {:<13} | P(win): {:.3} | mean: {:.1} | sd: {:.1} | 90% band: [{:.0}, {:.0}]",
            v.model.name(),
            v.report.win_probability,
            s.mean,
            s.std_dev,
            s.p05,
            s.p95
        );
        if let Some(p99) = s.national_error_abs_p99 {
            println!("  {:<13} | 99th pct |national error|: {p99:.2} pts", "");
        }
    }
}

fn print_json(config: &SimConfig, states: &BallotTable, reports: &[VariantReport]) -> Result<()> {
    let out = JsonOutput {
        ballot: &config.ballot_path,
        states: states.len(),
        total_electors: states.total_electors(),
        threshold: states.majority_threshold(),
        variants: reports
            .iter()
            .map(|v| JsonVariant {
                variant: v.model.name(),
                win_probability: v.report.win_probability,
                wins: v.report.wins,
                replications: v.report.replications,
                summary: &v.summary,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Parse a flag's value, or return `default` when the flag is absent.
/// A value that does not parse is an error, never a silent default.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value '{raw}' for {flag}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn absent_flag_uses_default() {
        let a = args(&["sim-runner", "--variant", "national"]);
        assert_eq!(parse_arg(&a, "--replications", 1000u64).unwrap(), 1000);
    }

    #[test]
    fn present_flag_is_parsed() {
        let a = args(&["sim-runner", "--seed", "7", "--replications", "250"]);
        assert_eq!(parse_arg(&a, "--seed", 42u64).unwrap(), 7);
        assert_eq!(parse_arg(&a, "--replications", 1000u64).unwrap(), 250);
    }

    #[test]
    fn negative_replications_rejected() {
        let a = args(&["sim-runner", "--replications", "-5"]);
        let err = parse_arg(&a, "--replications", 1000u64).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--replications") && msg.contains("-5"), "got: {msg}");
    }

    #[test]
    fn non_numeric_seed_rejected() {
        let a = args(&["sim-runner", "--seed", "abc"]);
        assert!(parse_arg(&a, "--seed", 42u64).is_err());
    }
}
