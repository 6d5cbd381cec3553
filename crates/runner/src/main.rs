mod cli;

use anyhow::{Context, Result};
use cli::{Options, print_help};
use log::info;
use mmsim_engine::{RunMode, Scenario};
use serde_json::json;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match Options::parse(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_help();
            std::process::exit(1);
        }
    };
    if options.help {
        print_help();
        return Ok(());
    }

    let mut scenario = match &options.config_path {
        Some(path) => {
            info!("Loading scenario from: {}", path);
            Scenario::from_file(path)?
        }
        None => {
            info!("Using default scenario");
            Scenario::default()
        }
    };
    options.apply(&mut scenario);
    scenario.validate()?;

    let config = scenario.trial_config()?;
    info!("Scenario: {}", scenario.name);
    info!(
        "Models: {:?} / {:?} / {:?}",
        scenario.models.process, scenario.models.policy, scenario.models.fill
    );
    info!(
        "Grid: {} steps of {} (T = {}), S0 = {}, {}",
        config.steps,
        config.dt,
        config.horizon(),
        config.initial_price,
        config.parameters()
    );

    let result = match scenario.mode {
        RunMode::Trial => {
            let evaluator = scenario.batch_evaluator()?;
            let trial = evaluator
                .run_trial(0)
                .with_context(|| format!("trial with seed {} failed", config.seed))?;
            json!({ "metrics": trial.metrics(), "trial": trial })
        }
        RunMode::Batch => {
            let summary = scenario.batch_evaluator()?.run_configured()?;
            serde_json::to_value(summary)?
        }
        RunMode::Sweep => {
            let sweep = scenario.parameter_sweep()?;
            info!("Sweeping {} parameter points", sweep.len());
            let summaries = sweep.run_configured()?;
            serde_json::to_value(summaries)?
        }
    };

    let output = json!({
        "scenario": scenario.name,
        "mode": scenario.mode,
        "result": result,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

