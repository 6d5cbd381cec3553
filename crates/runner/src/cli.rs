//! Command-line options

use mmsim_engine::{RunMode, Scenario};

pub fn print_help() {
    eprintln!(
        r#"mmsim - Market-making strategy simulator

USAGE:
    mmsim [OPTIONS]

OPTIONS:
    --config <PATH>     Load a scenario from a JSON file
    --mode <MODE>       trial | batch | sweep (overrides the scenario)
    --trials <N>        Trials per parameter point (overrides the scenario)
    --seed <SEED>       Base seed (overrides the scenario)
    --sequential        Run trials on one thread
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Reference batch of 1000 trials
    mmsim

    # Single trial step log
    mmsim --mode trial --seed 7

    # Parameter sweep from a scenario file
    mmsim --config sweep.json --mode sweep --trials 200
"#
    );
}

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub config_path: Option<String>,
    pub mode: Option<RunMode>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub sequential: bool,
    pub help: bool,
}

impl Options {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Options::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => {
                    options.help = true;
                }
                "--config" | "-c" => {
                    options.config_path = Some(value(args, &mut i, "--config")?.to_string());
                }
                "--mode" | "-m" => {
                    let raw = value(args, &mut i, "--mode")?;
                    options.mode = Some(raw.parse::<RunMode>().map_err(|e| e.to_string())?);
                }
                "--trials" | "-n" => {
                    let raw = value(args, &mut i, "--trials")?;
                    options.trials = Some(
                        raw.parse::<usize>()
                            .map_err(|_| format!("--trials expects a count, got '{raw}'"))?,
                    );
                }
                "--seed" => {
                    let raw = value(args, &mut i, "--seed")?;
                    options.seed = Some(
                        raw.parse::<u64>()
                            .map_err(|_| format!("--seed expects an integer, got '{raw}'"))?,
                    );
                }
                "--sequential" => {
                    options.sequential = true;
                }
                arg => return Err(format!("Unknown argument: {arg}")),
            }
            i += 1;
        }

        Ok(options)
    }

    /// Apply command-line overrides to a loaded scenario
    pub fn apply(&self, scenario: &mut Scenario) {
        if let Some(mode) = self.mode {
            scenario.mode = mode;
        }
        if let Some(trials) = self.trials {
            scenario.batch.trials = trials;
        }
        if let Some(seed) = self.seed {
            scenario.trial.seed = seed;
        }
        if self.sequential {
            scenario.batch.parallel = false;
        }
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires an argument"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Options::parse(&[]).unwrap(), Options::default());
    }

    #[test]
    fn test_all_flags() {
        let options = Options::parse(&args(&[
            "--config",
            "run.json",
            "--mode",
            "sweep",
            "--trials",
            "250",
            "--seed",
            "9",
            "--sequential",
        ]))
        .unwrap();

        assert_eq!(options.config_path.as_deref(), Some("run.json"));
        assert_eq!(options.mode, Some(RunMode::Sweep));
        assert_eq!(options.trials, Some(250));
        assert_eq!(options.seed, Some(9));
        assert!(options.sequential);
    }

    #[test]
    fn test_errors() {
        assert!(Options::parse(&args(&["--config"])).is_err());
        assert!(Options::parse(&args(&["--trials", "many"])).is_err());
        assert!(Options::parse(&args(&["--mode", "forever"])).is_err());
        assert!(Options::parse(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_overrides() {
        let options = Options::parse(&args(&["--trials", "10", "--sequential"])).unwrap();
        let mut scenario = Scenario::default();
        options.apply(&mut scenario);

        assert_eq!(scenario.batch.trials, 10);
        assert!(!scenario.batch.parallel);
        assert_eq!(scenario.mode, RunMode::Batch);
    }
}
