use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use ergative_detector::CaseLabel;

pub const DEFAULT_LOG_FILE: &str = "detector.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Truncated at start-up
    File(PathBuf),
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Evaluate {
        dataset: PathBuf,
        parses: PathBuf,
        /// Score every row against this label instead of the dataset column
        gold: Option<CaseLabel>,
    },
    Classify {
        parses: PathBuf,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub log_target: LogTarget,
    pub progress: bool,
}

/// Where `evaluate` looks for parses when `--parses` is not given.
pub fn default_parses_path(dataset: &Path) -> PathBuf {
    dataset.with_extension("conllu")
}

impl Config {
    /// Build a config from the command-line arguments, without the program name.
    pub fn from_args<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(command) = args.next() else {
            return Ok(Self::help());
        };

        let mut positional = Vec::new();
        let mut parses = None;
        let mut gold = None;
        let mut log_target = LogTarget::File(PathBuf::from(DEFAULT_LOG_FILE));
        let mut progress = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--parses" => {
                    let value = args.next().ok_or_else(|| anyhow!("--parses needs a path"))?;
                    parses = Some(PathBuf::from(value));
                }
                "--gold" => {
                    let value = args.next().ok_or_else(|| anyhow!("--gold needs a label"))?;
                    let label = value
                        .parse::<CaseLabel>()
                        .context("Failed to parse --gold")?;
                    gold = Some(label);
                }
                "--log-file" => {
                    let value = args.next().ok_or_else(|| anyhow!("--log-file needs a path"))?;
                    log_target = LogTarget::File(PathBuf::from(value));
                }
                "--log-stderr" => log_target = LogTarget::Stderr,
                "--no-progress" => progress = false,
                "-h" | "--help" => return Ok(Self::help()),
                flag if flag.starts_with("--") => return Err(anyhow!("Unknown option '{flag}'")),
                _ => positional.push(arg),
            }
        }

        let command = match command.as_str() {
            "evaluate" => {
                let [dataset] = <[String; 1]>::try_from(positional).map_err(|_| {
                    anyhow!("'evaluate' takes exactly one dataset file")
                })?;
                let dataset = PathBuf::from(dataset);
                let parses = parses.unwrap_or_else(|| default_parses_path(&dataset));
                Command::Evaluate {
                    dataset,
                    parses,
                    gold,
                }
            }
            "classify" => {
                if parses.is_some() || gold.is_some() {
                    return Err(anyhow!("'classify' does not accept --parses or --gold"));
                }
                let [parses] = <[String; 1]>::try_from(positional)
                    .map_err(|_| anyhow!("'classify' takes exactly one parses file"))?;
                Command::Classify {
                    parses: PathBuf::from(parses),
                }
            }
            "help" | "-h" | "--help" => Command::Help,
            other => return Err(anyhow!("Unknown command '{other}'")),
        };

        Ok(Self {
            command,
            log_target,
            progress,
        })
    }

    fn help() -> Self {
        Self {
            command: Command::Help,
            log_target: LogTarget::Stderr,
            progress: false,
        }
    }
}

pub fn print_usage() {
    eprintln!("Usage: detect-case <command> [args...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  evaluate <dataset.csv>   Classify every dataset row and score against the gold column");
    eprintln!("  classify <parses>        Print a label for every sentence in a parses file");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --parses <path>      Parses for the dataset (default: the dataset path with .conllu)");
    eprintln!("  --gold <label>       Score every row against VOL, NVOL or OTHER");
    eprintln!("  --log-file <path>    Write JSON log records to this file (default: {DEFAULT_LOG_FILE})");
    eprintln!("  --log-stderr         Write JSON log records to stderr instead");
    eprintln!("  --no-progress        Hide the progress bar");
    eprintln!();
    eprintln!("Parses are CoNLL-U (.conllu, .conll) or JSONL (.jsonl) produced by an Urdu");
    eprintln!("dependency parser. RUST_LOG sets the log level (default: info).");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  detect-case evaluate data/vol.csv");
    eprintln!("  detect-case evaluate data/nvol.csv --parses out/nvol.jsonl --gold NVOL");
    eprintln!("  detect-case classify out/sentences.conllu --log-stderr");
}
