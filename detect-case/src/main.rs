use std::path::Path;

use anyhow::Context;
use detect_case::config::{Command, Config, print_usage};
use detect_case::dataset::read_dataset;
use detect_case::evaluate::evaluate;
use detect_case::parses::ParsedCorpus;
use detect_case::{logging, report};
use ergative_detector::{CaseLabel, ErgativeDetector};
use indicatif::{ProgressBar, ProgressStyle};

fn main() -> anyhow::Result<()> {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            print_usage();
            return Err(e);
        }
    };

    match &config.command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Evaluate {
            dataset,
            parses,
            gold,
        } => {
            logging::init(&config.log_target)?;
            run_evaluate(dataset, parses, *gold, config.progress)
        }
        Command::Classify { parses } => {
            logging::init(&config.log_target)?;
            run_classify(parses, config.progress)
        }
    }
}

fn progress_bar(len: usize, enabled: bool) -> anyhow::Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sentences ({per_sec}, {eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn run_evaluate(
    dataset: &Path,
    parses: &Path,
    gold: Option<CaseLabel>,
    progress: bool,
) -> anyhow::Result<()> {
    let rows = read_dataset(dataset)?;
    let corpus = ParsedCorpus::load(parses)?;
    log::info!(
        "evaluating {} rows from {} against {}",
        rows.len(),
        dataset.display(),
        parses.display()
    );
    if rows.len() != corpus.len() {
        log::warn!(
            "dataset has {} rows but there are {} parses",
            rows.len(),
            corpus.len()
        );
    }

    let detector = ErgativeDetector::new();
    let pb = progress_bar(rows.len(), progress)?;
    let evaluation = evaluate(&detector, &rows, &corpus, gold, |prediction| {
        let line = report::prediction_line(
            prediction.index,
            prediction.pred,
            prediction.gold,
            &prediction.sentence,
            &prediction.id,
        );
        pb.suspend(|| println!("{line}"));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    for line in report::label_breakdown(&evaluation.f1) {
        log::info!("{line}");
    }
    println!("{}", report::summary(&evaluation.accuracy, &evaluation.f1));
    Ok(())
}

fn run_classify(parses: &Path, progress: bool) -> anyhow::Result<()> {
    let corpus = ParsedCorpus::load(parses)?;
    let detector = ErgativeDetector::new();
    let pb = progress_bar(corpus.len(), progress)?;

    for (index, sentence) in corpus.sentences().iter().enumerate() {
        let pred = detector
            .detect_case(sentence)
            .with_context(|| format!("Failed to classify sentence {index}: {}", sentence.text))?;
        let line = report::classification_line(index, pred, &sentence.text);
        pb.suspend(|| println!("{line}"));
        pb.inc(1);
    }
    pb.finish_and_clear();

    log::info!("classified {} sentences", corpus.len());
    Ok(())
}
