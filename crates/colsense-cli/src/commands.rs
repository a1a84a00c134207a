use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use colsense_core::{Analysis, AnalyzeOptions, Engine, EngineOptions, TypeInference};
use colsense_ingest::{InputData, load_configuration, load_input, write_configuration};

use crate::cli::{AnalyzeArgs, ExportArgs, OutputFormatArg};
use crate::summary::{ResultFormat, print_export_summary, render};

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let span = info_span!("command", name = "analyze", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let analysis = analyze_file(args)?;
    let format = match args.format {
        OutputFormatArg::Table => ResultFormat::Table,
        OutputFormatArg::Json => ResultFormat::Json,
        OutputFormatArg::Csv => ResultFormat::Csv,
    };
    match &args.output {
        Some(path) => {
            let rendered = render(&analysis, format, false)?;
            fs::write(path, rendered)
                .with_context(|| format!("write results to {}", path.display()))?;
            info!(path = %path.display(), columns = analysis.len(), "results written");
        }
        None => {
            let rendered = render(&analysis, format, io::stdout().is_terminal())?;
            print!("{rendered}");
        }
    }
    debug!(duration_ms = start.elapsed().as_millis(), "analyze finished");
    Ok(())
}

/// Loads the input and configuration named by `args` and classifies every
/// column.
pub fn analyze_file(args: &AnalyzeArgs) -> Result<Analysis> {
    if !(0.0..=1.0).contains(&args.min_confidence) {
        bail!("--min-confidence must be between 0 and 1, got {}", args.min_confidence);
    }
    if !(0.0..=1.0).contains(&args.numeric_threshold) {
        bail!("--numeric-threshold must be between 0 and 1, got {}", args.numeric_threshold);
    }

    let mut engine = Engine::new()
        .with_options(EngineOptions::default().with_min_confidence(args.min_confidence))
        .with_type_inference(TypeInference::default().with_numeric_threshold(args.numeric_threshold));
    if let Some(path) = &args.config {
        apply_configuration(&mut engine, path, args.config_only)?;
    }

    let active = (!args.classifiers.is_empty()).then_some(args.classifiers.as_slice());
    if let Some(names) = active {
        let registered = engine.classifier_names();
        for name in names {
            if !registered.iter().any(|known| known.eq_ignore_ascii_case(name)) {
                bail!(
                    "unknown classifier {name:?} (registered: {})",
                    registered.join(", ")
                );
            }
        }
    }

    let input = load_input(&args.input)
        .with_context(|| format!("load input {}", args.input.display()))?;
    info!(rows = input.len(), "input loaded");

    let analysis = match input {
        InputData::Frame(df) => engine.analyze_frame(&df, active),
        InputData::Json(dataset) => {
            let mut options = AnalyzeOptions::new()
                .with_contains_headers(args.contains_headers)
                .with_active_classifiers(args.classifiers.iter());
            if !args.headers.is_empty() {
                options = options.with_headers(args.headers.iter());
            }
            engine.analyze(&dataset, &options)
        }
    };
    Ok(analysis)
}

fn apply_configuration(engine: &mut Engine, path: &Path, config_only: bool) -> Result<()> {
    let mut config = load_configuration(path)
        .with_context(|| format!("load configuration {}", path.display()))?;
    if config_only {
        config.merge_with_default = false;
    }
    engine
        .load_configuration(&config)
        .with_context(|| format!("apply configuration {}", path.display()))?;
    info!(
        path = %path.display(),
        merged = config.merge_with_default,
        classifiers = engine.classifier_names().len(),
        "configuration applied"
    );
    Ok(())
}

pub fn run_export_config(args: &ExportArgs) -> Result<()> {
    let engine = Engine::new();
    let config = engine.export_configuration();
    let format = write_configuration(&config, &args.file)
        .with_context(|| format!("export configuration to {}", args.file.display()))?;
    print_export_summary(&config, &args.file, format.as_str());
    Ok(())
}
