//! Batch command - interpret multiple recognized-text files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use struk_core::{ExpenseRecord, ReceiptFieldExtractor, ReceiptParser};

use super::extract::{expense_csv_header, expense_csv_row, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output file for the aggregate (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Aggregate output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: BatchFormat,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BatchFormat {
    /// One CSV row per expense record
    Csv,
    /// JSON array of expense records
    Json,
}

struct FileResult {
    path: PathBuf,
    record: Option<ExpenseRecord>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = ReceiptFieldExtractor::new().with_config(config.extraction.clone());
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_file(&path, &extractor) {
            Ok(record) => {
                results.push(FileResult {
                    path,
                    record: Some(record),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                    });
                } else {
                    anyhow::bail!("Failed to process {}: {}", path.display(), error_msg);
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<&ExpenseRecord> = results.iter().filter_map(|r| r.record.as_ref()).collect();
    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();

    let aggregate = match args.format {
        BatchFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(expense_csv_header())?;
            for record in &successful {
                wtr.write_record(expense_csv_row(record))?;
            }
            String::from_utf8(wtr.into_inner()?)?
        }
        BatchFormat::Json => serde_json::to_string_pretty(&successful)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &aggregate)?;
        debug!("Wrote aggregate to {}", output_path.display());
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", aggregate);
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_file(
    path: &PathBuf,
    extractor: &ReceiptFieldExtractor,
) -> anyhow::Result<ExpenseRecord> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("File is empty");
    }
    let result = extractor.parse(&text);
    Ok(ExpenseRecord::from_receipt(&result.receipt, text))
}
