//! Extract command - interpret a single recognized-text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use struk_core::{
    ExpenseRecord, ExtractionResult, ReceiptFieldExtractor, ReceiptParser, StrukConfig,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input recognized-text file, or "-" for stdin
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Full extraction result as JSON
    Json,
    /// Expense record as a single-row CSV
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let text = if args.input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = PathBuf::from(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        info!("Reading recognized text from {}", path.display());
        fs::read_to_string(&path)?
    };

    let extractor = ReceiptFieldExtractor::new().with_config(config.extraction.clone());
    let result = extractor.parse(&text);

    let output = format_result(&result, &text, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if args.show_confidence {
        println!();
        let receipt = &result.receipt;
        println!(
            "{} Merchant confidence: {:.1}%",
            style("ℹ").blue(),
            receipt.merchant.confidence * 100.0
        );
        println!(
            "{} Date confidence: {:.1}%",
            style("ℹ").blue(),
            receipt.date.confidence * 100.0
        );
        if let Some(total) = &receipt.total {
            println!(
                "{} Total confidence: {:.1}%",
                style("ℹ").blue(),
                total.confidence * 100.0
            );
        }
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total command time: {:?}", start.elapsed());

    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StrukConfig> {
    if let Some(path) = config_path {
        Ok(StrukConfig::from_file(std::path::Path::new(path))?)
    } else {
        Ok(StrukConfig::default())
    }
}

pub fn format_result(
    result: &ExtractionResult,
    raw_text: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.receipt)?),
        OutputFormat::Csv => {
            let record = ExpenseRecord::from_receipt(&result.receipt, raw_text);
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(expense_csv_header())?;
            wtr.write_record(expense_csv_row(&record))?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_text(result)),
    }
}

pub fn expense_csv_header() -> [&'static str; 7] {
    [
        "merchant", "date", "time", "amount", "currency", "tax", "category",
    ]
}

pub fn expense_csv_row(record: &ExpenseRecord) -> [String; 7] {
    [
        record.merchant.clone(),
        record.date.map(|d| d.to_string()).unwrap_or_default(),
        record.time.clone().unwrap_or_default(),
        record.amount.to_string(),
        record.currency.code().to_string(),
        record.tax.to_string(),
        record
            .category
            .map(|c| c.to_string())
            .unwrap_or_default(),
    ]
}

fn format_text(result: &ExtractionResult) -> String {
    let receipt = &result.receipt;
    let mut output = String::new();

    output.push_str(&format!(
        "Merchant: {}\n",
        receipt.merchant.value.as_deref().unwrap_or("(unknown)")
    ));
    if let Some(date) = &receipt.date.value {
        match date.parsed {
            Some(parsed) => output.push_str(&format!("Date: {}\n", parsed)),
            None => output.push_str(&format!("Date: {} (unparsed)\n", date.raw)),
        }
    }
    if let Some(time) = &receipt.time.value {
        output.push_str(&format!("Time: {}\n", time));
    }
    output.push('\n');

    if !receipt.items.is_empty() {
        output.push_str("Items:\n");
        for item in &receipt.items {
            output.push_str(&format!("  {}  {}\n", item.name, item.amount));
        }
        output.push('\n');
    }

    if let Some(tax) = &receipt.tax {
        output.push_str(&format!("Tax: {} {}\n", tax.value, tax.currency.code()));
    }

    match &receipt.total {
        Some(total) => {
            output.push_str(&format!(
                "Total: {} {}\n",
                total.value(),
                total.currency().code()
            ));
        }
        None => output.push_str("Total: (not detected)\n"),
    }

    output
}
