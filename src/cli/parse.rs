//! Receipt parsing command
//!
//! Parses receipt text without starting a session, to check what the
//! parser makes of it or to export it.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::format_receipt_table;
use crate::error::{SplitterError, SplitterResult};
use crate::export::{export_items_csv, export_receipt_json, export_receipt_yaml};
use crate::models::Receipt;
use crate::parser::{parse_receipt, ReceiptShape};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text table
    #[default]
    Table,
    /// JSON document with totals
    Json,
    /// YAML document with totals
    Yaml,
    /// One CSV row per item
    Csv,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Receipt text file; reads standard input when omitted
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn handle_parse_command(settings: &Settings, args: ParseArgs) -> SplitterResult<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            SplitterError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let receipt = parse_receipt(&text, &settings.parser);
    if receipt.is_empty() {
        return Err(SplitterError::Validation(
            "No receipt items found in the input".into(),
        ));
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SplitterError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_receipt(&receipt, &text, settings, &args, &mut writer)?;
            writer.flush()?;
            println!(
                "{} items written to: {}",
                receipt.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            write_receipt(&receipt, &text, settings, &args, &mut stdout.lock())?;
        }
    }

    Ok(())
}

fn write_receipt<W: Write>(
    receipt: &Receipt,
    text: &str,
    settings: &Settings,
    args: &ParseArgs,
    writer: &mut W,
) -> SplitterResult<()> {
    let policy = settings.settlement.discount_policy;
    match args.format {
        OutputFormat::Table => {
            let shape = match ReceiptShape::detect(text.trim()) {
                ReceiptShape::SingleLine => "single-line",
                ReceiptShape::MultiLine => "multi-line",
            };
            write!(writer, "{}", format_receipt_table(receipt, &settings.people))?;
            writeln!(
                writer,
                "\n{} items read from a {} receipt",
                receipt.len(),
                shape
            )?;
            Ok(())
        }
        OutputFormat::Json => export_receipt_json(receipt, policy, writer, args.pretty),
        OutputFormat::Yaml => export_receipt_yaml(receipt, policy, writer),
        OutputFormat::Csv => export_items_csv(receipt, &settings.people, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(file: PathBuf, format: OutputFormat, output: Option<PathBuf>) -> ParseArgs {
        ParseArgs {
            file: Some(file),
            format,
            output,
            pretty: false,
        }
    }

    #[test]
    fn test_parse_to_csv_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("receipt.txt");
        let output = temp_dir.path().join("receipt.csv");
        std::fs::write(&input, "Bread\nMilk\n2.00\n1.40\n").unwrap();

        handle_parse_command(
            &Settings::default(),
            args(input, OutputFormat::Csv, Some(output.clone())),
        )
        .unwrap();

        let csv = std::fs::read_to_string(output).unwrap();
        assert_eq!(csv, "Index,Name,Price,Owner\n1,Bread,2.00,\n2,Milk,1.40,\n");
    }

    #[test]
    fn test_unreadable_receipt_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("receipt.txt");
        std::fs::write(&input, "hello there").unwrap();

        let err = handle_parse_command(&Settings::default(), args(input, OutputFormat::Table, None))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = handle_parse_command(
            &Settings::default(),
            args(temp_dir.path().join("nope.txt"), OutputFormat::Table, None),
        )
        .unwrap_err();
        assert!(matches!(err, SplitterError::Io(_)));
    }
}
