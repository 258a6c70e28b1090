//! invoice-scan CLI
//!
//! Recognizes an invoice from pre-extracted signals and prints the
//! structured, categorized record as JSON. The image path is library-only:
//! it needs injected QR/OCR collaborators that are not part of this crate.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use invoice_scan::{OcrText, RecognitionInput, Recognizer};

/// Taiwanese e-invoice recognition pipeline
#[derive(Parser, Debug)]
#[command(name = "invoice-scan")]
#[command(about = "Recognize a retail e-invoice from QR payloads or OCR text")]
struct Args {
    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse raw decoded QR payload strings (header + optional items payload)
    Qr {
        /// Decoded QR payload strings, in any order
        payloads: Vec<String>,
    },
    /// Recover fields from OCR text read from a file
    Text {
        /// File holding the general-profile OCR output
        file: PathBuf,
        /// Optional file holding the digit-profile OCR output
        #[arg(long)]
        digits: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let input = match args.command {
        Command::Qr { payloads } => {
            info!("Recognizing from {} QR payload(s)", payloads.len());
            RecognitionInput::QrPayloads(payloads)
        }
        Command::Text { file, digits } => {
            let general = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read OCR text from {file:?}"))?;
            let text = match digits {
                Some(path) => {
                    let digits = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read OCR text from {path:?}"))?;
                    OcrText::dual(general, digits)
                }
                None => OcrText::combined(general),
            };
            RecognitionInput::OcrText(text)
        }
    };

    let invoice = Recognizer::new().recognize(input)?;
    println!("{}", serde_json::to_string_pretty(&invoice)?);

    Ok(())
}
