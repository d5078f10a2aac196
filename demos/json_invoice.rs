//! Renders an invoice record read from a JSON file.
//!
//! Run with: `cargo run --example json_invoice -- invoice.json out.pdf [render-config.json]`

use std::fs;
use std::process;

use tcg_invoice::{InvoiceError, RenderConfig, generate_invoice_with};
use tracing_subscriber::EnvFilter;

fn run(input: &str, output: &str, config: Option<&str>) -> Result<(), InvoiceError> {
    let record: serde_json::Value = serde_json::from_str(&fs::read_to_string(input)?)?;
    let config = match config {
        Some(path) => RenderConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => RenderConfig::default(),
    };
    generate_invoice_with(record, output, &config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: json_invoice <invoice.json> <out.pdf> [render-config.json]");
        process::exit(2);
    }

    if let Err(e) = run(&args[0], &args[1], args.get(2).map(String::as_str)) {
        eprintln!("error: {e}");
        process::exit(1);
    }
    println!("Invoice written to {}", args[1]);
}
