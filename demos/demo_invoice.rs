//! Writes the built-in demo invoice to `invoice_demo.pdf`.
//!
//! Run with: `cargo run --example demo_invoice [output.pdf]`
//! Set `RUST_LOG=tcg_invoice=debug` to see the pipeline events.

use tcg_invoice::{demo_invoice, generate_invoice};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "invoice_demo.pdf".to_string());

    match generate_invoice(demo_invoice(), &output) {
        Ok(()) => println!("Invoice written to {output}"),
        Err(e) => {
            eprintln!("Failed to generate invoice: {e}");
            std::process::exit(1);
        }
    }
}
