//! # cart-quote
//!
//! ```bash
//! cart-quote cart.json --currency PLN --rate 4.5
//! RUST_LOG=debug cart-quote cart.json --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cart_quote::{run, Args};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let output = run(&args)?;
    print!("{}", output);
    if args.json {
        println!();
    }

    Ok(())
}
