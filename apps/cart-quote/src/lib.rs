//! # Cart Quote
//!
//! Prices a cart document under a display currency.
//!
//! ## Flow
//! ```text
//! cart.json ──► CartDocument ──► Cart (validated, merged lines)
//!                                   │
//! pricing.toml + env ──► PricingConfig ──► ExchangeRateContext
//!                                   │
//!                                   ▼
//!                             CartSummary ──► text / JSON
//! ```

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use storefront_config::PricingConfig;
use storefront_core::resolver::resolve_price_tag;
use storefront_core::{Cart, CartLineItem, CartSummary, Currency, ExchangeRateContext};
use tracing::{debug, info};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "cart-quote", about = "Price a storefront cart in a display currency")]
pub struct Args {
    /// Cart JSON file (`{ "currency"?: "PLN", "items": [...] }`).
    pub cart: PathBuf,

    /// Pricing config file (defaults to the platform config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Display currency, overriding the cart and the config.
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Exchange rate for the display currency, overriding the config.
    #[arg(long)]
    pub rate: Option<f64>,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Everything needed to print a quote.
#[derive(Debug, Clone)]
pub struct Quote {
    pub cart: Cart,
    pub context: ExchangeRateContext,
    pub summary: CartSummary,
}

/// Prices a cart document.
///
/// The display currency is, in order: `currency_override`, the document's
/// own `currency`, the config's display currency.
pub fn quote_cart(
    document: &str,
    config: &PricingConfig,
    currency_override: Option<Currency>,
    rate_override: Option<f64>,
) -> Result<Quote> {
    let value: Value = serde_json::from_str(document).context("cart is not valid JSON")?;

    let document_currency = match value.get("currency") {
        Some(Value::Null) | None => None,
        Some(raw) => Some(
            serde_json::from_value::<Currency>(raw.clone())
                .context("cart has an unsupported currency")?,
        ),
    };
    let currency = currency_override
        .or(document_currency)
        .unwrap_or_else(|| config.display_currency());

    let items: Vec<CartLineItem> = match value.get("items") {
        Some(items) => {
            serde_json::from_value(items.clone()).context("cart items are malformed")?
        }
        None => Vec::new(),
    };

    let mut cart = Cart::new(currency);
    for item in items {
        let product_id = item.product_id.clone();
        cart.add_item(item)
            .with_context(|| format!("cannot add line for product {}", product_id))?;
    }

    let context = match rate_override {
        Some(rate) => {
            storefront_core::validation::validate_exchange_rate("--rate", rate)?;
            ExchangeRateContext::new(currency, rate)
        }
        None => config.context_for(currency),
    };

    debug!(%currency, rate = context.rate(), lines = cart.item_count(), "Pricing cart");
    let summary = cart.totals(&context).summary();
    info!(total = summary.total_price, %currency, "Cart priced");

    Ok(Quote {
        cart,
        context,
        summary,
    })
}

/// Renders a quote as a plain-text table.
pub fn render_text(quote: &Quote) -> String {
    quote.to_string()
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cart quote ({} @ {})", self.summary.currency, self.context.rate())?;

        for (line, item) in self.summary.lines.iter().zip(&self.cart.items) {
            let tag = resolve_price_tag(item);
            write!(
                f,
                "  {:<16} {:<6} x{:>3}  {}",
                line.product_id,
                line.warehouse_id.as_deref().unwrap_or("-"),
                line.quantity,
                line.formatted_total
            )?;
            if tag.on_sale {
                write!(f, " (-{}%)", tag.discount_percentage)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Total: {}", self.summary.formatted_total)
    }
}

/// Runs the CLI and returns what should be printed.
pub fn run(args: &Args) -> Result<String> {
    let config = PricingConfig::load(args.config.clone()).context("cannot load pricing config")?;
    let document = std::fs::read_to_string(&args.cart)
        .with_context(|| format!("cannot read cart file {}", args.cart.display()))?;

    let quote = quote_cart(&document, &config, args.currency, args.rate)?;

    if args.json {
        Ok(serde_json::to_string_pretty(&quote.summary)?)
    } else {
        Ok(render_text(&quote))
    }
}
