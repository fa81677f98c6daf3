//! CLI command handling

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::logging;
use crate::services::{category_icon, classify_trend, Aggregator, HttpPricingApi, JoinPolicy};
use crate::types::{PriceHistoryEntry, PricedProduct, ProductId};

/// Predicted product prices and price trends
#[derive(Parser)]
#[command(name = "pricedash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    overrides: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags that override environment configuration
#[derive(Args, Debug, Default)]
struct ConfigArgs {
    /// Pricing API base URL
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Number of products to load (ids 1..=N)
    #[arg(long, global = true, value_name = "N")]
    products: Option<u32>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Keep products that loaded when others fail
    #[arg(long, global = true)]
    partial: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Print predicted prices for all products
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one product's price history
    History {
        /// Product id
        id: ProductId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        dotenv::dotenv().ok();
        let config = self.overrides.apply(Config::from_env()?)?;

        match self.command {
            None | Some(Commands::Tui) => {
                init_tui_logging();
                crate::tui::run(&config)
            }
            Some(Commands::List { json }) => {
                logging::init_stderr();
                run_list(&config, json)
            }
            Some(Commands::History { id, json }) => {
                logging::init_stderr();
                run_history(&config, id, json)
            }
        }
    }
}

impl ConfigArgs {
    fn apply(&self, mut config: Config) -> crate::types::Result<Config> {
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url)?;
        }
        if let Some(count) = self.products {
            config = config.with_product_count(count)?;
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout_secs(secs)?;
        }
        if self.partial {
            config = config.with_join_policy(JoinPolicy::PartialSuccess);
        }
        Ok(config)
    }
}

fn init_tui_logging() {
    let result = logging::default_log_path().and_then(|path| logging::init_file(&path));
    if let Err(e) = result {
        eprintln!("[pricedash] Warning: logging disabled: {}", e);
    }
}

fn aggregator(config: &Config) -> anyhow::Result<Aggregator<HttpPricingApi>> {
    let api = HttpPricingApi::new(config)?;
    Ok(Aggregator::new(
        api,
        config.product_count,
        config.join_policy,
    ))
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Output all priced products
fn run_list(config: &Config, json: bool) -> anyhow::Result<()> {
    let aggregator = aggregator(config)?;
    let products = runtime()?.block_on(aggregator.get_all_priced_products());

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
    } else {
        print!("{}", format_products(&products));
    }
    Ok(())
}

/// Output one product's history
fn run_history(config: &Config, id: ProductId, json: bool) -> anyhow::Result<()> {
    let aggregator = aggregator(config)?;
    let history = runtime()?.block_on(aggregator.get_price_history(id));

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        print!("{}", format_history(&history));
    }
    Ok(())
}

/// Plain-text product table
fn format_products(products: &[PricedProduct]) -> String {
    if products.is_empty() {
        return "No products\n".to_string();
    }

    let mut out = format!(
        "{:<4} {:<28} {:<16} {:>12} {:>10}\n",
        "ID", "Name", "Category", "Predicted", "Previous"
    );
    for product in products {
        let arrow = classify_trend(product.prev_price, product.price)
            .arrow()
            .unwrap_or(" ");
        let category = match category_icon(&product.category) {
            Some(icon) => format!("{} {}", icon.glyph(), product.category),
            None => format!("  {}", product.category),
        };
        out.push_str(&format!(
            "{:<4} {:<28} {:<16} {:>10} {} {:>10}\n",
            product.id,
            product.name,
            category,
            product.price,
            arrow,
            product.prev_price
        ));
    }
    out
}

/// Plain-text history listing, in source order
fn format_history(history: &[PriceHistoryEntry]) -> String {
    if history.is_empty() {
        return "No price history\n".to_string();
    }

    history
        .iter()
        .map(|entry| {
            format!(
                "{:<12} {:>10}\n",
                entry.date,
                crate::types::format_fixed_2(entry.price)
            )
        })
        .collect()
}
