//! Georgian income tax helper CLI
//!
//! Looks up official rates, converts amounts and totals incomes in lari:
//! - Load configuration from `.env` and the environment
//! - Build the feed client, cached unless disabled
//! - Run the requested command and print the result as JSON

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use currency_converter::Converter;
use ge_tax_service::{ConvertRequest, Income, IncomeBatch, IncomeService};
use ge_tax_types::domain::calendar::parse_date;
use ge_tax_types::{CancellationToken, RatesClient, RatesQuery, currencies};
use nbg_client::{CachedClient, NbgClient};

#[derive(Parser)]
#[command(name = "ge-tax")]
#[command(author, version, about = "Official NBG rates and income conversion", long_about = None)]
struct Cli {
    /// Rates feed endpoint (defaults to NBG_API_URL or the official feed)
    #[arg(long)]
    api_url: Option<String>,

    /// Seconds to keep fetched rates, 0 keeps them forever (defaults to NBG_CACHE_TTL_SECS)
    #[arg(long)]
    cache_ttl_secs: Option<u64>,

    /// Query the feed directly on every lookup
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show official rates for a day
    Rates {
        /// Day in YYYY-MM-DD form, today when omitted
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Currency code, repeatable; every published currency when omitted
        #[arg(long = "currency")]
        codes: Vec<String>,
    },
    /// Convert an amount between currencies
    Convert {
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        from: String,
        #[arg(long, default_value = currencies::GEL)]
        to: String,
        /// Day in YYYY-MM-DD form, today when omitted
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Convert incomes to lari and total them
    Incomes {
        /// Income as DATE:AMOUNT:CODE, e.g. 2024-01-05:2678.27:EUR
        #[arg(long = "income", required = true)]
        incomes: Vec<Income>,
        /// Income already received this year, in lari
        #[arg(long)]
        year_income: Option<String>,
    },
    /// List supported currency codes
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Results go to stdout, logs to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(secs) = cli.cache_ttl_secs {
        config.cache_ttl = Duration::from_secs(secs);
    }
    config.cache_disabled |= cli.no_cache;

    let client = build_client(&config);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Commands::Rates { date, codes } => {
            let mut query = RatesQuery::new().with_currencies(codes);
            if let Some(date) = date {
                query = query.with_date(date);
            }
            let rates = client.rates(&cancel, query).await?;
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }

        Commands::Convert {
            amount,
            from,
            to,
            date,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let service = IncomeService::new(Converter::new(client));
            let response = service
                .convert(
                    &cancel,
                    ConvertRequest {
                        year: date.year().to_string(),
                        month: date.month().to_string(),
                        day: date.day().to_string(),
                        currency_from: from,
                        currency_to: to,
                        amount,
                    },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Incomes {
            incomes,
            year_income,
        } => {
            let batch = IncomeBatch {
                incomes,
                year_income,
            };
            let service = IncomeService::new(Converter::new(client));
            let summary = service.convert_incomes(&cancel, batch).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Currencies => {
            let listed: Vec<_> = currencies::all()
                .iter()
                .map(|code| {
                    serde_json::json!({
                        "code": code,
                        "name": currencies::display_name(code),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
    }

    Ok(())
}

fn build_client(config: &config::Config) -> Arc<dyn RatesClient> {
    let feed = NbgClient::with_base_url(config.api_url.as_str());

    if config.cache_disabled {
        tracing::debug!(url = %feed.base_url(), "Rates cache disabled");
        Arc::new(feed)
    } else {
        tracing::debug!(url = %feed.base_url(), ttl = ?config.cache_ttl, "Rates cache enabled");
        Arc::new(CachedClient::new(feed, config.cache_ttl))
    }
}
