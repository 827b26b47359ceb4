//! Scopus impact report - Entry Point
//!
//! Prints the citation impact table for one or more Scopus author IDs.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scopus_impact::models::OutputFormat;
use scopus_impact::{ImpactError, ScopusClient, config::Config, formatters, impact};

#[derive(Parser, Debug)]
#[command(name = "scopus-impact")]
#[command(about = "Citation impact of Scopus authors, excluding self-citations and repeat citing authors")]
#[command(version)]
struct Cli {
    /// Scopus author IDs to report on
    #[arg(required = true, value_parser = clap::value_parser!(u64).range(1..))]
    author_ids: Vec<u64>,

    /// Elsevier API key
    #[arg(long, env = "SCOPUS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Institutional token (needed by some subscriptions off-campus)
    #[arg(long, env = "SCOPUS_INST_TOKEN", hide_env_values = true)]
    inst_token: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "SCOPUS_BASE_URL")]
    base_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Omit the per-document listing
    #[arg(long)]
    summary_only: bool,

    /// Count a citing first author only once across all given researchers
    #[arg(long)]
    shared_pool: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout is reserved for the report
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        authors = cli.author_ids.len(),
        shared_pool = cli.shared_pool,
        "Starting Scopus impact report"
    );

    // Environment first (with the ELS_APIKEY fallback), explicit flags on top
    let mut config = Config::from_env()?.with_overrides(cli.api_key, cli.inst_token);
    if let Some(url) = cli.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
        config = config.with_base_url(url);
    }
    if !config.has_api_key() {
        tracing::warn!("No API key configured, requests will be refused");
    }

    let client = ScopusClient::new(config)?;
    let list_documents = !cli.summary_only;

    let mut pool = impact::AuthorPool::new();
    let mut reports = Vec::with_capacity(cli.author_ids.len());

    for &author_id in &cli.author_ids {
        if !cli.shared_pool {
            pool = impact::AuthorPool::new();
        }

        let report = impact::run(&client, author_id, &mut pool).await.map_err(|e: ImpactError| {
            tracing::error!(author_id, error = %e, "Impact computation failed");
            anyhow::anyhow!(e.to_user_message())
        })?;

        if cli.format == OutputFormat::Table {
            println!("{}", formatters::format_report(&report, list_documents));
        }
        reports.push(report);
    }

    if cli.format == OutputFormat::Json {
        let out = match reports.as_slice() {
            [single] => formatters::report_json(single, list_documents)?,
            many => formatters::reports_json(many, list_documents)?,
        };
        println!("{out}");
    }

    Ok(())
}
