//! Resolves a city against the configured reference table and prints the
//! match report as JSON.
//!
//! ```text
//! resolve_city --city Medelin --department Antioquia
//! ```

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use shipping_quote::config::AppConfig;
use shipping_quote::domain::services::{DepartmentCodeMapper, FuzzyCityResolver};
use shipping_quote::infrastructure::reference::AdminDivisionCache;
use shipping_quote::telemetry::init_tracing;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Resolve a free-text city to its division code")]
struct Args {
    /// City as typed by the customer.
    #[arg(long)]
    city: String,

    /// Department or province code.
    #[arg(long)]
    department: Option<String>,

    /// Reference table JSON file; overrides the configured source.
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Minimum fuzzy similarity; overrides the configured value.
    #[arg(long)]
    threshold: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(config.logging.format);

    if let Some(path) = args.reference {
        config.reference.source_path = Some(path);
    }
    if let Some(threshold) = args.threshold {
        config.matching.similarity_threshold = threshold;
    }
    config.validate()?;

    let cache = AdminDivisionCache::new(config.reference_repository());
    let index = cache
        .index()
        .await
        .context("failed to load reference table")?;

    let resolver = FuzzyCityResolver::new(config.matching.resolver_config());
    let mapper = DepartmentCodeMapper::new(config.matching.fallback_state_code.clone());

    let resolution = resolver.resolve(index.as_ref(), &args.city, args.department.as_deref());
    let state_code = args
        .department
        .as_deref()
        .map(|d| mapper.map_to_state_code(d))
        .unwrap_or_else(|| mapper.fallback_state_code().to_string());
    let (code, report) = resolution.into_parts();

    let output = json!({
        "division_code": code,
        "state_code": state_code,
        "match": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
