use anyhow::{Context, Result};
use clap::Parser;
use search::{CatalogItem, CorrectionTable, Searcher};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Query an equipment catalog JSON file", long_about = None)]
struct Args {
    /// Catalog file (JSON array of items)
    #[arg(long, default_value = "./catalog.json")]
    catalog: String,
    /// Comma-separated fields to search
    #[arg(long, default_value = "name,description")]
    fields: String,
    /// Corrections table (JSON object, misspelling -> canonical); built-in
    /// table is used when omitted
    #[arg(long)]
    corrections: Option<String>,
    /// Maximum results to print
    #[arg(short = 'k', long, default_value_t = 10)]
    limit: usize,
    /// Query string
    query: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.catalog)
        .with_context(|| format!("reading catalog {}", args.catalog))?;
    let records: Vec<CatalogItem> =
        serde_json::from_str(&raw).context("parsing catalog JSON")?;

    let mut searcher = Searcher::new();
    if let Some(path) = &args.corrections {
        searcher = searcher.with_table(CorrectionTable::from_json_file(path)?);
    }

    let fields: Vec<&str> = args
        .fields
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    let hits = searcher.search(&records, &args.query, &fields);
    tracing::info!(candidates = records.len(), hits = hits.len(), "query done");

    if hits.is_empty() {
        println!("no results for {:?}", args.query);
        return Ok(());
    }
    for hit in hits.iter().take(args.limit) {
        println!("{:>7.1}  {:<8}  {}", hit.score, hit.record.id, hit.record.name);
    }
    Ok(())
}
