//! quotescript — the QuoteScript CLI
//!
//! Compiles a QuoteScript program and runs it against a SQLite quotes
//! database.
//!
//! # Usage
//!
//! ```bash
//! # Run a program file
//! quotescript examples.qs --database-url sqlite://data/quotes.db
//!
//! # Inline program
//! quotescript -e 'QUOTE: "hope" exact
//! TOP: 3'
//!
//! # Show the optimized IR without touching the store
//! quotescript -e 'AUTHOR: "Camus"' --dry-run
//! ```

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use colored::*;
use quotescript::error::QuoteScriptError;
use quotescript::store::{QuoteRecord, QuoteStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

#[derive(Parser)]
#[command(name = "quotescript")]
#[command(version)]
#[command(about = "Run QuoteScript programs against a quotes database", long_about = None)]
#[command(after_help = "EXAMPLES:
    quotescript query.qs --database-url sqlite://data/quotes.db
    quotescript -e 'QUOTE: \"hope\" exact' --format json
    quotescript -e 'TOP: 5' --dry-run")]
struct Cli {
    /// Path to a QuoteScript program file
    file: Option<String>,

    /// Inline program text instead of a file
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Quote store URL, e.g. sqlite://data/quotes.db
    #[arg(long, env = "QUOTESCRIPT_DATABASE_URL")]
    database_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "list")]
    format: OutputFormat,

    /// Compile only; print the optimized IR as JSON
    #[arg(long)]
    dry_run: bool,

    /// Seed the RANDOM step for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    List,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        // Language errors are the user's to fix; anything else is on us.
        if let Some(lang) = e.downcast_ref::<QuoteScriptError>() {
            eprintln!("{} {}", "quotescript error:".red().bold(), lang);
        } else {
            eprintln!("{} {:#}", "error:".red().bold(), e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let source = if let Some(file) = &cli.file {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read program file '{file}'"))?
    } else if let Some(eval) = &cli.eval {
        eval.clone()
    } else {
        bail!("provide a program file or --eval; see --help");
    };

    let ir = quotescript::compile(&source)?;

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&ir)?);
        return Ok(());
    }

    let url = resolve_database_url(cli)?;
    let store = QuoteStore::connect(&url).await?;
    let records = store.load_all().await?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let results = quotescript::executor::execute(&ir, &records, &mut rng);

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::List => print_list(&results),
    }

    Ok(())
}

/// Store URL precedence: flag (or env via clap), then `quotescript.toml`
/// in the working directory.
fn resolve_database_url(cli: &Cli) -> anyhow::Result<String> {
    if let Some(url) = &cli.database_url {
        return Ok(url.clone());
    }

    let config_path = Path::new("quotescript.toml");
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .context("failed to read quotescript.toml")?;
        let config: toml::Value =
            toml::from_str(&content).context("failed to parse quotescript.toml")?;
        return config
            .get("store")
            .and_then(|s| s.get("url"))
            .and_then(|u| u.as_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("no store.url in quotescript.toml"));
    }

    bail!(
        "no store URL. Use --database-url, set QUOTESCRIPT_DATABASE_URL, \
         or create quotescript.toml with [store] url = \"sqlite://...\""
    )
}

fn print_list(results: &[QuoteRecord]) {
    if results.is_empty() {
        println!("{}", "No matches found.".yellow());
        return;
    }

    for record in results {
        let tags = record.raw_tags();
        if tags.is_empty() {
            println!("- {} — {}", record.content.white(), record.author.cyan());
        } else {
            println!(
                "- {} — {}  {}",
                record.content.white(),
                record.author.cyan(),
                format!("[tags={tags}]").dimmed()
            );
        }
    }
    println!();
    println!("{} quote(s) matched", results.len().to_string().green());
}
