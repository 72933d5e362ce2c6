mod fixture;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use cascata_engine::config::ConfigLoader;
use cascata_engine::session::EditSession;
use clap::Parser;
use fixture::{Catalog, CatalogRecords, CatalogSource, ConsoleSink};

#[derive(Parser)]
#[command(name = "cascata", version, about = "Dependent selection session driver")]
struct Args {
    /// YAML catalog of parent groups, dependent options, and an optional
    /// record to hydrate from. Falls back to a built-in demo data set.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Script to execute (non-interactive mode)
    #[arg(long)]
    file: Option<String>,

    /// Reject every submission with this message, to exercise the failure
    /// path.
    #[arg(long)]
    reject: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging to stderr so stdout stays usable for payload output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ConfigLoader::load_default().await?;

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .await
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::demo(),
    };
    tracing::info!(
        parents = catalog.parents.len(),
        hydrating = catalog.record.is_some(),
        "catalog loaded"
    );

    let latency = config.source.latency_ms.map(Duration::from_millis);
    let record = catalog.record.clone();

    let mut session = EditSession::new(
        Arc::new(CatalogSource::new(catalog, latency)),
        Arc::new(CatalogRecords::new(record)),
        Arc::new(ConsoleSink::new(args.reject)),
        config.form,
    );

    if let Some(file_path) = args.file {
        repl::run_file(&mut session, &file_path).await?;
    } else {
        repl::run(&mut session).await?;
    }
    Ok(())
}
