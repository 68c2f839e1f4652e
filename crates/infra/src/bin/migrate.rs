//! Bring a catalog file up to the current schema, in place.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{CommandFactory, Parser};

use storefront_infra::{JsonFileStore, ProductRepository, RepositoryError, SliderRepository};

#[derive(Debug, Parser)]
#[command(name = "storefront-migrate")]
#[command(about = "Upgrade a storefront catalog file to the current schema")]
struct Cli {
    /// Catalog file to migrate
    #[arg(env = "STOREFRONT_CATALOG_PATH")]
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    storefront_observability::init();

    let Some(path) = cli.path else {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a catalog path is required, as an argument or STOREFRONT_CATALOG_PATH",
            )
            .exit();
    };

    match migrate(&path) {
        Ok((products, slides)) => {
            tracing::info!(path = %path.display(), products, slides, "catalog is on the current schema");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "catalog migration failed");
            ExitCode::FAILURE
        }
    }
}

fn migrate(path: &Path) -> Result<(usize, usize), RepositoryError> {
    let store = JsonFileStore::open(path, Utc::now())?;
    let products = store.list()?.len();
    let slides = store.load()?.len();
    Ok((products, slides))
}
