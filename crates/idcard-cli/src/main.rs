mod display;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use idcard_store::{CodeTableService, DEFAULT_DATABASE_PATH, DEFAULT_LOCATION_PATH};

#[derive(Parser)]
#[command(name = "idcard", version, about = "Identity-card number parsing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the location table from the raw administrative dataset.
    BuildTable {
        /// Raw dataset (path key -> "name|code" entries).
        #[arg(long, default_value = DEFAULT_DATABASE_PATH)]
        database: PathBuf,
        /// Where to write the location table.
        #[arg(long, default_value = DEFAULT_LOCATION_PATH)]
        output: PathBuf,
    },
    /// Parse one or more identity-card numbers.
    Parse {
        #[arg(long, default_value = DEFAULT_LOCATION_PATH)]
        table: PathBuf,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Find and parse every 18-digit identity number in a text file.
    Scan {
        #[arg(long, default_value = DEFAULT_LOCATION_PATH)]
        table: PathBuf,
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::debug!("idcard v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::BuildTable { database, output } => {
            let table = idcard_store::build_location_file(&database, &output)
                .with_context(|| format!("building {}", output.display()))?;
            println!(
                "Wrote {} ({} provinces, {} cities, {} counties)",
                output.display(),
                table.provinces.len(),
                table.cities.len(),
                table.counties.len(),
            );
        }
        Command::Parse { table, ids } => {
            let service = CodeTableService::new(table);
            for id in &ids {
                let record = service
                    .parse(id)
                    .with_context(|| format!("parsing {id}"))?;
                print!("{}", display::card(&record));
            }
        }
        Command::Scan { table, file } => {
            let service = CodeTableService::new(table);
            let hits = idcard_store::scan_file(&service.parser(), &file)
                .with_context(|| format!("scanning {}", file.display()))?;
            if hits.is_empty() {
                bail!("no idcard numbers found in {}", file.display());
            }
            for hit in &hits {
                println!("{}", display::scan_line(hit));
            }
        }
    }
    Ok(())
}
