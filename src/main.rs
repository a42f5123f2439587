use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use pn_catalog::config::Config;
use pn_catalog::logging;
use pn_catalog::pipeline::ingestion::open_workbook;
use pn_catalog::pipeline::processing::{AttributeIndex, PnFieldSet};
use pn_catalog::Generator;

#[derive(Parser)]
#[command(name = "pn_catalog")]
#[command(about = "Expand a part-number spreadsheet into a JSON catalog")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML configuration file (defaults to $PN_CATALOG_CONFIG when set)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet into a JSON catalog file
    Convert {
        /// Spreadsheet with PN, GENERAL and attribute sheets
        input: PathBuf,
        /// Output path (default: <epoch>_<input name>.json next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show PN fields, attribute sheets and the combination count without writing
    Inspect {
        input: PathBuf,
    },
}

fn convert(config: Config, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("🔄 Converting {}...", input.display());

    let mut generator = Generator::new(&input).with_config(config);
    if let Some(path) = output {
        generator = generator.with_output(path);
    }
    let summary = generator
        .run_with_summary()
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!("\n📊 Catalog Results:");
    println!("   PN fields: {}", summary.fields.join(", "));
    println!("   Attribute sheets: {}", summary.attribute_sheets);
    println!("   Entries: {}", summary.entries);
    println!("   Duration: {:.3}s", summary.duration_secs);
    println!("   Output file: {}", summary.output.display());
    Ok(())
}

fn inspect(config: &Config, input: &Path) -> Result<()> {
    let workbook = open_workbook(input, &config.sheets)
        .with_context(|| format!("Failed to open {}", input.display()))?;

    let pn_sheet = workbook
        .sheet(&config.sheets.pn)
        .context("PN sheet disappeared after loading")?;
    let fields = PnFieldSet::from_sheet(pn_sheet)?;
    let index = AttributeIndex::build(
        workbook
            .sheets
            .iter()
            .filter(|sheet| !config.sheets.is_reserved(&sheet.name)),
    )?;

    println!("📄 {}", input.display());
    println!("\nPN fields:");
    for (position, field) in fields.fields().iter().enumerate() {
        let lookup = if position == 0 {
            "family"
        } else if index.sheet(&field.name).is_some() {
            "attribute sheet found"
        } else {
            "⚠️  no attribute sheet"
        };
        println!("   {} ({} values, {})", field.name, field.values.len(), lookup);
    }

    println!("\nAttribute sheets:");
    for identity in index.identities() {
        let records = index.sheet(identity).map_or(0, |s| s.records.len());
        println!("   {} ({} keys)", identity, records);
    }

    match fields.combination_count() {
        Some(count) => println!("\nCombinations: {}", count),
        None => println!("\nCombinations: too many to hold in memory"),
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _guard = logging::init_logging(&config.logging).context("Failed to initialize logging")?;
    pn_catalog::metrics::register_all_metrics();

    match cli.command {
        Commands::Convert {
            input,
            output,
            pretty,
        } => {
            if pretty {
                config.output.pretty = true;
            }
            info!("Running convert");
            convert(config, input, output)?;
        }
        Commands::Inspect { input } => {
            info!("Running inspect");
            inspect(&config, &input)?;
        }
    }
    Ok(())
}
