//! drawing-xref - Command-line front end for the drawing catalog.
//!
//! Reads drawing and BOM datasets, prints category views, linked BOM rows
//! and facet snapshots as JSON.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use drawing_catalog::{
    build_view, export_file_name, find_linked_with, load_records_from_path, BomRecord,
    CatalogConfig, CatalogRecord, CatalogSources, Category, ExportTable, FacetOption,
    FacetSession, FacetSnapshot, FilterState, FilterTarget, PanelFilters, TableField,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(name = "drawing-xref", version, about = "Drawing catalog views and BOM cross-reference")]
struct Cli {
    /// Catalog configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the grouped view of one category
    View(ViewArgs),
    /// Print the BOM rows linked to a drawing
    Linked(LinkedArgs),
    /// Print the consolidated table rows and facet availability
    Facets(FacetArgs),
    /// Write the filtered consolidated table as CSV
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ViewArgs {
    category: Category,
    /// Shared drawing dataset
    #[arg(long)]
    catalog: PathBuf,
    /// Fabrication dataset
    #[arg(long)]
    fabrication: Option<PathBuf>,
    #[arg(long, default_value = "")]
    block: String,
    #[arg(long, default_value = "")]
    module: String,
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Debug, Args)]
struct LinkedArgs {
    filename: String,
    /// BOM dataset
    #[arg(long)]
    bom: PathBuf,
}

#[derive(Debug, Args)]
struct TableArgs {
    /// Shared drawing dataset
    #[arg(long)]
    catalog: PathBuf,
    /// Fabrication dataset
    #[arg(long)]
    fabrication: Option<PathBuf>,
    /// Category key, e.g. `assembly-pdf`
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    block: String,
    #[arg(long, default_value = "")]
    module: String,
}

#[derive(Debug, Args)]
struct FacetArgs {
    #[command(flatten)]
    table: TableArgs,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[command(flatten)]
    table: TableArgs,
    /// Directory for the timestamped CSV; stdout when omitted
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FacetReport<'a> {
    snapshot: FacetSnapshot,
    blocks: Vec<FacetOption>,
    modules: Vec<FacetOption>,
    rows: Vec<&'a CatalogRecord>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::View(args) => run_view(args, &config),
        Commands::Linked(args) => run_linked(args, &config),
        Commands::Facets(args) => run_facets(args),
        Commands::Export(args) => run_export(args),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<CatalogConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(CatalogConfig::from_toml(&text)?)
        }
        None => Ok(CatalogConfig::default()),
    }
}

fn run_view(args: ViewArgs, config: &CatalogConfig) -> CliResult<()> {
    let drawings: Vec<CatalogRecord> = load_records_from_path(&args.catalog)?;
    let fabrication: Vec<CatalogRecord> = match &args.fabrication {
        Some(path) => load_records_from_path(path)?,
        None => Vec::new(),
    };

    let sources = CatalogSources::new(&drawings, &fabrication);
    let filters = PanelFilters::new(&args.block, &args.module, &args.search);
    let items = build_view(args.category, &sources, &filters, config);
    print_json(&items)
}

fn run_linked(args: LinkedArgs, config: &CatalogConfig) -> CliResult<()> {
    let bom: Vec<BomRecord> = load_records_from_path(&args.bom)?;
    let linked = find_linked_with(&args.filename, &bom, config.matching.strictness);
    info!("{} linked BOM rows for {}", linked.len(), args.filename);
    print_json(&linked)
}

/// The consolidated base over the shared and fabrication datasets.
fn load_table(args: &TableArgs) -> CliResult<Vec<CatalogRecord>> {
    let drawings: Vec<CatalogRecord> = load_records_from_path(&args.catalog)?;
    let fabrication: Vec<CatalogRecord> = match &args.fabrication {
        Some(path) => load_records_from_path(path)?,
        None => Vec::new(),
    };
    Ok(CatalogSources::new(&drawings, &fabrication).consolidated())
}

fn filtered_session<'a>(base: &'a [CatalogRecord], args: &TableArgs) -> FacetSession<'a> {
    let state = FilterState::new()
        .with_filter(FilterTarget::Table(TableField::Category), &args.category)
        .with_filter(FilterTarget::Table(TableField::Block), &args.block)
        .with_filter(FilterTarget::Table(TableField::Module), &args.module);
    FacetSession::with_state(base, state)
}

fn run_facets(args: FacetArgs) -> CliResult<()> {
    let base = load_table(&args.table)?;
    let session = filtered_session(&base, &args.table);
    let snapshot = session.snapshot();
    let report = FacetReport {
        blocks: snapshot.availability.block_options(),
        modules: snapshot.availability.module_options(),
        rows: session.active_rows(),
        snapshot,
    };
    print_json(&report)
}

fn run_export(args: ExportArgs) -> CliResult<()> {
    let base = load_table(&args.table)?;
    let session = filtered_session(&base, &args.table);
    let table = ExportTable::from_rows(&session.active_rows());
    let csv = table.to_csv_string();

    match args.out_dir {
        Some(dir) => {
            let path = dir.join(export_file_name(chrono::Local::now()));
            std::fs::write(&path, csv)?;
            info!("Exported {} rows to {}", table.len(), path.display());
            println!("{}", path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
