use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Cell, Table as ComfyTable};
use sqlmapper::logging::init_tracing;
use sqlmapper::{MapperConfig, Registry};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "sqlmap_check")]
#[command(about = "Load and validate a <sqlmap> statement document", long_about = None)]
struct Args {
    /// Statement document (default: sqlmap_path from the config)
    document: Option<PathBuf>,

    /// Config file (TOML, YAML or JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format: table or json
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = MapperConfig::load(args.config.as_deref())?;
    let path = match &args.document {
        Some(path) => path.clone(),
        None => config.statement_path()?.to_path_buf(),
    };

    let registry = Registry::from_file(&path)?;
    tracing::info!(path = %path.display(), statements = registry.len(), "statement document is valid");

    let mut output = io::stdout().lock();
    match args.format {
        OutputFormat::Table => print_table(&registry, &mut output)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, &registry.statements())?;
            writeln!(output)?;
        }
    }

    Ok(())
}

fn print_table(registry: &Registry, output: &mut dyn Write) -> io::Result<()> {
    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["id", "kind", "sql", "placeholders"]);

    for stmt in registry.statements() {
        table.add_row(vec![
            Cell::new(stmt.id()),
            Cell::new(stmt.kind()),
            Cell::new(stmt.text()),
            Cell::new(stmt.placeholders().join(", ")),
        ]);
    }

    writeln!(output, "{table}")?;
    writeln!(output, "({} statements)", registry.len())
}
