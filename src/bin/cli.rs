//! Load case command line tool

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;

use tline_loads::export;
use tline_loads::prelude::*;

#[derive(Parser)]
#[command(name = "tline-loads")]
#[command(about = "Transmission line load case generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate per-joint force rows
    Generate {
        /// Project file (JSON)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        project: PathBuf,

        /// Output file; prints tab separated text when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Build the vector load case table
    Vector {
        /// Project file (JSON)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        project: PathBuf,

        /// Output file; prints tab separated text when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Print a best-effort field mapping for a project's table headers
    Map {
        /// Project file (JSON)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        project: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Csv,
    Xlsx,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Generate {
            project,
            output,
            format,
        } => {
            let mut project = load(&project)?;
            let rows: Vec<TableRow> = project
                .generate()?
                .iter()
                .map(GeneratedForceRow::to_table_row)
                .collect();
            write(&GeneratedForceRow::columns(), &rows, output.as_deref(), format)
        }

        Commands::Vector {
            project,
            output,
            format,
        } => {
            let mut project = load(&project)?;
            match project.generate() {
                Ok(_) | Err(LoadGenError::NoLoadCases) => {}
                Err(e) => return Err(e.into()),
            }
            let rows = project.build_vector_table().to_table_rows();
            write(&VectorTable::columns(), &rows, output.as_deref(), format)
        }

        Commands::Map { project } => {
            let file = ProjectFile::from_json_file(&project)
                .with_context(|| format!("failed to read {}", project.display()))?;
            let mapping = FieldMapping::auto_detect(&file.table.headers);
            println!("{}", serde_json::to_string_pretty(&mapping)?);
            Ok(())
        }
    }
}

fn load(path: &Path) -> anyhow::Result<LoadCaseProject> {
    let file = ProjectFile::from_json_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(LoadCaseProject::from_project_file(file))
}

fn write(
    columns: &[ExportColumn],
    rows: &[TableRow],
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let Some(path) = output else {
        println!("{}", export::to_tsv(columns, rows));
        return Ok(());
    };

    match format {
        OutputFormat::Csv => export::write_csv(path, columns, rows)?,
        OutputFormat::Xlsx => export::write_xlsx(path, columns, rows, DEFAULT_SHEET_NAME)?,
    }
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
