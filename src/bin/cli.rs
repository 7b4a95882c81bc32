// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! MakeHuman weight file CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mhw::cli::Reporter;
use mhw::config::Settings;
use mhw::{apply_weights, collect_weights, io, MemoryMesh, WeightFileError};
use std::path::Path;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mhw")]
#[command(about = "MakeHuman weight file (.mhw) tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header and groups of a weight file
    Inspect {
        /// Input weight file
        input: String,
    },

    /// Rewrite a weight file with a different precision or layout
    Reformat {
        /// Input weight file
        input: String,

        /// Output weight file
        #[arg(short, long)]
        output: String,

        /// Decimal digits per weight (2-5)
        #[arg(short, long)]
        precision: Option<u8>,

        /// Entries per line (1-16)
        #[arg(short, long)]
        columns: Option<usize>,
    },

    /// Export the vertex groups of a JSON mesh to a weight file
    Export {
        /// Input mesh (JSON)
        mesh: String,

        /// Output weight file
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        header: HeaderArgs,
    },

    /// Import a weight file onto a JSON mesh
    Import {
        /// Input weight file
        input: String,

        /// Mesh (JSON) receiving the groups
        mesh: String,

        /// Add to existing groups instead of replacing them
        #[arg(short, long)]
        append: bool,

        /// Write the updated mesh here instead of overwriting the input mesh
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct HeaderArgs {
    /// Name of author
    #[arg(long)]
    author: Option<String>,

    /// Name of weightfile (defaults to the mesh name)
    #[arg(long)]
    name: Option<String>,

    /// Description of weightfile
    #[arg(long)]
    description: Option<String>,

    /// Type of license
    #[arg(long)]
    license: Option<String>,

    /// MakeHuman version
    #[arg(long)]
    mh_version: Option<String>,

    /// Decimal digits per weight (2-5)
    #[arg(short, long)]
    precision: Option<u8>,

    /// Entries per line (1-16)
    #[arg(short, long)]
    columns: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<WeightFileError>() {
            Some(weight_err) => Reporter::report_weight_error(weight_err, &format!("{:#}", err)),
            None => Reporter::report_error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Inspect { input } => inspect_command(&input),
        Commands::Reformat {
            input,
            output,
            precision,
            columns,
        } => reformat_command(&input, &output, precision, columns),
        Commands::Export {
            mesh,
            output,
            header,
        } => export_command(&mesh, &output, header),
        Commands::Import {
            input,
            mesh,
            append,
            output,
        } => import_command(&input, &mesh, append, output.as_deref()),
        Commands::Version => {
            println!("mhw v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn inspect_command(input: &str) -> Result<()> {
    let decoded =
        io::import_file(input).with_context(|| format!("Failed to read weight file: {}", input))?;
    Reporter::report_inspect(input, &decoded);
    Ok(())
}

fn reformat_command(
    input: &str,
    output: &str,
    precision: Option<u8>,
    columns: Option<usize>,
) -> Result<()> {
    let start = Instant::now();
    let settings = Settings::load()?;
    let decoded =
        io::import_file(input).with_context(|| format!("Failed to read weight file: {}", input))?;

    let mut metadata = settings.export;
    metadata.apply_header(&decoded.header);
    if let Some(precision) = precision {
        metadata.precision = precision;
    }
    if let Some(columns) = columns {
        metadata.columns = columns;
    }

    io::export_file(output, &metadata, &decoded.weights)?;
    Reporter::report_transfer(
        "Reformatted",
        output,
        decoded.weights.len(),
        decoded.weights.entry_count(),
        start.elapsed(),
    );
    Ok(())
}

fn export_command(mesh_path: &str, output: &str, args: HeaderArgs) -> Result<()> {
    let start = Instant::now();
    let settings = Settings::load()?;
    let mesh = load_mesh(mesh_path)?;

    let mut metadata = settings.export;
    metadata.name = args.name.unwrap_or_else(|| mesh.name.clone());
    if let Some(description) = args.description {
        metadata.description = description;
    } else if metadata.description.is_empty() {
        metadata.description = format!("generated weights for {}", metadata.name);
    }
    if let Some(author) = args.author {
        metadata.author = author;
    }
    if let Some(license) = args.license {
        metadata.license = license;
    }
    if let Some(version) = args.mh_version {
        metadata.version = version;
    }
    if let Some(precision) = args.precision {
        metadata.precision = precision;
    }
    if let Some(columns) = args.columns {
        metadata.columns = columns;
    }

    let weights = collect_weights(&mesh)?;
    io::export_file(output, &metadata, &weights)?;
    Reporter::report_transfer(
        "Exported",
        output,
        weights.len(),
        weights.entry_count(),
        start.elapsed(),
    );
    Ok(())
}

fn import_command(input: &str, mesh_path: &str, append: bool, output: Option<&str>) -> Result<()> {
    let start = Instant::now();
    let settings = Settings::load()?;
    let mut mesh = load_mesh(mesh_path)?;
    let decoded =
        io::import_file(input).with_context(|| format!("Failed to read weight file: {}", input))?;

    let replace = !append && settings.replace_groups();
    apply_weights(&mut mesh, &decoded.weights, replace)?;

    let target = output.unwrap_or(mesh_path);
    mesh.save(target).with_context(|| format!("Failed to write mesh: {}", target))?;
    Reporter::report_transfer(
        if replace { "Imported" } else { "Appended" },
        target,
        decoded.weights.len(),
        decoded.weights.entry_count(),
        start.elapsed(),
    );
    Ok(())
}

fn load_mesh(path: &str) -> Result<MemoryMesh> {
    if !Path::new(path).exists() {
        anyhow::bail!("Mesh file not found: {}", path);
    }
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read mesh: {}", path))?;
    MemoryMesh::from_json(&text).with_context(|| format!("Failed to parse mesh: {}", path))
}
