//! jobcard - CLI tool to parse job cards and edit material pricing matrices.

mod extract;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use jobcard_core::config::{CHUNK_STEP, DEFAULT_BULK_PERCENT, DEFAULT_MAX_GIRTH};
use jobcard_core::validation::validate_matrix;
use jobcard_core::{parse_job_text, validate_jobs, JobItemRecord, MaterialPricing, PricingConfig};

/// Parse job cards and manage girth/fold pricing lists.
#[derive(Parser, Debug)]
#[command(name = "jobcard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pricing matrix store
    #[arg(long, global = true, default_value = "pricing_matrix.json")]
    matrix: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a job card (PDF or extracted text) into order items
    Parse {
        /// Input job card path
        input: PathBuf,

        /// Output items as JSON
        #[arg(long)]
        json: bool,

        /// Report validation warnings
        #[arg(long)]
        validate: bool,
    },

    /// Manage the pricing matrix
    #[command(subcommand)]
    Pricing(PricingCommand),
}

#[derive(Subcommand, Debug)]
enum PricingCommand {
    /// List materials
    List,

    /// Print a material's rate table
    Show {
        material: String,

        /// Show every girth instead of every 100th
        #[arg(long)]
        all: bool,
    },

    /// Add a material with a zero-priced table
    AddMaterial { name: String },

    /// Delete a material
    DeleteMaterial { name: String },

    /// Set the price of one girth/fold cell
    SetPrice {
        material: String,
        girth: u32,
        fold: u32,
        price: f64,
    },

    /// Raise every price of a material by a percentage
    BulkIncrease {
        material: String,

        #[arg(long, default_value_t = DEFAULT_BULK_PERCENT)]
        percent: f64,
    },

    /// Add the next fold column
    AddFold { material: String },

    /// Remove the last fold column
    RemoveFold { material: String },

    /// Generate a linear girth gradient from 0 up to an end price
    Span {
        material: String,
        end_price: f64,

        #[arg(long, default_value_t = DEFAULT_MAX_GIRTH)]
        max_girth: u32,
    },

    /// Price every fold as flat price + fold × increment
    FoldIncrement { material: String, increment: f64 },

    /// Check every material's table for completeness
    Validate,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match args.command {
        Command::Parse {
            input,
            json,
            validate,
        } => run_parse(&input, json, validate),
        Command::Pricing(command) => run_pricing(&args.matrix, command),
    }
}

fn run_parse(input: &Path, json: bool, validate: bool) -> Result<()> {
    info!("Processing: {}", input.display());

    let text = extract::extract_text(input)
        .with_context(|| format!("Failed to extract text from {}", input.display()))?;
    let records = parse_job_text(&text);

    info!("Parsed {} order item(s)", records.len());

    if validate {
        for warning in &validate_jobs(&records).warnings {
            warn!("{}", warning);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No order items found.");
    } else {
        for record in &records {
            print_record(record);
        }
    }

    Ok(())
}

fn print_record(record: &JobItemRecord) {
    let pieces = record
        .total_pieces
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());

    println!("{} [{}]", record.item, record.order);
    println!("  Ref:          {}", record.reference);
    println!("  Material:     {}", record.material);
    println!("  Sheet width:  {}", record.sheet_width);
    println!("  Bends:        {}", record.bends);
    println!("  Total pieces: {}", pieces);
    for q in &record.quantities {
        println!("    {} x {}", q.count, q.length);
    }
    if !record.quantities.is_empty() {
        println!("  Cut pieces:   {}", record.quantity_pieces());
        println!("  Total length: {:.0} mm", record.total_length_mm());
    }
}

fn run_pricing(store_path: &Path, command: PricingCommand) -> Result<()> {
    let matrix = store::load_matrix(store_path)?;
    let config = PricingConfig::default();

    let updated = match command {
        PricingCommand::List => {
            for (name, material) in matrix.iter() {
                println!(
                    "{}: {} girth(s), folds {:?}",
                    name,
                    material.rates.len(),
                    material.folds
                );
            }
            return Ok(());
        }
        PricingCommand::Show { material, all } => {
            let pricing = matrix
                .material(&material)
                .with_context(|| format!("Material not found: {}", material))?;
            print_rates(pricing, all);
            return Ok(());
        }
        PricingCommand::Validate => {
            let validation = validate_matrix(&matrix);
            for warning in &validation.warnings {
                warn!("{}", warning);
            }
            for err in &validation.errors {
                error!("{}", err);
            }
            if !validation.passed {
                anyhow::bail!("Validation failed");
            }
            info!("Validation passed");
            return Ok(());
        }
        PricingCommand::AddMaterial { name } => matrix.with_material(&name, &config)?,
        PricingCommand::DeleteMaterial { name } => matrix.without_material(&name)?,
        PricingCommand::SetPrice {
            material,
            girth,
            fold,
            price,
        } => matrix.update_material(&material, |m| m.with_price(girth, fold, price))?,
        PricingCommand::BulkIncrease { material, percent } => {
            matrix.update_material(&material, |m| m.with_bulk_increase(percent))?
        }
        PricingCommand::AddFold { material } => {
            matrix.update_material(&material, |m| Ok(m.with_added_fold()))?
        }
        PricingCommand::RemoveFold { material } => {
            matrix.update_material(&material, |m| m.with_last_fold_removed())?
        }
        PricingCommand::Span {
            material,
            end_price,
            max_girth,
        } => matrix.update_material(&material, |m| m.with_span(end_price, max_girth))?,
        PricingCommand::FoldIncrement {
            material,
            increment,
        } => matrix.update_material(&material, |m| m.with_fold_increment(increment))?,
    };

    store::save_matrix(store_path, &updated)?;
    info!("Saved: {}", store_path.display());

    Ok(())
}

fn print_rates(material: &MaterialPricing, all: bool) {
    let folds = material.folds_with_flat();
    let girths: Vec<u32> = if all {
        material.rates.girths().collect()
    } else {
        material.chunked_girths(CHUNK_STEP)
    };

    let header: Vec<String> = folds
        .iter()
        .map(|&f| if f == 0 { "Flat".to_string() } else { format!("{} Fold", f) })
        .collect();
    println!("{:>8}  {}", "Girth", header.join("\t"));

    for girth in girths {
        let cells: Vec<String> = folds
            .iter()
            .map(|&fold| {
                material
                    .rates
                    .get(girth, fold)
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect();
        println!("{:>5} mm  {}", girth, cells.join("\t"));
    }
}
