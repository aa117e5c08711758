// src/main.rs

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use owl_wing_render::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_PREFIX};
use owl_wing_render::crate_version;
use owl_wing_render::data_analysis::aero_summary::AeroSummary;
use owl_wing_render::data_input::cfd_data::load_cfd_data;
use owl_wing_render::pipeline::run_pipeline;
use owl_wing_render::plot_context::PlotContext;

/// Renders the owl-wing airfoil CFD comparison plots (bionic airfoil vs NACA 0006).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory the figures are written to (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Filename prefix of every output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PREFIX)]
    prefix: String,

    /// Skip the coefficient CSV export
    #[arg(long)]
    no_csv: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // --- Argument Parsing ---
    let args = Args::parse();
    let ctx = PlotContext::new(args.output_dir, args.prefix, !args.no_csv);

    println!("owl_wing_render {}", crate_version());
    println!("Starting owl wing airfoil analysis visualization...");

    // --- Data Loading ---
    let record = load_cfd_data();
    record.validate()?;
    println!(
        "  {} angles of attack, {} surface stations, {} acoustic bands.",
        record.angle_count(),
        record.x_upper.len(),
        record.acoustic_freq.len()
    );

    let summary = AeroSummary::from_record(&record)?;
    summary.print();

    // --- Plotting ---
    let written = run_pipeline(&record, &summary, &ctx)?;
    println!("  {} files written to '{}'.", written.len(), ctx.output_dir().display());

    Ok(())
}
