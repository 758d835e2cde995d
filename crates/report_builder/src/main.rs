//! Report Builder CLI
//!
//! Weekly match-document extraction and league outlier reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "report_builder")]
#[command(version = rugby_core::VERSION)]
#[command(about = "Build match documents and outlier reports from tracking exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every match export in a folder into per-team documents
    Weekly {
        /// Folder of match export JSON files
        #[arg(long)]
        dir: PathBuf,

        /// Output folder for match documents (defaults to --dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Scan the season workbook for columns where a team is a league outlier
    Outliers {
        /// Season workbook JSON file
        #[arg(long)]
        workbook: PathBuf,

        /// Team to track, spelled as the workbook spells it
        #[arg(long)]
        team: String,

        /// Output JSON file for the report
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Weekly { dir, out } => {
            println!("🏉 Running weekly extraction...");
            println!("   Input:  {}", dir.display());
            println!("   Output: {}", out.as_deref().unwrap_or(&dir).display());

            let summary = report_builder::run_weekly(&dir, out.as_deref())?;

            println!("\n✅ Batch finished");
            println!("   Files processed:   {}", summary.files_processed);
            println!("   Files skipped:     {}", summary.files_skipped);
            println!("   Documents written: {}", summary.documents_written);
            println!("   Events dropped:    {}", summary.events_skipped);
            for (path, error) in &summary.skipped_files {
                println!("   ⚠️  {}: {}", path.display(), error);
            }
        }

        Commands::Outliers { workbook, team, out } => {
            println!("🏉 Scanning season workbook for outliers...");
            println!("   Workbook: {}", workbook.display());
            println!("   Team:     {}", team);

            let report = report_builder::run_outliers(&workbook, &team, out.as_deref())?;

            println!("\n✅ Scan finished");
            println!("   Columns covered: {}", report.covered.len());
            println!("   Outliers found:  {}", report.outliers.len());
            for stat in &report.outliers {
                println!(
                    "   #{:<2} {} = {} (league: {:?})",
                    stat.rank, stat.title, stat.value, stat.values
                );
            }
            for sheet in &report.missing_sheets {
                println!("   ⚠️  Sheet not in workbook: {}", sheet);
            }
            if let Some(out_path) = out {
                println!("\n📄 Report saved to: {}", out_path.display());
            }
        }
    }

    Ok(())
}
