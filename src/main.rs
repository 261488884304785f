use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xcwire::models::{FileOutcome, SectionOutcome, WirePlan, WireReport};
use xcwire::wire;

/// Default plan path when none is given on the command line.
const DEFAULT_PLAN: &str = "xcwire.json";

#[derive(Parser)]
#[command(name = "xcwire")]
#[command(about = "Wires widget extensions into Xcode project manifests")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch the project manifest and write missing entitlement files
    Wire {
        /// Path to the wire plan JSON
        #[arg(short, long, default_value = DEFAULT_PLAN)]
        plan: PathBuf,
    },
    /// Write absent entitlement files, touching nothing else
    Entitlements {
        /// Path to the wire plan JSON
        #[arg(short, long, default_value = DEFAULT_PLAN)]
        plan: PathBuf,
    },
    /// Verify the planned files and entitlements exist on disk
    Check {
        /// Path to the wire plan JSON
        #[arg(short, long, default_value = DEFAULT_PLAN)]
        plan: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "xcwire=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Wire { plan }) => run_wire(&plan),
        Some(Commands::Entitlements { plan }) => run_entitlements(&plan),
        Some(Commands::Check { plan }) => run_check(&plan),
        // Default: a full wiring run against the default plan
        None => run_wire(Path::new(DEFAULT_PLAN)),
    }
}

fn run_wire(plan_path: &Path) -> anyhow::Result<()> {
    let plan = WirePlan::load(plan_path)?;
    println!(
        "Wiring {} files into {}",
        plan.files.len(),
        plan.project.display()
    );

    let report = wire::apply(&plan)?;
    print_report(&report);

    println!(
        "Done: {} entries inserted, {} files already wired, {} sections missing",
        report.inserted(),
        report.already_present(),
        report.missing_sections()
    );
    Ok(())
}

fn run_entitlements(plan_path: &Path) -> anyhow::Result<()> {
    let plan = WirePlan::load(plan_path)?;
    let report = wire::apply_entitlements(&plan)?;
    print_report(&report);
    println!(
        "Done: {} entitlement files created, {} already present",
        report.entitlements_written.len(),
        report.entitlements_present.len()
    );
    Ok(())
}

fn run_check(plan_path: &Path) -> anyhow::Result<()> {
    let plan = WirePlan::load(plan_path)?;
    let report = wire::check(&plan);

    for path in &report.present {
        println!("  found {}", path.display());
    }
    for path in &report.missing {
        println!("  MISSING {}", path.display());
    }

    if report.ok() {
        println!("All {} planned paths exist", report.present.len());
        Ok(())
    } else {
        anyhow::bail!("{} planned paths are missing", report.missing.len());
    }
}

fn print_report(report: &WireReport) {
    for outcome in &report.files {
        match outcome {
            FileOutcome::AlreadyPresent { key } => {
                println!("  {key}: already wired, skipped");
            }
            FileOutcome::Wired { key, sections } => {
                let inserted = sections
                    .iter()
                    .filter(|s| matches!(s, SectionOutcome::Inserted { .. }))
                    .count();
                println!("  {key}: inserted into {inserted} sections");
                for section in sections {
                    if let SectionOutcome::Missing { section } = section {
                        println!("    warning: {section} not found, insertion skipped");
                    }
                }
            }
        }
    }
    for path in &report.entitlements_written {
        println!("  created entitlements {}", path.display());
    }
    for path in &report.entitlements_present {
        println!("  entitlements {} already present", path.display());
    }
}
