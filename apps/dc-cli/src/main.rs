use clap::{Parser, Subcommand};
use dc_app::{AppError, AppResult, CalcRequest, project_service, report_service};
use dc_demand::{CalculationReport, DemandSummary};
use dc_project::schema::Project;
use dc_project::{FieldOverride, OverridePolicy, SkippedOverride};
use dc_tables::TableKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "demandcalc")]
#[command(about = "Demand load calculator for groups of electrical equipment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// List equipment in a project
    Equipment {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Run the group and workshop demand calculation
    Calculate {
        /// Path to the project file; the built-in registry when omitted
        project_path: Option<PathBuf>,
        /// Override one field before calculating, e.g. `Press.quantity=3`
        #[arg(long = "set", value_name = "NAME.FIELD=VALUE")]
        overrides: Vec<FieldOverride>,
        /// Keep the previous value when an override does not parse
        #[arg(long)]
        lenient: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also save the report (JSON with manifest) to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run only the workshop-level calculation
    Workshop {
        /// Path to the project file; the reference totals when omitted
        project_path: Option<PathBuf>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read a demand factor from one of the standard tables
    Lookup {
        /// Table to read: group or workshop
        table: TableKind,
        /// Effective equipment count
        effective_count: i64,
        /// Utilization factor
        utilization: f64,
    },
    /// Write the built-in registry to a new project file
    Init {
        /// Destination (.yaml or .json)
        path: PathBuf,
    },
    /// Export per-equipment results as CSV
    ExportCsv {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Equipment { project_path } => cmd_equipment(&project_path),
        Commands::Calculate {
            project_path,
            overrides,
            lenient,
            json,
            output,
        } => {
            let policy = if lenient {
                OverridePolicy::KeepPrevious
            } else {
                OverridePolicy::Reject
            };
            cmd_calculate(
                project_path.as_deref(),
                CalcRequest::new(overrides, policy),
                json,
                output.as_deref(),
            )
        }
        Commands::Workshop { project_path, json } => cmd_workshop(project_path.as_deref(), json),
        Commands::Lookup {
            table,
            effective_count,
            utilization,
        } => cmd_lookup(table, effective_count, utilization),
        Commands::Init { path } => cmd_init(&path),
        Commands::ExportCsv {
            project_path,
            output,
        } => cmd_export_csv(&project_path, output.as_deref()),
    }
}

fn load_or_default(project_path: Option<&Path>) -> AppResult<Project> {
    match project_path {
        Some(path) => project_service::load_project(path),
        None => Ok(Project::default_registry()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Report(format!("Failed to serialize output: {}", e)))
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_equipment(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let equipment = project_service::list_equipment(&project);

    if equipment.is_empty() {
        println!("No equipment found in project");
    } else {
        println!("Equipment in '{}':", project.name);
        print!("{}", render::equipment_list(&equipment));
    }
    Ok(())
}

fn cmd_calculate(
    project_path: Option<&Path>,
    request: CalcRequest,
    json: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let project = load_or_default(project_path)?;
    debug!(
        project = %project.name,
        overrides = request.overrides.len(),
        policy = ?request.policy,
        "starting calculation"
    );
    let response = dc_app::run_calculation(&project, &request)?;

    report_skipped(&response.skipped);

    if json {
        println!("{}", to_json(&response.report)?);
    } else {
        println!("Project: {}", response.project.name);
        print_report(&response.report);
    }

    if let Some(path) = output {
        let manifest = report_service::save_report(path, &response.project.name, &response.report)?;
        eprintln!(
            "✓ Report saved to {} ({})",
            path.display(),
            manifest.generated_at
        );
    }
    Ok(())
}

fn report_skipped(skipped: &[SkippedOverride]) {
    for s in skipped {
        eprintln!(
            "! Skipped override {}.{}: {}",
            s.request.equipment, s.request.field, s.reason
        );
    }
}

fn print_report(report: &CalculationReport) {
    println!();
    print!("{}", render::results_table(report));
    println!();
    print_summary("Group", &report.group);
    println!();
    print_summary("Workshop", &report.workshop);
}

fn print_summary(title: &str, s: &DemandSummary) {
    print!("{}", render::summary_block(title, s));
}

fn cmd_workshop(project_path: Option<&Path>, json: bool) -> AppResult<()> {
    let project = project_path
        .map(project_service::load_project)
        .transpose()?;
    let summary = dc_app::run_workshop(project.as_ref())?;

    if json {
        println!("{}", to_json(&summary)?);
    } else {
        print_summary("Workshop", &summary);
    }
    Ok(())
}

fn cmd_lookup(table: TableKind, effective_count: i64, utilization: f64) -> AppResult<()> {
    let k_r = dc_app::lookup_coefficient(table, effective_count, utilization)?;
    println!(
        "{} table: n_e = {}, K_V = {} -> k_R = {:.4}",
        table, effective_count, utilization, k_r
    );
    Ok(())
}

fn cmd_init(path: &Path) -> AppResult<()> {
    let project = project_service::init_project(path)?;
    println!(
        "✓ Wrote '{}' ({} equipment items) to {}",
        project.name,
        project.equipment.len(),
        path.display()
    );
    Ok(())
}

fn cmd_export_csv(project_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let response = dc_app::run_calculation(&project, &CalcRequest::default())?;

    if let Some(path) = output {
        let file = std::fs::File::create(path)?;
        report_service::write_equipment_csv(&response.report, file)?;
        println!("✓ Exported {} rows to {}", response.report.results.len(), path.display());
    } else {
        report_service::write_equipment_csv(&response.report, std::io::stdout().lock())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_overrides() {
        let cli = Cli::try_parse_from([
            "demandcalc",
            "calculate",
            "--set",
            "Press.quantity=3",
            "--set",
            "Fan.kv=0.7",
            "--lenient",
        ])
        .unwrap();
        match cli.command {
            Commands::Calculate {
                project_path,
                overrides,
                lenient,
                ..
            } => {
                assert!(project_path.is_none());
                assert_eq!(overrides.len(), 2);
                assert_eq!(overrides[1].equipment, "Fan");
                assert!(lenient);
            }
            _ => panic!("expected calculate"),
        }
    }

    #[test]
    fn rejects_malformed_override_at_parse_time() {
        assert!(Cli::try_parse_from(["demandcalc", "calculate", "--set", "Press=3"]).is_err());
    }

    #[test]
    fn parses_lookup_table_kind() {
        let cli = Cli::try_parse_from(["demandcalc", "lookup", "workshop", "56", "0.3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Lookup {
                table: TableKind::Workshop,
                effective_count: 56,
                ..
            }
        ));
    }
}
