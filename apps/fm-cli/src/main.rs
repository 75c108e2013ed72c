use clap::{Parser, Subcommand};
use fm_blend::{
    best_addition, fill_from_empty, filter_grades, find_ethanol_grade, find_gasoline_grade,
    format_report, top_up, BlendError, BlendReport, EthanolFraction, FuelSource, Mixture,
    ScenarioDef,
};
use fm_core::{parse_percent, parse_volume, UnitError, VolumeUnit};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "fm-cli")]
#[command(about = "FuelMix CLI - Ethanol/gasoline blending calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a final volume from scratch (pure ethanol + a gasoline grade)
    Fill {
        /// Desired final volume, e.g. "40" or "10.5 gal"
        #[arg(long)]
        volume: String,
        /// Target ethanol percentage, e.g. "50" or "50%"
        #[arg(long)]
        target_e: String,
        /// Gasoline grade id (e27, e25, e30, e0)
        #[arg(long, default_value = "e27")]
        gasoline: String,
        /// Default unit for bare volumes, and the display unit
        #[arg(long, default_value = "l")]
        unit: String,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one chosen fuel to the current tank contents
    TopUp {
        /// Current tank volume, e.g. "30" or "8 gal"
        #[arg(long)]
        tank: String,
        /// Current ethanol percentage, e.g. "10" or "10%"
        #[arg(long)]
        tank_e: String,
        /// Target ethanol percentage, e.g. "50" or "50%"
        #[arg(long)]
        target_e: String,
        /// Grade id of the fuel being added (e.g. e100, hydrated, e27)
        #[arg(long, default_value = "e100")]
        additive: String,
        /// Default unit for bare volumes, and the display unit
        #[arg(long, default_value = "l")]
        unit: String,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Let the solver pick the cheaper of ethanol or gasoline
    Auto {
        /// Current tank volume, e.g. "30" or "8 gal"
        #[arg(long)]
        tank: String,
        /// Current ethanol percentage, e.g. "10" or "10%"
        #[arg(long)]
        tank_e: String,
        /// Target ethanol percentage, e.g. "50" or "50%"
        #[arg(long)]
        target_e: String,
        /// Ethanol grade id (e100, hydrated, anhydrous)
        #[arg(long, default_value = "e100")]
        ethanol: String,
        /// Gasoline grade id (e27, e25, e30, e0)
        #[arg(long, default_value = "e27")]
        gasoline: String,
        /// Default unit for bare volumes, and the display unit
        #[arg(long, default_value = "l")]
        unit: String,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve a scenario file (YAML or JSON)
    Run {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List fuel grades, optionally filtered by a query
    Grades {
        /// Free-text filter (matches id, name, aliases)
        query: Option<String>,
    },
}

/// Result type for CLI commands.
type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Blend(#[from] BlendError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("Unknown fuel grade: {id}")]
    UnknownGrade { id: String },

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fill {
            volume,
            target_e,
            gasoline,
            unit,
            json,
        } => cmd_fill(&volume, &target_e, &gasoline, &unit, json),
        Commands::TopUp {
            tank,
            tank_e,
            target_e,
            additive,
            unit,
            json,
        } => cmd_top_up(&tank, &tank_e, &target_e, &additive, &unit, json),
        Commands::Auto {
            tank,
            tank_e,
            target_e,
            ethanol,
            gasoline,
            unit,
            json,
        } => cmd_auto(&tank, &tank_e, &target_e, &ethanol, &gasoline, &unit, json),
        Commands::Run {
            scenario_path,
            json,
        } => cmd_run(&scenario_path, json),
        Commands::Grades { query } => cmd_grades(query.as_deref()),
    }
}

fn cmd_fill(
    volume: &str,
    target_e: &str,
    gasoline: &str,
    unit: &str,
    json: bool,
) -> CliResult<()> {
    let unit = VolumeUnit::parse(unit)?;
    let gasoline = find_gasoline_grade(gasoline).ok_or_else(|| CliError::UnknownGrade {
        id: gasoline.to_string(),
    })?;
    let total_l = parse_volume(volume, unit)?;
    let target = EthanolFraction::from_percent(parse_percent(target_e)?)?;

    let report = fill_from_empty(total_l, target, gasoline.fraction())?;
    print_report(&report, unit, json)
}

fn cmd_top_up(
    tank: &str,
    tank_e: &str,
    target_e: &str,
    additive: &str,
    unit: &str,
    json: bool,
) -> CliResult<()> {
    let unit = VolumeUnit::parse(unit)?;
    let additive = fm_blend::find_grade(additive).ok_or_else(|| CliError::UnknownGrade {
        id: additive.to_string(),
    })?;
    let source = if additive.ethanol_fraction >= 0.5 {
        FuelSource::Ethanol
    } else {
        FuelSource::Gasoline
    };
    let current = Mixture::new(
        parse_volume(tank, unit)?,
        EthanolFraction::from_percent(parse_percent(tank_e)?)?,
    )?;
    let target = EthanolFraction::from_percent(parse_percent(target_e)?)?;

    let report = top_up(current, target, additive.fraction(), source);
    print_report(&report, unit, json)
}

fn cmd_auto(
    tank: &str,
    tank_e: &str,
    target_e: &str,
    ethanol: &str,
    gasoline: &str,
    unit: &str,
    json: bool,
) -> CliResult<()> {
    let unit = VolumeUnit::parse(unit)?;
    let ethanol = find_ethanol_grade(ethanol).ok_or_else(|| CliError::UnknownGrade {
        id: ethanol.to_string(),
    })?;
    let gasoline = find_gasoline_grade(gasoline).ok_or_else(|| CliError::UnknownGrade {
        id: gasoline.to_string(),
    })?;
    let current = Mixture::new(
        parse_volume(tank, unit)?,
        EthanolFraction::from_percent(parse_percent(tank_e)?)?,
    )?;
    let target = EthanolFraction::from_percent(parse_percent(target_e)?)?;

    let report = best_addition(current, target, ethanol, gasoline);
    print_report(&report, unit, json)
}

fn cmd_run(scenario_path: &Path, json: bool) -> CliResult<()> {
    let text = std::fs::read_to_string(scenario_path).map_err(|source| CliError::Io {
        path: scenario_path.display().to_string(),
        source,
    })?;

    let is_json = scenario_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let def: ScenarioDef = if is_json {
        serde_json::from_str(&text)?
    } else {
        serde_yaml::from_str(&text)?
    };

    let report = def.solve()?;
    print_report(&report, def.unit(), json)
}

fn cmd_grades(query: Option<&str>) -> CliResult<()> {
    let grades = filter_grades(query.unwrap_or(""));

    if grades.is_empty() {
        println!("No grades match the query");
    } else {
        println!("Fuel grades:");
        for grade in grades {
            println!(
                "  {:<10} {:>5.1}%  {}",
                grade.id,
                grade.ethanol_fraction * 100.0,
                grade.display_name
            );
        }
    }
    Ok(())
}

fn print_report(report: &BlendReport, unit: VolumeUnit, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", format_report(report, unit));
    }
    Ok(())
}
