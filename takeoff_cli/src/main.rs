//! # Takeoff CLI
//!
//! Command-line front end for takeoff_core. Reads measurement JSON and
//! preset overrides from disk, builds the measurements into a project and
//! prints the quantities as a table or as JSON.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=takeoff_core=debug`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use takeoff_core::formulas::optimization;
use takeoff_core::measurements::{MeasurementInput, MeasurementRecord, QuantityTotals};
use takeoff_core::presets::Presets;
use takeoff_core::project::{Project, ProjectSettings, TakeoffSummary};
use takeoff_core::scale::{ResolvedScale, ScaleContext};
use takeoff_core::units::UnitSystem;

#[derive(Parser)]
#[command(name = "takeoff")]
#[command(about = "Quantity takeoff from digitized drawing measurements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build measurements from a JSON file (one input or an array)
    Build {
        /// Measurement input JSON
        input: PathBuf,
        /// Preset overrides (TOML)
        #[arg(short, long)]
        presets: Option<PathBuf>,
        /// Display units: metric or imperial
        #[arg(short, long, default_value = "metric")]
        units: UnitSystem,
        /// Print the built records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Convert a drawing measurement to real-world units
    Scale {
        /// Plan scale, N:M
        #[arg(short, long)]
        scale: String,
        /// Viewport zoom at capture time
        #[arg(short, long, default_value_t = 1.0)]
        zoom: f64,
        /// Drawing length to convert
        #[arg(long, conflicts_with = "area", required_unless_present = "area")]
        length: Option<f64>,
        /// Drawing area to convert
        #[arg(long)]
        area: Option<f64>,
    },
    /// Material-planning optima
    Optimize {
        #[command(subcommand)]
        problem: OptimizeProblem,
    },
    /// Print the effective presets as TOML
    Presets {
        /// Preset overrides (TOML) to merge over the built-in values
        #[arg(short, long)]
        presets: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum OptimizeProblem {
    /// Strongest rectangular beam that can be sawn from a round log
    Log {
        /// Log diameter (m)
        #[arg(short, long)]
        diameter: f64,
    },
    /// Rectangle with minimum fence for an area, or maximum area for a fence
    Rectangle {
        /// Required area (m²)
        #[arg(long, conflicts_with = "perimeter", required_unless_present = "perimeter")]
        area: Option<f64>,
        /// Available fence length (m)
        #[arg(long)]
        perimeter: Option<f64>,
        /// One side is an existing wall and is not built
        #[arg(long)]
        three_sided: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            presets,
            units,
            json,
        } => build(&input, presets.as_deref(), units, json)?,
        Commands::Scale {
            scale,
            zoom,
            length,
            area,
        } => convert_scale(&scale, zoom, length, area)?,
        Commands::Optimize { problem } => optimize(problem)?,
        Commands::Presets { presets } => {
            let presets = load_presets(presets.as_deref())?;
            print!("{}", presets.to_toml_string()?);
        }
    }

    Ok(())
}

fn load_presets(path: Option<&Path>) -> Result<Presets> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading presets {}", path.display()))?;
            Presets::from_toml_str(&text).with_context(|| format!("parsing presets {}", path.display()))
        }
        None => Ok(Presets::builtin().clone()),
    }
}

fn load_inputs(path: &Path) -> Result<Vec<MeasurementInput>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))?;

    let inputs = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).with_context(|| format!("measurement #{} in {}", i + 1, path.display()))
            })
            .collect::<Result<Vec<MeasurementInput>>>()?,
        single => vec![serde_json::from_value(single).with_context(|| format!("measurement in {}", path.display()))?],
    };

    if inputs.is_empty() {
        bail!("{} contains no measurements", path.display());
    }
    Ok(inputs)
}

fn build(input: &Path, presets: Option<&Path>, units: UnitSystem, json: bool) -> Result<()> {
    let settings = ProjectSettings {
        presets: load_presets(presets)?,
        unit_system: units,
    };
    let name = input.file_stem().and_then(|s| s.to_str()).unwrap_or("takeoff");
    let mut project = Project::with_settings(name, settings);

    for (i, measurement) in load_inputs(input)?.into_iter().enumerate() {
        let label = if measurement.label.is_empty() {
            format!("#{}", i + 1)
        } else {
            measurement.label.clone()
        };
        project
            .add_measurement(measurement)
            .with_context(|| format!("building measurement {}", label))?;
    }
    tracing::info!(records = project.measurement_count(), "takeoff built");

    if json {
        let records = project.measurements();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    print_records(&project.measurements(), units);
    print_summary(&project.summary());
    Ok(())
}

fn header(units: UnitSystem) -> String {
    format!(
        "{:<20} {:<18} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Label",
        "Type",
        format!("Length {}", units.length_label()),
        format!("Area {}", units.area_label()),
        format!("Volume {}", units.volume_label()),
        format!("Weight {}", units.mass_label()),
        format!("Rebar {}", units.mass_label()),
    )
}

fn row(label: &str, kind: &str, totals: &QuantityTotals, units: UnitSystem) -> String {
    let [length, area, volume, weight, rebar] = totals.in_units(units);
    format!(
        "{:<20} {:<18} {:>12.2} {:>12.2} {:>12.3} {:>12.1} {:>12.1}",
        truncate(label, 20),
        kind,
        length,
        area,
        volume,
        weight,
        rebar
    )
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

fn print_records(records: &[&MeasurementRecord], units: UnitSystem) {
    let header = header(units);
    println!("{}", header);
    println!("{}", "─".repeat(header.chars().count()));
    for record in records {
        let kind = record.measurement_type().display_name();
        println!("{}", row(record.label(), kind, &record.computed().totals(), units));
        for warning in record.computed().warnings() {
            println!("  ⚠ {}", warning);
        }
    }
    println!();
}

fn print_summary(summary: &TakeoffSummary) {
    let units = summary.unit_system;
    let header = header(units);
    println!("Summary ({} records)", summary.record_count());
    println!("{}", header);
    println!("{}", "─".repeat(header.chars().count()));
    for r in &summary.rows {
        let label = format!("{} ×", r.count);
        println!("{}", row(&label, r.measurement_type.display_name(), &r.totals, units));
    }
    if summary.warnings > 0 {
        println!();
        println!("{} compliance warning(s)", summary.warnings);
    }
}

fn convert_scale(scale: &str, zoom: f64, length: Option<f64>, area: Option<f64>) -> Result<()> {
    let resolved = ScaleContext::new(scale).with_zoom(zoom).resolve()?;
    tracing::debug!(meters_per_unit = resolved.factor(), "scale resolved");
    for line in scale_lines(&resolved, length, area)? {
        println!("{}", line);
    }
    Ok(())
}

fn scale_lines(resolved: &ResolvedScale, length: Option<f64>, area: Option<f64>) -> Result<Vec<String>> {
    let converted = match (length, area) {
        (Some(px), _) => format!("{:.4} m", resolved.length(px)),
        (None, Some(px2)) => format!("{:.4} m²", resolved.area(px2)),
        (None, None) => bail!("give --length or --area"),
    };
    Ok(vec![format!("1 drawing unit = {:.6} m", resolved.factor()), converted])
}

fn optimize(problem: OptimizeProblem) -> Result<()> {
    match problem {
        OptimizeProblem::Log { diameter } => {
            if !(diameter.is_finite() && diameter > 0.0) {
                bail!("diameter must be positive, got {}", diameter);
            }
            let beam = optimization::strongest_beam_from_log(diameter);
            println!("Width:           {:.4} m", beam.width_m);
            println!("Height:          {:.4} m", beam.height_m);
            println!("Section modulus: {:.6} m³", beam.section_modulus_m3);
        }
        OptimizeProblem::Rectangle {
            area,
            perimeter,
            three_sided,
        } => {
            let optimum = match (area, perimeter) {
                (Some(a), _) if a.is_finite() && a > 0.0 => optimization::min_perimeter_for_area(a, three_sided),
                (None, Some(p)) if p.is_finite() && p > 0.0 => optimization::max_area_for_perimeter(p, three_sided),
                _ => bail!("area or perimeter must be a positive number"),
            };
            println!("Sides:        {:.4} m × {:.4} m", optimum.side_x_m, optimum.side_y_m);
            println!("Area:         {:.4} m²", optimum.area_m2);
            println!("Built length: {:.4} m", optimum.built_length_m);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_units_flag() {
        let cli = Cli::try_parse_from(["takeoff", "build", "in.json", "--units", "imperial"]).unwrap();
        match cli.command {
            Commands::Build { units, json, .. } => {
                assert_eq!(units, UnitSystem::Imperial);
                assert!(!json);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_scale_needs_a_quantity() {
        assert!(Cli::try_parse_from(["takeoff", "scale", "--scale", "1:100"]).is_err());
        assert!(Cli::try_parse_from(["takeoff", "scale", "--scale", "1:100", "--length", "4"]).is_ok());
    }

    #[test]
    fn test_scale_lines() {
        let resolved = ScaleContext::new("1:50").with_zoom(2.0).resolve().unwrap();
        let lines = scale_lines(&resolved, Some(4.0), None).unwrap();
        assert_eq!(lines, vec!["1 drawing unit = 25.000000 m".to_string(), "100.0000 m".to_string()]);

        let lines = scale_lines(&resolved, None, Some(1.0)).unwrap();
        assert_eq!(lines[1], "625.0000 m²");
        assert!(scale_lines(&resolved, None, None).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("abcdef", 4).chars().count(), 4);
    }
}
