use std::error::Error;

use clap::Parser;
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;
use tinytemplate::TinyTemplate;

use trips::*;

static TEMPLATE_NAME: &'static str = "t";

#[derive(clap::ValueEnum, Debug, Clone)]
enum Mode {
    Land,
    Air,
}

#[derive(clap::ValueEnum, Debug, Clone)]
enum DistanceUnit {
    Km,
    Miles,
}

impl From<DistanceUnit> for Unit {
    fn from(unit: DistanceUnit) -> Self {
        match unit {
            DistanceUnit::Km => Unit::Km,
            DistanceUnit::Miles => Unit::Miles,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Travel mode of the trip
    #[arg(long, value_enum, default_value_t = Mode::Land)]
    mode: Mode,

    /// The distance travelled
    #[arg(long)]
    distance: f64,
    /// The unit of the distance
    #[arg(long, value_enum, default_value_t = DistanceUnit::Km)]
    unit: DistanceUnit,
    /// Travellers sharing the trip
    #[arg(long, default_value_t = 1.0)]
    passengers: f64,

    /// Land category (car, bus, rail, taxi)
    #[arg(long, default_value = "car")]
    land_type: String,
    /// Option within the land category (e.g. petrol, coach, metro)
    #[arg(long, default_value = "petrol")]
    option: String,

    /// Haul category of the flight (domestic, short, medium, long, international)
    #[arg(long, default_value = "short")]
    haul: String,
    /// Cabin class (average, economy, premium, business, first)
    #[arg(long, default_value = "economy")]
    class: String,

    /// Path of a CSV of trips to compare instead of computing a single trip,
    /// with columns `mode,distance,unit,passengers,category,option`
    #[arg(long)]
    compare: Option<String>,
    /// Path to write the ranked comparison to as CSV
    #[arg(long)]
    export: Option<String>,
    /// Path to write a markdown report of the trip to
    #[arg(long)]
    report: Option<String>,
}

/// A row of the `--compare` CSV. For air trips, `category` is the haul and
/// `option` the cabin class.
#[derive(Debug, Clone, serde::Deserialize)]
struct TripRecord {
    mode: String,
    distance: f64,
    unit: String,
    passengers: f64,
    category: String,
    option: String,
}

#[derive(serde::Serialize)]
struct Context {
    label: String,
    distance_km: String,
    passengers: u32,
    per_person: String,
    total: String,
    basis_note: String,
    factor_note: String,
    warning: String,
    dataset: String,
    published: String,
}

fn format_distance(km: f64) -> String {
    if km.fract() == 0.0 {
        format!("{}", km as u64)
    } else {
        format!("{km:.2}")
    }
}

fn land_context(table: &FactorTable, result: &LandEmissions) -> Context {
    let basis_note = match result.basis {
        Basis::Vehicle => {
            "The factor is per vehicle-km: the total covers the whole vehicle and the \
             per-person figure assumes emissions are shared equally across passengers."
        }
        Basis::Passenger => {
            "The factor is per passenger-km: the per-person figure comes first and the \
             trip total scales with the passenger count."
        }
    };
    Context {
        label: result.label.clone(),
        distance_km: format_distance(result.distance_km),
        passengers: result.passengers,
        per_person: format!("{:.2} kg CO2e", result.per_person_kg),
        total: format!("{:.2} kg CO2e", result.total_kg),
        basis_note: basis_note.to_string(),
        factor_note: format!(
            "Factor used: {} kg CO2e per {}.",
            result.factor, result.factor_unit
        ),
        warning: String::new(),
        dataset: table.meta().dataset.clone(),
        published: table.meta().published.to_string(),
    }
}

fn air_context(table: &FactorTable, result: &AirEmissions) -> Context {
    Context {
        label: result.label.clone(),
        distance_km: format_distance(result.distance_km),
        passengers: result.passengers,
        per_person: format!("{:.2} kg CO2e (with RF)", result.per_person_with_rf_kg),
        total: format!("{:.2} kg CO2e (with RF)", result.total_with_rf_kg),
        basis_note: "Flight factors are per passenger-km, so totals scale with the \
                     passenger count."
            .to_string(),
        factor_note: format!(
            "Without the radiative forcing uplift: {:.2} kg CO2e in total, {:.2} kg CO2e per passenger.",
            result.total_without_rf_kg, result.per_person_without_rf_kg
        ),
        warning: result.warning.clone().unwrap_or_default(),
        dataset: table.meta().dataset.clone(),
        published: table.meta().published.to_string(),
    }
}

fn write_report(context: &Context, path: &str) -> Result<(), Box<dyn Error>> {
    let template = std::fs::read_to_string("src/template.md")?;

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, &template)?;

    let rendered = tt.render(TEMPLATE_NAME, context)?;

    log::info!("Report written to {path}");
    std::fs::write(path, rendered)?;

    Ok(())
}

fn print_result(context: &Context) {
    println!("{}", context.label);
    println!("Distance: {} km", context.distance_km);
    println!("Per person: {}", context.per_person);
    println!("Total: {}", context.total);
    println!("{}", context.basis_note);
    println!("{}", context.factor_note);
    if !context.warning.is_empty() {
        println!("Warning: {}", context.warning);
    }
}

fn compute_record(
    table: &FactorTable,
    record: &TripRecord,
) -> Result<ComparisonEntry, Box<dyn Error>> {
    let unit = Unit::from_key(&record.unit)
        .ok_or_else(|| Into::<Box<dyn Error>>::into(format!("Unknown unit {:?}", record.unit)))?;
    match record.mode.as_str() {
        "land" => {
            let result = calculate_land_emissions(
                table,
                record.distance,
                unit,
                &record.category,
                &record.option,
                record.passengers,
            )?;
            Ok(ComparisonEntry::land(&result))
        }
        "air" => {
            let result = calculate_air_emissions(
                table,
                record.distance,
                unit,
                &record.category,
                &record.option,
                record.passengers,
            )?;
            if let Some(warning) = &result.warning {
                log::info!("{warning}");
            }
            Ok(ComparisonEntry::air(&result))
        }
        mode => Err(format!("Unknown mode {mode:?}; expected `land` or `air`").into()),
    }
}

fn compare(table: &FactorTable, path: &str, export: Option<&str>) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read(path)?;

    let mut comparison = Comparison::new();
    for record in trips::csv::deserialize::<TripRecord>(&data) {
        comparison.add(compute_record(table, &record)?);
    }

    let lines = comparison
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            format!(
                "{}. {} | {:.2} kg CO2e",
                position + 1,
                entry.label,
                entry.total_kg
            )
        })
        .join("\n");
    println!("{lines}");
    println!(
        "Combined: {} kg CO2e",
        (comparison.total_kg().round() as usize).to_formatted_string(&Locale::en)
    );

    if let Some(path) = export {
        let data = trips::csv::serialize(comparison.ranked().into_iter());
        std::fs::write(path, data)?;
        log::info!("Comparison written to {path}");
    }

    Ok(())
}

pub fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();

    let table = FactorTable::new();

    if let Some(path) = &cli.compare {
        return compare(&table, path, cli.export.as_deref());
    }

    let context = match cli.mode {
        Mode::Land => {
            let result = calculate_land_emissions(
                &table,
                cli.distance,
                cli.unit.into(),
                &cli.land_type,
                &cli.option,
                cli.passengers,
            )?;
            land_context(&table, &result)
        }
        Mode::Air => {
            let result = calculate_air_emissions(
                &table,
                cli.distance,
                cli.unit.into(),
                &cli.haul,
                &cli.class,
                cli.passengers,
            )?;
            air_context(&table, &result)
        }
    };

    print_result(&context);

    if let Some(path) = &cli.report {
        write_report(&context, path)?;
    }

    Ok(())
}
