use clap::{Parser, ValueEnum};
use fuel_calc_core::input::parse_field;
use fuel_calc_core::{
    DerivedReceipt, FieldBounds, FuelCalculator, FuelStorage, InputError, JsonFileStorage,
    MemoryStorage, Pounds, PoundsPerGallon, UnitSystem,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Fuel load calculator
#[derive(Parser, Debug)]
#[command(name = "fuel-calc")]
#[command(about = "Work out how much fuel to add or drain, per wing", long_about = None)]
struct Args {
    /// Fuel on board (lbs)
    #[arg(short, long)]
    current: Option<String>,

    /// Fuel wanted (lbs)
    #[arg(short, long)]
    desired: Option<String>,

    /// Fill the desired load to the configured preset instead of --desired
    #[arg(short, long, conflicts_with = "desired")]
    preset: bool,

    /// Fuel temperature in the selected unit system's scale
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: Option<String>,

    /// Override the density (lbs/gal); applied after the temperature
    #[arg(long)]
    density: Option<String>,

    /// Unit system for volumes and temperature
    #[arg(short, long, value_enum)]
    units: Option<Units>,

    /// Directory for the saved session; omit to keep nothing between runs
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Print the receipt as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Units {
    Imperial,
    Metric,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Imperial => UnitSystem::Imperial,
            Units::Metric => UnitSystem::Metric,
        }
    }
}

fn parse_arg(name: &str, text: &str, bounds: &FieldBounds) -> Result<f64, InputError> {
    let parsed = parse_field(text, bounds)?;
    if parsed.approaching_max {
        warn!("{name} {} lbs is approaching maximum capacity", parsed.value);
    }
    Ok(parsed.value)
}

/// Field values that passed validation, ready to apply
struct FieldUpdates {
    unit_system: Option<UnitSystem>,
    current: Option<f64>,
    desired: Option<f64>,
    temperature: Option<f64>,
    density: Option<f64>,
}

fn parse_args<S: FuelStorage>(
    calc: &FuelCalculator<S>,
    args: &Args,
) -> Result<FieldUpdates, (&'static str, InputError)> {
    let unit_system = args.units.map(UnitSystem::from);
    let fuel_bounds = FieldBounds::fuel(calc.settings());
    let temperature_bounds =
        FieldBounds::temperature(unit_system.unwrap_or(calc.fuel_state().unit_system));

    let current = args
        .current
        .as_deref()
        .map(|text| parse_arg("Current fuel", text, &fuel_bounds))
        .transpose()
        .map_err(|e| ("current", e))?;
    let desired = args
        .desired
        .as_deref()
        .map(|text| parse_arg("Desired fuel", text, &fuel_bounds))
        .transpose()
        .map_err(|e| ("desired", e))?;
    let temperature = args
        .temperature
        .as_deref()
        .map(|text| parse_arg("Temperature", text, &temperature_bounds))
        .transpose()
        .map_err(|e| ("temperature", e))?;
    let density = args
        .density
        .as_deref()
        .map(|text| parse_arg("Density", text, &FieldBounds::density()))
        .transpose()
        .map_err(|e| ("density", e))?;

    Ok(FieldUpdates {
        unit_system,
        current,
        desired,
        temperature,
        density,
    })
}

/// Apply validated updates; nothing here can fail
fn apply_updates<S: FuelStorage>(
    calc: &mut FuelCalculator<S>,
    updates: &FieldUpdates,
    preset: bool,
) {
    if let Some(unit_system) = updates.unit_system {
        calc.set_unit_system(unit_system);
    }
    if let Some(value) = updates.current {
        calc.set_current_fuel(Pounds::new(value));
    }
    if preset {
        calc.apply_preset();
    } else if let Some(value) = updates.desired {
        calc.set_desired_fuel(Pounds::new(value));
    }
    if let Some(value) = updates.temperature {
        calc.set_temperature(value);
    }
    if let Some(value) = updates.density {
        calc.set_density(PoundsPerGallon::new(value));
    }
}

fn print_receipt(r: &DerivedReceipt) {
    let unit_system = r.unit_system;

    println!("=== Fuel Receipt ===\n");
    println!("Current:  {}", r.current_fuel);
    println!("Desired:  {}", r.desired_fuel);
    if let (Some(current), Some(desired)) = (r.current_volume, r.desired_volume) {
        println!("          {current} -> {desired}");
    }

    println!("\n{} {}", r.direction, r.fuel_difference.abs());
    match r.difference_volume {
        Some(volume) => println!("          {volume}"),
        None => println!("          volume unavailable (density {})", r.density),
    }

    print!("\nPer side: {}", r.per_side_fuel);
    if let Some(volume) = r.per_side_volume {
        print!(" / {volume}");
    }
    println!();

    println!(
        "\nDensity:     {}{}",
        r.density,
        if r.density_changed { " (modified)" } else { "" }
    );
    println!(
        "Temperature: {:.1}{}{}",
        r.temperature,
        unit_system.temperature_label(),
        if r.temperature_changed { " (modified)" } else { "" }
    );
    if r.outside_standard_day {
        println!(
            "Standard at this temperature: {} ({:.1}{} standard day)",
            r.expected_density,
            r.standard_temperature,
            unit_system.temperature_label()
        );
    }

    if r.current_near_max || r.desired_near_max {
        println!("\nWarning: load above 90% of capacity");
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let storage: Box<dyn FuelStorage> = match &args.state_dir {
        Some(dir) => Box::new(JsonFileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    };
    let mut calc = FuelCalculator::new(storage);

    let updates = match parse_args(&calc, &args) {
        Ok(updates) => updates,
        Err((field, e)) => {
            error!("Rejected --{field}: {e}");
            return ExitCode::FAILURE;
        }
    };
    apply_updates(&mut calc, &updates, args.preset);

    let receipt = calc.receipt();
    if args.json {
        match serde_json::to_string_pretty(&receipt) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize receipt: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_receipt(&receipt);
    }

    ExitCode::SUCCESS
}
