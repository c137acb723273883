use bmi_core::*;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body Mass Index calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at info level (config loading, saved files)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI and print the result
    Calc {
        #[command(flatten)]
        measurement: MeasurementArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calculate BMI and save the result to a text file
    Save {
        #[command(flatten)]
        measurement: MeasurementArgs,

        /// Name written at the top of the report
        #[arg(long)]
        name: String,

        /// Output file (defaults to the configured output path)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Replace the output file if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Show version and description
    About,
}

#[derive(Args)]
struct MeasurementArgs {
    /// Height value
    #[arg(long, allow_hyphen_values = true)]
    height: String,

    /// Weight value
    #[arg(long, allow_hyphen_values = true)]
    weight: String,

    /// Height unit (m, cm, feet)
    #[arg(long)]
    height_unit: Option<HeightUnit>,

    /// Weight unit (kg, pounds)
    #[arg(long)]
    weight_unit: Option<WeightUnit>,
}

impl MeasurementArgs {
    /// Build form input, falling back to the configured default units
    fn to_input(&self, config: &Config) -> FormInput {
        FormInput::new(
            self.height.clone(),
            self.weight.clone(),
            self.height_unit.unwrap_or(config.units.height),
            self.weight_unit.unwrap_or(config.units.weight),
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        bmi_core::logging::init();
    } else {
        bmi_core::logging::init_with_level("warn");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Command failed: {:?}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Calc { measurement, json } => cmd_calc(&measurement, json, &config),
        Commands::Save {
            measurement,
            name,
            output,
            force,
        } => cmd_save(&measurement, &name, output, force, &config),
        Commands::About => {
            println!("{}", ABOUT_TEXT);
            Ok(())
        }
    }
}

fn cmd_calc(measurement: &MeasurementArgs, json: bool, config: &Config) -> Result<()> {
    let mut calculator = Calculator::new();
    let result = calculator.calculate(&measurement.to_input(config))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_result(&result);
    }
    Ok(())
}

fn cmd_save(
    measurement: &MeasurementArgs,
    name: &str,
    output: Option<PathBuf>,
    force: bool,
    config: &Config,
) -> Result<()> {
    let mut calculator = Calculator::new();
    let result = calculator.calculate(&measurement.to_input(config))?;
    display_result(&result);

    let path = output.unwrap_or_else(|| config.default_report_path());
    calculator.save(name, &path, force)?;

    println!("\n✓ Results saved successfully.");
    println!("  File: {}", path.display());
    Ok(())
}

fn display_result(result: &BmiResult) {
    println!("{}", result.bmi_label());
    println!("{}", result.category_label());
}
