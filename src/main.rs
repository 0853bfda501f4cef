//! Car Cost Projection CLI
//!
//! Command-line interface for projecting and comparing acquisition strategies

use anyhow::{Context, Result};
use car_cost_projection::export::{self, Orientation};
use car_cost_projection::parameters::{control, CONTROLS};
use car_cost_projection::projection::MAX_PROJECTION_STEPS;
use car_cost_projection::{
    Field, ProjectionConfig, ProjectionParameters, ProjectionSeries, ScenarioRunner, Strategy,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "car-cost",
    version,
    about = "Compare the cumulative cost of buying new, buying used, and leasing a car"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project all three strategies over the horizon
    Project {
        #[command(flatten)]
        params: ParameterArgs,

        /// Number of half-year steps
        #[arg(
            long,
            default_value_t = ProjectionConfig::default().steps,
            value_parser = steps_parser()
        )]
        steps: u32,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Final costs for every ownership horizon in a range
    Sweep {
        #[command(flatten)]
        params: ParameterArgs,

        #[arg(long, default_value_t = control(Field::OwnershipYears).min)]
        from: u32,

        #[arg(long, default_value_t = control(Field::OwnershipYears).max)]
        to: u32,

        #[arg(
            long,
            default_value_t = ProjectionConfig::default().steps,
            value_parser = steps_parser()
        )]
        steps: u32,
    },
    /// Print the dashboard control ranges
    Controls,
}

fn steps_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_PROJECTION_STEPS))
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Records,
    Columns,
}

/// The nine projection inputs; defaults are the dashboard's initial values
#[derive(Args)]
struct ParameterArgs {
    #[arg(long, default_value_t = control(Field::OwnershipYears).default)]
    ownership_years: u32,
    #[arg(long, default_value_t = control(Field::NewPrice).default)]
    new_price: u32,
    #[arg(long, default_value_t = control(Field::UsedPrice).default)]
    used_price: u32,
    #[arg(long, default_value_t = control(Field::UsedAgeYears).default)]
    used_age_years: u32,
    #[arg(long, default_value_t = control(Field::LeaseMonthlyCost).default)]
    lease_monthly_cost: u32,
    #[arg(long, default_value_t = control(Field::LeaseSwitchCost).default)]
    lease_switch_cost: u32,
    #[arg(long, default_value_t = control(Field::LeaseTermYears).default)]
    lease_term_years: u32,
    #[arg(long, default_value_t = control(Field::RepairCostPerYear).default)]
    repair_cost_per_year: u32,
    #[arg(long, default_value_t = control(Field::RepairFreeYears).default)]
    repair_free_years: u32,
}

impl From<ParameterArgs> for ProjectionParameters {
    fn from(args: ParameterArgs) -> Self {
        ProjectionParameters {
            ownership_years: args.ownership_years,
            new_price: args.new_price,
            used_price: args.used_price,
            used_age_years: args.used_age_years,
            lease_monthly_cost: args.lease_monthly_cost,
            lease_switch_cost: args.lease_switch_cost,
            lease_term_years: args.lease_term_years,
            repair_cost_per_year: args.repair_cost_per_year,
            repair_free_years: args.repair_free_years,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project { params, steps, format, output } => {
            let params = ProjectionParameters::from(params);
            let runner = ScenarioRunner::with_config(ProjectionConfig { steps });
            let series = runner.run(&params).context("projection failed")?;

            let mut out: Box<dyn Write> = match &output {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("unable to create {}", path.display()))?;
                    Box::new(BufWriter::new(file))
                }
                None => Box::new(io::stdout().lock()),
            };
            match format {
                OutputFormat::Table => write_table(&series, &mut out)?,
                OutputFormat::Csv => export::write_csv(&series, &mut out)?,
                OutputFormat::Records => {
                    export::write_json(&series, Orientation::Records, &mut out)?
                }
                OutputFormat::Columns => {
                    export::write_json(&series, Orientation::Columns, &mut out)?
                }
            }
            out.flush()?;

            if let Some(path) = output {
                info!("Projection written to {}", path.display());
            }
        }
        Command::Sweep { params, from, to, steps } => {
            let params = ProjectionParameters::from(params);
            let runner = ScenarioRunner::with_config(ProjectionConfig { steps });
            print_sweep(&runner, &params, from, to);
        }
        Command::Controls => print_controls(),
    }

    Ok(())
}

fn write_table<W: Write>(series: &ProjectionSeries, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{:>5} {:>5} {:>14} {:>14} {:>14}",
        "Year",
        "Month",
        Strategy::UsedPurchase.label(),
        Strategy::NewPurchase.label(),
        Strategy::Leasing.label()
    )?;
    writeln!(out, "{}", "-".repeat(57))?;

    for record in series.records() {
        writeln!(
            out,
            "{:>5.1} {:>5} {:>14.2} {:>14.2} {:>14.2}",
            record.year,
            record.month,
            record.cost_used_purchase,
            record.cost_new_purchase,
            record.cost_leasing,
        )?;
    }

    let summary = series.summary();
    writeln!(out, "\nSummary after {:.1} years:", summary.final_year)?;
    for (strategy, total) in [
        (Strategy::UsedPurchase, summary.final_used_purchase),
        (Strategy::NewPurchase, summary.final_new_purchase),
        (Strategy::Leasing, summary.final_leasing),
    ] {
        writeln!(out, "  {:<14} {:>14.2}", strategy.label(), total)?;
    }
    if let Some(cheapest) = summary.cheapest {
        writeln!(out, "  Cheapest: {}", cheapest)?;
    }

    for (candidate, reference) in [
        (Strategy::UsedPurchase, Strategy::Leasing),
        (Strategy::NewPurchase, Strategy::Leasing),
    ] {
        match series.break_even_year(candidate, reference) {
            Some(year) => writeln!(
                out,
                "  {} breaks even with {} after {:.1} years",
                candidate, reference, year
            )?,
            None => writeln!(out, "  {} never breaks even with {}", candidate, reference)?,
        }
    }
    Ok(())
}

fn print_sweep(runner: &ScenarioRunner, params: &ProjectionParameters, from: u32, to: u32) {
    println!(
        "{:>9} {:>14} {:>14} {:>14} {:>14}",
        "Ownership",
        Strategy::UsedPurchase.label(),
        Strategy::NewPurchase.label(),
        Strategy::Leasing.label(),
        "Cheapest"
    );
    println!("{}", "-".repeat(69));

    for (years, outcome) in runner.sweep_ownership_years(params, from..=to) {
        match outcome {
            Ok(series) => {
                let summary = series.summary();
                println!(
                    "{:>9} {:>14.2} {:>14.2} {:>14.2} {:>14}",
                    years,
                    summary.final_used_purchase,
                    summary.final_new_purchase,
                    summary.final_leasing,
                    summary.cheapest.map(|s| s.label()).unwrap_or("-"),
                );
            }
            Err(err) => println!("{:>9} skipped: {}", years, err),
        }
    }
}

fn print_controls() {
    println!(
        "{:<22} {:<13} {:>9} {:>9} {:>7} {:>9}",
        "Parameter", "Control", "Min", "Max", "Step", "Default"
    );
    println!("{}", "-".repeat(74));
    for c in &CONTROLS {
        println!(
            "{:<22} {:<13} {:>9} {:>9} {:>7} {:>9}",
            c.field.name(),
            format!("{:?}", c.kind),
            c.min,
            c.max,
            c.step,
            c.default
        );
    }
}
