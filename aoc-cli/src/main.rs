//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use output::OutputFormatter;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config);

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing_inputs = executor.missing_inputs(&work_items);
    if !missing_inputs.is_empty() && !config.quiet {
        println!("Missing {} input file(s):", missing_inputs.len());
        for (year, day) in &missing_inputs {
            println!("  - {}/day{:02}", year, day);
        }
    }
    log::info!("running {} solver(s)", work_items.len());

    let formatter = OutputFormatter::new(config.quiet);
    let mut results = Vec::new();
    executor.execute(|result| {
        formatter.print_result(&result);
        results.push(result);
    });
    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, error::CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
