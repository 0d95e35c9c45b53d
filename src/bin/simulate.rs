//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 runs to zone 3
//!   cargo run --bin simulate -- -n 20 -z 5     # 20 runs to zone 5
//!   cargo run --bin simulate -- --seed 42      # Reproducible run
//!   RUST_LOG=idle_quest=debug cargo run --bin simulate -- -n 1

use idle_quest::simulator::{run_simulation, SimConfig};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    if !json && config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              IDLE QUEST BALANCE SIMULATOR                     ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Target Zone:    {}", config.target_zone);
        println!("  Clicks/Tick:    {}", config.clicks_per_tick);
        println!("  Max Ticks:      {}", config.max_ticks_per_run);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-z" | "--zone" => {
                if i + 1 < args.len() {
                    config.target_zone = args[i + 1].parse().unwrap_or(config.target_zone);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run =
                        args[i + 1].parse().unwrap_or(config.max_ticks_per_run);
                    i += 1;
                }
            }
            "-c" | "--clicks" => {
                if i + 1 < args.len() {
                    config.clicks_per_tick = args[i + 1].parse().unwrap_or(config.clicks_per_tick);
                    i += 1;
                }
            }
            "--idle" => {
                config.clicks_per_tick = 0;
            }
            "--no-buildings" => {
                config.buy_buildings = false;
            }
            "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, json)
}

fn print_help() {
    println!("Idle Quest Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 100)");
    println!("    -z, --zone <Z>      Zone whose boss ends a run (default: 3)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Max ticks per run (default: 20,000)");
    println!("    -c, --clicks <C>    Manual attacks per tick (default: 3)");
    println!("    --idle              No manual attacks");
    println!("    --no-buildings      Never buy buildings");
    println!("    --json              Print the report as JSON");
    println!("    -v, --verbose       Per-run output");
    println!("    -q, --quiet         Report only, no configuration summary");
    println!("    -h, --help          Show this help");
    println!();
    println!("Logging is controlled by RUST_LOG (default: warn).");
}
