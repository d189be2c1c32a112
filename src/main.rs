//! Teamforge: a team balancer speaking a line protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Logs go to
//! stderr, filtered by `RUST_LOG` (default `teamforge=info`).
//!
//! Usage:
//!   teamforge [OPTIONS]
//!
//! Options:
//!   --config FILE   TOML config file
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --threads N     Search workers (default: 1)
//!   --groups N      Groups to balance into, 2-6 (default: 2)

use std::env;
use std::io::{self, BufRead};
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use teamforge::config::BalancerConfig;
use teamforge::engine::{Engine, Flow};
use teamforge::protocol::parser::parse_command;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("teamforge=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_args() -> BalancerConfig {
    let args: Vec<String> = env::args().collect();
    let mut config = BalancerConfig::default();
    let mut seed = None;
    let mut threads = None;
    let mut groups = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path: String = parse_value(&args, i, "--config");
                config = match BalancerConfig::load(&path) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("failed to load {}: {}", path, e);
                        process::exit(1);
                    }
                };
            }
            "--seed" => {
                i += 1;
                seed = Some(parse_value(&args, i, "--seed"));
            }
            "--threads" => {
                i += 1;
                threads = Some(parse_value(&args, i, "--threads"));
            }
            "--groups" => {
                i += 1;
                groups = Some(parse_value(&args, i, "--groups"));
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    // Flags override the config file regardless of order.
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(threads) = threads {
        config.threads = threads;
    }
    if let Some(groups) = groups {
        config.group_count = groups;
    }
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        process::exit(1);
    }
    config
}

fn print_usage() {
    eprintln!("Usage: teamforge [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE   TOML config file");
    eprintln!("  --seed N        Random seed, 0 for entropy (default: 0)");
    eprintln!("  --threads N     Search workers (default: 1)");
    eprintln!("  --groups N      Groups to balance into, 2-6 (default: 2)");
}

/// Runs the protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    init_logging();
    let config = parse_args();
    info!(
        groups = config.group_count,
        threads = config.threads,
        seed = config.seed,
        "starting"
    );

    let mut engine = match Engine::new(config) {
        Ok(e) => e,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match engine.handle(cmd, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                error!("write failed: {}", e);
                break;
            }
        }
    }
}
