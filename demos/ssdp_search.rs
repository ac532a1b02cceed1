//! SSDP search demo
//!
//! Sends one M-SEARCH and prints every responder as `USN @ LOCATION`.
//!
//! Usage: ssdp_search [--st <type>] [--timeout <ms>] [--ttl <hops>] [--agent <name>]
//!                    [--config <file.json>] [--json] [--watch] [--verbose]
//!
//! `--watch` repeats the search until Ctrl-C. `--verbose` prints session events to stdout;
//! otherwise they go through `log` (set `RUST_LOG=debug`).

use ssdp_client::logging::{ConsoleLogger, LogFacade};
use ssdp_client::{Advertisement, DiscoveryConfig, DiscoverySession};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

struct Options {
    config: DiscoveryConfig,
    json: bool,
    watch: bool,
    verbose: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut config = DiscoveryConfig::default().with_user_agent("ssdp_search");
    let mut json = false;
    let mut watch = false;
    let mut verbose = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
        match arg.as_str() {
            "--config" => {
                config = DiscoveryConfig::load(value()?).map_err(|e| e.to_string())?;
            }
            "--st" => config = config.with_service_type(value()?),
            "--agent" => config = config.with_user_agent(value()?),
            "--timeout" => {
                let ms = value()?.parse::<i64>().map_err(|e| format!("--timeout: {}", e))?;
                config = config.with_timeout_ms(ms);
            }
            "--ttl" => {
                let hops = value()?.parse::<i32>().map_err(|e| format!("--ttl: {}", e))?;
                config = config.with_time_to_live(hops);
            }
            "--json" => json = true,
            "--watch" => watch = true,
            "--verbose" => verbose = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(Options { config, json, watch, verbose })
}

fn print_results(advertisements: &[Advertisement], json: bool) {
    if json {
        match serde_json::to_string_pretty(advertisements) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to encode results: {}", e),
        }
        return;
    }

    println!("Found {} service(s)", advertisements.len());
    for ad in advertisements {
        println!(
            "  {} @ {}",
            ad.usn().unwrap_or("<no USN>"),
            ad.location().unwrap_or("<no LOCATION>")
        );
    }
}

fn main() {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .ok();

    let mut session = if options.verbose {
        DiscoverySession::with_logger(options.config, ConsoleLogger::new())
    } else {
        DiscoverySession::with_logger(options.config, LogFacade::new())
    };
    loop {
        match session.run() {
            Ok(advertisements) => print_results(&advertisements, options.json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }

        if !options.watch || !running.load(Ordering::SeqCst) {
            break;
        }
    }
}
