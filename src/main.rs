//! Credit estimator entry point: CLI wiring and config-driven pipeline run.

use std::path::{Path, PathBuf};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fuel_credit_sim::config::ScenarioConfig;
use fuel_credit_sim::io::export::{export_projection_csv, export_revenue_csv};
use fuel_credit_sim::market::HistoricalSeriesParser;
use fuel_credit_sim::pipeline::{CreditReport, Pipeline, projection_rng};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    history_path: Option<String>,
    fuel: Option<String>,
    amount: Option<f64>,
    horizon_years: Option<u32>,
    seed_override: Option<u64>,
    revenue_out: Option<String>,
    projection_out: Option<String>,
    list_fuels: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("fuel-credit-sim: low-carbon fuel credit estimator and value projector");
    eprintln!();
    eprintln!("Usage: fuel-credit-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>         Load scenario from TOML config file");
    eprintln!("  --preset <name>           Use a built-in preset (see below)");
    eprintln!("  --history <path>          Weekly credit price table (CSV)");
    eprintln!("  --fuel <name>             Override fuel type");
    eprintln!("  --amount <f64>            Override fuel amount");
    eprintln!("  --horizon <years>         Projection horizon: 1, 5 or 10");
    eprintln!("  --seed <u64>              Fix the projection random seed");
    eprintln!("  --revenue-out <path>      Export revenue table to CSV");
    eprintln!("  --projection-out <path>   Export projected values to CSV");
    eprintln!("  --list-fuels              Print the fuel table and exit");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                   Start REST API server after the run");
        eprintln!("  --port <u16>              API server port (default: 3000)");
    }
    eprintln!("  --help                    Show this help message");
    eprintln!();
    eprintln!(
        "Presets: {}. If no --scenario or --preset is given, diesel_fleet is used.",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=fuel_credit_sim=debug) to adjust logging.");
}

/// Returns the value following flag `args[*i]`, exiting if it is missing.
fn take_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

/// Parses the value following `flag`, exiting with a message on failure.
fn take_parsed<T: std::str::FromStr>(
    args: &[String],
    i: &mut usize,
    flag: &str,
    what: &str,
) -> T {
    let raw = take_value(args, i, flag, what);
    raw.parse::<T>().unwrap_or_else(|_| {
        eprintln!("error: {flag} value \"{raw}\" is not {what}");
        process::exit(1);
    })
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        history_path: None,
        fuel: None,
        amount: None,
        horizon_years: None,
        seed_override: None,
        revenue_out: None,
        projection_out: None,
        list_fuels: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path =
                    Some(take_value(&args, &mut i, "--scenario", "a path argument"));
            }
            "--preset" => {
                cli.preset = Some(take_value(&args, &mut i, "--preset", "a name argument"));
            }
            "--history" => {
                cli.history_path =
                    Some(take_value(&args, &mut i, "--history", "a path argument"));
            }
            "--fuel" => {
                cli.fuel = Some(take_value(&args, &mut i, "--fuel", "a fuel name"));
            }
            "--amount" => {
                cli.amount = Some(take_parsed(&args, &mut i, "--amount", "a valid number"));
            }
            "--horizon" => {
                cli.horizon_years = Some(take_parsed(&args, &mut i, "--horizon", "a year count"));
            }
            "--seed" => {
                cli.seed_override = Some(take_parsed(&args, &mut i, "--seed", "a valid u64"));
            }
            "--revenue-out" => {
                cli.revenue_out =
                    Some(take_value(&args, &mut i, "--revenue-out", "a path argument"));
            }
            "--projection-out" => {
                cli.projection_out =
                    Some(take_value(&args, &mut i, "--projection-out", "a path argument"));
            }
            "--list-fuels" => {
                cli.list_fuels = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                cli.port = take_parsed(&args, &mut i, "--port", "a valid u16");
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the scenario and applies CLI overrides.
fn load_scenario(cli: &CliArgs) -> ScenarioConfig {
    // --scenario takes priority, then --preset, then the default preset
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::diesel_fleet())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(ref path) = cli.history_path {
        scenario.history.path = Some(PathBuf::from(path));
    }
    if let Some(ref fuel) = cli.fuel {
        scenario.fuel.name = fuel.clone();
    }
    if let Some(amount) = cli.amount {
        scenario.fuel.amount = amount;
    }
    if let Some(years) = cli.horizon_years {
        scenario.projection.horizon_years = years;
    }
    if let Some(seed) = cli.seed_override {
        scenario.projection.seed = Some(seed);
    }

    scenario
}

fn print_fuel_table(scenario: &ScenarioConfig) {
    match scenario.fuel_table() {
        Ok(table) => {
            println!("{:<32} {:>8}", "Fuel", "DGE/unit");
            for entry in table.entries() {
                println!("{:<32} {:>8.4}", entry.name, entry.factor);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn run(scenario: &ScenarioConfig) -> Result<CreditReport, String> {
    let history_path = scenario
        .history
        .path
        .as_deref()
        .ok_or("error: no price history given (use --history or history.path)")?;
    let delimiter = scenario.history.delimiter_byte().unwrap_or(b',');
    let parser = HistoricalSeriesParser::new(delimiter, scenario.history.mode);
    let history = parser.parse_path(history_path).map_err(|e| {
        format!("error: cannot load price history \"{}\": {e}", history_path.display())
    })?;

    let pipeline = Pipeline::from_config(scenario).map_err(|e| e.to_string())?;
    let months = scenario.projection.horizon().map_or(0, |h| h.months());
    let mut rng = projection_rng(scenario.projection.seed);

    pipeline
        .run(&scenario.fuel.name, scenario.fuel.amount, history, months, &mut rng)
        .map_err(|e| format!("error: {e}"))
}

fn main() {
    let cli = parse_args();
    init_logging();

    let scenario = load_scenario(&cli);

    if cli.list_fuels {
        print_fuel_table(&scenario);
        return;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let report = run(&scenario).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    // Print summary and per-month revenue
    println!("{report}");
    println!();
    for r in &report.revenue {
        println!("{r}");
    }

    if let Some(ref path) = cli.revenue_out {
        if let Err(e) = export_revenue_csv(&report.revenue, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path, "revenue table written");
    }

    if let Some(ref path) = cli.projection_out {
        if let Err(e) = export_projection_csv(&report.projection, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path, "projection written");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(fuel_credit_sim::api::AppState { report });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(fuel_credit_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
