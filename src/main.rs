//! rocctl - ROCm SMI GPU telemetry tool
//!
//! A command-line tool for querying AMD GPU utilization, performance level,
//! overdrive, clock frequencies, voltage curves and power.

use clap::Parser;
use rocctl::cli::args::{generate_completions, Cli, Commands};
use rocctl::commands::{
    run_all, run_busy, run_clocks, run_overdrive, run_perf_level, run_power, run_utilization,
    run_volt_curve,
};
use rocctl::config::{Config, ConfigBuilder};
use rocctl::domain::ClockDomain;
use rocctl::error::{AppError, ConfigError, RsmiError};
use rocctl::rsmi::RocmSmi;

use std::io;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_format(cli.format)
        .with_gpu_index(cli.gpu)
        .with_library_path(cli.library.clone())
        .build();

    if config.general.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    Ok(config)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = load_config(cli)?;
    let format = config.general.format;
    let gpu = config.gpu.device_index();

    let smi = RocmSmi::init(config.library.path.as_deref(), config.library.init_flags)?;
    if !smi.gate().is_ready() {
        log::warn!("rsmi_init failed: {}", smi.gate().status());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Busy => run_busy(&smi, gpu, format, &mut out),

        Commands::Utilization => run_utilization(&smi, gpu, format, &mut out),

        Commands::PerfLevel => run_perf_level(&smi, gpu, format, &mut out),

        Commands::Overdrive => run_overdrive(&smi, gpu, format, &mut out),

        Commands::Clocks(args) => {
            let domains: Vec<ClockDomain> = if args.domains.is_empty() {
                config.clocks.domains.clone()
            } else {
                args.domains.iter().map(|&d| d.into()).collect()
            };
            run_clocks(&smi, gpu, &domains, format, &mut out)
        }

        Commands::VoltCurve => run_volt_curve(&smi, gpu, format, &mut out),

        Commands::Power => run_power(&smi, gpu, format, &mut out),

        Commands::All => run_all(&smi, gpu, &config.clocks.domains, format, &mut out),

        Commands::Completions { .. } => Ok(()),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Rsmi(RsmiError::LibraryNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Make sure ROCm is installed and librocm_smi64.so is on the");
            eprintln!("      loader path, or pass --library /opt/rocm/lib/librocm_smi64.so.");
        }
        AppError::Rsmi(RsmiError::SymbolNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: The installed ROCm SMI library is too old for this tool.");
        }
        AppError::Rsmi(RsmiError::UnsupportedVersion(_)) => {
            eprintln!();
            eprintln!("Hint: Point --library at the librocm_smi64.so shipped with ROCm 5 or newer.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or the ROCCTL_CONFIG variable.");
        }
        AppError::Config(ConfigError::ReadError { .. }) => {
            eprintln!();
            eprintln!("Hint: The configuration path exists but is not a readable file.");
        }
        _ => {}
    }
}
