use std::{
    io::{self, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use log::{info, LevelFilter};
use nbody::{
    report::{ConsoleReport, CsvWriter},
    snapshot::in_viewport,
    Config, SnapshotSink,
};

const USAGE: &str = "
 ----------------------------------------------------------------
  Optionally specify arguments,
    nbody <number-of-bodies>
  or
    nbody <number-of-bodies> <number-of-iterations>
  or
    nbody <number-of-bodies> <number-of-iterations> <time-step>
 ----------------------------------------------------------------
";

/// Simulate randomly initialized bodies under mutual gravitational attraction.
///
/// Malformed values fall back to their defaults with a warning. Positional
/// values may start with '-', so options only have long forms.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of bodies [default: 10]
    #[arg(allow_hyphen_values = true)]
    bodies: Option<String>,

    /// Number of iterations [default: 100]
    #[arg(allow_hyphen_values = true)]
    iterations: Option<String>,

    /// Integration time step [default: 1.0]
    #[arg(allow_hyphen_values = true)]
    time_step: Option<String>,

    /// Seed for the initial conditions, random if not given
    #[arg(long)]
    seed: Option<u64>,

    /// Gravitational constant [default: 1.01]
    #[arg(long, allow_hyphen_values = true)]
    gravity: Option<String>,

    /// Write the positions of every step to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Pause after every step, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Do not print the per-body report
    #[arg(long)]
    quiet: bool,

    /// Increase log verbosity, can be repeated
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logger(args.verbose);

    if args.bodies.is_none() {
        println!("{USAGE}");
    }

    let (mut config, _) = Config::from_args(
        args.bodies.as_deref(),
        args.iterations.as_deref(),
        args.time_step.as_deref(),
        args.gravity.as_deref(),
    );
    config.seed = args.seed;

    println!();
    println!("            Bodies: {}", config.bodies);
    println!("        Iterations: {}", config.iterations);
    println!("  Integration step: {}", config.time_step);
    println!();

    let mut sim = config.simulation();

    let mut report = (!args.quiet).then(|| ConsoleReport::new(io::stdout().lock()));
    let mut csv = args
        .csv
        .as_ref()
        .map(|path| {
            CsvWriter::create(path).wrap_err_with(|| format!("creating {}", path.display()))
        })
        .transpose()?;

    for snapshot in &mut sim {
        if let Some(report) = report.as_mut() {
            report.observe(&snapshot).wrap_err("writing report")?;
        }
        if let Some(csv) = csv.as_mut() {
            csv.observe(&snapshot).wrap_err("writing CSV")?;
        }
        if args.delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    if let Some(csv) = csv {
        csv.into_inner().flush().wrap_err("flushing CSV")?;
    }

    let outside = sim.bodies().iter().filter(|b| !in_viewport(b.position())).count();
    info!("{outside} of {} bodies ended outside the viewport", sim.bodies().len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use nbody::{config::DEFAULT_TIME_STEP, ConfigError, G};

    use super::*;

    fn parse(argv: &[&str]) -> (Config, Vec<ConfigError>) {
        let args = Args::try_parse_from(argv).unwrap();
        Config::from_args(
            args.bodies.as_deref(),
            args.iterations.as_deref(),
            args.time_step.as_deref(),
            args.gravity.as_deref(),
        )
    }

    #[test]
    fn hyphenated_time_step_falls_back() {
        let args = Args::try_parse_from(["nbody", "--quiet", "5", "2", "-0.5s"]).unwrap();
        assert!(args.quiet);
        assert_eq!(args.time_step.as_deref(), Some("-0.5s"));

        let (config, errors) = parse(&["nbody", "--quiet", "5", "2", "-0.5s"]);
        assert_eq!(config.bodies, 5);
        assert_eq!(config.iterations, 2);
        assert_eq!(config.time_step, DEFAULT_TIME_STEP);
        assert!(matches!(errors[..], [ConfigError::TrailingCharacters { .. }]));
    }

    #[test]
    fn hyphenated_count_falls_back() {
        let (config, errors) = parse(&["nbody", "-5x", "3"]);

        assert_eq!(config.bodies, 10);
        assert_eq!(config.iterations, 3);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn negative_time_step() {
        let (config, errors) = parse(&["nbody", "4", "10", "-0.25"]);

        assert!(errors.is_empty());
        assert_eq!(config.time_step, -0.25);
    }

    #[test]
    fn non_finite_gravity_falls_back() {
        let (config, errors) = parse(&["nbody", "--gravity", "nan", "3"]);

        assert_eq!(config.gravity, G);
        assert_eq!(config.bodies, 3);
        assert!(matches!(errors[..], [ConfigError::OutOfRange { name: "gravity", .. }]));
    }
}
