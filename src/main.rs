use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{info, warn};

use flight_impact::core::ballistics::DEFAULT_TIME_STEP_S;
use flight_impact::core::damage::{AttackMethod, DEFAULT_CONTACT_TIME_S};
use flight_impact::error::{Result, SimError};
use flight_impact::export::{DEFAULT_CSV_PATH, export_csv, export_plot};
use flight_impact::scenario::{Bird, Scenario, load_targets};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "flight_impact")]
#[command(about = "Throw a bird, integrate its flight with drag, and score the landing", long_about = None)]
struct Cli {
    /// Bird to throw (blues, stella, red)
    #[arg(short, long, default_value = "blues")]
    bird: Bird,

    /// Launch force (N); prompted for when omitted
    #[arg(short, long)]
    force: Option<f64>,

    /// Launch angle (degrees, strictly between 0 and 90); prompted for when omitted
    #[arg(short, long)]
    angle: Option<f64>,

    /// Attack method (standard, explosive, boosted)
    #[arg(long, default_value = "standard")]
    attack: AttackMethod,

    /// Integration step (s)
    #[arg(long, default_value_t = DEFAULT_TIME_STEP_S)]
    time_step: f64,

    /// Impact contact time (s)
    #[arg(long, default_value_t = DEFAULT_CONTACT_TIME_S)]
    contact_time: f64,

    /// JSON file with a `targets` list replacing the default level
    #[arg(long)]
    targets: Option<PathBuf>,

    /// Trajectory CSV destination
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    csv: PathBuf,

    /// Skip writing the trajectory CSV
    #[arg(long)]
    no_csv: bool,

    /// Also draw the trajectory to this SVG file
    #[arg(long)]
    plot: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,
}

fn read_f64(prompt: &str) -> Result<f64> {
    loop {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended unexpectedly (EOF)",
            )
            .into());
        }

        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let force = match cli.force {
        Some(v) => v,
        None => read_f64("Launch force (N): ")?,
    };
    let angle = match cli.angle {
        Some(v) => v,
        None => read_f64("Launch angle (1-89 deg): ")?,
    };

    let mut scenario = Scenario::new(cli.bird, force, angle);
    scenario.attack = cli.attack;
    scenario.time_step_s = cli.time_step;
    scenario.contact_time_s = cli.contact_time;
    if let Some(path) = &cli.targets {
        scenario.targets = load_targets(path)?;
    }

    let report = scenario.run_notify(|flight| {
        info!(
            "Flight complete: the bird reached the ground after {:.2} s",
            flight.flight_time_s()
        );
    })?;

    match cli.output {
        OutputFormat::Table => println!("{}", report.render_table()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if !cli.no_csv {
        match export_csv(&cli.csv, report.flight.samples()) {
            Ok(()) => info!("Trajectory saved to {}", cli.csv.display()),
            Err(err) => warn!("CSV export to {} failed: {err}", cli.csv.display()),
        }
    }
    if let Some(path) = &cli.plot {
        match export_plot(path, &report) {
            Ok(()) => info!("Trajectory plot saved to {}", path.display()),
            Err(err) => warn!("Plot export to {} failed: {err}", path.display()),
        }
    }

    Ok(())
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        if matches!(err, SimError::InvalidInput { .. }) {
            eprintln!("Force must be positive and the angle strictly between 0 and 90 degrees.");
        }
        std::process::exit(1);
    }
}
