//! Panel Layout CLI
//!
//! Usage:
//!   panel-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -m, --monitor <N>     Monitor to lay out (primary monitor by default)
//!   -a, --all             Lay out every monitor
//!   --svg                 Print an SVG preview instead of the text report
//!   --iterations <N>      Solver pass cap
//!   -h, --help            Print help
//!
//! Set `RUST_LOG=panel_layout=debug` to trace the solver.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use panel_layout::layout::DEFAULT_MAX_ITERATIONS;
use panel_layout::{render_svg, LayoutConfig, PanelError, Scenario, SvgConfig};

#[derive(Parser)]
#[command(name = "panel-layout")]
#[command(about = "Compute the element layout of a desktop panel bar")]
struct Cli {
    /// Scenario file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Monitor index to lay out
    #[arg(short, long, conflicts_with = "all")]
    monitor: Option<usize>,

    /// Lay out the bar of every monitor
    #[arg(short, long)]
    all: bool,

    /// Print an SVG preview of the bar
    #[arg(long)]
    svg: bool,

    /// Maximum number of solver passes
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    iterations: usize,

    /// Skip placing the corner decorations of a top bar
    #[arg(long)]
    no_corners: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    if let Err(e) = run(&cli, &source) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, source: &str) -> Result<(), PanelError> {
    let scenario = Scenario::from_str(source)?;
    let config = LayoutConfig::new()
        .with_max_iterations(cli.iterations)
        .with_corners(!cli.no_corners);

    let monitors: Vec<usize> = if cli.all {
        (0..scenario.monitor_count()).collect()
    } else {
        vec![cli.monitor.unwrap_or_else(|| scenario.primary_monitor())]
    };

    for monitor in monitors {
        let report = scenario.run(monitor, &config)?;

        if !report.outcome.converged {
            tracing::warn!(
                monitor,
                unresolved = report.outcome.unresolved().count(),
                "layout did not converge"
            );
        }

        if cli.svg {
            println!("{}", render_svg(&report, &SvgConfig::default()));
        } else {
            print!("{}", report);
        }
    }

    Ok(())
}
