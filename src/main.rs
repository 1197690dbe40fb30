use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Utc;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rdmabench::config::{self, Overrides};
use rdmabench::display;
use rdmabench::sweep::run_sweep;
use rdmabench::trial::ProcessRunner;
use rdmabench::types::{Action, ActionReport};

#[derive(Parser)]
#[command(
    name = "rdmabench",
    version,
    about = "Sweep payload sizes through an RDMA benchmark server and print average elapsed times"
)]
struct Cli {
    /// Benchmark RDMA writes (server mode -w)
    #[arg(long)]
    write_rdma: bool,

    /// Benchmark client-driven RDMA reads (server mode -r)
    #[arg(long)]
    read_rdma: bool,

    /// Benchmark RDMA reads filtered at the server (server mode -r -f)
    #[arg(long)]
    read_rdma_filtered: bool,

    /// Benchmark server executable
    #[arg(long, value_name = "PATH")]
    server: Option<PathBuf>,

    /// Trials per payload size
    #[arg(short = 'n', long)]
    repetitions: Option<usize>,

    /// Comma-separated payload sizes, swept in ascending order
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u32>>,

    /// Text preceding the elapsed time in the server's output
    #[arg(long)]
    marker: Option<String>,

    /// Config file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long)]
    json: bool,
}

impl Cli {
    fn actions(&self) -> Vec<Action> {
        [
            (self.write_rdma, Action::WriteRdma),
            (self.read_rdma, Action::ReadRdma),
            (self.read_rdma_filtered, Action::ReadRdmaFiltered),
        ]
        .into_iter()
        .filter_map(|(selected, action)| selected.then_some(action))
        .collect()
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            sizes: self.sizes.clone(),
            repetitions: self.repetitions,
            server: self.server.clone(),
            marker: self.marker.clone(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let actions = cli.actions();
    if actions.is_empty() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "need to select at least one option",
            )
            .exit();
    }

    init_tracing();

    let config = config::load_config(cli.config.as_deref(), cli.overrides())?;
    let mut runner = ProcessRunner::new(config.server.clone(), config.marker.clone());
    info!(
        server = %runner.program().display(),
        sizes = config.sizes.len(),
        repetitions = config.repetitions,
        "starting sweep"
    );

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let mut reports = Vec::with_capacity(actions.len());

    for &action in &actions {
        if actions.len() > 1 && !cli.json {
            eprintln!("{}", display::format_sweep_header(action));
        }

        let sink: Option<&mut dyn Write> = if cli.json { None } else { Some(&mut stdout) };
        let results = run_sweep(action, &config, &mut runner, sink)?;

        reports.push(ActionReport {
            action,
            recorded_at: Utc::now(),
            repetitions: config.repetitions,
            results,
        });
    }

    if cli.json {
        writeln!(stdout, "{}", display::format_json(&reports))?;
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", display::format_error(&err.to_string()));
        process::exit(1);
    }
}
