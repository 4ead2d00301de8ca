//! Mindtrack CLI
//!
//! Usage:
//!   mindtrack --url http://127.0.0.1:5000 --days 30   # Render the dashboard once
//!   mindtrack --data records.json                     # Render from local records
//!   mindtrack --interactive                           # Range selector loop
//!   mindtrack --serve --data records.json             # Analytics API server
//!   mindtrack --open snapshots/snapshot_30d_....json  # Re-render a saved snapshot
//!   mindtrack --json                                  # Print the snapshot as JSON

use anyhow::{bail, Context};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use mindtrack::core::{
    load_records, load_snapshot, run_server, save_snapshot, AnalyticsAggregator, ChartRegistry,
    DashboardController, HttpTransport, LocalTransport, MetricTransport, RefreshOutcome,
};
use mindtrack::types::DashboardState;
use mindtrack::{DEFAULT_RANGE_DAYS, MAX_RANGE_DAYS, RANGE_CHOICES, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "mindtrack",
    version = VERSION,
    about = "Mindtrack - emotion analytics dashboard for your journal and chats",
    long_about = "Mindtrack fetches emotion analytics for a lookback window and renders\n\
                  them as terminal charts: distribution, frequency, trends, balance,\n\
                  sentiment and a daily mood calendar.\n\n\
                  Modes:\n  \
                  (default)      Fetch once and render\n  \
                  --interactive  Change the range and reload from a prompt\n  \
                  --serve        Serve the analytics API from a records file\n  \
                  --open FILE    Render a saved snapshot offline"
)]
struct Args {
    /// Base URL of the analytics service
    #[arg(long, env = "MINDTRACK_URL", default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Records file; renders locally instead of over HTTP (required for --serve)
    #[arg(long, env = "MINDTRACK_DATA")]
    data: Option<PathBuf>,

    /// Lookback window in days
    #[arg(short = 'n', long, env = "MINDTRACK_DAYS", default_value_t = DEFAULT_RANGE_DAYS)]
    days: u32,

    /// Interactive mode - pick ranges from a prompt
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "MINDTRACK_ADDR", default_value = "127.0.0.1:5000")]
    addr: String,

    /// Render a saved snapshot instead of fetching
    #[arg(long)]
    open: Option<PathBuf>,

    /// Save each loaded snapshot into this directory
    #[arg(long)]
    export: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mindtrack=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_serve(&args).await
    } else if let Some(ref path) = args.open {
        run_open(path, &args)
    } else {
        let transport = build_transport(&args)?;
        let mut controller = DashboardController::new(transport);
        if args.interactive {
            run_interactive(&mut controller, &args).await
        } else {
            run_single(&mut controller, &args).await
        }
    }
}

/// HTTP transport, or a local one when a records file is given
fn build_transport(args: &Args) -> anyhow::Result<Box<dyn MetricTransport>> {
    match &args.data {
        Some(path) => {
            let records = load_records(path)
                .with_context(|| format!("failed to load records from {}", path.display()))?;
            let aggregator = Arc::new(AnalyticsAggregator::new(records));
            Ok(Box::new(LocalTransport::new(aggregator)))
        }
        None => {
            let transport = HttpTransport::new(&args.url)
                .with_context(|| format!("failed to set up HTTP client for {}", args.url))?;
            Ok(Box::new(transport))
        }
    }
}

/// Fetch once, render, exit
async fn run_single(
    controller: &mut DashboardController<Box<dyn MetricTransport>>,
    args: &Args,
) -> anyhow::Result<()> {
    let outcome = controller.select_range(args.days).await;
    print_dashboard(controller, args)?;

    if outcome == RefreshOutcome::Failed {
        bail!("analytics refresh failed");
    }
    Ok(())
}

/// Prompt loop: a number selects a range, `r` reloads
async fn run_interactive(
    controller: &mut DashboardController<Box<dyn MetricTransport>>,
    args: &Args,
) -> anyhow::Result<()> {
    print_header("Interactive", args.no_color);
    println!(
        "Enter a range in days ({}), 'r' to reload, 'x' to dismiss a notice, 'quit' to exit.",
        RANGE_CHOICES.map(|d| d.to_string()).join("/")
    );
    println!();

    controller.select_range(args.days).await;
    print_dashboard(controller, args)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        controller.tick(chrono::Utc::now());
        print!("{}", format_prompt(controller, args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Refresh cycles: {}", controller.generation());
            break;
        }
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("r") {
            controller.reload().await;
        } else if line.eq_ignore_ascii_case("x") {
            controller.dismiss_notice();
        } else {
            match line.parse::<u32>() {
                Ok(days) if (1..=MAX_RANGE_DAYS).contains(&days) => {
                    controller.select_range(days).await;
                }
                _ => {
                    println!(
                        "Enter a number of days from 1 to {}, 'r', 'x' or 'quit'.",
                        MAX_RANGE_DAYS
                    );
                    continue;
                }
            }
        }
        print_dashboard(controller, args)?;
    }
    Ok(())
}

/// Render a saved snapshot without touching the network
fn run_open(path: &Path, args: &Args) -> anyhow::Result<()> {
    let snapshot = load_snapshot(path)
        .with_context(|| format!("failed to open snapshot {}", path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let mut registry = ChartRegistry::standard();
    registry.render_all(&snapshot);
    println!(
        "Snapshot {} ({}d, fetched {})",
        path.display(),
        snapshot.range_days,
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
    println!("{}", registry.to_terminal_string(args.no_color));
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> anyhow::Result<()> {
    let records = match &args.data {
        Some(path) => load_records(path)
            .with_context(|| format!("failed to load records from {}", path.display()))?,
        None => bail!("--serve needs a records file (--data)"),
    };

    print_header("API Server", args.no_color);
    run_server(&args.addr, records)
        .await
        .with_context(|| format!("server on {} stopped", args.addr))
}

/// Print the dashboard (and export the snapshot when asked)
fn print_dashboard(
    controller: &DashboardController<Box<dyn MetricTransport>>,
    args: &Args,
) -> anyhow::Result<()> {
    let snapshot = controller.snapshot();

    if controller.state() == DashboardState::Ready {
        if let (Some(dir), Some(snapshot)) = (&args.export, &snapshot) {
            let path = save_snapshot(snapshot, dir)
                .with_context(|| format!("failed to export snapshot to {}", dir.display()))?;
            println!("Snapshot saved: {}", path.display());
        }
    }

    if args.json {
        match snapshot {
            Some(snapshot) => println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?),
            None => println!("null"),
        }
        if let Some(notice) = controller.notice() {
            eprintln!("{}", notice.message);
        }
    } else {
        println!("{}", controller.to_terminal_string(args.no_color));
    }
    println!();
    Ok(())
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Mindtrack v{} - {}", VERSION, mode);
        println!("========================================");
    } else {
        println!("\x1b[1m╔════════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║  Mindtrack v{} - {:<23}║\x1b[0m", VERSION, mode);
        println!("\x1b[1m╚════════════════════════════════════════╝\x1b[0m");
    }
    println!();
}

/// Format interactive prompt
fn format_prompt(
    controller: &DashboardController<Box<dyn MetricTransport>>,
    no_color: bool,
) -> String {
    let state = controller.state();
    if no_color {
        format!("[{} | {}d] > ", state, controller.range_days())
    } else {
        format!(
            "{}{} [{} | {}d]{} > ",
            state.color_code(),
            state.emoji(),
            state,
            controller.range_days(),
            DashboardState::color_reset()
        )
    }
}
