use chrono::Local;
use clap::{Parser, Subcommand};
use edaview::state::{Orchestrator, ViewState};
use edaview::{AnalysisClient, Endpoints};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "edaview")]
#[command(author, version, about = "Console and report generator for a remote EDA service")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Results feed URL (GET); overrides EDAVIEW_FETCH_URL
    #[arg(long)]
    fetch_url: Option<String>,

    /// Analyze endpoint URL (POST); overrides EDAVIEW_ANALYZE_URL
    #[arg(long)]
    analyze_url: Option<String>,

    /// Show diagnostic logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress status output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the current results once and write a report
    Fetch {
        /// Output report file (.html, .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for auto-generated reports
        #[arg(long, default_value = "edaview-reports")]
        report_dir: PathBuf,

        /// Don't prompt to open the report
        #[arg(long)]
        no_open: bool,
    },

    /// Start the interactive web console
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3002")]
        port: u16,
    },
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose, args.quiet);

    // Endpoints resolve once at startup: CLI flag > environment > default.
    let endpoints = Endpoints::resolve(args.fetch_url.as_deref(), args.analyze_url.as_deref());

    let client = match AnalysisClient::new(endpoints) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to set up HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Some(Command::Serve { port }) => {
            if let Err(e) = edaview::serve::start(port, client) {
                eprintln!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Command::Fetch {
            output,
            report_dir,
            no_open,
        }) => run_fetch(&client, output, report_dir, no_open, args.quiet),
        // Bare invocation behaves like `fetch` with defaults.
        None => run_fetch(
            &client,
            None,
            PathBuf::from("edaview-reports"),
            false,
            args.quiet,
        ),
    }
}

fn run_fetch(
    client: &AnalysisClient,
    output: Option<PathBuf>,
    report_dir: PathBuf,
    no_open: bool,
    quiet: bool,
) {
    if !quiet {
        eprintln!("\x1b[1mEdaview - Analysis Results\x1b[0m");
        eprintln!("Feed: {}\n", client.endpoints().fetch_url);
    }

    let pb = if !quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Fetching analysis results...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    // One round trip, routed through the view-state machine so the CLI and
    // the console share identical lifecycle semantics.
    let mut orchestrator = Orchestrator::new();
    let ticket = orchestrator.begin();
    let outcome = client
        .fetch_results()
        .map_err(|e| e.user_message().to_string());
    orchestrator.resolve(ticket, outcome);

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let results = match orchestrator.state() {
        ViewState::Ready(results) => results,
        ViewState::Error(message) => {
            eprintln!("\x1b[31m{}\x1b[0m", message);
            std::process::exit(1);
        }
        // A resolved current ticket always lands in Ready or Error.
        ViewState::NoData | ViewState::Loading => {
            eprintln!("No response received");
            std::process::exit(1);
        }
    };

    if !quiet {
        let sections = edaview::render::sections(results);
        let summary = edaview::report::Summary::from_sections(&sections);
        eprintln!(
            "Received {} section(s): {} chart(s), {} structured",
            summary.total, summary.markup, summary.text
        );
    }

    // Determine report path
    let report_path = if let Some(output) = output {
        output
    } else {
        std::fs::create_dir_all(&report_dir).ok();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        report_dir.join(format!("edaview_report_{}.html", timestamp))
    };

    if let Err(e) = edaview::report::generate(&report_path, results) {
        eprintln!("Failed to write report: {}", e);
        std::process::exit(1);
    }
    if !quiet {
        eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", report_path.display());
    }

    // Open report
    if !no_open && !quiet {
        eprint!("\nOpen report in browser? [Y/n] ");
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_ok() {
            let input = input.trim().to_lowercase();
            if input.is_empty() || input == "y" || input == "yes" {
                if let Err(e) = open::that(&report_path) {
                    eprintln!("Failed to open report: {}", e);
                }
            }
        }
    }
}

/// Initialize the diagnostics channel. User-facing errors stay generic; the
/// underlying causes only appear here, and only with -v.
fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}
