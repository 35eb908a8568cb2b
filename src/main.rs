// Entry point and interactive menu.
//
// - Data is loaded once at startup, and again on every "Refresh data".
// - A failed refresh keeps the last good dashboard and prints a notice.
// - The assistant answers against whatever dashboard is currently loaded.
mod aggregator;
mod chat;
mod cli;
mod error;
mod loader;
mod output;
mod source;
mod state;
mod types;
mod util;

use anyhow::Result;
use chat::ChatLog;
use cli::Args;
use clap::Parser;
use state::{DashboardState, ReloadOutcome, LOAD_FAILURE_NOTICE};
use std::io::{self, Write};
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn read_input(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(args.log_level()).into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Handle option [1] (and the initial load): fetch, rebuild, swap in.
fn handle_refresh(state: &DashboardState, args: &Args) -> bool {
    let source = args.source();
    println!("Loading data from {}...", source);
    match state.reload_with(|| loader::load(&source, args.timeout())) {
        Ok(ReloadOutcome::Reloaded) => {
            if let Some(d) = state.current() {
                println!(
                    "Data loaded: {} orders, {} records, net revenue {}\n",
                    d.display.orders, d.display.customers, d.display.revenue
                );
            }
            true
        }
        Ok(ReloadOutcome::AlreadyRunning) => {
            println!("A refresh is already in progress.\n");
            false
        }
        Err(e) => {
            error!("Load failed: {}", e);
            eprintln!("{}\n", LOAD_FAILURE_NOTICE);
            false
        }
    }
}

/// Handle option [2]: print KPI cards and chart previews.
fn handle_show(state: &DashboardState, args: &Args) {
    match state.current() {
        Some(d) => output::print_dashboard(&d, args.max_rows),
        None => println!("Error: No data loaded. Please refresh the data first (option 1).\n"),
    }
}

/// Handle option [3]: show the conversation so far, then ask one question.
fn handle_chat(state: &DashboardState, chat: &mut ChatLog) {
    println!("AI Business Assistant\n");
    for line in chat.transcript() {
        println!("{}", line);
    }
    println!();
    let Some(question) = read_input("Ketik 'prediksi' atau 'kota'...: ") else {
        return;
    };
    let dashboard = state.current();
    if let Some(reply) = chat.ask(&question, dashboard.as_deref()) {
        println!("AI: {}\n", reply);
    }
}

/// Handle option [4]: write the series and summary files.
fn handle_export(state: &DashboardState, args: &Args) {
    let Some(d) = state.current() else {
        println!("Error: No data loaded. Please refresh the data first (option 1).\n");
        return;
    };
    match output::export_dashboard(&args.out_dir, &d) {
        Ok(paths) => {
            println!("Outputs saved to individual files:");
            for p in paths {
                println!("  {}", p.display());
            }
            println!();
        }
        Err(e) => {
            error!("Export failed: {:#}", e);
            eprintln!("Write error: {:#}\n", e);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    debug!("Arguments: {:?}", args);

    let state = DashboardState::new();

    if args.once {
        if !handle_refresh(&state, &args) {
            std::process::exit(1);
        }
        handle_show(&state, &args);
        return Ok(());
    }

    handle_refresh(&state, &args);
    let mut chat = ChatLog::new();

    loop {
        println!("Sales Dashboard");
        println!("[1] Refresh data");
        println!("[2] Show dashboard");
        println!("[3] Ask the assistant");
        println!("[4] Export dashboard");
        println!("[5] Exit\n");
        let Some(choice) = read_input("Enter choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => {
                handle_refresh(&state, &args);
            }
            "2" => {
                println!();
                handle_show(&state, &args);
            }
            "3" => handle_chat(&state, &mut chat),
            "4" => handle_export(&state, &args),
            "5" => break,
            _ => println!("Invalid choice. Please enter 1 to 5.\n"),
        }
    }
    println!("Exiting the program.");
    Ok(())
}
