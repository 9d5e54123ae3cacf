use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use chatterbox::api::{Backend, HttpBackend};
use chatterbox::core::config::{self, CliOverrides, ResolvedConfig};
use chatterbox::core::{GenerationSettings, Sender, Store};
use chatterbox::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "chatterbox", about = "Terminal chat client for a local text-generation backend")]
struct Args {
    /// Backend base URL (only the scheme and host are used)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Send one prompt, print the reply and exit instead of starting the TUI
    #[arg(short, long)]
    prompt: Option<String>,
}

/// Runs one check-then-send exchange without the TUI.
async fn run_headless(config: &ResolvedConfig, backend: Arc<dyn Backend>, prompt: &str) -> ExitCode {
    let mut store = Store::new(backend, GenerationSettings::from(config));

    if !store.check_backend_status().await {
        eprintln!(
            "Backend is offline (tried ports {} and {})",
            config.candidate_ports[0], config.candidate_ports[1]
        );
        return ExitCode::FAILURE;
    }

    let succeeded = store.send_message(prompt).await;
    if let Some(reply) = store.messages().last() {
        match reply.sender {
            Sender::Ai => println!("{}", reply.text),
            _ => eprintln!("{}", reply.text),
        }
    }

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to chatterbox.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("chatterbox.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        eprintln!("Warning: {e}; using defaults");
        config::ChatterboxConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        timeout_ms: args.timeout_ms,
    };
    let config = config::resolve(&file_config, &cli);

    log::info!(
        "Chatterbox starting up: base_url={}, ports={:?}, timeout={:?}",
        config.base_url,
        config.candidate_ports,
        config.timeout
    );

    let backend: Arc<dyn Backend> = match HttpBackend::from_config(&config) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            log::error!("Cannot build backend client: {}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(prompt) = args.prompt {
        return run_headless(&config, backend, &prompt).await;
    }

    match tui::run(config, backend) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("TUI exited with error: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
