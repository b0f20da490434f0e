// PIVCOR Lead Chat Server entry point

use pivcor_lib::AppConfig;
use pivcor_server::AppState;

fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"PIVCOR Lead Chat Server v{}

USAGE:
    pivcor-server [OPTIONS]

OPTIONS:
    --help, -h          Print this help information
    --version, -v       Print version information
    --port, -p <PORT>   Listen port (overrides PORT)

ENVIRONMENT:
    PIVCOR_BIND             Bind address (default 127.0.0.1)
    PORT                    Listen port (default 3000)
    LEAD_EMAIL              Inbox receiving leads and contact requests
    LEAD_FROM_EMAIL         Sender address
    RESEND_API_KEY          Resend API key; e-mail is disabled when unset
    RESEND_API_URL          Resend API base URL
    CHAT_MAX_DURATION_SECS  Ceiling on a single chat response (default 30)
    CHAT_STREAM_CHUNK       Characters per streamed chunk (default 5)
    CHAT_STREAM_DELAY_MS    Pause between chunks (default 20)
    RUST_LOG                Log filter (default info)
"#,
        version
    );
}

fn print_version() {
    println!("pivcor-server {}", env!("CARGO_PKG_VERSION"));
}

/// Resolves when the process is asked to stop
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(term), Ok(int)) => (term, int),
            _ => {
                log::warn!("[server] Signal handlers unavailable, falling back to Ctrl+C");
                tokio::signal::ctrl_c().await.ok();
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => log::info!("[server] Received SIGTERM, shutting down gracefully..."),
            _ = sigint.recv() => log::info!("[server] Received SIGINT, shutting down gracefully..."),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
        log::info!("[server] Received Ctrl+C, shutting down gracefully...");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Try project root first, then current dir
    let _ = dotenvy::from_filename("../.env").or_else(|_| dotenvy::dotenv());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut port_override: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-v" => {
                print_version();
                return Ok(());
            }
            "--port" | "-p" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Missing value for {}", args[i]);
                    std::process::exit(1);
                };
                match value.parse::<u16>() {
                    Ok(port) => port_override = Some(port),
                    Err(_) => {
                        eprintln!("Invalid port: {}", value);
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("[server] Invalid configuration: {} ({})", e, e.code().as_str());
            std::process::exit(1);
        }
    };
    if let Some(port) = port_override {
        config.port = port;
    }

    log::info!(
        "[server] Starting PIVCOR lead chat server (PID: {})...",
        std::process::id()
    );

    pivcor_server::run(AppState::from_config(config), shutdown_signal()).await?;

    log::info!("[server] Shutdown complete");
    Ok(())
}
