//! Fingertips CLI and HTTP API entry point.
//!
//! Binary name: `fingertips`
//!
//! Parses CLI arguments, loads settings, wires the turn handler, then
//! dispatches to the requested command or starts the HTTP server.

mod cli;
mod http;
mod state;
mod turn;

use clap::Parser;

use fingertips_infra::config::Settings;
use fingertips_observe::tracing_setup::{default_filter, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(default_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(&cli.config).await;

    // Config inspection must work even when the database is unreachable.
    if let Commands::Config = cli.command {
        return cli::config::show_config(&settings, cli.json);
    }

    let state = AppState::init(&settings).await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or(settings.file.server.host);
            let port = port.unwrap_or(settings.file.server.port);
            serve(state, &host, port).await?;
        }

        Commands::Chat { user, message } => {
            cli::chat::chat(&state, user, message, cli.json).await?;
        }

        Commands::Flow => {
            cli::chat::flow(&state, cli.json).await?;
        }

        Commands::History { user } => {
            cli::chat::history(&state, &user, cli.json).await?;
        }

        Commands::Config => unreachable!("handled above"),
    }

    Ok(())
}

async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    if !state.handler.is_configured() {
        println!(
            "  {} No GROQ_API key set; /chat will answer 500 until one is configured.",
            console::style("!").yellow().bold()
        );
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Fingertips API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    tracing::info!(%addr, model = %state.handler.settings().model, "Server started");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
