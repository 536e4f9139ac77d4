use std::path::PathBuf;

use clap::Parser;
use medi_api::{build_app_state, build_router, ServiceConfig, StartupError, SERVICE_TITLE};

#[derive(Debug, Parser)]
#[command(
    name = "medi-api",
    version,
    about = "Serve diabetes, heart and kidney risk predictions over HTTP",
    long_about = "medi-api loads the three trained risk models once at startup and serves:\n\n  \
        GET  /          service status\n  \
        POST /predict   score eight patient measurements\n\n\
        Configuration is read from --config (or MEDI_API_CONFIG), then\n\
        MEDI_API_LISTEN / MEDI_API_MODEL_DIR, then the flags below.\n\
        The service refuses to start if any model artifact is missing."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8000
    #[arg(long, value_name = "ADDR")]
    listen: Option<String>,

    /// Directory containing the *_model.json artifacts
    #[arg(long = "model-dir", value_name = "DIR")]
    model_dir: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = ServiceConfig::resolve(cli.config.as_deref(), |key| std::env::var(key).ok())?
        .with_overrides(cli.listen, cli.model_dir);

    log::info!(
        "starting {SERVICE_TITLE}: listen_addr={} model_dir={}",
        config.listen_addr,
        config.model_dir.display()
    );

    let listen_addr = config.listen_addr.clone();
    let state = build_app_state(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: listen_addr.clone(),
            source,
        })?;
    log::info!("listening on {listen_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    log::info!("shutdown signal received, draining connections");
}
