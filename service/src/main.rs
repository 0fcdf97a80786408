#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::net::SocketAddr;

use numeric_api::{
    app::build_router,
    build_info::BuildInfoProvider,
    config::Config,
    http::{Credentials, PasswordSource},
    policy::AccessPolicy,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.logging.level)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "numeric-api starting up"
    );

    let build_info = BuildInfoProvider::from_env().build_info();
    tracing::info!(
        version = %build_info.version,
        git_sha = %build_info.git_sha,
        build_time = %build_info.build_time,
        build_message = build_info.message.as_deref().unwrap_or(""),
        "resolved build metadata"
    );

    let policy = AccessPolicy::for_mode(config.mode, &config.security_headers)?;
    if config.mode.is_enforcing() {
        tracing::info!(mode = %config.mode, "Authentication, CSRF checks and security headers enforced");
    } else {
        tracing::warn!(mode = %config.mode, "Access policy is open - every request is permitted");
    }

    let (credentials, source) = Credentials::from_config(&config.auth);
    if let PasswordSource::Generated(password) = source {
        tracing::warn!(
            username = %credentials.username(),
            password = %password,
            "Using generated password. Set NUMERIC_AUTH__PASSWORD to configure one."
        );
    }

    let app = build_router(policy, credentials, build_info);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
