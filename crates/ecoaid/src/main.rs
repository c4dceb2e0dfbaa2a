pub(crate) mod cli;

use api_impact_rest::router::create_router as create_impact_router;
use api_impact_rest::state::State as ImpactAppState;
use api_ui::config::WebConfig;
use api_ui::layers::{add_request_metadata, make_cors_middleware};
use api_ui::router::create_router as create_ui_router;
use api_ui::state::AppState as UIAppState;
use axum::middleware;
use axum::{Json, Router, routing::get};
use clap::Parser;
use core_impact::{ImpactCalculator, ReferenceTable};
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const TARGETS: [&str; 4] = ["ecoaid", "api_ui", "api_impact_rest", "core_impact"];

#[tokio::main]
#[allow(clippy::expect_used)]
async fn main() {
    dotenv().ok();

    let opts = cli::CliOpts::parse();

    setup_tracing(&opts);

    let web_config = WebConfig {
        host: opts.host.clone(),
        port: opts.port,
        allow_origin: opts.cors_allow_origin.clone(),
    };

    let table = match ReferenceTable::load(&opts.dataset_path) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!("Failed to load reference dataset: {err}");
            std::process::exit(1);
        }
    };
    let calculator = Arc::new(ImpactCalculator::new(Arc::new(table)));

    let ui_router = create_ui_router().with_state(UIAppState::new(calculator.clone()));
    let impact_router = create_impact_router().with_state(ImpactAppState::new(calculator));

    // The UI router tags its own requests
    let api_router = Router::new()
        .nest("/api", impact_router)
        .route("/health", get(|| async { Json("OK") }))
        .layer(middleware::from_fn(add_request_metadata));

    let router = Router::new().merge(ui_router).merge(api_router);
    let router = match web_config.allow_origin.as_deref() {
        Some(allow_origin) => match make_cors_middleware(allow_origin) {
            Ok(cors) => router.layer(cors),
            Err(err) => {
                tracing::error!("Invalid CORS allow origin {allow_origin:?}: {err}");
                std::process::exit(1);
            }
        },
        None => router,
    };
    let router = router
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    opts.request_timeout_secs,
                ))),
        )
        .into_make_service_with_connect_info::<SocketAddr>();

    let WebConfig { host, port, .. } = web_config;
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to get local address");
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

fn setup_tracing(opts: &cli::CliOpts) {
    let targets_with_level = |level: LevelFilter| -> Vec<(&str, LevelFilter)> {
        TARGETS.iter().map(|t| ((*t), level)).collect()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(LevelFilter::DEBUG))
                                .with_default(LevelFilter::DEBUG)
                        }
                    },
                    // No var set: the command line level applies to our crates
                    _ => Targets::default()
                        .with_targets(targets_with_level(opts.tracing_level.into()))
                        .with_default(LevelFilter::WARN),
                }),
        )
        .init();
}

/// Waits for either a Ctrl+C signal or a SIGTERM signal.
///
/// # Panics
/// If the function fails to install the signal handler, it will panic.
#[allow(clippy::expect_used, clippy::redundant_pub_crate)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::warn!("Ctrl+C received, starting graceful shutdown"),
        () = terminate => tracing::warn!("SIGTERM received, starting graceful shutdown"),
    }
}
