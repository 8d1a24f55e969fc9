use std::{net::SocketAddr, sync::Arc};

use axum::{http::Method, Router};
use camino::Utf8PathBuf as PathBuf;
use clap::Parser;
use eyre::{self, Context, Result};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

use anothersky::{
    app_state::{AppState, SharedState},
    render::Templates,
    routes,
};
use anothersky_core::backend::Backend;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file, every setting has a default
    #[arg(short, long)]
    config: Option<String>,
    #[cfg(feature = "opentelemetry")]
    #[arg(long)]
    otel_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }
    if std::env::var("RUST_SPANTRACE").is_err() {
        std::env::set_var("RUST_SPANTRACE", "1");
    }
    color_eyre::install()?;
    if std::env::var("ANOTHERSKY_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
        std::env::set_var("ANOTHERSKY_LOG", "debug,hyper=info")
    }
    let env_filter = match std::env::var("ANOTHERSKY_LOG") {
        Ok(_) => EnvFilter::from_env("ANOTHERSKY_LOG"),
        Err(_) => EnvFilter::from_default_env(),
    };
    let tracing = tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    #[cfg(feature = "opentelemetry")]
    {
        use opentelemetry_otlp::WithExportConfig;
        let telemetry = args
            .otel_endpoint
            .as_ref()
            .map(|otel_endpoint| {
                let tracer = opentelemetry_otlp::new_pipeline()
                    .tracing()
                    .with_exporter(
                        opentelemetry_otlp::new_exporter()
                            .tonic()
                            .with_endpoint(otel_endpoint),
                    )
                    .with_trace_config(opentelemetry_sdk::trace::config().with_resource(
                        opentelemetry_sdk::Resource::new(vec![opentelemetry::KeyValue::new(
                            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                            "anothersky",
                        )]),
                    ))
                    .install_batch(opentelemetry_sdk::runtime::Tokio)
                    .wrap_err("Error setting up OpenTelemetry exporter")?;
                Ok::<_, eyre::Report>(tracing_opentelemetry::layer().with_tracer(tracer))
            })
            .transpose()?;
        tracing.with(telemetry).init();
    }
    #[cfg(not(feature = "opentelemetry"))]
    {
        tracing.init();
    }

    let config_path = args.config.map(PathBuf::from);
    let config = anothersky_core::config::read_config(config_path.as_deref()).await?;
    info!("Starting up...");

    let backend =
        Backend::from_config(&config.backend).wrap_err("Error setting up backend client")?;
    match &config.backend.url {
        Some(url) => info!(%url, "using backend"),
        None => warn!(
            "no backend URL configured, set [Backend] url or {}",
            anothersky_core::config::BACKEND_URL_ENV
        ),
    }
    let templates = Templates::new(&config.display).wrap_err("Error loading page templates")?;
    let shared_state: SharedState = Arc::new(AppState {
        backend,
        display: config.display,
        templates,
    });

    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);
    let mut app: Router<SharedState> = routes::router();
    if let Some(static_dir) = &config.server.static_dir {
        info!(%static_dir, "serving static files");
        app = app.fallback_service(ServeDir::new(static_dir));
    }
    let app = app
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().include_headers(true))
                        .on_response(DefaultOnResponse::new().include_headers(true)),
                )
                .propagate_x_request_id(),
        )
        .layer(cors)
        .with_state(shared_state);

    let addr = SocketAddr::new(config.server.address, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err("Error binding socket")?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;
    info!("Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {}
        Err(err) => {
            eprintln!("Unable to listen for shutdown signal: {}", err);
            // we also shut down in case of error
            std::process::exit(1);
        }
    }
}
