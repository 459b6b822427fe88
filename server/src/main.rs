use std::net::SocketAddr;

use error_stack::ResultExt;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use driver::database::{InMemoryDatabase, PostgresDatabase};
use kernel::KernelError;

use crate::auth::BearerAuth;
use crate::config::{Engine, ServerConfig};
use crate::error::StackTrace;
use crate::handler::{AppDatabase, AppModule};

mod auth;
mod config;
mod controller;
mod error;
mod handler;
mod route;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "application=debug,driver=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let auth = BearerAuth::from_env();
    tracing::info!(engine = ?config.engine, port = config.port, "starting library server");

    match config.engine {
        Engine::Postgres => {
            let database = PostgresDatabase::new().await?;
            serve(AppModule::new(database, auth), config.port).await?
        }
        Engine::Memory => serve(AppModule::new(InMemoryDatabase::new(), auth), config.port).await?,
    }

    Ok(())
}

async fn serve<D: AppDatabase>(
    module: AppModule<D>,
    port: u16,
) -> error_stack::Result<(), KernelError> {
    let router = route::routes(module)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new());

    let bind = SocketAddr::from(([0, 0, 0, 0], port));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!(%bind, "listening");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
