use std::net::SocketAddr;

use color_eyre::eyre;
use prometheus::Encoder as _;
use serde::Serialize;

use crate::graphql;

pub const HTTP_GRAPHQL_ENDPOINT: &str = "/graphql";
pub const HTTP_GRAPHQL_SUBSCRIPTION_ENDPOINT: &str = "/graphql/ws";

pub type HttpServeFuture = axum::serve::Serve<
    tokio::net::TcpListener,
    axum::routing::IntoMakeService<axum::Router>,
    axum::Router,
>;

pub async fn build(
    address: std::net::IpAddr,
    http_port: u16,
    metrics_reg: prometheus::Registry,
    graphql_schema: graphql::Schema,
    graphiql: bool,
) -> eyre::Result<(HttpServeFuture, SocketAddr)> {
    let app = axum::Router::new()
        .route("/system/health", axum::routing::get(health_handler))
        .route("/system/metrics", axum::routing::get(metrics_handler))
        .merge(graphql::router(
            HTTP_GRAPHQL_ENDPOINT,
            HTTP_GRAPHQL_SUBSCRIPTION_ENDPOINT,
            graphql_schema.clone(),
            graphiql,
        ))
        .layer(axum::extract::Extension(metrics_reg))
        .layer(axum::extract::Extension(graphql_schema));

    let addr = SocketAddr::from((address, http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let server = axum::serve(listener, app.into_make_service());
    Ok((server, local_addr))
}

#[derive(Serialize)]
pub struct HealthCheckSuccess {
    pub ok: bool,
}

pub async fn health_handler() -> axum::Json<HealthCheckSuccess> {
    axum::Json(HealthCheckSuccess { ok: true })
}

pub async fn metrics_handler(
    axum::extract::Extension(metrics_reg): axum::extract::Extension<prometheus::Registry>,
) -> Result<String, (axum::http::StatusCode, String)> {
    let mut buffer = Vec::new();

    prometheus::TextEncoder::new()
        .encode(&metrics_reg.gather(), &mut buffer)
        .map_err(|e| (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    String::from_utf8(buffer)
        .map_err(|e| (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
