//! Server-side components of the RouteGuide service.
//!
//! ## Submodules
//!
//! - [`config`] - CLI / environment configuration.
//! - [`service`] - the `RouteGuide` gRPC handlers and stream lifecycle
//!   tracking.
//! - [`streaming`] - producer tasks that feed response streams.
//! - [`telemetry`] - tracing subscriber and optional OpenTelemetry export.
//!
//! [`serve`] wires them together behind health, reflection, gRPC-Web and CORS
//! and is what the `routeguide-server` binary runs.

pub mod config;
pub mod service;
pub mod streaming;
pub mod telemetry;

use crate::server::service::handler::RouteGuideService;
use futures::Stream;
use routeguide_tonic_core::proto::{FILE_DESCRIPTOR_SET, route_guide_server::RouteGuideServer};
use tokio::io::{AsyncRead, AsyncWrite};
use tonic::transport::server::Connected;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Serves `service` on `incoming` until `signal` resolves.
///
/// Once the signal fires the health status is set to `NOT_SERVING` and
/// [`RouteGuideService::shutdown`] drains in-flight streams before the
/// transport stops accepting connections.
pub async fn serve<I, IO, IE, F>(
    service: RouteGuideService,
    incoming: I,
    signal: F,
) -> anyhow::Result<()>
where
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<RouteGuideServer<RouteGuideService>>()
        .await;

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let drain = {
        let service = service.clone();
        async move {
            signal.await;
            tracing::info!("Shutdown signal received, terminating gracefully...");

            health_reporter
                .set_not_serving::<RouteGuideServer<RouteGuideService>>()
                .await;

            if let Err(e) = service.shutdown().await {
                tracing::error!("Error during service shutdown: {:?}", e);
            }
        }
    };

    Server::builder()
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_route_guide_service(service))
        .serve_with_incoming_shutdown(incoming, drain)
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

fn build_route_guide_service(service: RouteGuideService) -> RouteGuideServer<RouteGuideService> {
    RouteGuideServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}
