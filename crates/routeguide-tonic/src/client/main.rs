use clap::Parser;
use routeguide_tonic::client;
use routeguide_tonic_core::{proto::route_guide_client::RouteGuideClient, routeguide::FeatureStore};
use std::path::PathBuf;
use tonic::codec::CompressionEncoding;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "routeguide-client",
    version,
    about = "Runs each RouteGuide RPC once against a server"
)]
struct ClientArgs {
    /// Server to connect to.
    ///
    /// Environment variable: `ROUTE_GUIDE_URL`
    #[arg(long, env = "ROUTE_GUIDE_URL", default_value_t = String::from("http://127.0.0.1:50051"))]
    server_url: String,

    /// Local copy of the feature database the random route is drawn from.
    ///
    /// Environment variable: `ROUTE_GUIDE_DB`
    #[arg(long, env = "ROUTE_GUIDE_DB", default_value = "data/route_guide_db.json")]
    database_path: PathBuf,

    /// Number of points sent by RecordRoute.
    #[arg(long, default_value_t = 10)]
    route_points: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = ClientArgs::parse();

    let store = FeatureStore::load(&args.database_path)?;
    let client = RouteGuideClient::connect(args.server_url)
        .await?
        .send_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Zstd);

    let report = client::run(client, &store, args.route_points).await?;
    println!(
        "\nDone: {} named lookups, {} listed, {} route points, {} echoes",
        report.found.len(),
        report.listed,
        report.route.point_count,
        report.echoes.len()
    );

    Ok(())
}
