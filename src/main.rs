use axum::{
    Router,
    extract::Extension,
    routing::get,
};
use practice_directory::directory::loader::{DATASET_CANDIDATES, DirectoryStore};
use practice_directory::search::handlers::handle_search;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "127.0.0.1:8080".parse()?;
    let mut data_paths: Vec<PathBuf> = vec![];

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--data" => {
                data_paths.push(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: {} [--bind <addr:port>] [--data <dataset.csv>]",
                    args[0]
                );
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    // Paths given on the command line take priority over the defaults.
    let mut candidates = data_paths;
    candidates.extend(DATASET_CANDIDATES.iter().map(PathBuf::from));

    let store = Arc::new(DirectoryStore::new(candidates));

    let app = Router::new()
        .route("/search", get(handle_search))
        .layer(Extension(store));

    tracing::info!("Practice directory search listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
