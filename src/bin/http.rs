#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use planning_board::{BoardConfig, BoardDataset, DatasetSource, JsonDataset, http_api};

    tracing_subscriber::fmt::init();

    let addr: SocketAddr = std::env::var("PLANNING_BOARD_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = match std::env::var("PLANNING_BOARD_CONFIG") {
        Ok(path) => {
            tracing::info!("loading board config from {path}");
            BoardConfig::load(path)?
        }
        Err(_) => BoardConfig::default(),
    };

    let dataset = match std::env::var("PLANNING_BOARD_DATA") {
        Ok(path) => {
            let dataset = JsonDataset { path: path.into() }.load_dataset()?;
            tracing::info!(
                resources = dataset.resources.len(),
                bookings = dataset.bookings.len(),
                "dataset loaded"
            );
            dataset
        }
        Err(_) => {
            tracing::warn!("PLANNING_BOARD_DATA not set, serving an empty board");
            BoardDataset::default()
        }
    };

    http_api::serve(addr, dataset, config).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
