use clap::Parser;
use tokio::net::TcpListener;

use godown::logger::Logger;
use godown::{create_app, AppState, Cli, Config, ServeError};

#[tokio::main]
async fn main() -> Result<(), ServeError> {
    if let Err(e) = Logger::init() {
        eprintln!("failed to install logger: {}", e);
    }

    let config = Config::from_env(Cli::parse())?;
    match &config.style_path {
        None => log::info!("Using embedded CSS"),
        Some(path) => log::info!("Using custom CSS: {}", path.display()),
    }

    let addr = config.socket_addr()?;
    let index = config.index_file.clone();
    let state = AppState::new(config)?;

    let listener = TcpListener::bind(addr).await?;
    log::info!("Serving Markdown files from {} on http://{}", state.root.display(), addr);
    log::info!("Index: {}", index);
    axum::serve(listener, create_app(state)).await.map_err(ServeError::from)
}
