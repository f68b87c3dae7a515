//! termpaste binary entry point.

use std::sync::Arc;

use termpaste::{cli, logging, transport, AppState, Config, FileStore, SessionManager};
use tracing::info;

#[tokio::main]
async fn main() -> termpaste::Result<()> {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("termpaste: {e}");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }
    if args.version {
        println!("termpaste {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("termpaste: {e}");
            std::process::exit(2);
        }
    };
    let server_config = match config.to_server_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            eprintln!("termpaste: {e}");
            std::process::exit(2);
        }
    };

    logging::init(config.log_filter());
    info!("termpaste v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(FileStore::open(&config.store.path).await?);
    info!("paste store opened at {}", config.store.path.display());

    let manager = Arc::new(SessionManager::new(store));
    transport::serve(server_config, AppState { manager }).await
}
