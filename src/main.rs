mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use carrental_client::config::StoreKind;
use carrental_client::navigation::LogNavigator;
use carrental_client::notify::{ConsoleNotifier, Notification, Notifier};
use carrental_client::session::{FileStore, MemoryStore, StorageError, TokenStore};
use carrental_client::{AuthService, Config};
use clap::Parser;

fn open_store(kind: StoreKind) -> Result<Arc<dyn TokenStore>, StorageError> {
    match kind {
        StoreKind::File => {
            let store = FileStore::default_location()?;
            log::debug!("Using token file {}", store.path().display());
            Ok(Arc::new(store))
        }
        #[cfg(feature = "keyring-store")]
        StoreKind::Keyring => Ok(Arc::new(carrental_client::session::KeyringStore::new())),
        #[cfg(not(feature = "keyring-store"))]
        StoreKind::Keyring => Err(StorageError::OperationFailed(
            "keyring support was not compiled in".to_string(),
        )),
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env in the working directory; shares VITE_* vars with the web front end
    let _ = dotenvy::dotenv();

    env_logger::init();

    let args = cli::Args::parse();
    let notifier = ConsoleNotifier;

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            notifier.notify(Notification::error(format!("Invalid configuration: {}", e)));
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = args.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(store) = args.store {
        config.store = store;
    }
    log::info!("Using API at {}", config.api_base_url);

    let auth = match open_store(config.store)
        .and_then(|store| AuthService::new(&config, store, Arc::new(LogNavigator)))
    {
        Ok(auth) => auth,
        Err(e) => {
            notifier.notify(Notification::error(format!("Failed to open session: {}", e)));
            return ExitCode::FAILURE;
        }
    };

    match commands::run(args.command, &auth, &config).await {
        Ok(message) => {
            notifier.notify(Notification::success(message));
            ExitCode::SUCCESS
        }
        Err(message) => {
            notifier.notify(Notification::error(message));
            ExitCode::FAILURE
        }
    }
}
