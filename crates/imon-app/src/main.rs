//! Input Monitor application entry point.
//!
//! Wires the infrastructure together and hands control to the platform
//! shell:
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML shell settings, defaults on first run
//!  └─ FileBlobStore            -- per-user placement/font persistence
//!  └─ window::win32::run()     -- native window + message loop   (Windows)
//!     window::headless::run()  -- scripted pipeline demo         (elsewhere)
//! ```

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use imon_app::application::preferences::BlobStore;
use imon_app::infrastructure::storage::{load_config, AppConfig, FileBlobStore};
use imon_app::infrastructure::window;

fn main() -> anyhow::Result<()> {
    let (config, config_err) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialise structured logging. The configured level is the default;
    // `RUST_LOG` overrides it.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level)),
        )
        .init();

    if let Some(e) = config_err {
        warn!("failed to load config, using defaults: {e}");
    }
    info!("Input Monitor starting");

    // A missing preference store disables persistence for the session; the
    // monitor itself is unaffected.
    let store: Option<Arc<dyn BlobStore>> = match FileBlobStore::open_default() {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            warn!("preference store unavailable, settings will not persist: {e}");
            None
        }
    };

    #[cfg(target_os = "windows")]
    window::win32::run(&config, store)?;

    #[cfg(not(target_os = "windows"))]
    window::headless::run(&config, store);

    info!("Input Monitor stopped");
    Ok(())
}
