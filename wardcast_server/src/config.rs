use std::net::SocketAddr;
use std::path::PathBuf;

use wardcast_features::encode::{ASSUME_HOLIDAY, DEFAULT_STAFF_AVAILABLE};

/// Stand-in values for inputs the service does not source yet. Named here
/// so wiring in a holiday calendar or staffing feed later is a config
/// change, not a handler rewrite.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub staff_available: f64,
    pub assume_holiday: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            staff_available: DEFAULT_STAFF_AVAILABLE,
            assume_holiday: ASSUME_HOLIDAY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub models_dir: PathBuf,
    pub defaults: Defaults,
}

impl ServerConfig {
    /// `WARDCAST_ADDR` and `WARDCAST_MODELS_DIR` override the defaults.
    pub fn from_env() -> Self {
        let addr = std::env::var("WARDCAST_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 5328)));
        let models_dir = std::env::var("WARDCAST_MODELS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("models"));
        Self {
            addr,
            models_dir,
            defaults: Defaults::default(),
        }
    }
}
