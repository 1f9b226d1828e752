mod dev_backend;

use anyhow::{Context, Result};
use plan_items::{PlanItemsApi, PlanItemsClient};
use std::sync::Arc;

use crate::config::TripConfig;
use crate::session_store;

pub use dev_backend::{DevBackend, DEV_TRIP_ID};

/// Backend handle shared between the event loop and submission tasks.
pub type SharedApi = Arc<dyn PlanItemsApi>;

pub const UNAUTH_RELOGIN: &str =
    "Sesión caducada o inválida. Ejecuta `trip-tui login --token <id>`.";

/// Client for the configured backend, authenticated with the stored session
/// when there is one.
pub fn connect(cfg: &TripConfig) -> Result<SharedApi> {
    let session = session_store::load_session()?;
    let client = PlanItemsClient::new(&cfg.api_url, session.as_deref())
        .with_context(|| format!("Failed to create client for {}", cfg.api_url))?;
    Ok(Arc::new(client))
}

pub fn dev() -> SharedApi {
    Arc::new(DevBackend::new())
}
