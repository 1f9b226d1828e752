use crate::api::{SharedApi, UNAUTH_RELOGIN};
use crate::app::App;
use anyhow::{bail, Result};
use plan_items::ApiError;
use tracing::{info, warn};

/// First load of the trip. An expired session aborts before the terminal
/// is taken over; other failures start with an empty trip.
pub async fn initialize_app_state(app: &mut App, api: &SharedApi) -> Result<()> {
    app.is_loading = true;

    match api.list_plan_items(&app.trip_id).await {
        Ok(items) => {
            info!(trip_id = %app.trip_id, count = items.len(), "loaded trip");
            app.set_items(items);
        }
        Err(ApiError::Unauthorized) => bail!(UNAUTH_RELOGIN),
        Err(e) => {
            warn!(error = %e, "could not load plan items");
            eprintln!("Warning: Could not load plan items: {}", e);
            app.set_status(format!("No se pudieron cargar los elementos: {}", e));
        }
    }

    app.is_loading = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DevBackend, DEV_TRIP_ID};
    use crate::config::TripConfig;
    use std::sync::Arc;
    use time::macros::offset;

    #[tokio::test]
    async fn loads_the_seeded_trip() {
        let api: SharedApi = Arc::new(DevBackend::new());
        let mut app = App::new(DEV_TRIP_ID, &TripConfig::default(), offset!(UTC));
        initialize_app_state(&mut app, &api).await.unwrap();
        assert!(!app.items.is_empty());
        assert!(!app.days.is_empty());
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn unknown_trip_starts_empty_with_status() {
        let api: SharedApi = Arc::new(DevBackend::empty());
        let mut app = App::new("nope", &TripConfig::default(), offset!(UTC));
        initialize_app_state(&mut app, &api).await.unwrap();
        assert!(app.items.is_empty());
        assert!(app.status_message.is_some());
    }
}
