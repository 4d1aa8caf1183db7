//! Static-map integration.
//!
//! Venue add/edit fetches a map image for the address inline; failures are
//! logged and swallowed so they never block the already-committed DB write.

use std::path::PathBuf;

use crate::{config::AppConfig, models::VenueKind};

pub fn map_url(api_key: &str, address: &str, city: &str, state: &str) -> String {
    let base = format!("https://www.mapquestapi.com/staticmap/v5/map?key={api_key}");
    let center = format!("{address},{city},{state}");
    format!("{base}&center={center}&size=@2x&zoom=15&locations={center}")
}

/// Cafes and restaurants draw ids from independent sequences, so each kind
/// gets its own subdirectory.
fn map_path(config: &AppConfig, kind: VenueKind, id: i32) -> PathBuf {
    config
        .maps_dir
        .join(kind.plural())
        .join(format!("{id}.jpg"))
}

pub async fn save_map(
    config: &AppConfig,
    kind: VenueKind,
    id: i32,
    address: &str,
    city: &str,
    state: &str,
) {
    let Some(api_key) = config.mapquest_api_key.as_deref() else {
        tracing::debug!(id, "MAPQUEST_API_KEY not set, skipping map fetch");
        return;
    };

    let url = map_url(api_key, address, city, state);
    let response = match reqwest::get(&url).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, id, "map fetch failed");
            return;
        }
    };

    if !response.status().is_success() {
        tracing::warn!(status = %response.status(), id, "map fetch returned non-success");
        return;
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, id, "failed to read map response body");
            return;
        }
    };

    let path = map_path(config, kind, id);
    if let Some(parent) = path.parent() {
        if let Err(err) = tokio::fs::create_dir_all(parent).await {
            tracing::warn!(error = %err, path = %parent.display(), "failed to create maps directory");
            return;
        }
    }
    if let Err(err) = tokio::fs::write(&path, &bytes).await {
        tracing::warn!(error = %err, path = %path.display(), "failed to write map image");
    }
}

/// Best-effort removal; a missing file is fine, anything else is logged.
pub async fn delete_map(config: &AppConfig, kind: VenueKind, id: i32) {
    let path = map_path(config, kind, id);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "failed to delete map image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_url_carries_key_center_and_zoom() {
        let url = map_url("test-key", "500 Sansome St", "San Francisco", "CA");
        assert!(url.starts_with("https://www.mapquestapi.com/staticmap/v5/map?key=test-key"));
        assert!(url.contains("center=500 Sansome St,San Francisco,CA"));
        assert!(url.contains("zoom=15"));
        assert!(url.contains("locations=500 Sansome St,San Francisco,CA"));
    }

    #[test]
    fn map_paths_are_namespaced_by_kind() {
        let config = AppConfig {
            database_url: String::new(),
            host: String::new(),
            port: 0,
            mapquest_api_key: None,
            maps_dir: PathBuf::from("static/maps"),
        };
        assert_eq!(
            map_path(&config, VenueKind::Cafe, 7),
            PathBuf::from("static/maps/cafes/7.jpg")
        );
        assert_eq!(
            map_path(&config, VenueKind::Restaurant, 7),
            PathBuf::from("static/maps/restaurants/7.jpg")
        );
    }
}
