//! Writing a trip to disk as JSON

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Itinerary, Storybook, TripDetails};

/// Everything saved for a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_details: Option<TripDetails>,
    pub itinerary: Itinerary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storybook: Option<Storybook>,
}

/// `trip-<YYYYmmdd-HHMMSS>.json`
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("trip-{}.json", now.format("%Y%m%d-%H%M%S"))
}

/// Write the export as pretty JSON; `None` picks a timestamped name in the current directory
pub fn save(export: &TripExport, path: Option<&Path>) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_file_name(Local::now())));

    let json = serde_json::to_string_pretty(export).context("Failed to serialize trip")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), days = export.itinerary.days.len(), "Trip saved");
    Ok(path)
}

/// Read an itinerary file
///
/// Accepts either a full export or a bare itinerary.
pub fn load_itinerary(path: &Path) -> Result<TripExport> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    if value.get("itinerary").is_some() {
        return serde_json::from_value(value).context("Failed to read trip export");
    }

    let itinerary: Itinerary = serde_json::from_value(value).context("Failed to read itinerary")?;
    Ok(TripExport {
        trip_details: None,
        itinerary,
        storybook: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn itinerary() -> Itinerary {
        serde_json::from_value(serde_json::json!({
            "tripTitle": "Heritage Hub",
            "bestTimeToVisit": "October to March",
            "days": [{
                "day": 1,
                "title": "Ellora",
                "dayImage": "https://example.com/ellora.jpg",
                "coords": { "lat": 20.0259, "lng": 75.1773 },
                "activities": [],
                "foodSuggestion": { "name": "Naan Qalia", "description": "Stew", "imageUrl": "https://i.ytimg.com/vi/i7N8ih_m-18/maxresdefault.jpg" }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_default_file_name() {
        let now = Local.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(default_file_name(now), "trip-20260309-140507.json");
    }

    #[test]
    fn test_save_and_load_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");
        let export = TripExport {
            trip_details: Some(TripDetails::new("Maharashtra", "1 days", "caves")),
            itinerary: itinerary(),
            storybook: None,
        };

        let written = save(&export, Some(&path)).unwrap();
        assert_eq!(written, path);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"tripDetails\""));
        assert!(!content.contains("\"storybook\""));

        assert_eq!(load_itinerary(&path).unwrap(), export);
    }

    #[test]
    fn test_load_bare_itinerary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.json");
        fs::write(&path, serde_json::to_string(&itinerary()).unwrap()).unwrap();

        let export = load_itinerary(&path).unwrap();
        assert!(export.trip_details.is_none());
        assert_eq!(export.itinerary.trip_title, "Heritage Hub");
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_itinerary(&path).is_err());
    }
}
