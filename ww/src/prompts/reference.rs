//! Reference travel dataset fed into the itinerary prompt
//!
//! The dataset is YAML so it can be replaced without a rebuild. The embedded
//! default covers Maharashtra.

use std::fmt::Write as _;
use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::Coords;

/// Embedded default dataset
pub const EMBEDDED_GUIDE: &str = r#"version: 1
title: MAHARASHTRA TRAVEL GUIDE
intro: >-
  Expert research on key destinations in Maharashtra. Use it as the primary
  source of information for a high-quality, accurate and appealing itinerary.
destinations:
  - name: Mumbai
    nickname: The City of Dreams
    region: Western Maharashtra
    bestTimeToVisit: November to February
    attractions:
      - name: Gateway of India
        coords: { lat: 18.9220, lng: 72.8347 }
      - name: Marine Drive
      - name: Chhatrapati Shivaji Maharaj Terminus
      - name: Elephanta Caves
    cuisine: [Vada Pav, Pav Bhaji, Bombil Fry]
  - name: Pune
    nickname: The Cultural Capital
    region: Western Maharashtra
    bestTimeToVisit: September to February
    attractions:
      - name: Shaniwar Wada
        coords: { lat: 18.5196, lng: 73.8554 }
      - name: Aga Khan Palace
      - name: Osho Ashram
      - name: Pataleshwar Cave Temple
    cuisine: [Misal Pav, Bhakarwadi, Sabudana Khichdi]
  - name: Aurangabad
    nickname: The Heritage Hub
    region: Marathwada
    bestTimeToVisit: October to March
    attractions:
      - name: Ajanta Caves
      - name: Ellora Caves
        coords: { lat: 20.0259, lng: 75.1773 }
      - name: Bibi Ka Maqbara
      - name: Daulatabad Fort
    cuisine: [Naan Qalia, Puran Poli]
"#;

/// A versioned set of destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGuide {
    pub version: u32,
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub best_time_to_visit: String,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    #[serde(default)]
    pub cuisine: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coords>,
}

impl ReferenceGuide {
    /// The compiled-in Maharashtra dataset
    pub fn embedded() -> Result<Self> {
        serde_yaml::from_str(EMBEDDED_GUIDE).context("Failed to parse embedded reference guide")
    }

    /// Load a dataset file, or the embedded one when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        debug!(?path, "ReferenceGuide::load: called");
        let Some(path) = path else {
            return Self::embedded();
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference guide {}", path.display()))?;
        let guide: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse reference guide {}", path.display()))?;

        info!(
            version = guide.version,
            destinations = guide.destinations.len(),
            "Loaded reference guide from: {}",
            path.display()
        );
        Ok(guide)
    }

    /// Markdown block used inside the itinerary prompt
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.intro.is_empty() {
            let _ = writeln!(out, "{}\n", self.intro);
        }

        for (i, dest) in self.destinations.iter().enumerate() {
            if dest.nickname.is_empty() {
                let _ = writeln!(out, "### {}. {}", i + 1, dest.name);
            } else {
                let _ = writeln!(out, "### {}. {} - {}", i + 1, dest.name, dest.nickname);
            }
            if !dest.region.is_empty() {
                let _ = writeln!(out, "* **Region**: {}", dest.region);
            }
            if !dest.best_time_to_visit.is_empty() {
                let _ = writeln!(out, "* **Best Time to Visit**: {}", dest.best_time_to_visit);
            }
            if !dest.attractions.is_empty() {
                let attractions: Vec<String> = dest.attractions.iter().map(Attraction::label).collect();
                let _ = writeln!(out, "* **Key Attractions**: {}.", attractions.join(", "));
            }
            if !dest.cuisine.is_empty() {
                let _ = writeln!(out, "* **Local Cuisine**: {}.", dest.cuisine.join(", "));
            }
            out.push('\n');
        }

        out.trim_end().to_string()
    }
}

impl Attraction {
    fn label(&self) -> String {
        match self.coords {
            Some(c) => format!("{} (Lat: {:.4}, Lng: {:.4})", self.name, c.lat, c.lng),
            None => self.name.clone(),
        }
    }
}
