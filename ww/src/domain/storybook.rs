//! Storybook records: a diary-style retelling of an itinerary

use serde::{Deserialize, Serialize};

use super::Itinerary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storybook {
    pub title: String,
    pub cover_image: String,
    pub pages: Vec<StorybookPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorybookPage {
    pub day: u32,
    pub title: String,
    pub narrative: String,
    pub image: String,
}

impl Storybook {
    /// Differences between this storybook and the itinerary it retells
    ///
    /// Empty when there is one page per day and the cover is the first day's image.
    pub fn mismatches(&self, itinerary: &Itinerary) -> Vec<String> {
        let mut issues = Vec::new();

        if self.pages.len() != itinerary.days.len() {
            issues.push(format!(
                "{} pages for {} itinerary days",
                self.pages.len(),
                itinerary.days.len()
            ));
        }

        if let Some(cover) = itinerary.cover_image()
            && self.cover_image != cover
        {
            issues.push(format!("cover image {} is not the day 1 image {}", self.cover_image, cover));
        }

        issues
    }
}
