//! Itinerary records produced by the planner

use serde::{Deserialize, Serialize};

/// A full multi-day travel plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub trip_title: String,
    pub best_time_to_visit: String,
    pub days: Vec<DayPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_forecast: Option<WeatherForecast>,
}

impl Itinerary {
    /// Look up a day by its day number
    pub fn day(&self, number: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == number)
    }

    /// True when days are numbered 1..=N in ascending order
    pub fn is_sequential(&self) -> bool {
        self.days.iter().enumerate().all(|(i, d)| d.day as usize == i + 1)
    }

    /// Image of the first day, used as the storybook cover
    pub fn cover_image(&self) -> Option<&str> {
        self.days.first().map(|d| d.day_image.as_str())
    }
}

/// One day of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    pub title: String,
    pub day_image: String,
    pub coords: Coords,
    pub activities: Vec<Activity>,
    pub food_suggestion: FoodSuggestion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_suggestion: Option<NearbySuggestion>,
}

/// Geographic position of a day's main attraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    /// OpenStreetMap link centered on this position
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=14/{lat}/{lng}",
            lat = self.lat,
            lng = self.lng
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Free text such as "9:00 AM" or "Afternoon"
    pub time: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A local dish for the day
///
/// `image_url` never comes from the model; it is filled from the food image catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSuggestion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySuggestion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub day_of_week: String,
    pub icon: WeatherIcon,
    pub high_temp: f64,
    pub low_temp: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    PartlyCloudy,
    Rain,
    Storm,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "tripTitle": "Coastal Goa",
            "bestTimeToVisit": "November to February",
            "days": [
                {
                    "day": 1,
                    "title": "Beaches of the North",
                    "dayImage": "https://example.com/baga.jpg",
                    "coords": { "lat": 15.5553, "lng": 73.7517 },
                    "activities": [
                        { "time": "9:00 AM", "description": "Walk along Baga Beach", "location": "Baga" },
                        { "time": "Evening", "description": "Sunset at Chapora Fort" }
                    ],
                    "foodSuggestion": { "name": "Fish Curry Rice", "description": "Tangy coconut curry" },
                    "nearbySuggestion": { "name": "Anjuna Flea Market", "description": "Wednesday market" }
                }
            ]
        }"#
    }

    #[test]
    fn test_deserialize_model_output() {
        let itinerary: Itinerary = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(itinerary.trip_title, "Coastal Goa");
        assert_eq!(itinerary.days.len(), 1);

        let day = &itinerary.days[0];
        assert_eq!(day.activities[0].location.as_deref(), Some("Baga"));
        assert!(day.activities[1].location.is_none());
        // Image is resolved locally, so the model output leaves it empty
        assert_eq!(day.food_suggestion.image_url, "");
        assert!(itinerary.weather_forecast.is_none());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let itinerary: Itinerary = serde_json::from_str(sample_json()).unwrap();
        let value = serde_json::to_value(&itinerary).unwrap();
        assert!(value.get("tripTitle").is_some());
        assert!(value["days"][0].get("dayImage").is_some());
        assert!(value["days"][0]["foodSuggestion"].get("imageUrl").is_some());
        assert!(value.get("weatherForecast").is_none());
    }

    #[test]
    fn test_is_sequential() {
        let mut itinerary: Itinerary = serde_json::from_str(sample_json()).unwrap();
        assert!(itinerary.is_sequential());

        let mut second = itinerary.days[0].clone();
        second.day = 3;
        itinerary.days.push(second);
        assert!(!itinerary.is_sequential());
    }

    #[test]
    fn test_day_lookup_and_cover() {
        let itinerary: Itinerary = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(itinerary.day(1).map(|d| d.title.as_str()), Some("Beaches of the North"));
        assert!(itinerary.day(2).is_none());
        assert_eq!(itinerary.cover_image(), Some("https://example.com/baga.jpg"));
    }

    #[test]
    fn test_weather_icon_names() {
        let icon: WeatherIcon = serde_json::from_str("\"partly-cloudy\"").unwrap();
        assert_eq!(icon, WeatherIcon::PartlyCloudy);
    }

    #[test]
    fn test_map_url() {
        let coords = Coords { lat: 18.922, lng: 72.8347 };
        let url = coords.map_url();
        assert!(url.contains("mlat=18.922"));
        assert!(url.contains("mlon=72.8347"));
    }
}
