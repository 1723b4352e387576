//! Response schemas for structured model output
//!
//! Schemas use the OpenAPI subset accepted by Gemini's `responseSchema`
//! (uppercase type names). The same declarations are used to validate what
//! comes back before it is deserialized.

mod validate;

pub use validate::{SchemaViolation, validate};

use serde_json::{Value, json};

/// Day numbers are stored as `u32`
const MAX_DAY: u32 = u32::MAX;

/// Expected shape of an itinerary response
///
/// `foodSuggestion` deliberately has no image field; images are resolved locally.
pub fn itinerary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tripTitle": {
                "type": "STRING",
                "description": "A creative, exciting title for the trip, e.g. 'An Unforgettable 7-Day Journey Through Maharashtra'."
            },
            "bestTimeToVisit": {
                "type": "STRING",
                "description": "One consolidated best time to visit covering every planned location, e.g. 'September to March'."
            },
            "days": {
                "type": "ARRAY",
                "description": "One entry per day of the trip.",
                "minItems": 1,
                "items": day_schema()
            }
        },
        "required": ["tripTitle", "days", "bestTimeToVisit"]
    })
}

fn day_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "day": {
                "type": "INTEGER",
                "description": "The day number, starting from 1.",
                "minimum": 1,
                "maximum": MAX_DAY
            },
            "title": { "type": "STRING", "description": "A short, catchy title for the day's theme." },
            "dayImage": {
                "type": "STRING",
                "description": "Publicly accessible URL of a high-quality image of the day's main attraction."
            },
            "coords": {
                "type": "OBJECT",
                "description": "Latitude and longitude of the day's main attraction.",
                "properties": {
                    "lat": { "type": "NUMBER", "description": "Latitude of the location." },
                    "lng": { "type": "NUMBER", "description": "Longitude of the location." }
                },
                "required": ["lat", "lng"]
            },
            "activities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "time": { "type": "STRING", "description": "Suggested time, e.g. '9:00 AM' or 'Afternoon'." },
                        "description": { "type": "STRING", "description": "What to do." },
                        "location": { "type": "STRING", "description": "Specific place or address, if applicable." }
                    },
                    "required": ["time", "description"]
                }
            },
            "foodSuggestion": {
                "type": "OBJECT",
                "description": "One local dish. Name and description only.",
                "properties": {
                    "name": { "type": "STRING", "description": "Name of the dish, e.g. 'Vada Pav'." },
                    "description": { "type": "STRING", "description": "A short, enticing description." }
                },
                "required": ["name", "description"]
            },
            "nearbySuggestion": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "Name of the suggested place." },
                    "description": { "type": "STRING", "description": "Why it is a must-visit." }
                }
            }
        },
        "required": ["day", "title", "dayImage", "coords", "activities", "foodSuggestion"]
    })
}

/// Expected shape of a storybook response
pub fn storybook_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "An evocative storybook title based on the original trip title."
            },
            "coverImage": {
                "type": "STRING",
                "description": "URL of the first itinerary day's image, used as the cover."
            },
            "pages": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER", "minimum": 1, "maximum": MAX_DAY },
                        "title": { "type": "STRING" },
                        "narrative": {
                            "type": "STRING",
                            "description": "A short, emotional, diary-style story (2-3 paragraphs) of the day, personalized to the user's interests."
                        },
                        "image": { "type": "STRING", "description": "URL of that day's image." }
                    },
                    "required": ["day", "title", "narrative", "image"]
                }
            }
        },
        "required": ["title", "coverImage", "pages"]
    })
}
