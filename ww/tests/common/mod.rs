//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use wanderwise::auth::MockAuthenticator;
use wanderwise::gateway::TripGateway;
use wanderwise::llm::{GenerateRequest, GenerateResponse, LlmClient, LlmError};
use wanderwise::session::SessionController;

/// LLM client that replays scripted answers and records every request
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(GenerateResponse::from_text(text)),
            Some(Err(message)) => Err(LlmError::ApiError { status: 500, message }),
            None => Err(LlmError::InvalidResponse("script exhausted".to_string())),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

pub fn controller(client: Arc<ScriptedClient>) -> SessionController {
    let gateway = TripGateway::with_defaults(client).unwrap();
    SessionController::new(Arc::new(gateway), Arc::new(MockAuthenticator))
}

pub fn day(n: u32, title: &str, food: &str) -> Value {
    json!({
        "day": n,
        "title": title,
        "dayImage": format!("https://example.com/day{}.jpg", n),
        "coords": { "lat": 15.5 + n as f64 / 100.0, "lng": 73.8 },
        "activities": [
            { "time": "9:00 AM", "description": format!("Morning on day {}", n) },
            { "time": "Evening", "description": "Sunset walk", "location": "Miramar" }
        ],
        "foodSuggestion": { "name": food, "description": "A local favourite" },
        "nearbySuggestion": { "name": "Dona Paula", "description": "Viewpoint" }
    })
}

pub fn itinerary_json(title: &str, foods: &[&str]) -> String {
    let days: Vec<Value> = foods
        .iter()
        .enumerate()
        .map(|(i, f)| day(i as u32 + 1, &format!("Day {} of {}", i + 1, title), f))
        .collect();
    json!({
        "tripTitle": title,
        "bestTimeToVisit": "November to February",
        "days": days
    })
    .to_string()
}

pub fn storybook_json(days: u32) -> String {
    let pages: Vec<Value> = (1..=days)
        .map(|n| {
            json!({
                "day": n,
                "title": format!("Page {}", n),
                "narrative": "The sea was silver that morning...",
                "image": format!("https://example.com/day{}.jpg", n)
            })
        })
        .collect();
    json!({
        "title": "Salt, Sun and Stories",
        "coverImage": "https://example.com/day1.jpg",
        "pages": pages
    })
    .to_string()
}
