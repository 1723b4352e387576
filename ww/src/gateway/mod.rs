//! AI gateway: the three trip operations over an LLM client
//!
//! Each operation builds its prompt, makes exactly one model call, and turns
//! the answer into a domain record. Any failure becomes a single
//! operation-specific [`GatewayError`]; the underlying cause is logged.

mod error;
mod food;

pub use error::{FailureKind, GatewayError};
pub use food::{DEFAULT_FOOD_IMAGE, FoodImageCatalog};

use std::sync::Arc;

use eyre::{Context, Result as EyreResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::{Itinerary, StoryTheme, Storybook, TripDetails};
use crate::llm::{GenerateRequest, LlmClient, create_client};
use crate::prompts::{PromptLoader, ReferenceGuide};
use crate::schema;
use error::Failure;

/// Phrases a story should not open with
const FRAMING_PREFIXES: &[&str] = &["here is ", "here's "];

/// Gateway between the session and the generative model
pub struct TripGateway {
    client: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    guide: ReferenceGuide,
    food: FoodImageCatalog,
}

impl TripGateway {
    pub fn new(client: Arc<dyn LlmClient>, prompts: PromptLoader, guide: ReferenceGuide, food: FoodImageCatalog) -> Self {
        Self {
            client,
            prompts,
            guide,
            food,
        }
    }

    /// Gateway with embedded prompts, the embedded guide and built-in food images
    pub fn with_defaults(client: Arc<dyn LlmClient>) -> EyreResult<Self> {
        Ok(Self::new(
            client,
            PromptLoader::embedded_only(),
            ReferenceGuide::embedded()?,
            FoodImageCatalog::builtin(),
        ))
    }

    /// Build the client and every collaborator from configuration
    pub fn from_config(config: &Config) -> EyreResult<Self> {
        debug!(provider = %config.llm.provider, "TripGateway::from_config: called");
        let client = create_client(&config.llm).context("Failed to create LLM client")?;
        let guide = ReferenceGuide::load(config.reference.expanded_path().as_deref())?;
        let prompts = PromptLoader::new(config.prompts.expanded_dir());
        let food = FoodImageCatalog::from_config(&config.food_images);
        info!(model = %client.model(), "Gateway ready");
        Ok(Self::new(client, prompts, guide, food))
    }

    pub fn guide(&self) -> &ReferenceGuide {
        &self.guide
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Plan a multi-day trip
    ///
    /// Food images are filled from the catalog, never from the model.
    pub async fn generate_itinerary(&self, details: &TripDetails) -> Result<Itinerary, GatewayError> {
        debug!(destination = %details.destination, duration = %details.duration, "generate_itinerary: called");
        match self.itinerary(details).await {
            Ok(itinerary) => {
                info!(trip_title = %itinerary.trip_title, days = itinerary.days.len(), "Itinerary generated");
                Ok(itinerary)
            }
            Err(Failure { kind, detail }) => {
                error!(%kind, %detail, "Error generating itinerary");
                Err(GatewayError::Itinerary { kind, detail })
            }
        }
    }

    /// Narrate a ~150 word story about a landmark
    pub async fn generate_story(&self, poi: &str, theme: StoryTheme) -> Result<String, GatewayError> {
        debug!(%poi, %theme, "generate_story: called");
        match self.story(poi, theme).await {
            Ok(story) => {
                info!(%poi, %theme, words = story.split_whitespace().count(), "Story generated");
                Ok(story)
            }
            Err(Failure { kind, detail }) => {
                error!(%poi, %kind, %detail, "Error generating story");
                Err(GatewayError::Story { theme, kind, detail })
            }
        }
    }

    /// Retell an itinerary as a diary-style storybook
    pub async fn generate_storybook(
        &self,
        itinerary: &Itinerary,
        details: &TripDetails,
    ) -> Result<Storybook, GatewayError> {
        debug!(trip_title = %itinerary.trip_title, "generate_storybook: called");
        match self.storybook(itinerary, details).await {
            Ok(book) => {
                info!(title = %book.title, pages = book.pages.len(), "Storybook generated");
                Ok(book)
            }
            Err(Failure { kind, detail }) => {
                error!(%kind, %detail, "Error generating storybook");
                Err(GatewayError::Storybook { kind, detail })
            }
        }
    }

    async fn itinerary(&self, details: &TripDetails) -> Result<Itinerary, Failure> {
        let prompt = self
            .prompts
            .itinerary_prompt(details, &self.guide)
            .map_err(|e| Failure::new(FailureKind::Prompt, e.to_string()))?;

        let mut itinerary: Itinerary = self.request_record(prompt, schema::itinerary_schema()).await?;

        if itinerary.days.is_empty() {
            return Err(Failure::new(FailureKind::Schema, "itinerary has no days"));
        }

        for day in &mut itinerary.days {
            let food = &mut day.food_suggestion;
            food.image_url = self.food.resolve(&food.name).to_string();
        }

        if !itinerary.is_sequential() {
            let order: Vec<u32> = itinerary.days.iter().map(|d| d.day).collect();
            warn!(?order, "generate_itinerary: days are not numbered 1..N");
        }

        Ok(itinerary)
    }

    async fn story(&self, poi: &str, theme: StoryTheme) -> Result<String, Failure> {
        let prompt = self
            .prompts
            .story_prompt(poi, theme)
            .map_err(|e| Failure::new(FailureKind::Prompt, e.to_string()))?;

        let response = self.client.generate(GenerateRequest::text(prompt)).await?;
        let story = response.text.trim();
        if story.is_empty() {
            return Err(Failure::new(FailureKind::Empty, "model returned no story text"));
        }

        if has_framing(story) {
            warn!(%poi, "generate_story: story opens with a framing phrase");
        }

        Ok(story.to_string())
    }

    async fn storybook(&self, itinerary: &Itinerary, details: &TripDetails) -> Result<Storybook, Failure> {
        let prompt = self
            .prompts
            .storybook_prompt(itinerary, details)
            .map_err(|e| Failure::new(FailureKind::Prompt, e.to_string()))?;

        let book: Storybook = self.request_record(prompt, schema::storybook_schema()).await?;

        for issue in book.mismatches(itinerary) {
            warn!(%issue, "generate_storybook: storybook does not match itinerary");
        }

        Ok(book)
    }

    /// One schema-constrained call: trim, parse, validate, deserialize
    async fn request_record<T: DeserializeOwned>(&self, prompt: String, schema: Value) -> Result<T, Failure> {
        let response = self.client.generate(GenerateRequest::json(prompt, schema.clone())).await?;

        let text = response.text.trim();
        if text.is_empty() {
            return Err(Failure::new(FailureKind::Empty, "model returned no text"));
        }

        let value: Value =
            serde_json::from_str(text).map_err(|e| Failure::new(FailureKind::Parse, format!("invalid JSON: {}", e)))?;

        schema::validate(&value, &schema).map_err(|violations| Failure::schema(&violations))?;

        serde_json::from_value(value).map_err(|e| Failure::new(FailureKind::Parse, e.to_string()))
    }
}

/// True when text opens with a phrase like "Here is the story:"
pub fn has_framing(text: &str) -> bool {
    let lower = text.trim_start().to_lowercase();
    FRAMING_PREFIXES.iter().any(|p| lower.starts_with(p))
}
