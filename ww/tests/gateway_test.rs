//! Gateway behavior through the public API

mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use common::{ScriptedClient, itinerary_json, storybook_json};
use proptest::prelude::*;
use wanderwise::config::FoodImagesConfig;
use wanderwise::domain::{StoryTheme, TripDetails};
use wanderwise::gateway::{DEFAULT_FOOD_IMAGE, FailureKind, FoodImageCatalog, TripGateway};
use wanderwise::prompts::{PromptLoader, ReferenceGuide};

fn details() -> TripDetails {
    TripDetails::new("Maharashtra", "3 days", "Primary interest is Historical Sites.")
}

fn gateway(client: Arc<ScriptedClient>) -> TripGateway {
    TripGateway::with_defaults(client).unwrap()
}

#[tokio::test]
async fn test_itinerary_request_carries_schema_and_guide() {
    let client = Arc::new(ScriptedClient::new().reply(itinerary_json("Forts and Feasts", &["Misal Pav"])));
    gateway(client.clone()).generate_itinerary(&details()).await.unwrap();

    let request = &client.requests()[0];
    let schema = request.response_schema.as_ref().unwrap();
    assert_eq!(schema["properties"]["days"]["minItems"], 1);
    assert!(request.prompt.contains("Shaniwar Wada (Lat: 18.5196, Lng: 73.8554)"));
}

#[tokio::test]
async fn test_failure_kinds_are_distinguished() {
    let cases = [
        (ScriptedClient::new().fail("boom"), FailureKind::Service),
        (ScriptedClient::new().reply(""), FailureKind::Empty),
        (ScriptedClient::new().reply("not json"), FailureKind::Parse),
        (
            ScriptedClient::new().reply(r#"{"tripTitle":"t","days":[]}"#),
            FailureKind::Schema,
        ),
    ];

    for (client, kind) in cases {
        let err = gateway(Arc::new(client)).generate_itinerary(&details()).await.unwrap_err();
        assert_eq!(err.kind(), kind);
        assert_eq!(
            err.to_string(),
            "Failed to communicate with the AI planner. The itinerary could not be generated."
        );
    }
}

#[tokio::test]
async fn test_story_for_gateway_of_india() {
    let client = Arc::new(ScriptedClient::new().reply("\n\nIn 1911, a king sailed into the harbour...\n"));
    let story = gateway(client.clone())
        .generate_story("Gateway of India", StoryTheme::Historical)
        .await
        .unwrap();

    assert!(!story.is_empty());
    assert_eq!(story, story.trim());
    let request = &client.requests()[0];
    assert!(request.response_schema.is_none());
    assert!(request.prompt.contains("Landmark: Gateway of India"));
}

#[tokio::test]
async fn test_storybook_matches_itinerary() {
    let itinerary_text = itinerary_json("Three Cities", &["Vada Pav", "Misal Pav", "Naan Qalia"]);
    let itinerary = serde_json::from_str(&itinerary_text).unwrap();
    let client = Arc::new(ScriptedClient::new().reply(storybook_json(3)));

    let book = gateway(client)
        .generate_storybook(&itinerary, &details())
        .await
        .unwrap();
    assert_eq!(book.pages.len(), 3);
    assert_eq!(book.cover_image, "https://example.com/day1.jpg");
    assert!(book.mismatches(&itinerary).is_empty());
}

#[tokio::test]
async fn test_configured_collaborators() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("story.hbs"), "{{theme}}|{{poi}}").unwrap();

    let mut extra = BTreeMap::new();
    extra.insert("Bebinca".to_string(), "https://img.example/bebinca.jpg".to_string());
    let food = FoodImageCatalog::from_config(&FoodImagesConfig {
        default: DEFAULT_FOOD_IMAGE.to_string(),
        extra,
    });

    let client = Arc::new(
        ScriptedClient::new()
            .reply("A tale.")
            .reply(itinerary_json("Goa", &["BEBINCA"])),
    );
    let gw = TripGateway::new(
        client.clone(),
        PromptLoader::new(Some(dir.path().to_path_buf())),
        ReferenceGuide::embedded().unwrap(),
        food,
    );

    gw.generate_story("Basilica of Bom Jesus", StoryTheme::Mythological)
        .await
        .unwrap();
    assert_eq!(client.requests()[0].prompt, "Mythological|Basilica of Bom Jesus");

    let itinerary = gw.generate_itinerary(&details()).await.unwrap();
    assert_eq!(itinerary.days[0].food_suggestion.image_url, "https://img.example/bebinca.jpg");
}

proptest! {
    #[test]
    fn prop_builtin_dishes_resolve_in_any_case(idx in 0usize..8, mask in proptest::collection::vec(any::<bool>(), 20)) {
        let names = [
            "Vada Pav", "Pav Bhaji", "Bombil Fry", "Misal Pav",
            "Bhakarwadi", "Sabudana Khichdi", "Naan Qalia", "Puran Poli",
        ];
        let name = names[idx];
        let mangled: String = name
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();

        let catalog = FoodImageCatalog::builtin();
        prop_assert_eq!(catalog.resolve(&mangled), catalog.resolve(name));
        prop_assert_ne!(catalog.resolve(name), DEFAULT_FOOD_IMAGE);
    }

    #[test]
    fn prop_unknown_names_get_placeholder(name in "[a-z]{1,12} [a-z]{1,12} [a-z]{1,12}") {
        let catalog = FoodImageCatalog::builtin();
        prop_assert_eq!(catalog.resolve(&name), DEFAULT_FOOD_IMAGE);
    }
}
