//! End-to-end session flows against a scripted model

mod common;

use std::sync::Arc;

use common::{ScriptedClient, controller, itinerary_json, storybook_json};
use wanderwise::auth::Credentials;
use wanderwise::domain::{Preferences, StoryTheme};
use wanderwise::session::View;

const GOA_INTERESTS: &str = "Primary interest is Beach's and Tropical Regions. Prefers Local Cuisines and enjoys Peaceful and calm places.";

fn goa_preferences() -> Preferences {
    let mut prefs = Preferences::default();
    prefs.set("state", "Goa");
    prefs.set("interest", "Beach's and Tropical Regions");
    prefs.set("cuisine", "Local Cuisines");
    prefs.set("vibe", "Peaceful and calm places");
    prefs.set("duration", "5");
    prefs
}

#[tokio::test]
async fn test_goa_trip_end_to_end() {
    let client = Arc::new(
        ScriptedClient::new()
            .reply(itinerary_json(
                "Sun, Sand and Serenity",
                &["Fish Curry Rice", "Bebinca", "Pav Bhaji", "Xacuti", "vada pav"],
            ))
            .reply("The waves at Palolem carry old songs...")
            .reply(storybook_json(5)),
    );
    let mut ctl = controller(client.clone());

    ctl.start_journey();
    ctl.authenticate(&Credentials::signup("Asha", "asha@example.com", "pw"))
        .await
        .unwrap();
    assert_eq!(ctl.state().view, View::Planner);

    ctl.generate_plan(goa_preferences().to_trip_details()).await;

    // The request reaches the model verbatim
    let prompt = &client.requests()[0].prompt;
    assert!(prompt.contains("- Destination: Goa"));
    assert!(prompt.contains("- Duration: 5 days"));
    assert!(prompt.contains(&format!("- Interests: {}", GOA_INTERESTS)));

    let itinerary = ctl.state().itinerary.clone().unwrap();
    assert_eq!(ctl.state().view, View::Itinerary);
    assert_eq!(itinerary.days.len(), 5);
    assert!(itinerary.days[2].food_suggestion.image_url.contains("pav-bhaji"));
    assert!(itinerary.days[4].food_suggestion.image_url.contains("vada-pav"));
    assert!(itinerary.days[0].food_suggestion.image_url.contains("placeholder"));

    assert!(ctl.know_more(1));
    ctl.generate_story(StoryTheme::LocalFolklore).await;
    let story = ctl.state().story.clone().unwrap();
    assert_eq!(story.text, "The waves at Palolem carry old songs...");
    assert!(client.requests()[1].prompt.contains("Story Theme: Local Folklore"));

    ctl.back_to_itinerary();
    ctl.create_storybook().await;
    assert_eq!(ctl.state().view, View::Storybook);
    let book = ctl.state().storybook.clone().unwrap();
    assert_eq!(book.pages.len(), 5);
    assert_eq!(book.cover_image, itinerary.days[0].day_image);
    assert!(client.requests()[2].prompt.contains(GOA_INTERESTS));

    ctl.go_home();
    assert!(ctl.state().itinerary.is_none());
    assert!(ctl.state().storybook.is_none());
    assert!(ctl.state().user.is_some());
}

#[tokio::test]
async fn test_signed_out_plan_prompts_login_then_succeeds() {
    let client = Arc::new(ScriptedClient::new().reply(itinerary_json("Konkan Coast", &["Bombil Fry"])));
    let mut ctl = controller(client.clone());
    ctl.start_journey();

    ctl.generate_plan(goa_preferences().to_trip_details()).await;
    assert!(ctl.state().show_login);
    assert!(client.requests().is_empty());

    ctl.authenticate(&Credentials::login("t@example.com", "pw")).await.unwrap();
    assert!(!ctl.state().show_login);

    ctl.generate_plan(goa_preferences().to_trip_details()).await;
    assert_eq!(client.requests().len(), 1);
    assert_eq!(ctl.state().itinerary.as_ref().unwrap().trip_title, "Konkan Coast");
}

#[tokio::test]
async fn test_failed_plan_shows_generic_message_and_allows_retry() {
    let client = Arc::new(
        ScriptedClient::new()
            .fail("RESOURCE_EXHAUSTED")
            .reply(itinerary_json("Second Try", &["Misal Pav"])),
    );
    let mut ctl = controller(client);
    ctl.authenticate(&Credentials::login("t@example.com", "pw")).await.unwrap();

    ctl.generate_plan(goa_preferences().to_trip_details()).await;
    let error = ctl.state().error.clone().unwrap();
    assert_eq!(
        error,
        "Failed to communicate with the AI planner. The itinerary could not be generated."
    );
    assert!(!error.contains("RESOURCE_EXHAUSTED"));
    assert!(!ctl.state().loading);

    ctl.generate_plan(goa_preferences().to_trip_details()).await;
    assert!(ctl.state().error.is_none());
    assert_eq!(ctl.state().view, View::Itinerary);
}

#[tokio::test]
async fn test_late_result_after_back_to_planner_is_dropped() {
    let client = Arc::new(
        ScriptedClient::new()
            .reply(itinerary_json("First", &["Vada Pav"]))
            .reply(itinerary_json("Stale", &["Pav Bhaji"]))
            .reply(itinerary_json("Fresh", &["Puran Poli"])),
    );
    let mut ctl = controller(client);
    ctl.authenticate(&Credentials::login("t@example.com", "pw")).await.unwrap();
    ctl.generate_plan(goa_preferences().to_trip_details()).await;

    // Start a new plan, then leave before it returns
    ctl.back_to_planner();
    let details = goa_preferences().to_trip_details();
    let stale_ticket = ctl.begin_itinerary(details.clone()).unwrap();
    let stale = ctl.gateway().generate_itinerary(&details).await;
    ctl.back_to_planner();
    assert!(!ctl.finish_itinerary(stale_ticket, stale));
    assert!(ctl.state().itinerary.is_none());

    ctl.generate_plan(details).await;
    assert_eq!(ctl.state().itinerary.as_ref().unwrap().trip_title, "Fresh");
}
