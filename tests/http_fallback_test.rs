use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use trip_muse::{
    fallback, ContentKind, ContentRequest, FallbackReason, GeneratedContent, GeneratorConfig,
    PriorTrip, ShapeValidation, TripContentGenerator, TripRequest,
};

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
    .to_string()
}

fn paris() -> TripRequest {
    TripRequest::new("Paris")
        .with_preferences(["Art & Culture"])
        .with_duration(3)
}

fn one_request_per_kind() -> Vec<ContentRequest> {
    let kinds = vec![
        ContentRequest::Description(paris()),
        ContentRequest::Tips {
            destination: "Paris".to_string(),
            preferences: vec!["Art & Culture".to_string()],
        },
        ContentRequest::Personality {
            preferences: vec!["Food".to_string(), "Hiking".to_string()],
            prior_trips: vec![PriorTrip {
                destination: "Lisbon".to_string(),
                attractions_per_day: vec![3, 2],
                preferences: vec!["Food".to_string()],
            }],
        },
        ContentRequest::Destination {
            destination: "Tokyo".to_string(),
        },
        ContentRequest::Itinerary(paris()),
        ContentRequest::Cuisine {
            destination: "Tokyo".to_string(),
            dietary_preferences: vec!["vegetarian".to_string()],
        },
        ContentRequest::Caption {
            destination: "Paris".to_string(),
            highlights: vec!["Louvre".to_string()],
        },
        ContentRequest::Title {
            destination: "Paris".to_string(),
            preferences: vec!["Art & Culture".to_string()],
            duration_days: Some(3),
        },
        ContentRequest::Weather {
            destination: "Paris".to_string(),
            month: Some("April".to_string()),
        },
        ContentRequest::AttractionDescription {
            attraction: "Louvre".to_string(),
            destination: "Paris".to_string(),
            description: String::new(),
        },
        ContentRequest::Companion {
            message: "Where should I eat?".to_string(),
            history: Vec::new(),
            trip: Some(paris()),
        },
        ContentRequest::Translation {
            phrase: "Good morning".to_string(),
            target_language: "French".to_string(),
        },
    ];
    assert_eq!(kinds.len(), ContentKind::ALL.len());
    kinds
}

fn expected_fallback(request: &ContentRequest) -> GeneratedContent {
    match request {
        ContentRequest::Description(trip) => {
            GeneratedContent::Description(fallback::trip_description(trip))
        }
        ContentRequest::Tips { .. } => GeneratedContent::Tips(fallback::travel_tips()),
        ContentRequest::Personality {
            preferences,
            prior_trips,
        } => GeneratedContent::Personality(fallback::personality_analysis(preferences, prior_trips)),
        ContentRequest::Destination { destination } => {
            GeneratedContent::Destination(fallback::destination_analysis(destination))
        }
        ContentRequest::Itinerary(trip) => {
            GeneratedContent::Itinerary(fallback::custom_itinerary(trip))
        }
        ContentRequest::Cuisine {
            destination,
            dietary_preferences,
        } => GeneratedContent::Cuisine(fallback::cuisine_guide(destination, dietary_preferences)),
        ContentRequest::Caption { destination, .. } => {
            GeneratedContent::Caption(fallback::social_caption(destination))
        }
        ContentRequest::Title {
            destination,
            duration_days,
            ..
        } => GeneratedContent::Title(fallback::trip_title(destination, *duration_days)),
        ContentRequest::Weather { destination, .. } => {
            GeneratedContent::Weather(fallback::weather_advice(destination))
        }
        ContentRequest::AttractionDescription {
            attraction,
            destination,
            description,
        } => GeneratedContent::AttractionDescription(fallback::attraction_description(
            attraction,
            destination,
            description,
        )),
        ContentRequest::Companion { .. } => {
            GeneratedContent::Companion(fallback::companion_reply())
        }
        ContentRequest::Translation { phrase, .. } => {
            GeneratedContent::Translation(fallback::translation(phrase))
        }
    }
}

fn online(server: &ServerGuard) -> TripContentGenerator {
    TripContentGenerator::new(
        GeneratorConfig::new()
            .with_api_key("sk-test")
            .with_base_url(format!("{}/v1", server.url())),
    )
}

#[tokio::test]
async fn missing_credential_serves_fallback_without_calling_out() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let generator = TripContentGenerator::new(
        GeneratorConfig::new().with_base_url(format!("{}/v1", server.url())),
    );
    assert!(!generator.has_credential());

    for request in one_request_per_kind() {
        let generated = generator.generate(&request).await;
        assert_eq!(generated.value, expected_fallback(&request), "{}", request.kind());
        assert_eq!(
            generated.fallback_reason(),
            Some(FallbackReason::MissingCredential)
        );
    }

    mock.assert_async().await;
}

fn with_zero_duration(request: ContentRequest) -> ContentRequest {
    let zero_trip = |trip: TripRequest| TripRequest {
        duration_days: Some(0),
        ..trip
    };
    match request {
        ContentRequest::Description(trip) => ContentRequest::Description(zero_trip(trip)),
        ContentRequest::Itinerary(trip) => ContentRequest::Itinerary(zero_trip(trip)),
        ContentRequest::Title {
            destination,
            preferences,
            ..
        } => ContentRequest::Title {
            destination,
            preferences,
            duration_days: Some(0),
        },
        ContentRequest::Companion {
            message,
            history,
            trip,
        } => ContentRequest::Companion {
            message,
            history,
            trip: trip.map(zero_trip),
        },
        other => other,
    }
}

#[tokio::test]
async fn zero_duration_fallbacks_read_as_no_duration() {
    let generator = TripContentGenerator::offline();

    for request in one_request_per_kind().into_iter().map(with_zero_duration) {
        let generated = generator.generate(&request).await;
        assert_eq!(generated.value, expected_fallback(&request), "{}", request.kind());

        if let Some(items) = generated.value.as_items() {
            assert!(!items.is_empty(), "{}", request.kind());
        }
        if let Some(text) = generated.value.as_text() {
            assert!(!text.contains("0-day"), "{}", request.kind());
            assert!(!text.starts_with("0 Days"), "{}", request.kind());
        }
    }

    let itinerary: ContentRequest = serde_json::from_value(json!({
        "kind": "itinerary",
        "destination": "Rome",
        "duration_days": 0
    }))
    .unwrap();
    let GeneratedContent::Itinerary(lines) = generator.generate(&itinerary).await.value else {
        panic!("expected itinerary");
    };
    assert_eq!(lines.len(), 12);
}

#[tokio::test]
async fn oversized_itinerary_is_capped_offline() {
    let generated = TripContentGenerator::offline()
        .custom_itinerary(&TripRequest::new("Rome").with_duration(u32::MAX))
        .await;
    assert_eq!(generated.len(), trip_muse::MAX_ITINERARY_DAYS as usize * 4);
}

#[tokio::test]
async fn server_errors_serve_the_same_fallback_as_no_credential() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": { "message": "boom" } }).to_string())
        .expect(ContentKind::ALL.len())
        .create_async()
        .await;

    let generator = online(&server);
    let offline = TripContentGenerator::offline();

    for request in one_request_per_kind() {
        let generated = generator.generate(&request).await;
        assert_eq!(generated.value, offline.generate(&request).await.value);
        assert_eq!(generated.fallback_reason(), Some(FallbackReason::Status));
    }

    // One call per request, no retries.
    mock.assert_async().await;
}

#[tokio::test]
async fn connection_failure_serves_fallback() {
    let generator = TripContentGenerator::new(
        GeneratorConfig::new()
            .with_api_key("sk-test")
            .with_base_url("http://127.0.0.1:1/v1"),
    );

    let generated = generator.trip_description(&paris()).await;
    assert_eq!(generated.value, fallback::trip_description(&paris()));
    assert_eq!(generated.fallback_reason(), Some(FallbackReason::Transport));
}

#[tokio::test]
async fn successful_text_is_returned_with_bearer_credential() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 300,
            "temperature": 0.8
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("  Paris in spring is a dream.  "))
        .create_async()
        .await;

    let generated = online(&server).trip_description(&paris()).await;

    assert!(!generated.is_fallback());
    assert_eq!(generated.value, "Paris in spring is a dream.");
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_structured_text_serves_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body("{ \"bestTimeToVisit\": \"Spring\", "))
        .create_async()
        .await;

    let generated = online(&server).destination_analysis("Tokyo").await;

    assert_eq!(generated.value, fallback::destination_analysis("Tokyo"));
    assert_eq!(generated.fallback_reason(), Some(FallbackReason::Decode));
}

#[tokio::test]
async fn incomplete_structured_text_is_rejected_by_default() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(
            "{\"message\": \"Try the crêpes!\", \"suggestions\": []}",
        ))
        .create_async()
        .await;

    let generated = online(&server)
        .companion_reply("Where should I eat?", &[], None)
        .await;

    assert_eq!(generated.value, fallback::companion_reply());
    assert_eq!(generated.fallback_reason(), Some(FallbackReason::ShapeMismatch));
}

#[tokio::test]
async fn incomplete_structured_text_passes_through_when_lenient() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(
            "{\"message\": \"Try the crêpes!\", \"suggestions\": [\"Show me cafés\"]}",
        ))
        .create_async()
        .await;

    let generated = online(&server)
        .with_shape_validation(ShapeValidation::Lenient)
        .companion_reply("Where should I eat?", &[], None)
        .await;

    assert!(!generated.is_fallback());
    assert_eq!(generated.message, "Try the crêpes!");
    assert_eq!(generated.suggestions, vec!["Show me cafés"]);
    assert_eq!(generated.mood, "");
}

#[tokio::test]
async fn fenced_structured_text_is_decoded() {
    let payload = json!({
        "bestTimeToVisit": "Late March for cherry blossoms",
        "localCuisine": ["Ramen", "Sushi"],
        "culturalInsights": ["Bow when greeting"],
        "hiddenGems": ["Yanaka Ginza"],
        "transportationTips": ["Get a Suica card"],
        "safetyInfo": "Very safe",
        "packingRecommendations": ["Slip-on shoes"],
        "languageTips": ["Arigatou - thank you"]
    });
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(&format!("```json\n{payload}\n```")))
        .create_async()
        .await;

    let generated = online(&server).destination_analysis("Tokyo").await;

    assert!(!generated.is_fallback());
    assert_eq!(generated.hidden_gems, vec!["Yanaka Ginza"]);
    assert_eq!(generated.safety_info, "Very safe");
}

#[tokio::test]
async fn tips_are_split_on_lines_and_blank_lines_dropped() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(
            "Buy a museum pass\nWalk along the Seine\n\nEat where the locals queue",
        ))
        .create_async()
        .await;

    let generated = online(&server).travel_tips("Paris", &[]).await;

    assert!(!generated.is_fallback());
    assert_eq!(
        generated.value,
        vec![
            "Buy a museum pass",
            "Walk along the Seine",
            "Eat where the locals queue"
        ]
    );
}

#[tokio::test]
async fn blank_tips_serve_the_five_item_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion_body(" \n\n  \n"))
        .create_async()
        .await;

    let generated = online(&server).travel_tips("Paris", &[]).await;

    assert_eq!(generated.value, fallback::travel_tips());
    assert_eq!(generated.len(), 5);
    assert_eq!(generated.fallback_reason(), Some(FallbackReason::EmptyResponse));
}

#[tokio::test]
async fn paris_description_fallback_names_city_and_length() {
    let generated = TripContentGenerator::offline()
        .trip_description(&paris())
        .await;

    assert!(generated.contains("Paris"));
    assert!(generated.contains("3-day"));
}

#[tokio::test]
async fn tokyo_analysis_fallback_has_all_eight_fields() {
    let generated = TripContentGenerator::offline()
        .destination_analysis("Tokyo")
        .await;
    let value = serde_json::to_value(&generated.value).unwrap();
    let fields = value.as_object().unwrap();

    for field in [
        "bestTimeToVisit",
        "localCuisine",
        "culturalInsights",
        "hiddenGems",
        "transportationTips",
        "safetyInfo",
        "packingRecommendations",
        "languageTips",
    ] {
        let entry = fields.get(field).unwrap_or_else(|| panic!("missing {field}"));
        let populated = match entry {
            serde_json::Value::String(text) => !text.is_empty(),
            serde_json::Value::Array(items) => !items.is_empty(),
            _ => false,
        };
        assert!(populated, "{field} is empty");
    }
    assert_eq!(fields.len(), 8);
}
