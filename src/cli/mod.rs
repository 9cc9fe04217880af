use crate::{
    types::normalize_duration, ContentKind, ContentRequest, GeneratorConfig, ShapeValidation,
    TripContentGenerator, TripRequest,
};
use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    let kinds: Vec<&'static str> = ContentKind::ALL.iter().map(ContentKind::as_str).collect();

    Command::new("trip-muse")
        .version("0.1.0")
        .about("Generate travel-planning content with an LLM, falling back to local templates")
        .arg(
            Arg::new("kind")
                .help(format!("Content kind: {}", kinds.join(", ")))
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("destination")
                .short('d')
                .long("destination")
                .value_name("PLACE")
                .default_value("")
                .help("Trip destination"),
        )
        .arg(
            Arg::new("preference")
                .short('p')
                .long("preference")
                .value_name("TAG")
                .action(ArgAction::Append)
                .help("Preference tag (repeatable); dietary preference for `cuisine`"),
        )
        .arg(
            Arg::new("days")
                .long("days")
                .value_name("N")
                .value_parser(clap::value_parser!(u32))
                .help("Trip length in days"),
        )
        .arg(
            Arg::new("request")
                .long("request")
                .value_name("TEXT")
                .help("Special request for descriptions and itineraries"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .value_name("TEXT")
                .default_value("")
                .help("Chat message, phrase to translate, or attraction name"),
        )
        .arg(
            Arg::new("description")
                .long("description")
                .value_name("TEXT")
                .default_value("")
                .help("Existing attraction description to enhance"),
        )
        .arg(
            Arg::new("highlight")
                .long("highlight")
                .value_name("TEXT")
                .action(ArgAction::Append)
                .help("Trip highlight for captions (repeatable)"),
        )
        .arg(
            Arg::new("month")
                .long("month")
                .value_name("MONTH")
                .help("Travel month for weather advice"),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .value_name("LANGUAGE")
                .default_value("French")
                .help("Target language for translation"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model identifier (or set TRIP_MUSE_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY); without one, fallback content is printed"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Endpoint root (or set OPENAI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("Per-request timeout in seconds (or set TRIP_MUSE_TIMEOUT_SECS)"),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .action(ArgAction::SetTrue)
                .help("Pass incomplete structured responses through instead of falling back"),
        )
        .arg(
            Arg::new("show-origin")
                .long("show-origin")
                .action(ArgAction::SetTrue)
                .help("Print whether the content came from the model or a fallback"),
        )
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn text(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn build_request(kind: ContentKind, matches: &ArgMatches) -> ContentRequest {
    let destination = text(matches, "destination");
    let preferences = strings(matches, "preference");
    let duration_days = normalize_duration(matches.get_one::<u32>("days").copied());

    let mut trip = TripRequest::new(destination.clone()).with_preferences(preferences.clone());
    if let Some(days) = duration_days {
        trip = trip.with_duration(days);
    }
    if let Some(special) = matches.get_one::<String>("request") {
        trip = trip.with_special_request(special.clone());
    }

    match kind {
        ContentKind::Description => ContentRequest::Description(trip),
        ContentKind::Tips => ContentRequest::Tips {
            destination,
            preferences,
        },
        ContentKind::Personality => ContentRequest::Personality {
            preferences,
            prior_trips: Vec::new(),
        },
        ContentKind::Destination => ContentRequest::Destination { destination },
        ContentKind::Itinerary => ContentRequest::Itinerary(trip),
        ContentKind::Cuisine => ContentRequest::Cuisine {
            destination,
            dietary_preferences: preferences,
        },
        ContentKind::Caption => ContentRequest::Caption {
            destination,
            highlights: strings(matches, "highlight"),
        },
        ContentKind::Title => ContentRequest::Title {
            destination,
            preferences,
            duration_days,
        },
        ContentKind::Weather => ContentRequest::Weather {
            destination,
            month: matches.get_one::<String>("month").cloned(),
        },
        ContentKind::AttractionDescription => ContentRequest::AttractionDescription {
            attraction: text(matches, "text"),
            destination,
            description: text(matches, "description"),
        },
        ContentKind::Companion => ContentRequest::Companion {
            message: text(matches, "text"),
            history: Vec::new(),
            trip: Some(trip),
        },
        ContentKind::Translation => ContentRequest::Translation {
            phrase: text(matches, "text"),
            target_language: text(matches, "language"),
        },
    }
}

/// CLI entry point for the trip-muse tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    let kind: ContentKind = text(&matches, "kind").parse().map_err(|err| anyhow!("{err}"))?;

    let mut config = GeneratorConfig::from_env().context("invalid environment configuration")?;
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.clone());
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout((*seconds > 0).then(|| Duration::from_secs(*seconds)));
    }
    if matches.get_flag("lenient") {
        config = config.with_shape_validation(ShapeValidation::Lenient);
    }

    info!(
        kind = %kind,
        model = %config.model,
        base_url = %config.base_url,
        credential = config.has_credential(),
        "generating content"
    );

    let generator = TripContentGenerator::new(config);
    let generated = generator.generate(&build_request(kind, &matches)).await;

    let rendered = if matches.get_flag("show-origin") {
        serde_json::to_string_pretty(&generated)?
    } else {
        serde_json::to_string_pretty(&generated.value)?
    };
    println!("{rendered}");

    Ok(())
}
