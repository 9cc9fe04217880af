use crate::{
    schemas::SchemaHandle,
    types::{normalize_duration, CompanionRole, CompanionTurn, PriorTrip, TripRequest},
};

/// Sent as the system message with every request.
pub const SYSTEM_PROMPT: &str = "You are an expert travel planner and local guide. Give specific, practical, up-to-date advice in a warm and concise voice. Never invent prices or opening hours you are unsure of.";

/// How many trailing companion turns are quoted back to the model.
const COMPANION_HISTORY_TURNS: usize = 6;

pub(crate) fn destination_or_default(destination: &str) -> &str {
    let trimmed = destination.trim();
    if trimmed.is_empty() {
        "your destination"
    } else {
        trimmed
    }
}

pub(crate) fn preference_phrase(preferences: &[String]) -> String {
    let tags: Vec<&str> = preferences
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect();

    match tags.as_slice() {
        [] => "a bit of everything".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn prior_trip_sentence(prior: &PriorTrip) -> String {
    let per_day = prior
        .attractions_per_day
        .iter()
        .enumerate()
        .map(|(idx, count)| format!("day {}: {}", idx + 1, count))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sentence = format!(
        "Previously they planned a trip to {} with {} attractions",
        destination_or_default(&prior.destination),
        prior.total_attractions()
    );
    if !per_day.is_empty() {
        sentence.push_str(&format!(" ({per_day})"));
    }
    if !prior.preferences.is_empty() {
        sentence.push_str(&format!(
            ", focused on {}",
            preference_phrase(&prior.preferences)
        ));
    }
    sentence.push('.');
    sentence
}

fn trip_context(request: &TripRequest) -> String {
    let mut lines = vec![
        format!("Destination: {}", destination_or_default(&request.destination)),
        format!("Interests: {}", preference_phrase(&request.preferences)),
    ];
    if let Some(days) = request.duration() {
        lines.push(format!("Duration: {days} days"));
    }
    if let Some(special) = &request.special_request {
        lines.push(format!("Special request: {}", special.trim()));
    }
    if let Some(prior) = &request.prior_trip {
        lines.push(prior_trip_sentence(prior));
    }
    lines.join("\n")
}

/// Instruction asking for a bare JSON object with the schema's fields.
pub fn json_shape_instruction(schema: &SchemaHandle) -> String {
    let fields = schema
        .fields()
        .into_iter()
        .map(|(name, kind, description)| match description {
            Some(description) => format!("- \"{name}\" ({kind}): {description}"),
            None => format!("- \"{name}\" ({kind})"),
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Respond ONLY with a JSON object, without markdown or commentary, containing exactly these fields:\n{fields}"
    )
}

pub fn trip_description_prompt(request: &TripRequest) -> String {
    let length = match request.duration() {
        Some(days) => format!("a {days}-day trip"),
        None => "a trip".to_string(),
    };
    format!(
        "Write an inspiring two-paragraph description of {} to {}.\n\n{}\n\nMention specific neighbourhoods and experiences that match the interests.",
        length,
        destination_or_default(&request.destination),
        trip_context(request)
    )
}

pub fn travel_tips_prompt(destination: &str, preferences: &[String]) -> String {
    format!(
        "Give exactly 5 practical travel tips for visiting {} for someone interested in {}. Put each tip on its own line with no numbering and no blank lines.",
        destination_or_default(destination),
        preference_phrase(preferences)
    )
}

pub fn personality_analysis_prompt(
    preferences: &[String],
    prior_trips: &[PriorTrip],
    schema: &SchemaHandle,
) -> String {
    let history = if prior_trips.is_empty() {
        "They have no previous trips on record.".to_string()
    } else {
        prior_trips
            .iter()
            .map(prior_trip_sentence)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Analyse this traveller's personality. They are interested in {}.\n{}\n\n{}",
        preference_phrase(preferences),
        history,
        json_shape_instruction(schema)
    )
}

pub fn destination_analysis_prompt(destination: &str, schema: &SchemaHandle) -> String {
    format!(
        "Provide an insider analysis of {} for a first-time visitor.\n\n{}",
        destination_or_default(destination),
        json_shape_instruction(schema)
    )
}

pub fn custom_itinerary_prompt(request: &TripRequest) -> String {
    let days = request.itinerary_days();
    format!(
        "Create a day-by-day itinerary.\n\n{}\n\nWrite {} days. Start each day with a line \"Day N: <theme>\" followed by one line per activity in the form \"Morning/Afternoon/Evening - <activity>\". No blank lines, no markdown.",
        trip_context(request),
        days
    )
}

pub fn cuisine_guide_prompt(
    destination: &str,
    dietary_preferences: &[String],
    schema: &SchemaHandle,
) -> String {
    let dietary = if dietary_preferences.is_empty() {
        "no particular dietary restrictions".to_string()
    } else {
        preference_phrase(dietary_preferences)
    };
    format!(
        "Write a food guide for {} for a traveller with {}.\n\n{}",
        destination_or_default(destination),
        dietary,
        json_shape_instruction(schema)
    )
}

pub fn social_caption_prompt(destination: &str, highlights: &[String]) -> String {
    let highlights = if highlights.is_empty() {
        String::new()
    } else {
        format!(" Highlights: {}.", highlights.join(", "))
    };
    format!(
        "Write one catchy social media caption, under 200 characters with two or three hashtags, for a trip to {}.{} Return only the caption.",
        destination_or_default(destination),
        highlights
    )
}

pub fn trip_title_prompt(
    destination: &str,
    preferences: &[String],
    duration_days: Option<u32>,
) -> String {
    let length = normalize_duration(duration_days)
        .map(|days| format!(" {days}-day"))
        .unwrap_or_default();
    format!(
        "Suggest one short, memorable title (at most 8 words) for a{} trip to {} centred on {}. Return only the title without quotes.",
        length,
        destination_or_default(destination),
        preference_phrase(preferences)
    )
}

pub fn weather_advice_prompt(destination: &str, month: Option<&str>) -> String {
    let when = month
        .map(str::trim)
        .filter(|month| !month.is_empty())
        .map(|month| format!(" in {month}"))
        .unwrap_or_default();
    format!(
        "Describe the typical weather in {}{} and what travellers should wear and plan around. Keep it to three or four sentences.",
        destination_or_default(destination),
        when
    )
}

pub fn attraction_enhancement_prompt(
    attraction: &str,
    destination: &str,
    description: &str,
) -> String {
    let base = if description.trim().is_empty() {
        "There is no existing description.".to_string()
    } else {
        format!("Existing description: {}", description.trim())
    };
    format!(
        "Rewrite the description of {} in {} so it is vivid and useful, in at most three sentences, adding one insider tip.\n{}",
        attraction.trim(),
        destination_or_default(destination),
        base
    )
}

pub fn companion_reply_prompt(
    message: &str,
    history: &[CompanionTurn],
    trip: Option<&TripRequest>,
    schema: &SchemaHandle,
) -> String {
    let mut sections = vec![
        "You are a friendly travel companion chatting with a traveller.".to_string(),
    ];

    if let Some(trip) = trip {
        sections.push(format!("Their trip:\n{}", trip_context(trip)));
    }

    let start = history.len().saturating_sub(COMPANION_HISTORY_TURNS);
    if start < history.len() {
        let transcript = history[start..]
            .iter()
            .map(|turn| {
                let speaker = match turn.role {
                    CompanionRole::Traveler => "Traveller",
                    CompanionRole::Companion => "Companion",
                };
                format!("{speaker}: {}", turn.content.trim())
            })
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("Conversation so far:\n{transcript}"));
    }

    sections.push(format!("Traveller: {}", message.trim()));
    sections.push(json_shape_instruction(schema));
    sections.join("\n\n")
}

pub fn translation_prompt(phrase: &str, target_language: &str) -> String {
    format!(
        "Translate the following phrase into {}. Return only the translation, followed by a simple pronunciation guide in parentheses.\n\nPhrase: {}",
        target_language.trim(),
        phrase.trim()
    )
}
