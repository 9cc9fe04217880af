//! Local substitutes returned whenever remote content is unavailable.
//!
//! Every function here is pure: the same inputs always give the same value,
//! and each value has the same shape as a successful result for its kind.

use super::prompts::{destination_or_default, preference_phrase};
use crate::types::{
    normalize_duration, CompanionReply, CuisineGuide, DestinationAnalysis, Dish,
    PersonalityAnalysis, PriorTrip, TripRequest,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn trip_description(request: &TripRequest) -> String {
    let destination = destination_or_default(&request.destination);
    let interests = preference_phrase(&request.preferences).to_lowercase();
    let adventure = match request.duration() {
        Some(days) => format!("this {days}-day adventure"),
        None => "this adventure".to_string(),
    };

    format!(
        "Discover the magic of {destination} on {adventure}, shaped around your love of {interests}. \
         Wander its most characterful neighbourhoods, linger over local flavours and leave room for the \
         unexpected moments that make a trip unforgettable.\n\n\
         Each day balances headline sights with quieter corners, so you come home having seen {destination} \
         the way locals do."
    )
}

pub fn travel_tips() -> Vec<String> {
    strings(&[
        "Research local customs and etiquette before you arrive",
        "Keep digital and paper copies of your passport and bookings",
        "Learn a few basic phrases in the local language",
        "Carry a small amount of local currency for markets and tips",
        "Book popular attractions in advance to skip the queues",
    ])
}

pub fn personality_analysis(preferences: &[String], prior_trips: &[PriorTrip]) -> PersonalityAnalysis {
    let interests = preference_phrase(preferences).to_lowercase();
    let destinations = if prior_trips.is_empty() {
        strings(&["Lisbon, Portugal", "Kyoto, Japan", "Mexico City, Mexico"])
    } else {
        strings(&["Barcelona, Spain", "Hanoi, Vietnam", "Cape Town, South Africa"])
    };

    PersonalityAnalysis {
        personality_type: "Curious Explorer".to_string(),
        description: format!(
            "You travel to understand a place, not just to see it. Your interest in {interests} \
             points to someone who enjoys variety and values authentic experiences over checklists."
        ),
        travel_style: strings(&["Balanced pace", "Culturally curious", "Open to detours"]),
        recommended_destinations: destinations,
        tips: strings(&[
            "Leave one unplanned afternoon on every trip",
            "Ask locals for their favourite neighbourhood spot",
            "Mix one headline sight with one hidden gem each day",
        ]),
    }
}

pub fn destination_analysis(destination: &str) -> DestinationAnalysis {
    let destination = destination_or_default(destination);

    DestinationAnalysis {
        best_time_to_visit: format!(
            "Spring and autumn usually offer the most comfortable weather and thinner crowds in {destination}."
        ),
        local_cuisine: strings(&[
            "Try the signature street food at a busy local stall",
            "Visit a neighbourhood market for regional produce",
            "Ask for the house speciality at a family-run restaurant",
        ]),
        cultural_insights: vec![
            format!("Read up on greetings and etiquette in {destination} before you go"),
            "Dress modestly when visiting religious sites".to_string(),
            "Check local tipping customs".to_string(),
        ],
        hidden_gems: strings(&[
            "Residential neighbourhoods just outside the centre",
            "Small local museums and galleries",
            "Early-morning viewpoints before the crowds arrive",
        ]),
        transportation_tips: strings(&[
            "Public transport passes often beat single tickets",
            "Walk the historic centre where you can",
            "Use licensed taxis or official ride-hailing apps",
        ]),
        safety_info: format!(
            "{destination} is generally welcoming to visitors. Keep valuables secure in crowded areas and \
             save local emergency numbers."
        ),
        packing_recommendations: strings(&[
            "Comfortable walking shoes",
            "Layers for changing weather",
            "Universal power adapter",
            "Reusable water bottle",
        ]),
        language_tips: strings(&[
            "Hello",
            "Please",
            "Thank you",
            "Excuse me",
        ])
        .into_iter()
        .map(|phrase| format!("Learn how to say \"{phrase}\" in the local language"))
        .collect(),
    }
}

pub fn custom_itinerary(request: &TripRequest) -> Vec<String> {
    let destination = destination_or_default(&request.destination);
    let days = request.itinerary_days();
    let interests = preference_phrase(&request.preferences).to_lowercase();

    let mut lines = Vec::new();
    for day in 1..=days {
        let theme = match day {
            1 => format!("Arrival and first impressions of {destination}"),
            d if d == days => "Favourite spots and farewell".to_string(),
            _ => format!("Exploring {interests}"),
        };
        lines.push(format!("Day {day}: {theme}"));
        lines.push(format!("Morning - Explore a central neighbourhood of {destination}"));
        lines.push(format!("Afternoon - An experience centred on {interests}"));
        lines.push("Evening - Dinner at a well-reviewed local restaurant".to_string());
    }
    lines
}

pub fn cuisine_guide(destination: &str, dietary_preferences: &[String]) -> CuisineGuide {
    let destination = destination_or_default(destination);
    let dietary_notes = if dietary_preferences.is_empty() {
        strings(&["Ask staff about ingredients if you have allergies"])
    } else {
        dietary_preferences
            .iter()
            .map(|pref| format!("Look for menus marked \"{}\" and ask staff to confirm", pref.trim()))
            .collect()
    };

    CuisineGuide {
        must_try_dishes: vec![
            Dish {
                name: "Regional speciality".to_string(),
                description: format!("The dish {destination} is best known for, ideally from a busy local spot."),
            },
            Dish {
                name: "Street food snack".to_string(),
                description: "A quick, inexpensive bite sold at markets and street stalls.".to_string(),
            },
            Dish {
                name: "Traditional dessert".to_string(),
                description: "A sweet from a long-standing local bakery or café.".to_string(),
            },
        ],
        dining_etiquette: strings(&[
            "Check whether tipping is expected or included",
            "Reserve ahead for popular restaurants",
            "Follow locals' lead on meal times",
        ]),
        food_districts: vec![
            format!("The main food market in {destination}"),
            "The old town's side streets".to_string(),
        ],
        budget_guide: "Street food and casual lunches are the best value; set dinners cost noticeably more.".to_string(),
        dietary_notes,
    }
}

pub fn social_caption(destination: &str) -> String {
    let destination = destination_or_default(destination);
    let tag: String = destination
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .collect();
    if tag.is_empty() {
        "Making memories one adventure at a time ✈️ #travel #wanderlust".to_string()
    } else {
        format!("Making memories in {destination} ✈️ #{tag} #travel #wanderlust")
    }
}

pub fn trip_title(destination: &str, duration_days: Option<u32>) -> String {
    let destination = destination_or_default(destination);
    match normalize_duration(duration_days) {
        Some(days) => format!("{days} Days of Discovery in {destination}"),
        None => format!("Discovering {destination}"),
    }
}

pub fn weather_advice(destination: &str) -> String {
    format!(
        "Check the forecast for {} a few days before you leave and pack layers you can add or remove. \
         Bring a light rain jacket, comfortable shoes and sun protection, and plan an indoor option for each day.",
        destination_or_default(destination)
    )
}

pub fn attraction_description(attraction: &str, destination: &str, description: &str) -> String {
    if !description.trim().is_empty() {
        return description.trim().to_string();
    }
    let attraction = attraction.trim();
    let name = if attraction.is_empty() { "This attraction" } else { attraction };
    format!(
        "{name} is one of the memorable stops in {}. Arrive early to enjoy it before the crowds.",
        destination_or_default(destination)
    )
}

pub fn companion_reply() -> CompanionReply {
    CompanionReply {
        message: "I'm here to help with your trip! Ask me about places to visit, food to try or how to get around.".to_string(),
        suggestions: strings(&[
            "What should I see first?",
            "Where should I eat tonight?",
            "How do I get around?",
        ]),
        mood: "friendly".to_string(),
    }
}

pub fn translation(phrase: &str) -> String {
    phrase.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_ITINERARY_DAYS;

    #[test]
    fn description_names_destination_and_length() {
        let request = TripRequest::new("Paris")
            .with_preferences(["Art & Culture"])
            .with_duration(3);
        let text = trip_description(&request);
        assert!(text.contains("Paris"));
        assert!(text.contains("3-day"));
        assert!(text.contains("art & culture"));
    }

    #[test]
    fn description_without_destination_is_generic() {
        let text = trip_description(&TripRequest::default());
        assert!(text.contains("your destination"));
        assert!(!text.contains("-day"));
    }

    #[test]
    fn tips_fallback_has_five_items() {
        assert_eq!(travel_tips().len(), 5);
    }

    #[test]
    fn destination_fallback_fills_every_field() {
        let analysis = destination_analysis("Tokyo");
        assert!(analysis.best_time_to_visit.contains("Tokyo"));
        assert!(!analysis.local_cuisine.is_empty());
        assert!(!analysis.cultural_insights.is_empty());
        assert!(!analysis.hidden_gems.is_empty());
        assert!(!analysis.transportation_tips.is_empty());
        assert!(!analysis.safety_info.is_empty());
        assert!(!analysis.packing_recommendations.is_empty());
        assert_eq!(analysis.language_tips.len(), 4);
    }

    #[test]
    fn itinerary_fallback_covers_each_day() {
        let lines = custom_itinerary(&TripRequest::new("Rome").with_duration(2));
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Day 1: Arrival and first impressions of Rome");
        assert_eq!(lines[4], "Day 2: Favourite spots and farewell");
    }

    #[test]
    fn single_day_itinerary_has_one_day() {
        let lines = custom_itinerary(&TripRequest::new("Rome").with_duration(1));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Day 1: Arrival and first impressions of Rome");
    }

    #[test]
    fn huge_itinerary_is_capped() {
        let lines = custom_itinerary(&TripRequest::new("Rome").with_duration(u32::MAX));
        assert_eq!(lines.len(), MAX_ITINERARY_DAYS as usize * 4);
        assert_eq!(
            lines[lines.len() - 4],
            format!("Day {MAX_ITINERARY_DAYS}: Favourite spots and farewell")
        );
    }

    #[test]
    fn zero_duration_reads_as_absent() {
        let trip = TripRequest {
            destination: "Rome".to_string(),
            duration_days: Some(0),
            ..TripRequest::default()
        };

        assert_eq!(custom_itinerary(&trip).len(), 12);
        assert!(trip_description(&trip).contains("on this adventure"));
        assert_eq!(trip_title("Rome", Some(0)), "Discovering Rome");
    }

    #[test]
    fn fallbacks_are_deterministic() {
        assert_eq!(destination_analysis("Lima"), destination_analysis("Lima"));
        assert_eq!(
            cuisine_guide("Lima", &["vegan".to_string()]),
            cuisine_guide("Lima", &["vegan".to_string()])
        );
    }

    #[test]
    fn caption_hashtag_drops_punctuation() {
        assert!(social_caption("New York, USA").contains("#NewYorkUSA"));
    }

    #[test]
    fn existing_attraction_description_is_kept() {
        assert_eq!(
            attraction_description("Louvre", "Paris", "  World-famous museum. "),
            "World-famous museum."
        );
    }
}
