use std::{fmt, str::FromStr};

use crate::content_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The fixed categories of generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Description,
    Tips,
    Personality,
    Destination,
    Itinerary,
    Cuisine,
    Caption,
    Title,
    Weather,
    AttractionDescription,
    Companion,
    Translation,
}

/// Per-kind request parameters sent with every completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ContentKind {
    pub const ALL: [ContentKind; 12] = [
        ContentKind::Description,
        ContentKind::Tips,
        ContentKind::Personality,
        ContentKind::Destination,
        ContentKind::Itinerary,
        ContentKind::Cuisine,
        ContentKind::Caption,
        ContentKind::Title,
        ContentKind::Weather,
        ContentKind::AttractionDescription,
        ContentKind::Companion,
        ContentKind::Translation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Description => "description",
            ContentKind::Tips => "tips",
            ContentKind::Personality => "personality",
            ContentKind::Destination => "destination",
            ContentKind::Itinerary => "itinerary",
            ContentKind::Cuisine => "cuisine",
            ContentKind::Caption => "caption",
            ContentKind::Title => "title",
            ContentKind::Weather => "weather",
            ContentKind::AttractionDescription => "attraction-description",
            ContentKind::Companion => "companion",
            ContentKind::Translation => "translation",
        }
    }

    /// Output size and randomness used for this kind. Factual kinds run
    /// cold, playful ones run hot.
    pub fn profile(&self) -> KindProfile {
        let (max_tokens, temperature) = match self {
            ContentKind::Description => (300, 0.8),
            ContentKind::Tips => (400, 0.7),
            ContentKind::Personality => (500, 0.7),
            ContentKind::Destination => (900, 0.6),
            ContentKind::Itinerary => (1200, 0.7),
            ContentKind::Cuisine => (800, 0.7),
            ContentKind::Caption => (150, 0.9),
            ContentKind::Title => (30, 0.8),
            ContentKind::Weather => (250, 0.3),
            ContentKind::AttractionDescription => (200, 0.7),
            ContentKind::Companion => (400, 0.8),
            ContentKind::Translation => (150, 0.2),
        };
        KindProfile {
            max_tokens,
            temperature,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            ContentKind::Personality
                | ContentKind::Destination
                | ContentKind::Cuisine
                | ContentKind::Companion
        )
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown content kind `{s}`"))
    }
}

/// Travel personality profile derived from a traveller's preferences and past trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[content_schema]
pub struct PersonalityAnalysis {
    /// Short label for the traveller type, e.g. "Cultural Explorer"
    pub personality_type: String,
    /// Two or three sentences on how this traveller likes to travel
    pub description: String,
    /// Keywords describing pace and style
    pub travel_style: Vec<String>,
    /// Destinations that suit this traveller
    pub recommended_destinations: Vec<String>,
    /// Practical tips tailored to this traveller
    pub tips: Vec<String>,
}

/// Insider analysis of a single destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[content_schema]
pub struct DestinationAnalysis {
    /// Best months or seasons to visit and why
    pub best_time_to_visit: String,
    /// Dishes and drinks worth trying
    pub local_cuisine: Vec<String>,
    /// Customs and etiquette visitors should know
    pub cultural_insights: Vec<String>,
    /// Lesser-known places locals recommend
    pub hidden_gems: Vec<String>,
    /// How to get around
    pub transportation_tips: Vec<String>,
    /// Safety overview for visitors
    pub safety_info: String,
    /// What to pack
    pub packing_recommendations: Vec<String>,
    /// Useful local phrases with meanings
    pub language_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dish {
    /// Dish name
    pub name: String,
    /// One sentence on what it is
    pub description: String,
}

/// Food guide for a destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[content_schema]
pub struct CuisineGuide {
    /// Signature dishes to try
    pub must_try_dishes: Vec<Dish>,
    /// Table manners and tipping customs
    pub dining_etiquette: Vec<String>,
    /// Neighbourhoods, markets or streets known for food
    pub food_districts: Vec<String>,
    /// What a typical meal costs
    pub budget_guide: String,
    /// Notes for the traveller's dietary preferences
    pub dietary_notes: Vec<String>,
}

/// A travel companion's chat reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[content_schema]
pub struct CompanionReply {
    /// The reply shown to the traveller
    pub message: String,
    /// Up to three follow-up prompts the traveller can tap
    pub suggestions: Vec<String>,
    /// One-word tone of the reply, e.g. "excited"
    pub mood: String,
}

/// Result of one content request, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "kebab-case")]
pub enum GeneratedContent {
    Description(String),
    Tips(Vec<String>),
    Personality(PersonalityAnalysis),
    Destination(DestinationAnalysis),
    Itinerary(Vec<String>),
    Cuisine(CuisineGuide),
    Caption(String),
    Title(String),
    Weather(String),
    AttractionDescription(String),
    Companion(CompanionReply),
    Translation(String),
}

impl GeneratedContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            GeneratedContent::Description(_) => ContentKind::Description,
            GeneratedContent::Tips(_) => ContentKind::Tips,
            GeneratedContent::Personality(_) => ContentKind::Personality,
            GeneratedContent::Destination(_) => ContentKind::Destination,
            GeneratedContent::Itinerary(_) => ContentKind::Itinerary,
            GeneratedContent::Cuisine(_) => ContentKind::Cuisine,
            GeneratedContent::Caption(_) => ContentKind::Caption,
            GeneratedContent::Title(_) => ContentKind::Title,
            GeneratedContent::Weather(_) => ContentKind::Weather,
            GeneratedContent::AttractionDescription(_) => ContentKind::AttractionDescription,
            GeneratedContent::Companion(_) => ContentKind::Companion,
            GeneratedContent::Translation(_) => ContentKind::Translation,
        }
    }

    /// The free-text body, for the kinds that have one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GeneratedContent::Description(text)
            | GeneratedContent::Caption(text)
            | GeneratedContent::Title(text)
            | GeneratedContent::Weather(text)
            | GeneratedContent::AttractionDescription(text)
            | GeneratedContent::Translation(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[String]> {
        match self {
            GeneratedContent::Tips(items) | GeneratedContent::Itinerary(items) => Some(items),
            _ => None,
        }
    }
}
