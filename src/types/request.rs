use serde::{Deserialize, Serialize};

use super::content::ContentKind;

/// Itinerary length when the traveller gave none.
pub const DEFAULT_ITINERARY_DAYS: u32 = 3;

/// Longest itinerary planned day by day; longer trips are capped.
pub const MAX_ITINERARY_DAYS: u32 = 30;

/// Zero days means no duration was given.
pub fn normalize_duration(duration_days: Option<u32>) -> Option<u32> {
    duration_days.filter(|days| *days > 0)
}

/// Parameters shared by the trip-level content kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Destination as typed by the traveller, e.g. "Paris" or "Kyoto, Japan"
    pub destination: String,
    /// Preference tags in the order the traveller picked them
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Trip length in days
    #[serde(default)]
    pub duration_days: Option<u32>,
    /// Free-text request such as "traveling with a toddler"
    #[serde(default)]
    pub special_request: Option<String>,
    /// A previous trip to build on
    #[serde(default)]
    pub prior_trip: Option<PriorTrip>,
}

impl TripRequest {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }

    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    /// Zero is treated as "no duration given".
    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = normalize_duration(Some(days));
        self
    }

    /// Trip length, with zero read as absent.
    pub fn duration(&self) -> Option<u32> {
        normalize_duration(self.duration_days)
    }

    /// Number of days an itinerary covers.
    pub fn itinerary_days(&self) -> u32 {
        self.duration()
            .unwrap_or(DEFAULT_ITINERARY_DAYS)
            .min(MAX_ITINERARY_DAYS)
    }

    pub fn with_special_request(mut self, request: impl Into<String>) -> Self {
        let request = request.into();
        self.special_request = (!request.trim().is_empty()).then_some(request);
        self
    }

    pub fn with_prior_trip(mut self, prior: PriorTrip) -> Self {
        self.prior_trip = Some(prior);
        self
    }
}

/// Summary of a trip the traveller already planned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorTrip {
    pub destination: String,
    /// Number of attractions planned for each day, day 1 first
    #[serde(default)]
    pub attractions_per_day: Vec<u32>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl PriorTrip {
    pub fn total_attractions(&self) -> u64 {
        self.attractions_per_day
            .iter()
            .map(|count| u64::from(*count))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionRole {
    Traveler,
    Companion,
}

/// One message of an ongoing companion chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionTurn {
    pub role: CompanionRole,
    pub content: String,
}

impl CompanionTurn {
    pub fn traveler(content: impl Into<String>) -> Self {
        Self {
            role: CompanionRole::Traveler,
            content: content.into(),
        }
    }

    pub fn companion(content: impl Into<String>) -> Self {
        Self {
            role: CompanionRole::Companion,
            content: content.into(),
        }
    }
}

/// A request for one content kind, carrying that kind's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentRequest {
    Description(TripRequest),
    Tips {
        destination: String,
        #[serde(default)]
        preferences: Vec<String>,
    },
    Personality {
        #[serde(default)]
        preferences: Vec<String>,
        #[serde(default)]
        prior_trips: Vec<PriorTrip>,
    },
    Destination {
        destination: String,
    },
    Itinerary(TripRequest),
    Cuisine {
        destination: String,
        #[serde(default)]
        dietary_preferences: Vec<String>,
    },
    Caption {
        destination: String,
        #[serde(default)]
        highlights: Vec<String>,
    },
    Title {
        destination: String,
        #[serde(default)]
        preferences: Vec<String>,
        #[serde(default)]
        duration_days: Option<u32>,
    },
    Weather {
        destination: String,
        #[serde(default)]
        month: Option<String>,
    },
    AttractionDescription {
        attraction: String,
        destination: String,
        #[serde(default)]
        description: String,
    },
    Companion {
        message: String,
        #[serde(default)]
        history: Vec<CompanionTurn>,
        #[serde(default)]
        trip: Option<TripRequest>,
    },
    Translation {
        phrase: String,
        target_language: String,
    },
}

impl ContentRequest {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentRequest::Description(_) => ContentKind::Description,
            ContentRequest::Tips { .. } => ContentKind::Tips,
            ContentRequest::Personality { .. } => ContentKind::Personality,
            ContentRequest::Destination { .. } => ContentKind::Destination,
            ContentRequest::Itinerary(_) => ContentKind::Itinerary,
            ContentRequest::Cuisine { .. } => ContentKind::Cuisine,
            ContentRequest::Caption { .. } => ContentKind::Caption,
            ContentRequest::Title { .. } => ContentKind::Title,
            ContentRequest::Weather { .. } => ContentKind::Weather,
            ContentRequest::AttractionDescription { .. } => ContentKind::AttractionDescription,
            ContentRequest::Companion { .. } => ContentKind::Companion,
            ContentRequest::Translation { .. } => ContentKind::Translation,
        }
    }
}
