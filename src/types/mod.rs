pub mod content;
pub mod outcome;
pub mod request;
pub mod response;

pub use content::{
    CompanionReply, ContentKind, CuisineGuide, DestinationAnalysis, Dish, GeneratedContent,
    KindProfile, PersonalityAnalysis,
};
pub use outcome::{ContentOrigin, FallbackReason, Generated};
pub use request::{
    normalize_duration, CompanionRole, CompanionTurn, ContentRequest, PriorTrip, TripRequest,
    DEFAULT_ITINERARY_DAYS, MAX_ITINERARY_DAYS,
};
pub use response::{decode_structured, deserialize_structured_response, split_content_lines};
