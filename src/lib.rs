//! trip-muse: typed, fallback-safe AI content for travel planning
//!
//! Every operation returns usable content: when no API key is configured, the
//! remote call fails, or the model answers with something unusable, a
//! deterministic local fallback of the same shape is returned instead.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_muse::{GeneratorConfig, TripContentGenerator, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = TripContentGenerator::new(GeneratorConfig::from_env()?);
//!
//!     let request = TripRequest::new("Paris")
//!         .with_preferences(["Art & Culture"])
//!         .with_duration(3);
//!     let description = generator.trip_description(&request).await;
//!     println!("{}", *description);
//!
//!     let analysis = generator.destination_analysis("Tokyo").await;
//!     println!("{}", analysis.best_time_to_visit);
//!     Ok(())
//! }
//! ```

extern crate self as trip_muse;

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub(crate) mod services;
pub mod types;

pub use config::{GeneratorConfig, DEFAULT_MODEL};
pub use core::TripContentGenerator;
pub use error::{ContentError, Result};
pub use schemas::{ContentSchema, SchemaHandle, ShapeValidation};
pub use services::openai_client::{
    ChatCompletionRequest, CompletionBackend, OpenAIClient, DEFAULT_BASE_URL,
};
pub use services::{fallback, prompts};
pub use trip_muse_macros::content_schema;
pub use types::{
    CompanionReply, CompanionRole, CompanionTurn, ContentKind, ContentOrigin, ContentRequest,
    CuisineGuide, DestinationAnalysis, Dish, FallbackReason, Generated, GeneratedContent,
    KindProfile, PersonalityAnalysis, PriorTrip, TripRequest, MAX_ITINERARY_DAYS,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
