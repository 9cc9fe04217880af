use super::{fallback, prompts};
use crate::{
    core::generator::TripContentGenerator,
    schemas::ContentSchema,
    types::{
        CompanionReply, CompanionTurn, ContentKind, ContentRequest, CuisineGuide,
        DestinationAnalysis, Generated, GeneratedContent, PersonalityAnalysis, PriorTrip,
        TripRequest,
    },
};

fn strip_wrapping_quotes(text: String) -> String {
    let unquoted = text.trim().trim_matches(|ch: char| ch == '"' || ch == '\'').trim();
    if unquoted.is_empty() {
        text
    } else {
        unquoted.to_string()
    }
}

impl TripContentGenerator {
    /// Two-paragraph description of a trip.
    pub async fn trip_description(&self, request: &TripRequest) -> Generated<String> {
        self.generate_text(
            ContentKind::Description,
            || prompts::trip_description_prompt(request),
            || fallback::trip_description(request),
        )
        .await
    }

    /// A short list of practical tips, one item per line of the completion.
    pub async fn travel_tips(&self, destination: &str, preferences: &[String]) -> Generated<Vec<String>> {
        self.generate_lines(
            ContentKind::Tips,
            || prompts::travel_tips_prompt(destination, preferences),
            fallback::travel_tips,
        )
        .await
    }

    pub async fn personality_analysis(
        &self,
        preferences: &[String],
        prior_trips: &[PriorTrip],
    ) -> Generated<PersonalityAnalysis> {
        self.generate_structured(
            ContentKind::Personality,
            || {
                prompts::personality_analysis_prompt(
                    preferences,
                    prior_trips,
                    PersonalityAnalysis::schema(),
                )
            },
            || fallback::personality_analysis(preferences, prior_trips),
        )
        .await
    }

    pub async fn destination_analysis(&self, destination: &str) -> Generated<DestinationAnalysis> {
        self.generate_structured(
            ContentKind::Destination,
            || prompts::destination_analysis_prompt(destination, DestinationAnalysis::schema()),
            || fallback::destination_analysis(destination),
        )
        .await
    }

    /// Day-by-day plan as lines: a "Day N" heading followed by its activities.
    pub async fn custom_itinerary(&self, request: &TripRequest) -> Generated<Vec<String>> {
        self.generate_lines(
            ContentKind::Itinerary,
            || prompts::custom_itinerary_prompt(request),
            || fallback::custom_itinerary(request),
        )
        .await
    }

    pub async fn cuisine_guide(
        &self,
        destination: &str,
        dietary_preferences: &[String],
    ) -> Generated<CuisineGuide> {
        self.generate_structured(
            ContentKind::Cuisine,
            || {
                prompts::cuisine_guide_prompt(
                    destination,
                    dietary_preferences,
                    CuisineGuide::schema(),
                )
            },
            || fallback::cuisine_guide(destination, dietary_preferences),
        )
        .await
    }

    pub async fn social_caption(&self, destination: &str, highlights: &[String]) -> Generated<String> {
        self.generate_text(
            ContentKind::Caption,
            || prompts::social_caption_prompt(destination, highlights),
            || fallback::social_caption(destination),
        )
        .await
    }

    /// Models like to quote titles; surrounding quotes are removed.
    pub async fn trip_title(
        &self,
        destination: &str,
        preferences: &[String],
        duration_days: Option<u32>,
    ) -> Generated<String> {
        self.generate_text(
            ContentKind::Title,
            || prompts::trip_title_prompt(destination, preferences, duration_days),
            || fallback::trip_title(destination, duration_days),
        )
        .await
        .map(strip_wrapping_quotes)
    }

    pub async fn weather_advice(&self, destination: &str, month: Option<&str>) -> Generated<String> {
        self.generate_text(
            ContentKind::Weather,
            || prompts::weather_advice_prompt(destination, month),
            || fallback::weather_advice(destination),
        )
        .await
    }

    pub async fn enhance_attraction_description(
        &self,
        attraction: &str,
        destination: &str,
        description: &str,
    ) -> Generated<String> {
        self.generate_text(
            ContentKind::AttractionDescription,
            || prompts::attraction_enhancement_prompt(attraction, destination, description),
            || fallback::attraction_description(attraction, destination, description),
        )
        .await
    }

    pub async fn companion_reply(
        &self,
        message: &str,
        history: &[CompanionTurn],
        trip: Option<&TripRequest>,
    ) -> Generated<CompanionReply> {
        self.generate_structured(
            ContentKind::Companion,
            || prompts::companion_reply_prompt(message, history, trip, CompanionReply::schema()),
            fallback::companion_reply,
        )
        .await
    }

    /// Falls back to the untranslated phrase.
    pub async fn translate_phrase(&self, phrase: &str, target_language: &str) -> Generated<String> {
        self.generate_text(
            ContentKind::Translation,
            || prompts::translation_prompt(phrase, target_language),
            || fallback::translation(phrase),
        )
        .await
    }

    /// Dispatch a tagged request to the matching operation.
    pub async fn generate(&self, request: &ContentRequest) -> Generated<GeneratedContent> {
        match request {
            ContentRequest::Description(trip) => self
                .trip_description(trip)
                .await
                .map(GeneratedContent::Description),
            ContentRequest::Tips {
                destination,
                preferences,
            } => self
                .travel_tips(destination, preferences)
                .await
                .map(GeneratedContent::Tips),
            ContentRequest::Personality {
                preferences,
                prior_trips,
            } => self
                .personality_analysis(preferences, prior_trips)
                .await
                .map(GeneratedContent::Personality),
            ContentRequest::Destination { destination } => self
                .destination_analysis(destination)
                .await
                .map(GeneratedContent::Destination),
            ContentRequest::Itinerary(trip) => self
                .custom_itinerary(trip)
                .await
                .map(GeneratedContent::Itinerary),
            ContentRequest::Cuisine {
                destination,
                dietary_preferences,
            } => self
                .cuisine_guide(destination, dietary_preferences)
                .await
                .map(GeneratedContent::Cuisine),
            ContentRequest::Caption {
                destination,
                highlights,
            } => self
                .social_caption(destination, highlights)
                .await
                .map(GeneratedContent::Caption),
            ContentRequest::Title {
                destination,
                preferences,
                duration_days,
            } => self
                .trip_title(destination, preferences, *duration_days)
                .await
                .map(GeneratedContent::Title),
            ContentRequest::Weather { destination, month } => self
                .weather_advice(destination, month.as_deref())
                .await
                .map(GeneratedContent::Weather),
            ContentRequest::AttractionDescription {
                attraction,
                destination,
                description,
            } => self
                .enhance_attraction_description(attraction, destination, description)
                .await
                .map(GeneratedContent::AttractionDescription),
            ContentRequest::Companion {
                message,
                history,
                trip,
            } => self
                .companion_reply(message, history, trip.as_ref())
                .await
                .map(GeneratedContent::Companion),
            ContentRequest::Translation {
                phrase,
                target_language,
            } => self
                .translate_phrase(phrase, target_language)
                .await
                .map(GeneratedContent::Translation),
        }
    }
}
