//! Prompt construction

use std::fmt::Write as _;

use domain::TripRequest;

/// Build the generation prompt for `request`
///
/// The prompt pins the response to a single JSON object with the schema the
/// parser expects.
pub(super) fn build_prompt(request: &TripRequest) -> String {
    let mood = request.mood();
    let location = request.location();
    let duration = request.duration_hours();
    let budget = request.budget_tier().prompt_label();
    let preferences = request
        .preferences()
        .prompt_text()
        .unwrap_or_else(|| "None specified".to_string());

    let mut prompt = format!(
        "You are a professional travel planner creating a detailed {duration}-hour day trip itinerary for {location}.

TRIP REQUIREMENTS:
- Mood: {mood} ({mood_description})
- Duration: {duration} hours
- Budget: {budget}
- Location: {location}
- Additional preferences: {preferences}
",
        mood = mood.as_str(),
        mood_description = mood.description(),
    );

    if let Some(custom) = request.custom_prompt() {
        let _ = write!(
            prompt,
            "\nADDITIONAL INSTRUCTIONS FROM THE TRAVELER:\n{custom}\n"
        );
    }

    let _ = write!(
        prompt,
        r#"
Please create a realistic, well-timed itinerary with actual places in {location}. Respond with ONLY a valid JSON object in this exact format:

{{
    "title": "Engaging trip title that captures the {mood} mood",
    "description": "2-3 sentence description of what makes this trip special",
    "itinerary": [
        {{
            "name": "Actual place name in {location}",
            "type": "Category (Restaurant, Park, Museum, Gallery, Market, etc.)",
            "time": "Start time (e.g., 10:00 AM)",
            "duration": "Time to spend (e.g., 2 hours)",
            "description": "What to do there and why it fits the {mood} mood (2-3 sentences)",
            "cost": "Price range (Free, $5-15, $15-30, etc.) or 'Free'",
            "address": "Full street address if known, or general area",
            "tips": "Helpful insider tip or practical advice"
        }}
    ],
    "totalDistance": "Estimated walking/driving distance in km",
    "estimatedCost": "Total cost range for the day",
    "bestTimeToStart": "Recommended start time",
    "transportationTips": "How to get around efficiently",
    "weatherConsiderations": "Weather-related advice",
    "additionalTips": "Extra helpful advice for the trip"
}}

IMPORTANT GUIDELINES:
1. Include 4-6 specific, real places in {location}
2. Create logical timing with travel time between locations
3. Match the {mood} mood throughout all activities
4. Stay within the {budget} budget range
5. Include at least one meal/food recommendation
6. Ensure activities are appropriate for the time of day
7. Provide practical, actionable advice
8. Use real place names and addresses when possible
9. Make sure the total duration matches {duration} hours
10. Consider opening hours and typical visit durations

Return ONLY the JSON object, no additional text or formatting."#,
        mood = mood.as_str(),
    );

    prompt
}
