//! Parsing of free-text AI responses into itinerary content

use domain::{
    DEFAULT_PLACE_KIND, ItineraryContent, MAX_PLACES, MIN_PLACES, PlaceStub, TripRequest,
};
use serde_json::{Map, Value};

use super::templates;
use crate::error::ApplicationError;

/// Remove markdown code fences (```` ```json ```` / ```` ``` ````)
fn strip_code_fences(raw: &str) -> String {
    raw.trim().replace("```json", "").replace("```", "")
}

/// First balanced `{...}` substring of `text`
///
/// Braces inside JSON string literals (including escaped quotes) do not count.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {},
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            },
            _ => {},
        }
    }
    None
}

/// Text of a scalar JSON value; numbers are rendered, blanks are `None`
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn place_from_value(value: &Value) -> Option<PlaceStub> {
    let obj = value.as_object()?;
    let name = text(obj.get("name"))?;
    Some(PlaceStub {
        name,
        kind: text(obj.get("type")).unwrap_or_else(|| DEFAULT_PLACE_KIND.to_string()),
        time: text(obj.get("time")).unwrap_or_default(),
        duration_label: text(obj.get("duration")).unwrap_or_default(),
        description: text(obj.get("description")).unwrap_or_default(),
        cost_label: text(obj.get("cost")).unwrap_or_default(),
        address: text(obj.get("address")),
        tips: text(obj.get("tips")),
    })
}

fn places_array(obj: &Map<String, Value>) -> Option<&Vec<Value>> {
    obj.get("itinerary")
        .and_then(Value::as_array)
        .or_else(|| obj.get("places").and_then(Value::as_array))
}

/// Parse and validate a raw AI response
///
/// `total_distance_default` supplies the distance label when the response
/// has none.
///
/// # Errors
///
/// [`ApplicationError::Parse`] when no JSON object can be found, the title is
/// missing, or fewer than the minimum number of usable places are present.
pub(super) fn parse_itinerary(
    raw: &str,
    request: &TripRequest,
    total_distance_default: impl FnOnce() -> String,
) -> Result<ItineraryContent, ApplicationError> {
    let cleaned = strip_code_fences(raw);
    let json = extract_json_object(&cleaned)
        .ok_or_else(|| ApplicationError::Parse("no JSON object in response".to_string()))?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| ApplicationError::Parse(e.to_string()))?;
    let obj = value
        .as_object()
        .ok_or_else(|| ApplicationError::Parse("response is not an object".to_string()))?;

    let title = text(obj.get("title"))
        .ok_or_else(|| ApplicationError::Parse("missing title".to_string()))?;
    let entries = places_array(obj)
        .ok_or_else(|| ApplicationError::Parse("missing itinerary array".to_string()))?;

    let mut places: Vec<PlaceStub> = entries.iter().filter_map(place_from_value).collect();
    if places.len() < MIN_PLACES {
        return Err(ApplicationError::Parse(format!(
            "expected at least {MIN_PLACES} places, got {}",
            places.len()
        )));
    }
    places.truncate(MAX_PLACES);

    Ok(ItineraryContent {
        title,
        description: text(obj.get("description"))
            .unwrap_or_else(|| templates::short_description(request)),
        places,
        total_distance_label: text(obj.get("totalDistance"))
            .unwrap_or_else(total_distance_default),
        estimated_cost_label: text(obj.get("estimatedCost"))
            .unwrap_or_else(|| request.budget_tier().cost_range_label().to_string()),
        best_time_to_start: text(obj.get("bestTimeToStart"))
            .unwrap_or_else(|| templates::BEST_TIME_TO_START.to_string()),
        transportation_tips: text(obj.get("transportationTips"))
            .unwrap_or_else(|| templates::TRANSPORTATION_TIPS.to_string()),
        weather_notes: text(obj.get("weatherConsiderations"))
            .unwrap_or_else(|| templates::WEATHER_NOTES.to_string()),
        additional_tips: text(obj.get("additionalTips"))
            .unwrap_or_else(|| templates::ADDITIONAL_TIPS.to_string()),
    })
}
