//! Canned itineraries used when AI generation is unavailable

use domain::{ItineraryContent, Mood, PlaceStub, TripRequest};

pub(super) const BEST_TIME_TO_START: &str = "9:00 AM";

pub(super) const TRANSPORTATION_TIPS: &str = "Walking and public transport recommended for most locations. Consider ride-sharing for longer distances between stops.";

pub(super) const WEATHER_NOTES: &str = "Check weather forecast and dress appropriately. Some outdoor activities may be weather-dependent, so have indoor alternatives ready.";

pub(super) const ADDITIONAL_TIPS: &str = "Book reservations in advance for restaurants and spa treatments. Bring a camera to capture memories, and don't forget to stay hydrated throughout the day!";

struct Stop {
    name: &'static str,
    kind: &'static str,
    time: &'static str,
    duration: &'static str,
    description: &'static str,
    cost: &'static str,
    address: &'static str,
    tips: &'static str,
}

impl Stop {
    fn to_stub(&self) -> PlaceStub {
        PlaceStub {
            name: self.name.to_string(),
            kind: self.kind.to_string(),
            time: self.time.to_string(),
            duration_label: self.duration.to_string(),
            description: self.description.to_string(),
            cost_label: self.cost.to_string(),
            address: Some(self.address.to_string()),
            tips: Some(self.tips.to_string()),
        }
    }
}

const FUN: [Stop; 4] = [
    Stop {
        name: "Adventure Park",
        kind: "Entertainment",
        time: "10:00 AM",
        duration: "2.5 hours",
        description: "Start your day with thrilling rides and exciting activities that will get your adrenaline pumping. Perfect for adventure seekers looking for high-energy fun.",
        cost: "$25-35",
        address: "123 Adventure Blvd",
        tips: "Arrive early to avoid crowds and get the best ride times",
    },
    Stop {
        name: "Local Food Market",
        kind: "Food & Dining",
        time: "1:00 PM",
        duration: "1.5 hours",
        description: "Explore a vibrant market filled with diverse food vendors and local specialties. Great for trying new flavors and experiencing local culture.",
        cost: "$15-25",
        address: "456 Market Street",
        tips: "Try the local street food specialties and bring cash for smaller vendors",
    },
    Stop {
        name: "Interactive Museum",
        kind: "Museum",
        time: "3:30 PM",
        duration: "2 hours",
        description: "Engage with hands-on exhibits and interactive displays that make learning fun and exciting. Perfect for curious minds and group activities.",
        cost: "$12-18",
        address: "789 Museum Ave",
        tips: "Check for special exhibitions and interactive workshops",
    },
    Stop {
        name: "Rooftop Bar",
        kind: "Nightlife",
        time: "6:00 PM",
        duration: "2 hours",
        description: "End your adventure with amazing city views, craft cocktails, and a lively atmosphere. Perfect for celebrating an exciting day.",
        cost: "$30-50",
        address: "321 Sky Tower",
        tips: "Make a reservation for the best sunset views",
    },
];

const CHILL: [Stop; 4] = [
    Stop {
        name: "Botanical Garden",
        kind: "Park",
        time: "10:00 AM",
        duration: "2 hours",
        description: "Wander through peaceful gardens filled with beautiful flowers and quiet walking paths. Perfect for meditation and connecting with nature.",
        cost: "$8-12",
        address: "100 Garden Lane",
        tips: "Visit the rose garden and bring a book to read by the pond",
    },
    Stop {
        name: "Cozy Bookstore Cafe",
        kind: "Cafe",
        time: "12:30 PM",
        duration: "1.5 hours",
        description: "Relax in a quiet cafe surrounded by books, with excellent coffee and comfortable seating. Ideal for unwinding and people-watching.",
        cost: "$10-15",
        address: "234 Literary St",
        tips: "Try their signature latte and browse the local authors section",
    },
    Stop {
        name: "Art Gallery",
        kind: "Cultural",
        time: "2:30 PM",
        duration: "1.5 hours",
        description: "Explore serene gallery spaces featuring local and contemporary art in a peaceful, contemplative environment.",
        cost: "$5-10",
        address: "567 Arts District",
        tips: "Free admission on first Fridays, and they often have artist talks",
    },
    Stop {
        name: "Spa & Wellness Center",
        kind: "Wellness",
        time: "4:30 PM",
        duration: "2 hours",
        description: "Indulge in relaxing treatments and peaceful atmosphere for the ultimate unwinding experience. Perfect end to a chill day.",
        cost: "$40-80",
        address: "890 Wellness Way",
        tips: "Book treatments in advance and arrive 15 minutes early",
    },
];

const NATURE: [Stop; 4] = [
    Stop {
        name: "Nature Trail",
        kind: "Hiking",
        time: "9:00 AM",
        duration: "3 hours",
        description: "Explore scenic hiking trails with beautiful views and wildlife spotting opportunities. Perfect for connecting with the outdoors.",
        cost: "Free",
        address: "Trailhead at Pine Ridge Park",
        tips: "Bring water, comfortable shoes, and a camera for wildlife",
    },
    Stop {
        name: "Lakeside Picnic Area",
        kind: "Park",
        time: "12:30 PM",
        duration: "1.5 hours",
        description: "Enjoy lunch with stunning lake views and fresh air. Perfect spot for relaxation and taking in natural beauty.",
        cost: "$5 parking",
        address: "Crystal Lake Park",
        tips: "Pack a picnic or grab food from the nearby deli",
    },
    Stop {
        name: "Wildlife Sanctuary",
        kind: "Nature Center",
        time: "2:30 PM",
        duration: "2 hours",
        description: "Learn about local wildlife and conservation efforts while observing native animals in their natural habitats.",
        cost: "$8-15",
        address: "456 Conservation Dr",
        tips: "Check feeding times for the best wildlife viewing opportunities",
    },
    Stop {
        name: "Sunset Viewpoint",
        kind: "Scenic Spot",
        time: "5:30 PM",
        duration: "1 hour",
        description: "Watch a breathtaking sunset over the landscape from this popular viewpoint. Perfect ending to a nature-filled day.",
        cost: "Free",
        address: "Eagle Point Overlook",
        tips: "Arrive 30 minutes before sunset for the best photos",
    },
];

const ROMANTIC: [Stop; 4] = [
    Stop {
        name: "Historic Garden",
        kind: "Garden",
        time: "10:00 AM",
        duration: "1.5 hours",
        description: "Stroll through romantic gardens with beautiful flowers, fountains, and intimate pathways perfect for couples.",
        cost: "$10-15",
        address: "123 Romance Lane",
        tips: "Perfect for photos together, especially near the fountain",
    },
    Stop {
        name: "Wine Tasting Room",
        kind: "Wine Bar",
        time: "12:00 PM",
        duration: "2 hours",
        description: "Enjoy an intimate wine tasting experience with local vintages and cheese pairings in a cozy, romantic setting.",
        cost: "$25-40",
        address: "789 Vineyard St",
        tips: "Ask about private tastings and wine pairing recommendations",
    },
    Stop {
        name: "Couples Spa",
        kind: "Spa",
        time: "3:00 PM",
        duration: "2 hours",
        description: "Relax together with couples massage and spa treatments in a romantic, peaceful environment designed for two.",
        cost: "$80-150",
        address: "456 Serenity Ave",
        tips: "Book the couples suite and arrive early to enjoy the amenities",
    },
    Stop {
        name: "Fine Dining Restaurant",
        kind: "Restaurant",
        time: "6:30 PM",
        duration: "2 hours",
        description: "End your romantic day with exceptional cuisine in an elegant restaurant with intimate ambiance and attentive service.",
        cost: "$60-100",
        address: "321 Gourmet Blvd",
        tips: "Request a table by the window and mention if it's a special occasion",
    },
];

const fn stops(mood: Mood) -> &'static [Stop; 4] {
    match mood {
        Mood::Fun => &FUN,
        Mood::Chill => &CHILL,
        Mood::Nature => &NATURE,
        Mood::Romantic => &ROMANTIC,
    }
}

/// Default description for a trip
pub(super) fn short_description(request: &TripRequest) -> String {
    format!(
        "A perfect {} day planned just for you in {}.",
        request.mood().as_str(),
        request.location()
    )
}

/// The canned itinerary for `request`'s mood
pub(super) fn fallback_content(request: &TripRequest, total_distance_label: String) -> ItineraryContent {
    let mood = request.mood();
    ItineraryContent {
        title: format!("{} in {}", mood.title(), request.location()),
        description: format!(
            "{} Discover amazing places and create unforgettable memories with this carefully curated itinerary.",
            short_description(request)
        ),
        places: stops(mood).iter().map(Stop::to_stub).collect(),
        total_distance_label,
        estimated_cost_label: request.budget_tier().cost_range_label().to_string(),
        best_time_to_start: BEST_TIME_TO_START.to_string(),
        transportation_tips: TRANSPORTATION_TIPS.to_string(),
        weather_notes: WEATHER_NOTES.to_string(),
        additional_tips: ADDITIONAL_TIPS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use domain::{BudgetTier, MIN_PLACES};

    use super::*;

    fn request(mood: Mood) -> TripRequest {
        TripRequest::new(mood, "Paris", 6, BudgetTier::new(2).unwrap()).unwrap()
    }

    #[test]
    fn every_mood_has_four_complete_stops() {
        for mood in Mood::ALL {
            let content = fallback_content(&request(mood), "8.0 km".to_string());
            assert_eq!(content.places.len(), MIN_PLACES);
            for stop in &content.places {
                assert!(!stop.name.is_empty());
                assert!(!stop.time.is_empty());
                assert!(!stop.cost_label.contains('₹'));
                assert!(stop.address.is_some());
                assert!(stop.tips.is_some());
            }
        }
    }

    #[test]
    fn chill_template_for_paris() {
        let content = fallback_content(&request(Mood::Chill), "8.0 km".to_string());
        assert_eq!(content.title, "Peaceful Relaxation Day in Paris");
        assert_eq!(content.places[0].name, "Botanical Garden");
        assert_eq!(content.places[0].kind, "Park");
        assert_eq!(content.estimated_cost_label, "$30 - $75");
        assert_eq!(content.best_time_to_start, "9:00 AM");
        assert!(content.description.starts_with("A perfect chill day planned just for you in Paris."));
    }

    #[test]
    fn templates_are_distinct() {
        let fun = fallback_content(&request(Mood::Fun), String::new());
        let romantic = fallback_content(&request(Mood::Romantic), String::new());
        assert_eq!(fun.places[0].name, "Adventure Park");
        assert_eq!(romantic.places[3].name, "Fine Dining Restaurant");
    }
}
