//! Synthetic values for fields no provider supplied
//!
//! Backfilled values look plausible but are random: ratings in 3.0..=5.0,
//! review counts in 50..550, placeholder images, and coordinates jittered
//! around the reference city's centroid.

use std::ops::{Range, RangeInclusive};

use domain::{Backfill, GeoLocation, PlaceStub, round_rating};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum coordinate jitter in degrees, per axis
pub const JITTER_DEGREES: f64 = 0.02;

/// Range of backfilled ratings
pub const BACKFILL_RATING: RangeInclusive<f32> = 3.0..=5.0;

/// Range of backfilled review counts
pub const BACKFILL_REVIEW_COUNT: Range<u32> = 50..550;

/// Range of generated distance labels, in kilometers
pub const BACKFILL_DISTANCE_KM: RangeInclusive<f64> = 5.0..=15.0;

const PLACEHOLDER_IMAGE_URL: &str = "https://picsum.photos/300/200";

/// Source of synthetic filler values
#[derive(Debug)]
pub struct SyntheticFiller {
    rng: Mutex<StdRng>,
}

impl Default for SyntheticFiller {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticFiller {
    /// Filler seeded from the operating system
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic filler
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Rating in 3.0..=5.0, one decimal
    pub fn rating(&self) -> f32 {
        round_rating(self.rng.lock().random_range(BACKFILL_RATING))
    }

    /// Review count in 50..550
    pub fn review_count(&self) -> u32 {
        self.rng.lock().random_range(BACKFILL_REVIEW_COUNT)
    }

    /// Placeholder image URL keyed by a random seed
    pub fn image_url(&self) -> String {
        let seed: u32 = self.rng.lock().random_range(0..1000);
        format!("{PLACEHOLDER_IMAGE_URL}?random={seed}")
    }

    /// `center` moved by up to [`JITTER_DEGREES`] on each axis
    pub fn jitter(&self, center: GeoLocation) -> GeoLocation {
        let mut rng = self.rng.lock();
        let d_lat = rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES);
        let d_lng = rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES);
        center.offset(d_lat, d_lng)
    }

    /// A point near the approximate centroid of `reference`
    pub fn near_reference(&self, reference: &str) -> GeoLocation {
        self.jitter(GeoLocation::city_centroid(reference))
    }

    /// Distance label such as `"7.3 km"`
    pub fn distance_label(&self) -> String {
        let km = self.rng.lock().random_range(BACKFILL_DISTANCE_KM);
        format!("{km:.1} km")
    }

    /// A complete set of fallback values for `stub`
    ///
    /// The address falls back to the stub's own address, then to
    /// `"{name}, {reference}"`.
    pub fn backfill(&self, stub: &PlaceStub, reference: &str) -> Backfill {
        let address = stub
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map_or_else(|| format!("{}, {}", stub.name, reference.trim()), ToString::to_string);

        Backfill {
            address,
            location: self.near_reference(reference),
            rating: self.rating(),
            review_count: self.review_count(),
            image_url: self.image_url(),
        }
    }
}
