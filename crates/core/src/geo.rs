//! Great-circle distance and nearest-shop ranking.

use serde::{Deserialize, Serialize};

use crate::types::ShopKey;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A shop ranked by distance from a query origin.
///
/// Derived per location query and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub shop_key: ShopKey,
    pub distance_km: f64,
}

/// Haversine great-circle distance between two points, in kilometers.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rank shops by distance from `origin`, closest first, truncated to `k`.
///
/// Uses a stable sort so ties keep the caller's enumeration order. An empty
/// input yields an empty result, not an error.
#[must_use]
pub fn nearest(
    origin: GeoPoint,
    shops: impl IntoIterator<Item = (ShopKey, GeoPoint)>,
    k: usize,
) -> Vec<RankedCandidate> {
    let mut candidates: Vec<RankedCandidate> = shops
        .into_iter()
        .map(|(shop_key, location)| RankedCandidate {
            shop_key,
            distance_km: haversine_km(origin, location),
        })
        .collect();

    // sort_by is stable: equal distances stay in catalog order
    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    candidates.truncate(k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO: GeoPoint = GeoPoint::new(35.6812, 139.7671);
    const OSAKA: GeoPoint = GeoPoint::new(34.7025, 135.4959);
    const SAPPORO: GeoPoint = GeoPoint::new(43.0618, 141.3545);

    #[test]
    fn test_haversine_zero_for_identical_points() {
        assert!(haversine_km(TOKYO, TOKYO).abs() < f64::EPSILON);
    }

    #[test]
    fn test_haversine_symmetric() {
        let there = haversine_km(TOKYO, OSAKA);
        let back = haversine_km(OSAKA, TOKYO);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_tokyo_osaka_roughly_400km() {
        let d = haversine_km(TOKYO, OSAKA);
        assert!((390.0..420.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_nearest_sorted_ascending_and_truncated() {
        let shops = vec![
            (ShopKey::new("sapporo"), SAPPORO),
            (ShopKey::new("tokyo"), TOKYO),
            (ShopKey::new("osaka"), OSAKA),
        ];

        let ranked = nearest(TOKYO, shops, 2);
        assert_eq!(ranked.len(), 2);
        let first = ranked.first().expect("two candidates");
        let second = ranked.get(1).expect("two candidates");
        assert_eq!(first.shop_key, ShopKey::new("tokyo"));
        assert_eq!(second.shop_key, ShopKey::new("osaka"));
        assert!(first.distance_km <= second.distance_km);
    }

    #[test]
    fn test_nearest_length_is_min_of_k_and_catalog() {
        let shops = vec![(ShopKey::new("tokyo"), TOKYO)];
        assert_eq!(nearest(OSAKA, shops, 3).len(), 1);
    }

    #[test]
    fn test_nearest_empty_catalog_is_empty() {
        assert!(nearest(TOKYO, Vec::new(), 3).is_empty());
    }

    #[test]
    fn test_nearest_ties_keep_catalog_order() {
        // Same location for every shop: ranking must preserve input order
        let shops = vec![
            (ShopKey::new("first"), TOKYO),
            (ShopKey::new("second"), TOKYO),
            (ShopKey::new("third"), TOKYO),
        ];

        let ranked = nearest(TOKYO, shops, 3);
        let keys: Vec<&str> = ranked.iter().map(|c| c.shop_key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }
}
