use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::LocatorError;
use crate::geo::{Coordinate, distance_m};
use crate::place::Place;

/// Extra room multiplied onto a fitted region's spans so markers at the
/// bounding box edge don't sit on the viewport border.
pub const DEFAULT_PADDING: f64 = 1.3;

/// A map viewport: a center plus how many degrees of latitude/longitude the
/// visible area spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, specta::Type)]
pub struct Region {
    pub center: Coordinate,
    pub lat_span: f64,
    pub long_span: f64,
}

/// Measure every place against `reference` and return a new list with
/// `distance_m` populated. The input is untouched, and two calls with the
/// same inputs produce identical output.
pub fn compute_distances(reference: Coordinate, places: &[Place]) -> Vec<Place> {
    places
        .iter()
        .map(|place| {
            let mut place = place.clone();
            place.distance_m = Some(distance_m(reference, place.coordinate));
            place
        })
        .collect()
}

/// Keep the places within `radius_m` (inclusive) and order them nearest
/// first, ties broken by ascending id so re-renders are stable. Places with
/// no measured distance are dropped. A non-positive radius is misuse and
/// fails with [LocatorError::InvalidArgument].
pub fn filter_and_sort(places: Vec<Place>, radius_m: f64) -> Result<Vec<Place>, LocatorError> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(LocatorError::InvalidArgument(format!(
            "search radius must be positive, got {radius_m}"
        )));
    }

    let mut within = places
        .into_iter()
        .filter(|p| p.distance_m.is_some_and(|d| d <= radius_m))
        .collect::<Vec<_>>();

    within.sort_by(|a, b| {
        // Distances are present and finite for everything that passed the
        // filter, so partial_cmp can't fail here.
        a.distance_m
            .partial_cmp(&b.distance_m)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(within)
}

/// Fit a viewport around `coords`: the axis-aligned bounding box, centered
/// on its midpoint, spans scaled by `padding` (>= 1.0, see
/// [DEFAULT_PADDING]). An empty set has no region and fails with
/// [LocatorError::InvalidArgument].
///
/// A single coordinate yields zero spans even after padding; callers
/// rendering the result must apply their own minimum-span floor (the app
/// shell uses [crate::MIN_SPAN_DEG]).
pub fn fit_region(coords: &[Coordinate], padding: f64) -> Result<Region, LocatorError> {
    if coords.is_empty() {
        return Err(LocatorError::InvalidArgument(
            "cannot fit a region to zero coordinates".to_string(),
        ));
    }
    if !padding.is_finite() || padding < 1.0 {
        return Err(LocatorError::InvalidArgument(format!(
            "padding factor must be >= 1.0, got {padding}"
        )));
    }

    let mut min_lat = 90.0f64;
    let mut max_lat = -90.0f64;
    let mut min_long = 180.0f64;
    let mut max_long = -180.0f64;

    for c in coords {
        min_lat = min_lat.min(c.lat);
        max_lat = max_lat.max(c.lat);
        min_long = min_long.min(c.long);
        max_long = max_long.max(c.long);
    }

    Ok(Region {
        center: Coordinate {
            lat: (min_lat + max_lat) / 2.0,
            long: (min_long + max_long) / 2.0,
        },
        lat_span: (max_lat - min_lat) * padding,
        long_span: (max_long - min_long) * padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::tysons_catalog;

    const USER: Coordinate = Coordinate {
        lat: 38.911944,
        long: -77.2225,
    };

    #[test]
    fn test_compute_distances_populates_all() {
        let catalog = tysons_catalog();
        let measured = compute_distances(USER, &catalog);

        assert_eq!(measured.len(), catalog.len());
        assert!(measured.iter().all(|p| p.distance_m.is_some()));
        // Input is untouched
        assert!(catalog.iter().all(|p| p.distance_m.is_none()));
    }

    #[test]
    fn test_compute_distances_idempotent() {
        let catalog = tysons_catalog();
        let first = compute_distances(USER, &catalog);
        let second = compute_distances(USER, &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_within_one_km() {
        // Only the Tysons-Pimmit library (~297 m) is inside 1 km of the
        // reference point; McLean High School just misses at ~1009 m.
        let measured = compute_distances(USER, &tysons_catalog());
        let results = filter_and_sort(measured, 1000.0).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "tysons-pimmit-library");
        assert!(results[0].distance_m.unwrap() <= 1000.0);
    }

    #[test]
    fn test_filter_inclusive_boundary() {
        let measured = compute_distances(USER, &tysons_catalog());
        let exact = measured
            .iter()
            .find(|p| p.id == "mclean-high-school")
            .and_then(|p| p.distance_m)
            .unwrap();

        // A place exactly at the radius is retained.
        let results = filter_and_sort(measured, exact).unwrap();
        assert!(results.iter().any(|p| p.id == "mclean-high-school"));
        assert!(results.iter().all(|p| p.distance_m.unwrap() <= exact));
    }

    #[test]
    fn test_sort_order_and_tie_break() {
        let measured = compute_distances(USER, &tysons_catalog());
        let results = filter_and_sort(measured, 25_000.0).unwrap();

        assert_eq!(results.len(), 8);
        for pair in results.windows(2) {
            assert!(pair[0].distance_m.unwrap() <= pair[1].distance_m.unwrap());
        }

        // Equidistant places come back in id order.
        let mut tied = tysons_catalog().into_iter().take(2).collect::<Vec<_>>();
        tied[0].id = "zeta".to_string();
        tied[0].distance_m = Some(500.0);
        tied[1].id = "alpha".to_string();
        tied[1].distance_m = Some(500.0);
        let sorted = filter_and_sort(tied, 1000.0).unwrap();
        assert_eq!(sorted[0].id, "alpha");
        assert_eq!(sorted[1].id, "zeta");
    }

    #[test]
    fn test_unmeasured_places_excluded() {
        let catalog = tysons_catalog();
        let results = filter_and_sort(catalog, 25_000.0).unwrap();
        assert!(results.is_empty(), "unknown distance means out of range");
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        for radius in [0.0, -1.0, f64::NAN, f64::NEG_INFINITY] {
            assert!(matches!(
                filter_and_sort(tysons_catalog(), radius),
                Err(LocatorError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_fit_region_contains_inputs() {
        let coords = tysons_catalog()
            .iter()
            .map(|p| p.coordinate)
            .collect::<Vec<_>>();
        let region = fit_region(&coords, 1.0).unwrap();

        let lat_lo = region.center.lat - region.lat_span / 2.0;
        let lat_hi = region.center.lat + region.lat_span / 2.0;
        let long_lo = region.center.long - region.long_span / 2.0;
        let long_hi = region.center.long + region.long_span / 2.0;

        for c in &coords {
            assert!((lat_lo..=lat_hi).contains(&c.lat));
            assert!((long_lo..=long_hi).contains(&c.long));
        }
    }

    #[test]
    fn test_fit_region_two_points_no_padding() {
        let a = Coordinate { lat: 38.90, long: -77.24 };
        let b = Coordinate { lat: 38.93, long: -77.21 };
        let region = fit_region(&[a, b], 1.0).unwrap();

        // Padding of 1.0 leaves the spans exactly the coordinate deltas.
        assert_eq!(region.lat_span, b.lat - a.lat);
        assert_eq!(region.long_span, b.long - a.long);
        assert_eq!(region.center.lat, (a.lat + b.lat) / 2.0);
        assert_eq!(region.center.long, (a.long + b.long) / 2.0);
    }

    #[test]
    fn test_fit_region_padding_scales_spans() {
        let a = Coordinate { lat: 38.90, long: -77.24 };
        let b = Coordinate { lat: 38.93, long: -77.21 };
        let unpadded = fit_region(&[a, b], 1.0).unwrap();
        let padded = fit_region(&[a, b], DEFAULT_PADDING).unwrap();

        assert_eq!(padded.center, unpadded.center);
        assert!((padded.lat_span - unpadded.lat_span * 1.3).abs() < 1e-12);
        assert!((padded.long_span - unpadded.long_span * 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_fit_region_single_point_zero_spans() {
        let region = fit_region(&[USER], DEFAULT_PADDING).unwrap();
        assert_eq!(region.center, USER);
        assert_eq!(region.lat_span, 0.0);
        assert_eq!(region.long_span, 0.0);
    }

    #[test]
    fn test_fit_region_rejects_bad_input() {
        assert!(matches!(
            fit_region(&[], DEFAULT_PADDING),
            Err(LocatorError::InvalidArgument(_))
        ));
        assert!(matches!(
            fit_region(&[USER], 0.5),
            Err(LocatorError::InvalidArgument(_))
        ));
    }
}
