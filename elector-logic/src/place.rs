use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, specta::Type)]
/// Kind of building a polling place is hosted in. Closed set, each variant
/// carries the icon and tint the UI renders its marker with.
pub enum PlaceCategory {
    School,
    Library,
    CommunityCenter,
    GovernmentBuilding,
    Church,
    Other,
}

impl PlaceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PlaceCategory::School => "School",
            PlaceCategory::Library => "Library",
            PlaceCategory::CommunityCenter => "Community Center",
            PlaceCategory::GovernmentBuilding => "Government Building",
            PlaceCategory::Church => "Church",
            PlaceCategory::Other => "Other",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            PlaceCategory::School => "building.columns.fill",
            PlaceCategory::Library => "books.vertical.fill",
            PlaceCategory::CommunityCenter => "person.3.fill",
            PlaceCategory::GovernmentBuilding => "building.2.fill",
            PlaceCategory::Church => "building.fill",
            PlaceCategory::Other => "mappin.circle.fill",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PlaceCategory::School => "blue",
            PlaceCategory::Library => "purple",
            PlaceCategory::CommunityCenter => "green",
            PlaceCategory::GovernmentBuilding => "orange",
            PlaceCategory::Church => "red",
            PlaceCategory::Other => "gray",
        }
    }
}

/// A candidate polling place. `distance_m` stays `None` until the place has
/// been measured against a reference point; an unmeasured place is treated
/// as out of range by the filter, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, specta::Type)]
pub struct Place {
    /// Unique, stable identifier. Also the tie-breaker for equal distances.
    pub id: String,
    pub coordinate: Coordinate,
    pub title: String,
    pub category: PlaceCategory,
    pub address: String,
    pub distance_m: Option<f64>,
}

impl Place {
    pub fn new(
        id: &str,
        coordinate: Coordinate,
        title: &str,
        category: PlaceCategory,
        address: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            coordinate,
            title: title.to_string(),
            category,
            address: address.to_string(),
            distance_m: None,
        }
    }
}

/// Short human-readable distance, meters below 1 km and one-decimal
/// kilometers at or above it.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

/// The polling places around Tysons Corner, VA the app ships with.
pub fn tysons_catalog() -> Vec<Place> {
    let place = |id, lat, long, title, category, address| {
        Place::new(id, Coordinate { lat, long }, title, category, address)
    };

    vec![
        place(
            "tysons-corner-center",
            38.9187,
            -77.2311,
            "Tysons Corner Center",
            PlaceCategory::Other,
            "1961 Chain Bridge Rd, Tysons, VA 22102",
        ),
        place(
            "westbriar-elementary",
            38.9210,
            -77.2390,
            "Westbriar Elementary School",
            PlaceCategory::School,
            "1741 Pine Valley Dr, Vienna, VA 22182",
        ),
        place(
            "tysons-pimmit-library",
            38.9145,
            -77.2215,
            "Tysons-Pimmit Regional Library",
            PlaceCategory::Library,
            "7584 Leesburg Pike, Falls Church, VA 22043",
        ),
        place(
            "first-baptist-vienna",
            38.9250,
            -77.2350,
            "First Baptist Church of Vienna",
            PlaceCategory::Church,
            "450 Orchard St NW, Vienna, VA 22180",
        ),
        place(
            "mclean-community-center",
            38.9100,
            -77.2400,
            "McLean Community Center",
            PlaceCategory::CommunityCenter,
            "1234 Ingleside Ave, McLean, VA 22101",
        ),
        place(
            "vienna-town-hall",
            38.9300,
            -77.2250,
            "Vienna Town Hall",
            PlaceCategory::GovernmentBuilding,
            "127 Center St S, Vienna, VA 22180",
        ),
        place(
            "mclean-high-school",
            38.9050,
            -77.2300,
            "McLean High School",
            PlaceCategory::School,
            "1633 Davidson Rd, McLean, VA 22101",
        ),
        place(
            "patrick-henry-library",
            38.9200,
            -77.2150,
            "Patrick Henry Library",
            PlaceCategory::Library,
            "101 Maple Ave E, Vienna, VA 22180",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let catalog = tysons_catalog();
        assert_eq!(catalog.len(), 8);
        let mut ids = catalog.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "catalog ids must be unique");
        assert!(catalog.iter().all(|p| p.distance_m.is_none()));
    }

    #[test]
    fn test_catalog_coordinates_valid() {
        for p in tysons_catalog() {
            assert!(
                Coordinate::new(p.coordinate.lat, p.coordinate.long).is_ok(),
                "{} has an invalid coordinate",
                p.id
            );
        }
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(830.7), "830m");
        assert_eq!(format_distance(999.9), "999m");
        assert_eq!(format_distance(1000.0), "1.0km");
        assert_eq!(format_distance(1529.51), "1.5km");
    }
}
