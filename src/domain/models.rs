//! Rich domain entities - behavior lives WITH data

use serde::{Deserialize, Deserializer, Serialize};

/// Delimiter used to persist the sublocation chain as a single string.
/// The round-trip through it is lossy if a sublocation name ever contains
/// the delimiter itself; catalog names are not expected to.
pub const LOCATION_DELIMITER: char = ';';

// ====== Enums ======

/// A climbing activity category as tagged by the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    Sport,
    Trad,
    TopRope,
    Boulder,
    Ice,
    Snow,
    Alpine,
    Aid,
    Mixed,
}

impl Discipline {
    pub const ALL: [Discipline; 9] = [
        Discipline::Sport,
        Discipline::Trad,
        Discipline::TopRope,
        Discipline::Boulder,
        Discipline::Ice,
        Discipline::Snow,
        Discipline::Alpine,
        Discipline::Aid,
        Discipline::Mixed,
    ];

    /// Catalog wire token. "TR" is the catalog's spelling of top-rope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Sport => "Sport",
            Discipline::Trad => "Trad",
            Discipline::TopRope => "TR",
            Discipline::Boulder => "Boulder",
            Discipline::Ice => "Ice",
            Discipline::Snow => "Snow",
            Discipline::Alpine => "Alpine",
            Discipline::Aid => "Aid",
            Discipline::Mixed => "Mixed",
        }
    }

    /// Parse one whitespace-stripped token from a type tag.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Sport" => Some(Discipline::Sport),
            "Trad" => Some(Discipline::Trad),
            "TR" => Some(Discipline::TopRope),
            "Boulder" => Some(Discipline::Boulder),
            "Ice" => Some(Discipline::Ice),
            "Snow" => Some(Discipline::Snow),
            "Alpine" => Some(Discipline::Alpine),
            "Aid" => Some(Discipline::Aid),
            "Mixed" => Some(Discipline::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ====== Coordinate ======

/// A WGS84 point (degrees). Reference coordinates and climb positions both
/// use this shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

// ====== Climb ======

/// A single climbing route as returned by the remote catalog.
///
/// Deserializes directly from the catalog's JSON. Distance from a reference
/// point is never part of the record; the projection engine returns it
/// alongside (see `service::projection`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Climb {
    pub id: i64,
    pub name: String,
    /// Comma-separated free-text discipline list, e.g. "Trad, Alpine".
    /// Parse with [`Climb::type_list`]; never store the parsed form.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Grade notation, opaque to this system.
    pub rating: String,
    /// Average rating in [0, 5].
    pub stars: f64,
    pub star_votes: i64,
    /// `None` means unknown and must be hidden from display. The catalog
    /// sends -1 (or omits the field) for routes without pitch data.
    #[serde(rename = "pitches", default, deserialize_with = "pitches_or_none")]
    pub num_pitches: Option<i64>,
    /// Sublocation names, most- to least-specific.
    pub location: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub img_sq_small: Option<String>,
    #[serde(default)]
    pub img_small: Option<String>,
    #[serde(default)]
    pub img_small_med: Option<String>,
    #[serde(default)]
    pub img_medium: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
}

/// Treat the -1 sentinel (and any other negative count) as "unknown".
fn pitches_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.filter(|p| *p >= 0))
}

impl Climb {
    /// Recognized disciplines parsed from the type tag, in tag order with
    /// duplicates collapsed to their first occurrence. Unrecognized tokens
    /// are dropped, not errors: the catalog's tag vocabulary drifts.
    pub fn type_list(&self) -> Vec<Discipline> {
        let mut list: Vec<Discipline> = Vec::new();
        for token in self.type_tag.replace(' ', "").split(',') {
            if token.is_empty() {
                continue;
            }
            match Discipline::parse(token) {
                Some(discipline) => {
                    if !list.contains(&discipline) {
                        list.push(discipline);
                    }
                }
                None => {
                    tracing::debug!(token, climb_id = self.id, "dropping unrecognized discipline token");
                }
            }
        }
        list
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Sublocation chain joined for persistence. Lossy if a name contains
    /// the delimiter; see [`LOCATION_DELIMITER`].
    pub fn joined_location(&self) -> String {
        self.location.join(&LOCATION_DELIMITER.to_string())
    }

    /// Inverse of [`Climb::joined_location`] for rows loaded from the store.
    pub fn split_location(joined: &str) -> Vec<String> {
        if joined.is_empty() {
            return Vec::new();
        }
        joined
            .split(LOCATION_DELIMITER)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn type_list_parses_recognized_tokens_in_order() {
        let climb = fixtures::climb_with_type(1, "Trad, Alpine");
        assert_eq!(
            climb.type_list(),
            vec![Discipline::Trad, Discipline::Alpine]
        );
    }

    #[test]
    fn type_list_drops_unrecognized_tokens() {
        let climb = fixtures::climb_with_type(1, "Sport, Bungee, TR");
        assert_eq!(
            climb.type_list(),
            vec![Discipline::Sport, Discipline::TopRope]
        );
    }

    #[test]
    fn type_list_is_total_on_junk_input() {
        let climb = fixtures::climb_with_type(1, ",,  ,NotAThing,");
        assert!(climb.type_list().is_empty());
    }

    #[test]
    fn type_list_collapses_duplicates_keeping_first() {
        let climb = fixtures::climb_with_type(1, "Ice, Mixed, Ice");
        assert_eq!(climb.type_list(), vec![Discipline::Ice, Discipline::Mixed]);
    }

    #[test]
    fn location_round_trips_without_delimiter() {
        let mut climb = fixtures::sample_climb(1);
        climb.location = vec!["Yosemite Valley".into(), "California".into()];
        let joined = climb.joined_location();
        assert_eq!(Climb::split_location(&joined), climb.location);
    }

    #[test]
    fn location_round_trip_is_lossy_with_delimiter_in_name() {
        // Documented behavior: a ';' inside a sublocation name splits into
        // extra segments on load. Assert the loss, do not hide it.
        let mut climb = fixtures::sample_climb(1);
        climb.location = vec!["North; Face".into(), "Alps".into()];
        let joined = climb.joined_location();
        let restored = Climb::split_location(&joined);
        assert_ne!(restored, climb.location);
        assert_eq!(restored, vec!["North", " Face", "Alps"]);
    }

    #[test]
    fn empty_location_round_trips_to_empty() {
        assert!(Climb::split_location("").is_empty());
    }

    #[test]
    fn negative_pitch_count_decodes_as_unknown() {
        let json = fixtures::route_json(7, "Sport", 39.0, -105.0)
            .replace("\"pitches\": 2", "\"pitches\": -1");
        let climb: Climb = serde_json::from_str(&json).unwrap();
        assert_eq!(climb.num_pitches, None);
    }

    #[test]
    fn absent_pitch_count_decodes_as_unknown() {
        let json = fixtures::route_json(7, "Sport", 39.0, -105.0)
            .replace("\"pitches\": 2,", "");
        let climb: Climb = serde_json::from_str(&json).unwrap();
        assert_eq!(climb.num_pitches, None);
    }

    #[test]
    fn decodes_catalog_field_names() {
        let climb: Climb =
            serde_json::from_str(&fixtures::route_json(42, "Trad, Aid", 37.5, -119.6)).unwrap();
        assert_eq!(climb.id, 42);
        assert_eq!(climb.star_votes, 11);
        assert_eq!(climb.num_pitches, Some(2));
        assert_eq!(climb.img_sq_small.as_deref(), Some("https://img.test/sq.jpg"));
        assert_eq!(climb.type_list(), vec![Discipline::Trad, Discipline::Aid]);
    }
}
