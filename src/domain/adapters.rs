//! Adapter layer for converting domain models to presentation shapes.
//!
//! The map collaborator receives one annotation per projected climb; it
//! never sees the full record.

use serde::Serialize;

use crate::domain::models::{Climb, Coordinate};

/// A pin on the map, derived 1:1 from a projected climb.
#[derive(Debug, Clone, Serialize)]
pub struct MapAnnotation {
    pub id: i64,
    pub coordinate: Coordinate,
    pub title: String,
    pub subtitle: String,
}

impl From<&Climb> for MapAnnotation {
    fn from(climb: &Climb) -> Self {
        Self {
            id: climb.id,
            coordinate: climb.coordinate(),
            title: climb.name.clone(),
            subtitle: format!("{} {}", climb.type_tag, climb.rating),
        }
    }
}
