//! Shared fixtures for unit and integration tests.

pub mod fixtures {
    use sqlx::SqlitePool;

    use crate::domain::models::Climb;

    /// Creates an in-memory SQLite database with migrations applied
    pub async fn setup_test_db() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    /// A plausible sport route near the Colorado front range.
    pub fn sample_climb(id: i64) -> Climb {
        Climb {
            id,
            name: format!("Route {id}"),
            type_tag: "Sport".into(),
            rating: "5.9".into(),
            stars: 3.8,
            star_votes: 11,
            num_pitches: Some(2),
            location: vec!["Some Crag".into(), "Some State".into()],
            url: Some(format!("https://catalog.test/route/{id}")),
            img_sq_small: None,
            img_small: None,
            img_small_med: None,
            img_medium: None,
            longitude: -105.0,
            latitude: 39.0,
        }
    }

    pub fn climb_at(id: i64, latitude: f64, longitude: f64) -> Climb {
        Climb {
            latitude,
            longitude,
            ..sample_climb(id)
        }
    }

    pub fn climb_with_type(id: i64, type_tag: &str) -> Climb {
        Climb {
            type_tag: type_tag.into(),
            ..sample_climb(id)
        }
    }

    pub fn climb_with_type_at(id: i64, type_tag: &str, latitude: f64, longitude: f64) -> Climb {
        Climb {
            type_tag: type_tag.into(),
            latitude,
            longitude,
            ..sample_climb(id)
        }
    }

    /// One climb object in the catalog's wire format. Kept as a literal so
    /// tests can splice fields in and out.
    pub fn route_json(id: i64, type_tag: &str, latitude: f64, longitude: f64) -> String {
        format!(
            r#"{{
  "id": {id},
  "name": "Route {id}",
  "type": "{type_tag}",
  "rating": "5.9",
  "stars": 3.8,
  "starVotes": 11,
  "pitches": 2,
  "location": ["Some Crag", "Some State"],
  "url": "https://catalog.test/route/{id}",
  "imgSqSmall": "https://img.test/sq.jpg",
  "imgSmall": "https://img.test/small.jpg",
  "imgSmallMed": "https://img.test/small-med.jpg",
  "imgMedium": "https://img.test/medium.jpg",
  "longitude": {longitude},
  "latitude": {latitude}
}}"#
        )
    }

    /// The `routes` response envelope wrapping the given climb objects.
    pub fn routes_body(routes: &[String]) -> String {
        format!("{{\"routes\": [{}]}}", routes.join(","))
    }
}
