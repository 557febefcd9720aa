use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::domain::models::Climb;
use crate::error::{CatalogError, Result};
use crate::repository::ClimbStore;

const ALL_COLUMNS: &str = "id, name, type, rating, stars, star_votes, num_pitches, \
     location, url, img_sq_small, img_small, img_small_med, img_medium, \
     longitude, latitude";

pub struct ClimbRepository {
    pool: SqlitePool,
}

impl ClimbRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClimbStore for ClimbRepository {
    /// Merge a fetch result into the store. Existing rows with the same id
    /// are overwritten field-by-field (last write wins) and their
    /// `fetched_at` refreshed.
    async fn upsert_batch(&self, climbs: &[Climb]) -> Result<()> {
        if climbs.is_empty() {
            return Ok(());
        }

        const CHUNK_SIZE: usize = 50;
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for chunk in climbs.chunks(CHUNK_SIZE) {
            let mut qb = sqlx::QueryBuilder::new(format!(
                "INSERT INTO climbs ({ALL_COLUMNS}, fetched_at) "
            ));

            qb.push_values(chunk, |mut b, climb| {
                b.push_bind(climb.id)
                    .push_bind(&climb.name)
                    .push_bind(&climb.type_tag)
                    .push_bind(&climb.rating)
                    .push_bind(climb.stars)
                    .push_bind(climb.star_votes)
                    .push_bind(climb.num_pitches)
                    .push_bind(climb.joined_location())
                    .push_bind(&climb.url)
                    .push_bind(&climb.img_sq_small)
                    .push_bind(&climb.img_small)
                    .push_bind(&climb.img_small_med)
                    .push_bind(&climb.img_medium)
                    .push_bind(climb.longitude)
                    .push_bind(climb.latitude)
                    .push_bind(now.clone());
            });

            qb.push(
                " ON CONFLICT(id) DO UPDATE SET \
                 name = excluded.name, type = excluded.type, \
                 rating = excluded.rating, stars = excluded.stars, \
                 star_votes = excluded.star_votes, \
                 num_pitches = excluded.num_pitches, \
                 location = excluded.location, url = excluded.url, \
                 img_sq_small = excluded.img_sq_small, \
                 img_small = excluded.img_small, \
                 img_small_med = excluded.img_small_med, \
                 img_medium = excluded.img_medium, \
                 longitude = excluded.longitude, \
                 latitude = excluded.latitude, \
                 fetched_at = excluded.fetched_at",
            );

            qb.build().execute(&mut *tx).await.map_err(|e| {
                CatalogError::persistence(format!("failed to upsert climb chunk: {e}"))
            })?;
        }

        tx.commit().await?;
        tracing::debug!(count = climbs.len(), "merged climbs into local store");
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Climb>> {
        let rows = sqlx::query(&format!("SELECT {ALL_COLUMNS} FROM climbs"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                CatalogError::persistence(format!("failed to load climbs: {e}"))
            })?;

        Ok(rows.iter().map(row_to_climb).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Climb>> {
        let row = sqlx::query(&format!("SELECT {ALL_COLUMNS} FROM climbs WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CatalogError::persistence(format!("failed to fetch climb {id}: {e}")))?;

        Ok(row.as_ref().map(row_to_climb))
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM climbs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

fn row_to_climb(row: &sqlx::sqlite::SqliteRow) -> Climb {
    let joined: String = row.get("location");
    // Rows written by older tooling used -1 for an unknown pitch count.
    let num_pitches: Option<i64> = row.get("num_pitches");

    Climb {
        id: row.get("id"),
        name: row.get("name"),
        type_tag: row.get("type"),
        rating: row.get("rating"),
        stars: row.get("stars"),
        star_votes: row.get("star_votes"),
        num_pitches: num_pitches.filter(|p| *p >= 0),
        location: Climb::split_location(&joined),
        url: row.get("url"),
        img_sq_small: row.get("img_sq_small"),
        img_small: row.get("img_small"),
        img_small_med: row.get("img_small_med"),
        img_medium: row.get("img_medium"),
        longitude: row.get("longitude"),
        latitude: row.get("latitude"),
    }
}
