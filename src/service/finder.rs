//! Application layer - coordinates the catalog client, the local store and
//! the projection engine on behalf of the presentation collaborator.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::FilterDefault;
use crate::domain::adapters::MapAnnotation;
use crate::domain::models::{Climb, Coordinate, Discipline};
use crate::error::Result;
use crate::repository::ClimbStore;
use crate::service::catalog::RemoteCatalog;
use crate::service::projection::{project, Projection};

pub struct ClimbFinder {
    catalog: RemoteCatalog,
    store: Arc<dyn ClimbStore>,
    /// In-memory keyed view of every record seen so far. Merges are keyed
    /// by id and last-write-wins, so overlapping fetch completions may
    /// arrive in any order.
    climbs: RwLock<HashMap<i64, Climb>>,
    filters: RwLock<HashSet<Discipline>>,
    loading: AtomicBool,
    max_distance_miles: f64,
}

impl ClimbFinder {
    /// Build the finder and warm the in-memory view from the store.
    pub async fn new(
        catalog: RemoteCatalog,
        store: Arc<dyn ClimbStore>,
        filter_default: FilterDefault,
        max_distance_miles: f64,
    ) -> Result<Self> {
        let saved = store.load_all().await?;
        tracing::info!(count = saved.len(), "loaded saved climbs");

        let climbs = saved.into_iter().map(|c| (c.id, c)).collect();
        let filters = match filter_default {
            FilterDefault::All => Discipline::ALL.iter().copied().collect(),
            FilterDefault::None => HashSet::new(),
        };

        Ok(Self {
            catalog,
            store,
            climbs: RwLock::new(climbs),
            filters: RwLock::new(filters),
            loading: AtomicBool::new(false),
            max_distance_miles,
        })
    }

    /// Fetch climbs around `coordinate`, persist them and merge them into
    /// the in-memory view. Returns how many records the catalog sent.
    ///
    /// Errors come back as values; the loading flag is cleared on every
    /// outcome and a failed search leaves the store untouched.
    pub async fn search(&self, coordinate: Coordinate) -> Result<usize> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.search_inner(coordinate).await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn search_inner(&self, coordinate: Coordinate) -> Result<usize> {
        let fetched = self.catalog.fetch_climbs(coordinate).await?;
        self.store.upsert_batch(&fetched).await?;

        let count = fetched.len();
        let mut climbs = self.climbs.write().await;
        for climb in fetched {
            climbs.insert(climb.id, climb);
        }
        tracing::info!(
            count,
            total = climbs.len(),
            "search merged into catalog"
        );
        Ok(count)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn set_filters(&self, active: HashSet<Discipline>) {
        *self.filters.write().await = active;
    }

    /// Flip one discipline on or off; returns its new state.
    pub async fn toggle_filter(&self, discipline: Discipline) -> bool {
        let mut filters = self.filters.write().await;
        if filters.remove(&discipline) {
            false
        } else {
            filters.insert(discipline);
            true
        }
    }

    /// The "hide all" operation: deselect every discipline.
    pub async fn clear_filters(&self) {
        self.filters.write().await.clear();
    }

    pub async fn active_filters(&self) -> HashSet<Discipline> {
        self.filters.read().await.clone()
    }

    /// Filtered, distance-sorted projection of everything seen so far,
    /// measured from `reference`.
    pub async fn current_projection(&self, reference: Coordinate) -> Projection {
        let climbs = self.climbs.read().await;
        let snapshot: Vec<Climb> = climbs.values().cloned().collect();
        drop(climbs);

        let filters = self.filters.read().await;
        project(&snapshot, &filters, reference, self.max_distance_miles)
    }

    /// Annotation list for the map collaborator, 1:1 with the projection.
    pub async fn annotations(&self, reference: Coordinate) -> Vec<MapAnnotation> {
        self.current_projection(reference).await.annotations()
    }

    /// Detail lookup for a selected annotation.
    pub async fn get(&self, id: i64) -> Option<Climb> {
        self.climbs.read().await.get(&id).cloned()
    }

    /// Number of records in the in-memory view.
    pub async fn len(&self) -> usize {
        self.climbs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.climbs.read().await.is_empty()
    }
}
