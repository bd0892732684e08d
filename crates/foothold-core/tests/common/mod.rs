#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use foothold_core::{
    geo::Coordinate,
    places::{
        LocationProvider, PlaceHit, PlaceSearch, PlaceSearchError, ReverseGeocoder, SearchRegion,
    },
    Planner, PlannerBuilder,
};
use tempfile::TempDir;

pub const ORIGIN: Coordinate = Coordinate::new(48.2082, 16.3738);

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Place search returning canned hits per query and counting calls.
#[derive(Default)]
pub struct ScriptedSearch {
    hits: HashMap<String, Vec<PlaceHit>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, query: &str, hits: Vec<PlaceHit>) -> Self {
        self.hits.insert(query.to_string(), hits);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, query: &str) -> usize {
        self.calls.lock().unwrap().get(query).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PlaceSearch for ScriptedSearch {
    async fn search(
        &self,
        query: &str,
        _region: SearchRegion,
    ) -> Result<Vec<PlaceHit>, PlaceSearchError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(query) {
            return Err(PlaceSearchError::Backend(format!("{query} failed")));
        }
        Ok(self.hits.get(query).cloned().unwrap_or_default())
    }
}

pub enum GeocodeAnswer {
    Street(String),
    NoStreet,
    Fails,
}

/// Reverse geocoder with a fixed answer and a call counter.
pub struct ScriptedGeocoder {
    answer: GeocodeAnswer,
    calls: AtomicUsize,
}

impl ScriptedGeocoder {
    pub fn street(name: &str) -> Self {
        Self::answering(GeocodeAnswer::Street(name.to_string()))
    }

    pub fn no_street() -> Self {
        Self::answering(GeocodeAnswer::NoStreet)
    }

    pub fn failing() -> Self {
        Self::answering(GeocodeAnswer::Fails)
    }

    fn answering(answer: GeocodeAnswer) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReverseGeocoder for ScriptedGeocoder {
    async fn street_name(
        &self,
        _coordinate: Coordinate,
    ) -> Result<Option<String>, PlaceSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            GeocodeAnswer::Street(name) => Ok(Some(name.clone())),
            GeocodeAnswer::NoStreet => Ok(None),
            GeocodeAnswer::Fails => Err(PlaceSearchError::Unavailable("no network".to_string())),
        }
    }
}

/// Location provider answering after an optional delay.
pub struct FixedLocation {
    position: Option<Coordinate>,
    delay: Duration,
}

impl FixedLocation {
    pub fn at(position: Coordinate) -> Self {
        Self {
            position: Some(position),
            delay: Duration::ZERO,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            position: None,
            delay: Duration::ZERO,
        }
    }

    pub fn slow(position: Coordinate, delay: Duration) -> Self {
        Self {
            position: Some(position),
            delay,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Option<Coordinate> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.position
    }
}

/// A named hit `meters` north of the origin.
pub fn hit_north(name: &str, meters: f64) -> PlaceHit {
    PlaceHit::named(name, ORIGIN.offset_north(meters))
}

/// A named hit `meters` east of the origin.
pub fn hit_east(name: &str, meters: f64) -> PlaceHit {
    PlaceHit::named(name, ORIGIN.offset_east(meters))
}
