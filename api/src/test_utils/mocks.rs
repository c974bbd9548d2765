//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    AuthUser, Coordinates, NewPlace, Place, PlaceCategory, PlaceChanges, PlaceId, PlaceListQuery,
    PlacePage, PlaceRegion,
};
use crate::domain::geo;
use crate::domain::ports::{AuthGateway, Geocoder, ObjectStore, PlaceRepository};
use crate::error::{AuthError, DomainError, GeocodeError, StorageError};

/// Uniform choice among candidate ids
fn choose(ids: Vec<PlaceId>) -> Option<PlaceId> {
    ids.choose(&mut rand::thread_rng()).copied()
}

// ============================================================================
// In-Memory Place Repository
// ============================================================================

pub struct InMemoryPlaceRepository {
    places: Arc<RwLock<HashMap<PlaceId, Place>>>,
    next_id: AtomicI64,
    insert_calls: AtomicUsize,
    pick_calls: AtomicUsize,
    should_fail: bool,
    dangling_pick: Option<PlaceId>,
}

impl Default for InMemoryPlaceRepository {
    fn default() -> Self {
        Self {
            places: Arc::default(),
            next_id: AtomicI64::new(1000),
            insert_calls: AtomicUsize::new(0),
            pick_calls: AtomicUsize::new(0),
            should_fail: false,
            dangling_pick: None,
        }
    }
}

impl InMemoryPlaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a place for testing
    pub fn with_place(self, place: Place) -> Self {
        self.places.write().unwrap().insert(place.id, place);
        self
    }

    /// Every call fails with a database error
    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Picks always return `id`, whether or not such a row exists
    pub fn with_dangling_pick(mut self, id: PlaceId) -> Self {
        self.dangling_pick = Some(id);
        self
    }

    pub fn get(&self, id: PlaceId) -> Option<Place> {
        self.places.read().unwrap().get(&id).cloned()
    }

    /// Number of `create` calls
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Number of `pick_one_random` and `pick_one_nearby` calls
    pub fn pick_calls(&self) -> usize {
        self.pick_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Database("connection refused".to_string()));
        }
        Ok(())
    }

    /// Mirrors the unique index on `address_line1`
    fn check_unique_address(
        &self,
        address: Option<&str>,
        except: Option<PlaceId>,
    ) -> Result<(), DomainError> {
        let Some(address) = address else {
            return Ok(());
        };
        let taken = self
            .places
            .read()
            .unwrap()
            .values()
            .any(|p| Some(p.id) != except && p.address_line1.as_deref() == Some(address));
        if taken {
            return Err(DomainError::Conflict(format!(
                "duplicate key value violates unique constraint \"places_address_line1_key\": {}",
                address
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PlaceRepository for InMemoryPlaceRepository {
    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, DomainError> {
        self.check_failure()?;
        Ok(self.get(*id))
    }

    async fn list(&self, query: &PlaceListQuery) -> Result<PlacePage, DomainError> {
        self.check_failure()?;
        let places = self.places.read().unwrap();
        let needle = query.name.as_deref().map(str::to_lowercase);

        let mut matches: Vec<&Place> = places
            .values()
            .filter(|p| {
                needle
                    .as_deref()
                    .map_or(true, |n| p.name.to_lowercase().contains(n))
            })
            .filter(|p| query.category.map_or(true, |c| p.category == c))
            .filter(|p| query.region.map_or(true, |r| p.region == r))
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(PlacePage {
            total: matches.len() as u64,
            rows: matches
                .into_iter()
                .skip(query.offset() as usize)
                .take(query.page_size as usize)
                .map(Place::summary)
                .collect(),
        })
    }

    async fn create(&self, place: &NewPlace) -> Result<Place, DomainError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.check_unique_address(place.address_line1.as_deref(), None)?;

        let now = Utc::now();
        let created = Place {
            id: PlaceId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: place.name.clone(),
            category: place.category,
            region: place.region,
            status: place.status,
            description: place.description.clone(),
            address_line1: place.address_line1.clone(),
            phone: place.phone.clone(),
            hours: place.hours.clone(),
            tags: place.tags.clone(),
            image_url: place.image_url.clone(),
            coordinates: place.coordinates,
            created_at: now,
            updated_at: Some(now),
        };
        self.places
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &PlaceId, changes: &PlaceChanges) -> Result<Place, DomainError> {
        self.check_failure()?;
        if let Some(address) = &changes.address_line1 {
            self.check_unique_address(address.as_deref(), Some(*id))?;
        }

        let mut places = self.places.write().unwrap();
        let place = places
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Place {} not found", id)))?;
        changes.apply_to(place);
        place.updated_at = Some(Utc::now());
        Ok(place.clone())
    }

    async fn delete(&self, id: &PlaceId) -> Result<bool, DomainError> {
        self.check_failure()?;
        Ok(self.places.write().unwrap().remove(id).is_some())
    }

    async fn pick_one_random(
        &self,
        region: Option<PlaceRegion>,
        category: Option<PlaceCategory>,
    ) -> Result<Option<PlaceId>, DomainError> {
        self.pick_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        if self.dangling_pick.is_some() {
            return Ok(self.dangling_pick);
        }

        let ids = self
            .places
            .read()
            .unwrap()
            .values()
            .filter(|p| region.map_or(true, |r| p.region == r))
            .filter(|p| category.map_or(true, |c| p.category == c))
            .map(|p| p.id)
            .collect();
        Ok(choose(ids))
    }

    async fn pick_one_nearby(
        &self,
        origin: &Coordinates,
        radius_m: u32,
        category: Option<PlaceCategory>,
    ) -> Result<Option<PlaceId>, DomainError> {
        self.pick_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        if self.dangling_pick.is_some() {
            return Ok(self.dangling_pick);
        }

        let ids = self
            .places
            .read()
            .unwrap()
            .values()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| {
                p.coordinates
                    .map_or(false, |c| geo::distance_m(origin, &c) <= radius_m as f64)
            })
            .map(|p| p.id)
            .collect();
        Ok(choose(ids))
    }
}

// ============================================================================
// Mock Geocoder
// ============================================================================

/// Geocoder returning a fixed answer and recording every queried address
pub struct MockGeocoder {
    result: Option<Coordinates>,
    calls: RwLock<Vec<String>>,
}

impl MockGeocoder {
    /// Every address resolves to `coordinates`
    pub fn returning(coordinates: Coordinates) -> Self {
        Self {
            result: Some(coordinates),
            calls: RwLock::default(),
        }
    }

    /// Every address comes back with no documents
    pub fn with_no_result() -> Self {
        Self {
            result: None,
            calls: RwLock::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        self.calls.write().unwrap().push(address.to_string());
        self.result
            .ok_or_else(|| GeocodeError::NoResult(address.to_string()))
    }
}

// ============================================================================
// Mock Object Store
// ============================================================================

#[derive(Default)]
pub struct MockObjectStore {
    uploads: RwLock<Vec<(String, String)>>,
    should_fail: bool,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// `(path, content_type)` of every successful upload
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.read().unwrap().clone()
    }

    pub fn public_url(&self, path: &str) -> String {
        format!("https://storage.test/placeimg/{}", path)
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn upload(
        &self,
        path: &str,
        _bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if self.should_fail {
            return Err(StorageError::Api {
                status: 413,
                message: "Payload too large".to_string(),
            });
        }
        self.uploads
            .write()
            .unwrap()
            .push((path.to_string(), content_type.to_string()));
        Ok(self.public_url(path))
    }
}

// ============================================================================
// Mock Auth Gateway
// ============================================================================

#[derive(Default)]
pub struct MockAuthGateway {
    sessions: HashMap<String, AuthUser>,
}

impl MockAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a valid access token
    pub fn with_session(mut self, token: &str, user: AuthUser) -> Self {
        self.sessions.insert(token.to_string(), user);
        self
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.sessions.get(access_token).cloned())
    }
}
