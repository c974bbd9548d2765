//! PostgreSQL adapter for PlaceRepository
//!
//! Random selection is delegated to the `pick_one_random` and
//! `pick_one_nearby` stored procedures; the database does the sampling.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    SqlErr, Statement,
};

use crate::domain::entities::{
    Coordinates, NewPlace, Place, PlaceCategory, PlaceChanges, PlaceId, PlaceListQuery, PlacePage,
    PlaceRegion, PlaceSummary,
};
use crate::domain::ports::PlaceRepository;
use crate::entity::places;
use crate::error::DomainError;

const PICK_ONE_RANDOM_SQL: &str =
    "SELECT id::bigint AS id FROM pick_one_random(in_region => $1, in_category => $2)";

const PICK_ONE_NEARBY_SQL: &str = "SELECT id::bigint AS id FROM pick_one_nearby(\
     user_lat => $1, user_lng => $2, radius_m => $3, p_category => $4)";

/// Row returned by the pick procedures
#[derive(Debug, FromQueryResult)]
struct PickedRow {
    id: i64,
}

/// PostgreSQL implementation of PlaceRepository
pub struct PostgresPlaceRepository {
    db: DatabaseConnection,
}

impl PostgresPlaceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn pick_one(&self, stmt: Statement) -> Result<Option<PlaceId>, DomainError> {
        let row = PickedRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(row.map(|r| PlaceId(r.id)))
    }
}

/// Apply the list filters shared by the count and page queries
fn filtered(query: &PlaceListQuery) -> Select<places::Entity> {
    let mut select = places::Entity::find();

    if let Some(name) = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
        select = select
            .filter(Expr::expr(Func::lower(Expr::col(places::Column::Name))).like(pattern));
    }
    if let Some(category) = query.category {
        select = select.filter(places::Column::Category.eq(category.to_string()));
    }
    if let Some(region) = query.region {
        select = select.filter(places::Column::Region.eq(region.to_string()));
    }

    select
}

/// Escape LIKE metacharacters so user input matches literally
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Unique violations become conflicts; everything else is a database error
fn map_write_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl PlaceRepository for PostgresPlaceRepository {
    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, DomainError> {
        let result = places::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Place::try_from).transpose()
    }

    async fn list(&self, query: &PlaceListQuery) -> Result<PlacePage, DomainError> {
        let total = filtered(query)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let results = filtered(query)
            .order_by_desc(places::Column::CreatedAt)
            .order_by_desc(places::Column::Id)
            .offset(query.offset())
            .limit(query.page_size)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let rows = results
            .into_iter()
            .map(|m| Place::try_from(m).map(|p| p.summary()))
            .collect::<Result<Vec<PlaceSummary>, _>>()?;

        Ok(PlacePage { rows, total })
    }

    async fn create(&self, place: &NewPlace) -> Result<Place, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = places::ActiveModel {
            id: NotSet,
            name: Set(place.name.clone()),
            category: Set(place.category.to_string()),
            region: Set(place.region.to_string()),
            status: Set(Some(place.status.to_string())),
            description: Set(place.description.clone()),
            address_line1: Set(place.address_line1.clone()),
            phone: Set(place.phone.clone()),
            hours: Set(place.hours.clone()),
            tags: Set(place.tags.clone()),
            image_url: Set(place.image_url.clone()),
            lat: Set(place.coordinates.map(|c| c.lat)),
            lng: Set(place.coordinates.map(|c| c.lng)),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        let result = model.insert(&self.db).await.map_err(map_write_err)?;

        result.try_into()
    }

    async fn update(&self, id: &PlaceId, changes: &PlaceChanges) -> Result<Place, DomainError> {
        let model = update_model(id, changes);

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Place {} not found", id)),
            e => map_write_err(e),
        })?;

        result.try_into()
    }

    async fn delete(&self, id: &PlaceId) -> Result<bool, DomainError> {
        let result = places::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn pick_one_random(
        &self,
        region: Option<PlaceRegion>,
        category: Option<PlaceCategory>,
    ) -> Result<Option<PlaceId>, DomainError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            PICK_ONE_RANDOM_SQL,
            [
                region.map(|r| r.to_string()).into(),
                category.map(|c| c.to_string()).into(),
            ],
        );

        self.pick_one(stmt).await
    }

    async fn pick_one_nearby(
        &self,
        origin: &Coordinates,
        radius_m: u32,
        category: Option<PlaceCategory>,
    ) -> Result<Option<PlaceId>, DomainError> {
        let radius = i32::try_from(radius_m)
            .map_err(|_| DomainError::Validation(format!("Radius out of range: {}", radius_m)))?;

        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            PICK_ONE_NEARBY_SQL,
            [
                origin.lat.into(),
                origin.lng.into(),
                radius.into(),
                category.map(|c| c.to_string()).into(),
            ],
        );

        self.pick_one(stmt).await
    }
}

/// Partial update model; columns without a change stay `NotSet` and are
/// never written
fn update_model(id: &PlaceId, changes: &PlaceChanges) -> places::ActiveModel {
    let mut model = places::ActiveModel {
        id: Set(id.0),
        ..Default::default()
    };

    if let Some(name) = &changes.name {
        model.name = Set(name.clone());
    }
    if let Some(category) = changes.category {
        model.category = Set(category.to_string());
    }
    if let Some(region) = changes.region {
        model.region = Set(region.to_string());
    }
    if let Some(status) = changes.status {
        model.status = Set(Some(status.to_string()));
    }
    if let Some(description) = &changes.description {
        model.description = Set(description.clone());
    }
    if let Some(address) = &changes.address_line1 {
        model.address_line1 = Set(address.clone());
    }
    if let Some(phone) = &changes.phone {
        model.phone = Set(phone.clone());
    }
    if let Some(hours) = &changes.hours {
        model.hours = Set(hours.clone());
    }
    if let Some(tags) = &changes.tags {
        model.tags = Set(tags.clone());
    }
    if let Some(image_url) = &changes.image_url {
        model.image_url = Set(image_url.clone());
    }
    if let Some(coordinates) = changes.coordinates {
        model.lat = Set(coordinates.map(|c| c.lat));
        model.lng = Set(coordinates.map(|c| c.lng));
    }
    model.updated_at = Set(Some(Utc::now().fixed_offset()));

    model
}

/// Convert SeaORM model to domain entity
impl TryFrom<places::Model> for Place {
    type Error = DomainError;

    fn try_from(model: places::Model) -> Result<Self, Self::Error> {
        // NULL status is the column default, which is published
        let status = model
            .status
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(DomainError::Database)?
            .unwrap_or_default();

        let created_at = match model.created_at {
            Some(dt) => dt.with_timezone(&Utc),
            None => {
                tracing::warn!(place_id = model.id, "Place row has no created_at");
                model
                    .updated_at
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_default()
            }
        };

        Ok(Place {
            id: PlaceId(model.id),
            category: model.category.parse().map_err(DomainError::Database)?,
            region: model.region.parse().map_err(DomainError::Database)?,
            name: model.name,
            status,
            description: model.description,
            address_line1: model.address_line1,
            phone: model.phone,
            hours: model.hours,
            tags: model.tags,
            image_url: model.image_url,
            coordinates: Coordinates::from_columns(model.lat, model.lng),
            created_at,
            updated_at: model.updated_at.map(|dt| dt.with_timezone(&Utc)),
        })
    }
}
