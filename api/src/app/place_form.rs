//! Place form parsing
//!
//! Turns the admin form submission (text fields plus an optional image file)
//! into insert data or a partial update plan. All validation here happens
//! before any side effect.

use rand::Rng;
use serde::Deserialize;

use crate::domain::entities::{
    parse_tags, NewPlace, Place, PlaceCategory, PlaceChanges, PlaceListQuery, PlaceRegion,
    PlaceStatus,
};
use crate::error::AppError;

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;
const DEFAULT_IMAGE_EXT: &str = "jpg";
const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// An uploaded image file
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercased extension of the original file name, `jpg` if there is none
    pub fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| DEFAULT_IMAGE_EXT.to_string())
    }

    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
    }

    /// Object path: `{category}/{epoch_millis}_{random}.{ext}`
    pub fn object_path(&self, category: PlaceCategory) -> String {
        upload_path(
            category,
            &self.extension(),
            chrono::Utc::now().timestamp_millis(),
            &random_suffix(),
        )
    }
}

pub fn upload_path(category: PlaceCategory, ext: &str, millis: i64, suffix: &str) -> String {
    format!("{}/{}_{}.{}", category, millis, suffix, ext)
}

/// Ten random base36 characters
pub fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..10)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Raw admin form. `None` means the field was not submitted at all.
#[derive(Debug, Clone, Default)]
pub struct PlaceForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub tags: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Trimmed, blank-as-none
fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_field<T>(value: &Option<String>, field: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = String>,
{
    match text(value) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} 값이 올바르지 않습니다: {}", field, v))),
    }
}

/// What an update needs besides the column changes
#[derive(Debug, Default)]
pub struct UpdatePlan {
    pub changes: PlaceChanges,
    /// New non-empty address that must be geocoded
    pub geocode_address: Option<String>,
    /// Replacement image and the category its path is namespaced by
    pub image: Option<(ImageUpload, PlaceCategory)>,
}

impl PlaceForm {
    /// Assign a submitted text field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "name" => &mut self.name,
            "category" => &mut self.category,
            "region" => &mut self.region,
            "status" => &mut self.status,
            "description" => &mut self.description,
            "address" => &mut self.address,
            "phone" => &mut self.phone,
            "hours" => &mut self.hours,
            "tags" => &mut self.tags,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Submitted image, if it has content
    fn image_upload(&self) -> Option<ImageUpload> {
        self.image.as_ref().filter(|img| !img.is_empty()).cloned()
    }

    /// Validate a create submission.
    ///
    /// Returns the insert data without coordinates or image URL (the caller
    /// resolves those) and the image to upload, if any.
    pub fn into_new_place(self) -> Result<(NewPlace, Option<ImageUpload>), AppError> {
        let name = text(&self.name);
        let category: Option<PlaceCategory> = parse_field(&self.category, "category")?;
        let region: Option<PlaceRegion> = parse_field(&self.region, "region")?;

        let (Some(name), Some(category), Some(region)) = (name, category, region) else {
            return Err(AppError::BadRequest(
                "필수값(이름/카테고리/지역)을 확인해주세요.".to_string(),
            ));
        };

        let status: Option<PlaceStatus> = parse_field(&self.status, "status")?;
        let image = self.image_upload();

        let place = NewPlace {
            name,
            category,
            region,
            status: status.unwrap_or_default(),
            description: text(&self.description),
            address_line1: text(&self.address),
            phone: text(&self.phone),
            hours: text(&self.hours),
            tags: self.tags.as_deref().and_then(parse_tags),
            image_url: None,
            coordinates: None,
        };

        Ok((place, image))
    }

    /// Build a partial update against the stored place.
    pub fn update_plan(&self, current: &Place) -> Result<UpdatePlan, AppError> {
        let mut changes = PlaceChanges {
            name: text(&self.name),
            category: parse_field(&self.category, "category")?,
            region: parse_field(&self.region, "region")?,
            status: parse_field(&self.status, "status")?,
            description: self.description.as_ref().map(|_| text(&self.description)),
            phone: self.phone.as_ref().map(|_| text(&self.phone)),
            hours: self.hours.as_ref().map(|_| text(&self.hours)),
            tags: self.tags.as_deref().map(parse_tags),
            ..Default::default()
        };

        let mut geocode_address = None;
        if self.address.is_some() {
            let submitted = text(&self.address);
            let stored = current
                .address_line1
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();

            if submitted.as_deref().unwrap_or_default() != stored {
                match submitted {
                    Some(address) => {
                        changes.address_line1 = Some(Some(address.clone()));
                        geocode_address = Some(address);
                    }
                    None => {
                        changes.address_line1 = Some(None);
                        changes.coordinates = Some(None);
                    }
                }
            }
        }

        let image_category = changes.category.unwrap_or(current.category);
        let image = self.image_upload().map(|img| (img, image_category));

        Ok(UpdatePlan {
            changes,
            geocode_address,
            image,
        })
    }
}

/// Like `parse_field`, with `all` meaning no filter
fn list_filter<T>(value: &Option<String>, field: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = String>,
{
    match text(value) {
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        _ => parse_field(value, field),
    }
}

/// Query string of the admin list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceListParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
}

impl PlaceListParams {
    pub fn to_query(&self) -> Result<PlaceListQuery, AppError> {
        let category: Option<PlaceCategory> = list_filter(&self.category, "category")?;
        let region: Option<PlaceRegion> = list_filter(&self.region, "region")?;

        Ok(PlaceListQuery {
            name: text(&self.q),
            category,
            region,
            page: self.page.unwrap_or(0),
            page_size: self
                .page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        })
    }
}
