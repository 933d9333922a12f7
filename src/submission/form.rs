use crate::api::UploadedMedia;
use crate::media::AttachmentSet;
use crate::models::{NewAd, PaymentMode, PublisherRole, VehicleDetails};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Vehicle inputs as typed into the form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleForm {
    pub brand: String,
    pub model: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    pub fuel_type: String,
    pub transmission: String,
    #[serde(deserialize_with = "string_or_number")]
    pub mileage: String,
    pub condition: String,
}

/// Ad draft as held by the create form
///
/// Numeric inputs are kept as the raw text the user typed and only coerced
/// when the request body is composed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AdForm {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    pub payment_mode: PaymentMode,
    pub location: String,
    pub category_id: String,
    pub subcategory_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub bedrooms: String,
    #[serde(deserialize_with = "string_or_number")]
    pub bathrooms: String,
    #[serde(deserialize_with = "string_or_number")]
    pub area: String,
    pub vehicle: VehicleForm,
    pub amenities: BTreeSet<String>,
    pub whatsapp_number: String,
    pub allow_booking: bool,
    pub publisher_role: PublisherRole,
    #[serde(skip)]
    pub attachments: AttachmentSet,
}

impl AdForm {
    /// Back to the initial empty state, attachments included
    pub fn reset(&mut self) {
        *self = AdForm::default();
    }

    /// Add or remove an amenity tag
    pub fn toggle_amenity(&mut self, amenity: &str) {
        if !self.amenities.remove(amenity) {
            self.amenities.insert(amenity.to_string());
        }
    }
}

/// Build the `POST /ads` body from the form and the stored media URLs
pub fn compose(form: &AdForm, uploaded: &UploadedMedia) -> NewAd {
    let vehicle = &form.vehicle;

    NewAd {
        title: form.title.clone(),
        description: form.description.clone(),
        price: coerce_number(&form.price),
        payment_mode: form.payment_mode,
        location: form.location.clone(),
        category_id: form.category_id.clone(),
        subcategory_id: non_empty(&form.subcategory_id),
        bedrooms: coerce_integer(&form.bedrooms),
        bathrooms: coerce_integer(&form.bathrooms),
        area: coerce_number(&form.area),
        vehicle: VehicleDetails {
            brand: non_empty(&vehicle.brand),
            model: non_empty(&vehicle.model),
            year: coerce_integer(&vehicle.year),
            fuel_type: non_empty(&vehicle.fuel_type),
            transmission: non_empty(&vehicle.transmission),
            mileage: coerce_integer(&vehicle.mileage),
            condition: non_empty(&vehicle.condition),
        },
        amenities: form.amenities.iter().cloned().collect(),
        whatsapp_number: form.whatsapp_number.trim().to_string(),
        allow_booking: form.allow_booking,
        publisher_role: form.publisher_role,
        photos: uploaded.photos.clone(),
        video: uploaded.video.clone(),
    }
}

/// Parse a typed number; blank or unparseable input counts as absent
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Like [`coerce_number`] but only whole numbers are kept
pub fn coerce_integer(raw: &str) -> Option<i64> {
    coerce_number(raw)
        // i64::MAX as f64 rounds up to 2^63, which does not fit
        .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64)
        .map(|n| n as i64)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Drafts saved as JSON may carry numbers where the form holds text
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
