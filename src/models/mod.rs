use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the listed price is charged
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Monthly,
    Daily,
    Weekly,
    Hourly,
    Fixed,
}

/// Who is publishing the listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PublisherRole {
    #[default]
    Owner,
    Tenant,
    Middleman,
}

/// Account role as reported by the backend
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SuperAdmin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    /// Whether this role may enter the admin back-office
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

/// Authenticated user identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Vehicle attributes, only sent for vehicle categories
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl VehicleDetails {
    pub fn is_empty(&self) -> bool {
        *self == VehicleDetails::default()
    }
}

/// Body of `POST /ads`: a draft with uploaded media merged in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAd {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub payment_mode: PaymentMode,
    pub location: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(flatten)]
    pub vehicle: VehicleDetails,
    pub amenities: Vec<String>,
    pub whatsapp_number: String,
    pub allow_booking: bool,
    pub publisher_role: PublisherRole,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

/// Ad as returned by the backend after creation
///
/// Only the id is consumed by this client; the rest is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAd {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub raw_data: serde_json::Map<String, serde_json::Value>,
}
