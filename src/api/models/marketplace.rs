use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation_result;
use crate::error::AppError;

/// 市场上架信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub crop_name: String,
    pub quantity: String,
    pub price: f64,
    pub location: String,
    pub contact: String,
    pub created_at: String,
}

impl Listing {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewListing {
    pub crop_name: String,
    pub quantity: String,
    pub price: f64,
    pub location: String,
    pub contact: String,
}

impl NewListing {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("crop_name", &self.crop_name),
            ("quantity", &self.quantity),
            ("location", &self.location),
            ("contact", &self.contact),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{} is required", field));
            }
        }
        if !self.price.is_finite() {
            errors.push("price must be a number".to_string());
        }
        validation_result(errors)
    }
}

/// 后端时间戳有的带时区（`+00:00`），有的不带（按 UTC 处理）
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
