use serde::{Deserialize, Serialize};

use super::validation_result;
use crate::error::AppError;
use crate::utils::{MarkdownTable, Season, parse_markdown_table};

/// 后端用来标记匿名调用方的用户标识
pub const GUEST_USER_ID: &str = "guest";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Serialize)]
pub struct CropRecommendRequest {
    pub soil: String,
    pub season: String,
    pub location: String,
    pub user_id: String,
}

impl CropRecommendRequest {
    pub fn new(soil: &str, season: Season, location: &str) -> Self {
        Self {
            soil: soil.trim().to_string(),
            season: season.to_string(),
            location: location.trim().to_string(),
            user_id: GUEST_USER_ID.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.location.is_empty() {
            return Err(AppError::Validation(vec!["location is required".into()]));
        }
        Ok(())
    }
}

/// 作物推荐结果，`table` 为 Markdown 表格
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRecommendation {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CropRecommendation {
    pub fn parsed_table(&self) -> Option<MarkdownTable> {
        self.table.as_deref().and_then(parse_markdown_table)
    }

    pub fn crop_names(&self) -> Vec<String> {
        self.parsed_table()
            .map(|t| t.first_column_values())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherRequest {
    pub location: String,
    pub user_id: String,
}

impl WeatherRequest {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.trim().to_string(),
            user_id: GUEST_USER_ID.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.location.is_empty() {
            return Err(AppError::Validation(vec!["location is required".into()]));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmingTip {
    pub category: String,
    pub stage: String,
    pub tip: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiTipRequest {
    pub question: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: String,
}

impl AiTipRequest {
    pub fn new(question: &str, language: Option<&str>) -> Self {
        Self {
            question: question.trim().to_string(),
            language: language.unwrap_or(DEFAULT_LANGUAGE).to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.question.is_empty() {
            return Err(AppError::Validation(vec!["Question is required".into()]));
        }
        Ok(())
    }
}

impl ChatRequest {
    pub fn new(message: &str, language: Option<&str>) -> Self {
        Self {
            message: message.trim().to_string(),
            language: language.unwrap_or(DEFAULT_LANGUAGE).to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.message.is_empty() {
            return Err(AppError::Validation(vec!["Message is required".into()]));
        }
        Ok(())
    }
}

/// 聊天机器人与 AI 建议的回答
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
}

/// 卫星洞察：位置名或经纬度二选一
#[derive(Debug, Clone, Default, Serialize)]
pub struct SatelliteInsightRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SatelliteInsightRequest {
    pub fn at_location(location: &str) -> Self {
        Self {
            location: Some(location.trim().to_string()),
            ..Self::default()
        }
    }

    pub fn at_coordinates(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            location: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                    errors.push("Invalid coordinates".to_string());
                }
            }
            _ => {
                if self.location.as_deref().is_none_or(|l| l.trim().is_empty()) {
                    errors.push("Location or coordinates required".to_string());
                }
            }
        }
        validation_result(errors)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CropPriceRequest {
    pub location: String,
    pub crop_name: String,
}

impl CropPriceRequest {
    pub fn new(location: &str, crop_name: &str) -> Self {
        Self {
            location: location.trim().to_string(),
            crop_name: crop_name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.location.is_empty() {
            errors.push("location is required".to_string());
        }
        if self.crop_name.is_empty() {
            errors.push("crop_name is required".to_string());
        }
        validation_result(errors)
    }
}
