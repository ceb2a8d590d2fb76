use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 设备认证核验请求
#[derive(Debug, Clone, Default, Serialize)]
pub struct CertificationRequest {
    pub equipment_id: String,
    pub equipment_name: String,
    pub brand: String,
    pub origin: String,
    pub compliance_info: String,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CertificationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.equipment_id.trim().is_empty() && self.equipment_name.trim().is_empty() {
            return Err(AppError::Validation(vec![
                "Provide equipment_id or equipment_name".into(),
            ]));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationVerdict {
    #[serde(default)]
    pub equipment_id: String,
    #[serde(default)]
    pub equipment_name: String,
    #[serde(default = "unknown_status")]
    pub status: String,
    #[serde(default)]
    pub confidence: Option<serde_json::Value>,
    #[serde(default)]
    pub explanation: String,
}

fn unknown_status() -> String {
    "unknown".to_string()
}

/// 可疑产品举报
#[derive(Debug, Clone, Default, Serialize)]
pub struct CertificationReport {
    pub product_id: String,
    pub crop_name: String,
    pub reason: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationReportRecord {
    pub id: i64,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub crop_name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub reporter_sub: Option<String>,
    pub created_at: String,
}

/// 待超级用户审核的设备
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentRequest {
    pub id: i64,
    #[serde(default)]
    pub equipment_id: Option<String>,
    #[serde(default)]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub compliance_info: Option<String>,
    #[serde(default)]
    pub created_by_sub: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub verified_by_superuser: bool,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub verified_by_sub: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_needs_id_or_name() {
        assert!(CertificationRequest::default().validate().is_err());
        let by_name = CertificationRequest {
            equipment_name: "Rotavator".into(),
            ..Default::default()
        };
        assert!(by_name.validate().is_ok());
    }

    #[test]
    fn empty_extra_is_not_sent() {
        let body = serde_json::to_value(CertificationRequest {
            equipment_id: "EQ-1".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(body.get("extra").is_none());
    }

    #[test]
    fn verdict_defaults_missing_fields() {
        let verdict: CertificationVerdict =
            serde_json::from_str(r#"{"equipment_id": "EQ-1", "confidence": 0.8}"#).unwrap();
        assert_eq!(verdict.status, "unknown");
        assert_eq!(verdict.confidence, Some(serde_json::json!(0.8)));
    }
}
