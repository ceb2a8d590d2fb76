use serde_json::Value;

use crate::api::ApiClient;
use crate::api::models::{
    AiTipRequest, Answer, ChatRequest, CropPriceRequest, CropRecommendRequest,
    CropRecommendation, FarmingTip, SatelliteInsightRequest, WeatherRequest,
};
use crate::error::AppResult;

impl ApiClient {
    pub async fn recommend_crop(&self, req: &CropRecommendRequest) -> AppResult<CropRecommendation> {
        req.validate()?;
        self.post("/crop-recommend/", req).await
    }

    pub async fn weather(&self, req: &WeatherRequest) -> AppResult<Value> {
        req.validate()?;
        self.post("/weather/", req).await
    }

    pub async fn tips(&self) -> AppResult<Vec<FarmingTip>> {
        self.get("/tips/").await
    }

    pub async fn ai_tip(&self, req: &AiTipRequest) -> AppResult<Answer> {
        req.validate()?;
        self.post("/tips/ai", req).await
    }

    pub async fn ask_chatbot(&self, req: &ChatRequest) -> AppResult<Answer> {
        req.validate()?;
        self.post("/chatbot/", req).await
    }

    pub async fn crop_health(&self) -> AppResult<Value> {
        self.get("/crop-health/").await
    }

    pub async fn dashboard(&self) -> AppResult<Value> {
        self.get("/dashboard/").await
    }

    pub async fn schemes(&self) -> AppResult<Value> {
        self.get("/schemes/").await
    }

    pub async fn satellite_insight(&self, req: &SatelliteInsightRequest) -> AppResult<Value> {
        req.validate()?;
        self.post("/satellite-insight/", req).await
    }

    pub async fn crop_prices(&self, req: &CropPriceRequest) -> AppResult<Value> {
        req.validate()?;
        self.post("/crop-prices/get-prices", req).await
    }

    pub async fn popular_crops(&self) -> AppResult<Value> {
        self.get("/crop-prices/popular-crops").await
    }
}
