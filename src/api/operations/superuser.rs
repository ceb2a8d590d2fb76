use crate::api::ApiClient;
use crate::api::models::EquipmentRequest;
use crate::error::AppResult;
use crate::result::SuccessResponse;

// 以下接口都要求超级用户令牌，否则服务端返回 403
impl ApiClient {
    pub async fn verify_crop(&self, listing_id: i64) -> AppResult<SuccessResponse> {
        self.post_empty(&format!("/superuser/verify-crop/{}", listing_id))
            .await
    }

    pub async fn delete_crop(&self, listing_id: i64) -> AppResult<SuccessResponse> {
        self.delete(&format!("/superuser/delete-crop/{}", listing_id))
            .await
    }

    pub async fn verify_equipment(&self, request_id: i64) -> AppResult<SuccessResponse> {
        self.post_empty(&format!("/superuser/verify-equipment/{}", request_id))
            .await
    }

    pub async fn delete_equipment(&self, request_id: i64) -> AppResult<SuccessResponse> {
        self.delete(&format!("/superuser/delete-equipment/{}", request_id))
            .await
    }

    pub async fn equipment_requests(&self) -> AppResult<Vec<EquipmentRequest>> {
        self.get("/superuser/equipment-requests").await
    }
}
