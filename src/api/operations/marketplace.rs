use crate::api::ApiClient;
use crate::api::models::{Listing, NewListing};
use crate::error::AppResult;
use crate::result::SuccessResponse;

impl ApiClient {
    pub async fn marketplace_listings(&self) -> AppResult<Vec<Listing>> {
        self.get("/marketplace/").await
    }

    pub async fn marketplace_listing(&self, id: i64) -> AppResult<Listing> {
        self.get(&format!("/marketplace/{}", id)).await
    }

    pub async fn add_marketplace_listing(&self, listing: &NewListing) -> AppResult<Listing> {
        listing.validate()?;
        self.post("/marketplace/", listing).await
    }

    pub async fn delete_marketplace_listing(&self, id: i64) -> AppResult<SuccessResponse> {
        self.delete(&format!("/marketplace/{}", id)).await
    }
}
