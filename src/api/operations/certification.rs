use crate::api::ApiClient;
use crate::api::models::{
    CertificationReport, CertificationReportRecord, CertificationRequest, CertificationVerdict,
};
use crate::error::AppResult;
use crate::result::SuccessResponse;

impl ApiClient {
    /// 需要登录
    pub async fn verify_certification(
        &self,
        req: &CertificationRequest,
    ) -> AppResult<CertificationVerdict> {
        req.validate()?;
        self.post("/certification/verify", req).await
    }

    pub async fn report_certification(
        &self,
        report: &CertificationReport,
    ) -> AppResult<SuccessResponse> {
        self.post("/certification/report", report).await
    }

    pub async fn certification_reports(&self) -> AppResult<Vec<CertificationReportRecord>> {
        self.get("/certification/reports").await
    }
}
