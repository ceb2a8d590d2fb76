/// 远端 API 访问层
/// 共享请求头、HTTP 客户端以及各业务接口
pub mod client;
pub mod headers;
pub mod models;
pub mod operations;

pub use client::ApiClient;
pub use headers::DefaultHeaders;
