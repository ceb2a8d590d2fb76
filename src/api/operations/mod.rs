/// 各业务接口的调用实现，均以 `impl ApiClient` 的形式提供
pub mod advisory;
pub mod auth;
pub mod certification;
pub mod marketplace;
pub mod superuser;
