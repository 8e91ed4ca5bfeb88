pub mod auth;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser, UNAUTHENTICATED_MESSAGE};
pub use response::{ApiResponse, ApiResult};
