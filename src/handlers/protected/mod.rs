// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, so handlers can take
// `Extension<AuthUser>` and rely on it being present.

pub mod topics;
pub mod users;
