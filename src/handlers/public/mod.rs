// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: request tracing, CORS and body limits only

pub mod auth;
pub mod system;
pub mod topics;
