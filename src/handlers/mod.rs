// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer JWT required)
pub mod public;    // /, /health, /auth/*, topic reads
pub mod protected; // /users/*, topic writes
