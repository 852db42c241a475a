// handlers/protected/mod.rs - Protected handlers (session cookie pair required)
//
// Every handler here takes a `Session` or `SessionUser` extractor; a missing or
// malformed cookie short-circuits with AUTH_REQUIRED and clears the cookies.

pub mod chat;
pub mod dashboard;
pub mod gifts;
pub mod matches;
pub mod profile;
pub mod wallet;
