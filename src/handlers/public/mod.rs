// handlers/public/mod.rs - Public handlers (no session required)
//
// Sign-in and sign-up create the session cookie pair; sign-out removes it.

pub mod auth;
