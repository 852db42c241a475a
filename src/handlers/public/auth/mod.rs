// handlers/public/auth/mod.rs - Account entry points

pub mod sign_in; // POST /api/auth/sign-in
pub mod sign_out; // POST /api/auth/sign-out
pub mod sign_up; // POST /api/auth/sign-up

pub use sign_in::sign_in_post;
pub use sign_out::sign_out_post;
pub use sign_up::sign_up_post;
