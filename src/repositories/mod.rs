//! Upstream repositories.
//!
//! One repository per provider area. Each knows the endpoint paths, the
//! parameter names the provider expects and the raw payload shapes that come
//! back; normalization into the browser model happens in `services`.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod gift;
pub mod matches;
pub mod user_profile;
pub mod wallet;

pub use auth::AuthRepository;
pub use chat::ChatRepository;
pub use dashboard::DashboardRepository;
pub use gift::GiftRepository;
pub use matches::MatchRepository;
pub use user_profile::UserProfileRepository;
pub use wallet::WalletRepository;
