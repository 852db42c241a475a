// handlers/mod.rs - Handlers grouped by security tier
//
// Public (no session) → Protected (session cookie pair required)

pub mod public; // Tier 1: account entry points (/api/auth/*)
pub mod protected; // Tier 2: upstream-backed features (/api/chat/*, /api/dashboard/*, ...)
