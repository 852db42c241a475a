//! Plumbing shared by every upstream repository: the HTTP client, parameter
//! lists and loose-value coercion.

pub mod client;
pub mod loose;
pub mod params;

pub use client::{Area, Transport, UpstreamClient};
pub use loose::{lenient_list, lenient_object, normalize_text, LooseField, LooseValue};
pub use params::Params;
