//! API endpoint implementations

pub mod account;
pub mod public_v1;
pub mod public_v2;

pub use account::AccountEndpoints;
pub use public_v1::PublicV1Endpoints;
pub use public_v2::PublicV2Endpoints;
