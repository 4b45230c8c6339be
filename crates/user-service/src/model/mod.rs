//! Pure data structures (DTOs) for the User resource.

pub mod user;

pub use user::*;
