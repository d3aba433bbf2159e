//! Repository methods, one module per concern, all on `RecordsService`.

pub mod auth;
pub mod catalog;
pub mod enrollment;
pub mod profile;
pub mod roster;
