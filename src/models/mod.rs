//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod challenge;
pub mod invite;
pub mod membership;
pub mod room;
pub mod user;
pub mod workproof;

pub use challenge::*;
pub use invite::*;
pub use membership::Membership;
pub use room::*;
pub use user::*;
pub use workproof::*;
