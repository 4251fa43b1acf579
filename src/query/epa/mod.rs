//! The EPA algorithm for penetration depth computation.
//!
pub use self::epa3::EPA;

pub mod epa3;
