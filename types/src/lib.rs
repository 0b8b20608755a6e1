//! Fundamental types for the quorum producer-election core.
//!
//! This crate defines the types shared by every other crate in the
//! workspace: account names, token amounts, timestamps, producer
//! preference vectors, and the protocol's hard limits.

pub mod account;
pub mod amount;
pub mod params;
pub mod prefs;
pub mod time;

pub use account::AccountName;
pub use amount::TokenAmount;
pub use prefs::ProducerPreferences;
pub use time::Timestamp;
