// src/domain/mod.rs
pub mod card;
pub mod error;

pub use card::CardRecord;
pub use error::DomainError;
