// src/ports/mod.rs
pub mod org;

pub use org::OrgPresenter;
