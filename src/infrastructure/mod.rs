// src/infrastructure/mod.rs
pub mod anki;
pub mod config;
pub mod org_file;

pub use anki::AnkiRepository;
pub use config::Config;
