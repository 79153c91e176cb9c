// src/util/mod.rs
pub mod process;
pub mod testing;
pub mod text;
