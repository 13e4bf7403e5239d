// src/services/mod.rs
pub mod responses;
