// src/feed/mod.rs
pub mod http;
pub mod types;
