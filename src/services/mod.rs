// src/services/mod.rs
pub mod flow_client;
