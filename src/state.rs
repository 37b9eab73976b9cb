// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::flow_client::{FlowClient, ProxyError};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub flow: FlowClient,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let flow = FlowClient::new(config)?;
        Ok(Self { flow })
    }
}
