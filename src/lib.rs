pub mod api;
pub mod backend;
pub mod config;
pub mod context;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod render;
pub mod services;
pub mod view;

use std::sync::Arc;

use crate::config::PanelConfig;
use crate::context::PanelContext;
use crate::view::ViewStore;

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<PanelContext>,
    pub view: Arc<ViewStore>,
    pub config: PanelConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
