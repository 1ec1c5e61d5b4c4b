pub mod actions;
pub mod health;
pub mod metrics;
pub mod view;
pub mod ws;
