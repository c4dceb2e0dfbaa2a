pub mod calculator;
pub mod config;
pub mod error;
pub mod layers;
pub mod render;
pub mod router;
pub mod state;
pub mod web_assets;
