pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod keyboard;
pub mod quiz;
