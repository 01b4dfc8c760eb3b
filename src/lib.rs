pub mod app;
pub mod config;
pub mod error;
pub mod family;
pub mod meals;
pub mod plans;
pub mod state;
pub mod suggest;
