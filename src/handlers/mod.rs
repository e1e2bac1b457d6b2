//! HTTP handlers

pub mod assess;
pub mod charts;
pub mod engine;
pub mod health;
pub mod reports;
