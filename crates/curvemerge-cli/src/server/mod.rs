//! HTTP merge service.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
