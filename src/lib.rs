//! Terminal client for a remote quotes collection

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ui;
pub mod viewmodel;
