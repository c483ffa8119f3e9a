// src/lib.rs
pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod demo;
pub mod insights;
pub mod state;
pub mod ui;
pub mod validate;
