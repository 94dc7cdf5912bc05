//! Prelims question bank browser.
//!
//! The [`data`] module holds the loader and the query engine; everything
//! else is the egui front end built on top of them.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
