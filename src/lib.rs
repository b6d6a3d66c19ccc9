//! Handy Helpers - a terminal storefront for the Handy Helpers shop.
//!
//! Browsing, search, cart, checkout, reviews and account management against
//! the shop's REST API, with a slice-based store driving a ratatui interface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer with the store and fetch dispatcher.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "handyhelpers";
