//! meuPortefolio Client
//!
//! Terminal client for the meuPortefolio investment-portfolio API. All
//! business logic (balances, trade settlement, risk metrics, billing)
//! lives behind the REST backend; this crate holds the session identity,
//! typed API wrappers, the dashboard aggregation flow, and premium gating.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod view;

pub use error::{AppError, Result};
