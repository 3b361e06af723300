//! SpendWise - command-line personal finance tracker
//!
//! This library provides the core of the SpendWise expense tracker: typed
//! models for expenses and monthly budgets, a client for the record store
//! that holds them, and the aggregation that turns raw records into totals,
//! category breakdowns, trends and remaining-budget figures.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, budgets, categories, money, periods)
//! - `client`: Record store access over HTTP, or in memory for demo runs
//! - `services`: Session handling, validation and refresh discipline
//! - `reports`: Pure aggregation and report building
//! - `export`: CSV, JSON and YAML exports
//! - `display`: Terminal tables and charts
//! - `cli`: Command handlers for the `spendwise` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::client::MemoryStore;
//! use spendwise::services::{AuthService, Backend, DashboardService};
//!
//! let mut backend = Backend::new(Box::new(MemoryStore::demo()));
//! AuthService::new(&mut backend).login("demo", "demo123")?;
//! let report = DashboardService::new(&mut backend).load(Bucketing::Monthly, today)?;
//! println!("{}", report.format_terminal("₹"));
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{SpendwiseError, SpendwiseResult};
