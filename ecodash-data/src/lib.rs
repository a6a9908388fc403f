//! World Bank indicator loading and in-memory tables for Ecodash.
//!
//! The client fetches indicator series and country metadata once at process
//! startup; the store reshapes them into long-format tables that stay
//! read-only for the process lifetime. Every dashboard interaction is a
//! filter over these tables, never a write.

pub mod client;
pub mod models;
pub mod store;
pub mod table;

pub use client::{RawObservation, WorldBankClient};
pub use store::{DataStore, Selection, SeriesData};
pub use table::IndicatorTable;
