//! Shared value model for colsense crates.
//!
//! This crate provides the [`Cell`] type every input source is reduced to,
//! plus Polars `AnyValue` conversion and numeric text helpers.

pub mod cell;
pub mod polars;

pub use cell::{Cell, CellKind};
pub use self::polars::{any_to_cell, format_numeric, parse_f64};
