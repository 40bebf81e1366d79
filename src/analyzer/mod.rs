//! # Analyzer Module
//!
//! Domain logic behind `chartlint lint`:
//! - `multichart`: finds the scopes of a chart tree, resolves each scope's
//!   values and aggregates the per-scope lint results
//! - `helmlint`: the built-in engine that lints a single chart
//! - `values`: merges `-f` files and `--set*` flags over a chart's values

pub mod helmlint;
pub mod multichart;
pub mod values;
