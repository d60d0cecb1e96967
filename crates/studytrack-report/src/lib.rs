//! studytrack-report — Concrete file encodings for result tables.
//!
//! The engine deals only in the logical [`studytrack_core::tabular::TabularData`]
//! shape; this crate turns that shape into files and back.

pub mod csv;
