//! Core library modules for the taskies export engine.
//!
//! ## Features
//!
//! - **Column Catalog**: every exportable column and how to reach its table
//! - **Projection Builder**: user selections resolved into projections and joins
//! - **Query Compiler**: SQL generation for exports and attribute pivots
//! - **Attribute Merger**: sparse task attributes as trailing columns
//! - **Value Processing**: newline, boolean and empty-value formatting
//! - **Export**: orchestration and CSV/Excel serialization
//! - **Infrastructure**: configuration, presets, data storage, messaging
//!
//! ## Usage
//!
//! ```rust
//! use taskies::libs::projection::{build_join_projections, build_projections, ColumnSelection};
//! use taskies::libs::query::QueryBuilder;
//!
//! let selections = vec![ColumnSelection::new("Proj", "Display Name", 1)];
//! let sql = QueryBuilder::new(false).build_query(
//!     &build_projections(&selections),
//!     &build_join_projections(&selections),
//!     None,
//! );
//! assert!(sql.contains("projects.display_name AS \"Proj\""));
//! ```

pub mod attributes;
pub mod columns;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod projection;
pub mod query;
pub mod view;
