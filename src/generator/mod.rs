//! # Generator Module
//!
//! Renders a resolved type graph as TypeScript into one output directory.
//!
//! ## Output
//!
//! - `<Model>.ts` - one `export interface` (or `export enum`) per model
//! - `<Endpoint>Service.ts` - one Angular data service per endpoint, only when
//!   an API path is configured
//! - `index.ts` - re-exports every generated file
//!
//! Any other top-level file in the output directory is deleted at the end of a
//! run, so the directory always mirrors the current object model.
//!
//! ## Naming
//!
//! Files are named after the simple type name. Colliding names (compared
//! case-insensitively) get `_1`, `_2`, ... suffixes, and every reference to a
//! renamed model uses the suffixed name.
//!
//! Templates live in `templates/*.ts.txt` and are compiled in with askama.

mod data_service;
mod entity;
mod naming;
mod project;
mod templates;


pub use data_service::{infer_verb, method_url};
pub use naming::{service_name, to_camel_case, unique_name};
pub use project::{generate, inspect, remove_non_generated_files, GenerationReport, OutputNames};

/// Name of the aggregated export file (without extension)
pub const INDEX_NAME: &str = "index";
