//! # dtogen
//!
//! **dtogen** inspects the metadata of compiled service modules, finds the
//! data-transfer types reachable from endpoint classes and writes equivalent
//! TypeScript definitions, plus optional Angular data services, for a client
//! to consume.
//!
//! ## Architecture
//!
//! - **[`model`]** - module metadata, type-reference parsing and the
//!   [`ObjectModel`](model::ObjectModel) trait everything else reads through
//! - **[`graph`]** - classification, type mapping, endpoint scanning and the
//!   model closure
//! - **[`generator`]** - askama renderers, the output index and stale-file cleanup
//! - **[`config`]** - generation options and settings files
//! - **[`cli`]** - the `dtogen` command line
//! - **[`logging`]** - tracing subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(dtogen)
//!     participant Load as MetadataModel::load
//!     participant Scan as EndpointScanner
//!     participant Expand as GraphExpander
//!     participant Render as generator
//!     participant FS as File System
//!
//!     CLI->>Load: source dir + file patterns
//!     Load->>FS: glob, parse JSON/YAML/TOML
//!     Load->>FS: resolve missing references by name
//!     Load-->>CLI: MetadataModel
//!     CLI->>Scan: find_endpoints()
//!     Scan-->>CLI: endpoints + seed ModelSet
//!     CLI->>Expand: expand(seeds)
//!     Expand-->>CLI: closed ModelSet
//!     CLI->>Render: entities, data services, index.ts
//!     Render->>FS: write <Name>.ts
//!     Render->>FS: remove stale files
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use dtogen::graph::TypeGraph;
//! use dtogen::model::MetadataModel;
//!
//! let model = MetadataModel::load(Path::new("./bin"), &["*.client.json".to_string()])?;
//! let graph = TypeGraph::build(&model, &["ApiController".to_string()]);
//! for id in &graph.models {
//!     println!("{id}");
//! }
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod graph;
pub mod logging;
pub mod model;
