//! # Object Model
//!
//! Read-only view of the compiled object model the generator inspects: modules,
//! the types they declare, and those types' bases, properties and methods.
//!
//! ## Layers
//!
//! - [`metadata`] - serde structs for module files (JSON, YAML or TOML)
//! - [`type_ref`] - nom parser for type references (`List<Order>`, `int?`, `Order[]`)
//! - [`descriptor`] - resolved [`TypeDescriptor`]s and [`TypeId`] identity
//! - [`ObjectModel`] - the capability trait the resolution core depends on
//! - [`MetadataModel`] - the file-backed implementation, with its loader
//!
//! ## Module file
//!
//! ```yaml
//! name: Acme.Api
//! references: [Acme.Contracts]
//! types:
//!   - name: Acme.Api.OrdersController
//!     base: System.Web.Http.ApiController
//!     methods:
//!       - name: GetOrder
//!         returns: Acme.Contracts.Order
//!         parameters:
//!           - { name: id, type: int }
//! ```

pub mod descriptor;
mod error;
mod load;
pub mod metadata;
mod object_model;
pub mod type_ref;

#[cfg(test)]
mod tests;

pub use descriptor::{
    MethodDescriptor, ParameterDescriptor, Primitive, PropertyDescriptor, TypeDescriptor, TypeId,
};
pub use error::ModelError;
pub use load::load_module_file;
pub use metadata::{
    Annotation, EnumValue, HttpVerb, MethodDef, ModuleDef, ParameterDef, PropertyDef, TypeDef,
    TypeKind, IGNORE_MARKER,
};
pub use object_model::{MetadataModel, ObjectModel};
pub use type_ref::TypeRef;
