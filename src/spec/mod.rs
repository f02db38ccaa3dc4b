//! # Spec Module
//!
//! Data model of a declarative API description and loaders for it.
//!
//! An API description is a list of [`Endpoint`]s; each endpoint declares its
//! method, path, optional request sections (body, path, query and header
//! fields) and a return type. Field types are [`FieldTypeReference`]s that are
//! either native primitives or references to names defined by sibling
//! generators (schemas, tables and enums). Those names are resolved through two
//! [`LookupTable`]s loaded alongside the description.

mod load;
mod types;

pub use load::{load_endpoints, load_lookup, parse_endpoints};
pub use types::{
    Endpoint, Field, FieldTypeReference, HttpMethod, LookupTable, ReturnType, UnsupportedMethod,
};
