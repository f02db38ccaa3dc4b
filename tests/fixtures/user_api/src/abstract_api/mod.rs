// @generated by abstractapi-gen. Do not edit.
#![allow(non_snake_case)]
pub mod api;
pub mod server;
pub mod utility;
