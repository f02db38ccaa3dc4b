#![allow(non_snake_case)]
pub mod r#enum;
pub mod table;
