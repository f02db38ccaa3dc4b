mod generate;

pub use generate::{generate_project, inspect_endpoints, write_output, GenerateOptions};
