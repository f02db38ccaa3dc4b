use serde::{Deserialize, Serialize};

use super::super::r#enum::Role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub tags: Vec<String>,
}
