// @generated by abstractapi-gen. Do not edit.
#![allow(non_camel_case_types, non_snake_case, dead_code, unused_imports)]

use serde::{Deserialize, Serialize};
use abstractapi::typed::{Contract, ContractMode, EndpointDescriptor, HandlerError, RawParams};
use abstractapi::validator::{conforms, is_member, Check, FieldRule, Section, SectionSpec};
use super::super::utility::{error, ErrorFn};
use super::super::super::model::table::User::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GET_user__id_Paths {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GET_user__id_Headers {
    #[serde(rename = "x-tenant")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_tenant: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GET_user__id_Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GET_user__id_Req {
    pub paths: GET_user__id_Paths,
    pub headers: GET_user__id_Headers,
    pub query: GET_user__id_Query,
}

const PATHS_RULES: &[FieldRule] = &[
    FieldRule::new("id", Check::Integer),
];

const HEADERS_RULES: &[FieldRule] = &[
    FieldRule::new("x-tenant", Check::String).optional(),
];

const QUERY_RULES: &[FieldRule] = &[
    FieldRule::new("tags", Check::String).optional().array(),
];

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::new(Section::Paths, PATHS_RULES),
    SectionSpec::new(Section::Headers, HEADERS_RULES),
    SectionSpec::new(Section::Query, QUERY_RULES),
];

pub type GET_user__id_Res = User;

pub struct GET_user__id_Contract;

impl Contract for GET_user__id_Contract {
    const ENDPOINT: &'static str = "GET /user/:id";
    const MODE: ContractMode = ContractMode::Typed;
    type Request = GET_user__id_Req;
    type Response = GET_user__id_Res;

    fn sections() -> &'static [SectionSpec] {
        SECTIONS
    }
}

/// `GET /user/:id`
pub struct GET_user__id(pub EndpointDescriptor<GET_user__id_Contract>);

impl GET_user__id {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(GET_user__id_Req, ErrorFn) -> Result<GET_user__id_Res, HandlerError> + Send + Sync + 'static,
    {
        Self(EndpointDescriptor::new(move |req| f(req, error)))
    }
}
