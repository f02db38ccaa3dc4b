// @generated by abstractapi-gen. Do not edit.
#![allow(non_camel_case_types, non_snake_case, dead_code, unused_imports)]

use serde::{Deserialize, Serialize};
use abstractapi::typed::{Contract, ContractMode, EndpointDescriptor, HandlerError, RawParams};
use abstractapi::validator::{conforms, is_member, Check, FieldRule, Section, SectionSpec};
use super::super::utility::{error, ErrorFn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DELETE_user__id_Paths {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DELETE_user__id_Req {
    pub paths: DELETE_user__id_Paths,
}

const PATHS_RULES: &[FieldRule] = &[
    FieldRule::new("id", Check::Integer),
];

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::new(Section::Paths, PATHS_RULES),
];

pub type DELETE_user__id_Res = bool;

pub struct DELETE_user__id_Contract;

impl Contract for DELETE_user__id_Contract {
    const ENDPOINT: &'static str = "DELETE /user/:id";
    const MODE: ContractMode = ContractMode::Typed;
    type Request = DELETE_user__id_Req;
    type Response = DELETE_user__id_Res;

    fn sections() -> &'static [SectionSpec] {
        SECTIONS
    }
}

/// `DELETE /user/:id`
pub struct DELETE_user__id(pub EndpointDescriptor<DELETE_user__id_Contract>);

impl DELETE_user__id {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(DELETE_user__id_Req, ErrorFn) -> Result<DELETE_user__id_Res, HandlerError> + Send + Sync + 'static,
    {
        Self(EndpointDescriptor::new(move |req| f(req, error)))
    }
}
