// @generated by abstractapi-gen. Do not edit.
#![allow(non_camel_case_types, non_snake_case, dead_code, unused_imports)]

use serde::{Deserialize, Serialize};
use abstractapi::typed::{Contract, ContractMode, EndpointDescriptor, HandlerError, RawParams};
use abstractapi::validator::{conforms, is_member, Check, FieldRule, Section, SectionSpec};
use super::super::utility::{error, ErrorFn};
use super::super::super::model::r#enum::Role::Role;
use super::super::super::model::table::User::User;
use super::super::super::schema::Profile::Profile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct POST_user_Body {
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct POST_user_Req {
    pub body: POST_user_Body,
}

const BODY_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::String),
    FieldRule::new("role", Check::Enum { name: "Role", test: is_member::<Role> }),
    FieldRule::new("profile", Check::Nested { name: "Profile", test: conforms::<Profile> }).optional(),
    FieldRule::new("type", Check::String).optional(),
];

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::new(Section::Body, BODY_RULES),
];

pub type POST_user_Res = Option<User>;

pub struct POST_user_Contract;

impl Contract for POST_user_Contract {
    const ENDPOINT: &'static str = "POST /user";
    const MODE: ContractMode = ContractMode::Typed;
    type Request = POST_user_Req;
    type Response = POST_user_Res;

    fn sections() -> &'static [SectionSpec] {
        SECTIONS
    }
}

/// `POST /user`
pub struct POST_user(pub EndpointDescriptor<POST_user_Contract>);

impl POST_user {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(POST_user_Req, ErrorFn) -> Result<POST_user_Res, HandlerError> + Send + Sync + 'static,
    {
        Self(EndpointDescriptor::new(move |req| f(req, error)))
    }
}
