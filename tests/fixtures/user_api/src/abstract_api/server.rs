// @generated by abstractapi-gen. Do not edit.
#![allow(non_camel_case_types, unused_imports)]

use abstractapi::error::ConfigError;
use abstractapi::server::{App, SystemParam};
use abstractapi::typed::Contract;
use abstractapi::validator::SectionSpec;
use super::api::GET_user__id::{GET_user__id, GET_user__id_Contract};
use super::api::POST_user::{POST_user, POST_user_Contract};
use super::api::DELETE_user__id::{DELETE_user__id, DELETE_user__id_Contract};

/// Every endpoint descriptor this server can implement.
pub enum Endpoints {
    GET_user__id(GET_user__id),
    POST_user(POST_user),
    DELETE_user__id(DELETE_user__id),
}

impl From<GET_user__id> for Endpoints {
    fn from(endpoint: GET_user__id) -> Self {
        Endpoints::GET_user__id(endpoint)
    }
}

impl From<POST_user> for Endpoints {
    fn from(endpoint: POST_user) -> Self {
        Endpoints::POST_user(endpoint)
    }
}

impl From<DELETE_user__id> for Endpoints {
    fn from(endpoint: DELETE_user__id) -> Self {
        Endpoints::DELETE_user__id(endpoint)
    }
}

/// Request contract sections of an endpoint key (`"METHOD /path"`).
pub fn request_contract(endpoint: &str) -> Option<&'static [SectionSpec]> {
    match endpoint {
        "GET /user/:id" => Some(GET_user__id_Contract::sections()),
        "POST /user" => Some(POST_user_Contract::sections()),
        "DELETE /user/:id" => Some(DELETE_user__id_Contract::sections()),
        _ => None,
    }
}

#[derive(Default)]
pub struct AbstractApi {
    app: App,
}

impl AbstractApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `before_start`, then listen on the port (parameter, `PORT`, 3000).
    pub fn init(&mut self, param: SystemParam) -> Result<&mut Self, ConfigError> {
        self.app.init(param)?;
        Ok(self)
    }

    pub fn implement(&self, endpoint: impl Into<Endpoints>) -> Result<(), ConfigError> {
        let endpoint: Endpoints = endpoint.into();
        match endpoint {
            Endpoints::GET_user__id(descriptor) => self.app.implement(descriptor.0),
            Endpoints::POST_user(descriptor) => self.app.implement(descriptor.0),
            Endpoints::DELETE_user__id(descriptor) => self.app.implement(descriptor.0),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Stop listening; `init` may be called again afterwards.
    pub fn stop(&mut self) {
        self.app.stop();
    }

    pub fn join(self) -> std::thread::Result<()> {
        self.app.join()
    }
}
