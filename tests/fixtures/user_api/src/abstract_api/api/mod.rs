// @generated by abstractapi-gen. Do not edit.
#![allow(non_snake_case)]
pub mod GET_user__id;
pub mod POST_user;
pub mod DELETE_user__id;
