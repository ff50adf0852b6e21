//! HTTP interface module.
//!
//! - Health and status checks for the hosting shell
//! - Navigator introspection

pub mod routes;

pub(crate) mod monitoring;
