//! Business-logic services.
//!
//! - [`auth`] - credential issuance and verification
//! - [`token`] - stateless session tokens
//! - [`payment`] - payment-intent passthrough
//! - [`upload`] - disk-backed file storage

pub mod auth;
pub mod payment;
pub mod token;
pub mod upload;
