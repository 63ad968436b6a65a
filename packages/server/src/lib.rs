// Theyool Consultation Backend - API Core
//
// This crate provides the backend API for the firm's consultation booking flow:
// availability resolution, booking lifecycle, and email/SMS notifications.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
