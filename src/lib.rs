#![doc = "The `tasknotes` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic for the tasknotes API:"]
#![doc = "authentication (registration, login, bearer-token resolution), the"]
#![doc = "generic CRUD layer shared by tasks and notes, the domain models,"]
#![doc = "routing configuration, and error handling. It is used by the main"]
#![doc = "binary (`main.rs`) and by the integration tests to construct the"]
#![doc = "application."]

pub mod auth;
pub mod config;
pub mod crud;
pub mod error;
pub mod models;
pub mod routes;
