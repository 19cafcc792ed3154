//! # Model
//!
//! Persistence layer. Entities and the user store live in [`store`].

pub mod store;
