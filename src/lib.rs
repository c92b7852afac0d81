//! pay265 - Terminal Marketplace Client
//!
//! A terminal storefront for a small Malawian marketplace demo: browse
//! products, sign up as a buyer or seller, post a product, place an order.
//! Persistence and auth live behind the `DomainClient` trait.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
