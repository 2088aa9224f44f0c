//! Nugget News - a landing site and article browser for a news API
//!
//! This crate renders the informational pages server-side and hosts the
//! Article Browser, which lists categories from the upstream news API,
//! loads a handful of articles per category and filters them by text.

pub mod browser;
pub mod client;
pub mod config;
pub mod model;
pub mod routes;
pub mod session;
pub mod site;
