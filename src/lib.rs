//! Planet News - a static web-feed aggregator
//!
//! This crate fetches a configured list of web feeds concurrently,
//! merges their entries into one timestamp-ordered stream, and renders
//! the stream as a paginated static website. Sources that respond with
//! HTTP 404 are collected into a prune list for later removal from the
//! configuration.

pub mod aggregator;
pub mod config;
pub mod fetcher;
pub mod paginator;
pub mod parser;
pub mod render;
pub mod site;
