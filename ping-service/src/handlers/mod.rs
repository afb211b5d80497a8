//! HTTP handlers

pub mod ping;
