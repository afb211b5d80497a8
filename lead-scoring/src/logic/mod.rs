//! Scoring logic, kept apart from the HTTP layer.

pub mod model;
