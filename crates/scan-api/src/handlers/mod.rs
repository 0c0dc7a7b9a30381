//! HTTP handlers

pub mod scan;
