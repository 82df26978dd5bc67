//! Template engine adapters.

mod jinja;

pub use jinja::JinjaEngine;
