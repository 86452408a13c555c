//! CLI module graph.

pub mod calendar;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod output;
pub mod paths;
pub mod serve;
pub mod targets;
