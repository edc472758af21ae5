//! AgentQL Zap: automation-platform integration for the AgentQL extraction API
//!
//! Wires API-key authentication, the `query_data` create action with its webhook
//! completion flow, and a sample-data generator that turns a parsed AgentQL query into
//! placeholder output of the same shape.

pub mod action;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod definition;
pub mod error;
pub mod logging;
pub mod query;
pub mod sample;
