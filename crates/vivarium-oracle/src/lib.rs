//! Decision oracle client for the Vivarium simulation.
//!
//! The tick loop asks the oracle what a minion should do next and never
//! waits for the answer. This crate supplies the asynchronous side:
//!
//! - [`backend`] -- Enum-dispatched HTTP, `OpenAI`-compatible and Anthropic backends
//! - [`client`] -- [`AsyncOracle`], the non-blocking [`DecisionOracle`] implementation
//! - [`config`] -- `ORACLE_*` environment configuration
//! - [`error`] -- [`OracleError`]
//! - [`parse`] -- Lenient parsing of model output into a behavior
//! - [`prompt`] -- `minijinja` prompt templates for the LLM backends
//!
//! [`DecisionOracle`]: vivarium_core::DecisionOracle

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod prompt;

pub use backend::{OracleBackend, create_backend};
pub use client::AsyncOracle;
pub use config::{BackendType, OracleClientConfig};
pub use error::OracleError;
pub use parse::parse_decision;
pub use prompt::{PromptEngine, RenderedPrompt};
