//! Prompt rendering for the LLM backends via `minijinja`.
//!
//! The templates are compiled into the binary. The system prompt casts the
//! model as a minion's survival instinct and pins the answer format; the
//! user prompt carries the minion's current stats.

use minijinja::{Environment, context};
use vivarium_types::{BehaviorState, DecisionRequest};

use crate::error::OracleError;

const SYSTEM_TEMPLATE: &str = r#"You are the survival instinct of a slime living in a vivarium.
Output valid JSON only: {"action": "ACTION_NAME"}
ACTIONS: {{ actions | join(", ") }}"#;

const USER_TEMPLATE: &str = "Stats: Hunger {{ stats.hunger | round | int }}%, \
Thirst {{ stats.thirst | round | int }}%, \
Energy {{ stats.energy | round | int }}%, \
HP {{ stats.hp | round | int }}, Age {{ stats.age | round | int }}.
{% if traits %}Traits: {{ traits | join(\", \") }}.
{% endif %}Nearby: {{ nearby | join(\", \") }}.";

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System message fixing the role and answer format.
    pub system: String,
    /// User message with the minion's stats.
    pub user: String,
}

/// Holds the compiled prompt templates.
#[derive(Debug)]
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// Compile the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Template`] if a template fails to compile.
    pub fn new() -> Result<Self, OracleError> {
        let mut env = Environment::new();
        env.add_template("system", SYSTEM_TEMPLATE)
            .map_err(|e| OracleError::Template(format!("failed to add system template: {e}")))?;
        env.add_template("user", USER_TEMPLATE)
            .map_err(|e| OracleError::Template(format!("failed to add user template: {e}")))?;
        Ok(Self { env })
    }

    /// Render both messages for one decision request.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Template`] if rendering fails.
    pub fn render(&self, request: &DecisionRequest) -> Result<RenderedPrompt, OracleError> {
        let actions: Vec<&str> = BehaviorState::ALL.into_iter().map(BehaviorState::as_str).collect();

        let system = self
            .env
            .get_template("system")
            .map_err(|e| OracleError::Template(format!("missing system template: {e}")))?
            .render(context! { actions => actions })
            .map_err(|e| OracleError::Template(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("user")
            .map_err(|e| OracleError::Template(format!("missing user template: {e}")))?
            .render(request)
            .map_err(|e| OracleError::Template(format!("user render failed: {e}")))?;

        Ok(RenderedPrompt { system, user })
    }
}
