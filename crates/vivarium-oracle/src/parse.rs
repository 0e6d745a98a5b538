//! Lenient parsing of oracle and LLM answers into a behavior.
//!
//! Language models wrap JSON in markdown fences, leave trailing commas, or
//! answer with a bare word. Each is recovered here. Anything that still
//! does not name one of the six behaviors becomes `WANDER`.

use tracing::warn;
use vivarium_types::{BehaviorState, DecisionResponse};

use crate::error::OracleError;

/// Parse a raw answer into a behavior, falling back to `WANDER`.
///
/// Recovery strategies, in order:
/// 1. Direct `{"action": ...}` deserialization
/// 2. JSON extracted from a markdown code block
/// 3. Trailing commas stripped, then retried (with and without code block)
/// 4. A bare behavior name, e.g. `SLEEP`
pub fn parse_decision(raw: &str) -> BehaviorState {
    match try_parse(raw) {
        Ok(state) => state,
        Err(e) => {
            warn!(
                error = %e,
                raw_response = raw,
                "failed to parse oracle answer, falling back to WANDER"
            );
            BehaviorState::Wander
        }
    }
}

/// Attempt to parse the answer through every recovery strategy.
fn try_parse(raw: &str) -> Result<BehaviorState, OracleError> {
    let trimmed = raw.trim();
    let fenced = extract_json_from_codeblock(trimmed);

    let mut candidates: Vec<String> = vec![trimmed.to_owned()];
    if let Some(inner) = fenced {
        candidates.push(inner.to_owned());
    }
    candidates.push(strip_trailing_commas(trimmed));
    if let Some(inner) = fenced {
        candidates.push(strip_trailing_commas(inner));
    }

    for candidate in &candidates {
        if let Ok(response) = serde_json::from_str::<DecisionResponse>(candidate) {
            return action_of(&response);
        }
    }

    let bare = fenced.unwrap_or(trimmed);
    BehaviorState::parse_action(bare)
        .ok_or_else(|| OracleError::Parse(format!("all parse strategies failed for: {trimmed}")))
}

/// The behavior named by a well-formed response.
fn action_of(response: &DecisionResponse) -> Result<BehaviorState, OracleError> {
    let action = response
        .action
        .as_deref()
        .ok_or_else(|| OracleError::Parse(String::from("response has no action")))?;
    BehaviorState::parse_action(action)
        .ok_or_else(|| OracleError::Parse(format!("unknown action: {action}")))
}

/// Extract the body of the first markdown code block, with or without a
/// language tag.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = text.get(start.checked_add(3)?..)?;
    let body_start = after_fence.find('\n').map_or(0, |i| i.saturating_add(1));
    let body = after_fence.get(body_start..)?;
    let end = body.find("```")?;
    body.get(..end).map(str::trim)
}

/// Remove commas that directly precede a closing brace or bracket.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // A comma plus any whitespace after it, held until the next token.
    let mut held: Option<String> = None;
    for c in text.chars() {
        if let Some(buf) = held.as_mut() {
            if c.is_whitespace() {
                buf.push(c);
                continue;
            }
            let buf = held.take().unwrap_or_default();
            if c == '}' || c == ']' {
                out.push_str(buf.trim_start_matches(','));
            } else {
                out.push_str(&buf);
            }
        }
        if c == ',' {
            held = Some(String::from(","));
        } else {
            out.push(c);
        }
    }
    if let Some(buf) = held {
        out.push_str(&buf);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_json() {
        assert_eq!(parse_decision(r#"{"action": "EAT"}"#), BehaviorState::Eat);
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "Here you go:\n```json\n{\"action\": \"DRINK\"}\n```";
        assert_eq!(parse_decision(raw), BehaviorState::Drink);
        assert_eq!(parse_decision("```\n{\"action\":\"MATE\"}\n```"), BehaviorState::Mate);
    }

    #[test]
    fn parses_trailing_commas() {
        assert_eq!(parse_decision(r#"{"action": "ATTACK",}"#), BehaviorState::Attack);
        assert_eq!(
            parse_decision("```json\n{\"action\": \"SLEEP\", }\n```"),
            BehaviorState::Sleep
        );
    }

    #[test]
    fn parses_bare_words_case_insensitively() {
        assert_eq!(parse_decision("sleep"), BehaviorState::Sleep);
    }

    #[test]
    fn unknown_or_missing_actions_fall_back() {
        assert_eq!(parse_decision(r#"{"action": "DANCE"}"#), BehaviorState::Wander);
        assert_eq!(parse_decision("{}"), BehaviorState::Wander);
        assert_eq!(parse_decision("I think the slime should rest."), BehaviorState::Wander);
        assert_eq!(parse_decision(""), BehaviorState::Wander);
    }

    #[test]
    fn strip_trailing_commas_keeps_inner_commas() {
        assert_eq!(strip_trailing_commas(r#"{"a": 1, "b": [1, 2,],}"#), r#"{"a": 1, "b": [1, 2]}"#);
    }
}
