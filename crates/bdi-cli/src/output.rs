use anyhow::{Context, Result};
use bdi_env::State;

use crate::config::{OutputConfig, OutputFormat};

/// Render a run's history in the configured format.
pub fn format_history(history: &[State], output: OutputConfig) -> Result<String> {
    match output.format {
        OutputFormat::Json if output.pretty => {
            serde_json::to_string_pretty(history).context("Failed to encode history as JSON")
        }
        OutputFormat::Json => serde_json::to_string(history).context("Failed to encode history as JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(history).context("Failed to encode history as YAML"),
        OutputFormat::Summary => Ok(summary(history)),
    }
}

fn summary(history: &[State]) -> String {
    let mut lines = Vec::with_capacity(history.len());
    for (tick, state) in history.iter().enumerate() {
        let fields = serde_json::Value::Object(state.fields.clone());
        lines.push(format!(
            "tick {tick:>3}: {fields} ({} message(s) in flight)",
            state.messages.len()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history() -> Vec<State> {
        vec![
            State::from_json(json!({ "door": "locked" })).unwrap(),
            State::from_json(json!({ "door": "open" })).unwrap(),
        ]
    }

    #[test]
    fn summary_has_one_line_per_snapshot() {
        let text = format_history(
            &history(),
            OutputConfig {
                format: OutputFormat::Summary,
                pretty: false,
            },
        )
        .unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], r#"tick   1: {"door":"open"} (0 message(s) in flight)"#);
    }

    #[test]
    fn compact_json_is_a_single_line() {
        let text = format_history(
            &history(),
            OutputConfig {
                format: OutputFormat::Json,
                pretty: false,
            },
        )
        .unwrap();
        assert_eq!(
            text,
            r#"[{"door":"locked","messages":{}},{"door":"open","messages":{}}]"#
        );
    }

    #[test]
    fn yaml_round_trips() {
        let text = format_history(
            &history(),
            OutputConfig {
                format: OutputFormat::Yaml,
                pretty: true,
            },
        )
        .unwrap();
        let back: Vec<State> = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, history());
    }
}
