use crate::assignments::PendingMapping;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Tool-call argument in whatever shape the model produced.
///
/// Untagged: a JSON string lands in `Text`, anything else in `Structured`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolInput {
    Text(String),
    Structured(Value),
}

/// Normalize a tool-call argument into a validated pending mapping.
///
/// The model is not guaranteed to emit well-typed arguments: it may send the
/// mapping object itself, a JSON string of it, or Python-literal-flavored text
/// (single quotes, `None`/`True`/`False`). Failures come back as descriptive
/// strings so the agent can relay them conversationally.
pub fn coerce_tool_input(input: ToolInput) -> Result<PendingMapping, String> {
    let value = match input {
        ToolInput::Structured(value) => {
            if !value.is_object() {
                return Err(format!(
                    "Error: Tool received assignment data of unexpected type ({}), expected a dictionary.",
                    value_kind(&value)
                ));
            }
            value
        }
        ToolInput::Text(text) => parse_text(&text)?,
    };

    let mapping: PendingMapping = serde_json::from_value(value).map_err(|e| {
        format!(
            "Error: The assignment data, even after parsing, does not match the expected structure: {}",
            e
        )
    })?;

    if mapping.is_empty() {
        return Err(String::from(
            "Error: The assignment data dictionary is effectively empty or invalid.",
        ));
    }

    Ok(mapping)
}

/// Ordered parser chain for textual arguments: Python-literal normalization
/// first, plain JSON second.
fn parse_text(text: &str) -> Result<Value, String> {
    let parsers: [fn(&str) -> Option<Value>; 2] = [parse_python_literal, parse_json];

    for parse in parsers {
        if let Some(value) = parse(text) {
            if value.is_object() {
                debug!("Coerced textual tool input into a dictionary");
                return Ok(value);
            }
            return Err(format!(
                "Error: Tool received assignment data as a string, and parsing it resulted in {}, not a dictionary.",
                value_kind(&value)
            ));
        }
    }

    let snippet: String = text.chars().take(100).collect();
    Err(format!(
        "Error: The assignment data was a string but could not be parsed into a dictionary. Snippet: {}",
        snippet
    ))
}

fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn parse_python_literal(text: &str) -> Option<Value> {
    serde_json::from_str(&normalize_python_literal(text)).ok()
}

/// Rewrite Python literal syntax into JSON: single-quoted strings become
/// double-quoted, `None`/`True`/`False` become their JSON spellings. Content
/// inside strings is preserved verbatim apart from quote escaping.
fn normalize_python_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let delimiter = c;
                out.push('"');
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        match chars.next() {
                            // \' has no meaning in JSON; emit the quote itself
                            Some('\'') => out.push('\''),
                            Some(escaped) => {
                                out.push('\\');
                                out.push(escaped);
                            }
                            None => break,
                        }
                    } else if inner == delimiter {
                        break;
                    } else if inner == '"' {
                        out.push_str("\\\"");
                    } else {
                        out.push(inner);
                    }
                }
                out.push('"');
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::new();
                word.push(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "None" => out.push_str("null"),
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    other => out.push_str(other),
                }
            }
            other => out.push(other),
        }
    }

    out
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a dictionary",
    }
}
