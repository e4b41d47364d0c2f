use serde_json::Value;
use std::io::{self, Read};

/// Read a loan description piped on stdin, as JSON or YAML.
///
/// Returns `None` when stdin is a terminal or the pipe is empty, so the
/// caller can fall back to flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_from(io::stdin().lock())
}

fn read_from<R: Read>(mut reader: R) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// JSON first; anything that is not JSON is retried as YAML, and the JSON
/// error is reported if both fail.
fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => {
            log::debug!("read {} bytes of JSON from stdin", trimmed.len());
            Ok(Some(value))
        }
        Err(json_err) => match serde_yaml::from_str::<Value>(trimmed) {
            Ok(value @ Value::Object(_)) => {
                log::debug!("read {} bytes of YAML from stdin", trimmed.len());
                Ok(Some(value))
            }
            _ => Err(format!("Failed to parse stdin: {}", json_err).into()),
        },
    }
}
