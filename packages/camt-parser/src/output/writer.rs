//! Text rendering of the generic tree.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::Result;

/// Output text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON (four spaces).
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Render a tree as JSON with four-space indentation.
pub fn render_json(tree: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tree.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render a tree in the requested format.
///
/// The result always ends with a newline.
///
/// # Examples
/// ```
/// use camt_parser::output::{render, OutputFormat};
/// use serde_json::json;
///
/// let tree = json!({"amount": {"value": 12.34, "currency": "EUR"}});
/// let text = render(&tree, OutputFormat::Json).unwrap();
/// assert!(text.contains("\n    \"amount\": {\n        \"value\": 12.34,"));
/// ```
pub fn render(tree: &Value, format: OutputFormat) -> Result<String> {
    let mut text = match format {
        OutputFormat::Json => render_json(tree)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(tree)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Write a rendered tree to `output`, or to stdout when no path is given.
///
/// The parent directory of `output` must exist.
pub fn write_output(tree: &Value, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let text = render(tree, format)?;

    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_render_json_indent() {
        let tree = json!({"reports": [], "groupHeader": {"messageIdentification": "MSG1"}});
        let text = render(&tree, OutputFormat::Json).unwrap();
        assert_eq!(
            text,
            "{\n    \"reports\": [],\n    \"groupHeader\": {\n        \"messageIdentification\": \"MSG1\"\n    }\n}\n"
        );
    }

    #[test]
    fn test_render_yaml() {
        let tree = json!({"iban": "DE00", "currency": null, "balances": []});
        let text = render(&tree, OutputFormat::Yaml).unwrap();
        assert!(text.contains("iban: DE00"));
        assert!(text.contains("currency: null"));
        assert!(text.contains("balances: []"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let tree = json!({"value": 12.34});

        write_output(&tree, OutputFormat::Json, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n    \"value\": 12.34\n}\n");
    }

    #[test]
    fn test_write_output_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let result = write_output(&json!({}), OutputFormat::Json, Some(&path));
        assert!(result.is_err());
    }
}
