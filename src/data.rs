//! Loading the outline and breadcrumb handed over by the outline generator.
//!
//! The generator emits the data as page globals, so files come in one of two
//! shapes:
//!
//! ```text
//! var toc = { "title": "Manual", "url": "index.html", "isFile": true, "children": [...] };
//! var breadcrumb = ["Manual", "Preface"];
//! ```
//!
//! or the bare JSON value on its own. Both are accepted.

use crate::types::{Breadcrumb, OutlineNode};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected `var {expected} = ...`, found `var {found} = ...`")]
    MissingAssignment { expected: String, found: String },
}

/// Name of the global holding the outline tree.
pub const TOC_VAR: &str = "toc";
/// Name of the global holding the breadcrumb.
pub const BREADCRUMB_VAR: &str = "breadcrumb";

pub fn parse_outline(text: &str) -> Result<OutlineNode, DataError> {
    parse_global(text, TOC_VAR)
}

pub fn parse_breadcrumb(text: &str) -> Result<Breadcrumb, DataError> {
    parse_global(text, BREADCRUMB_VAR)
}

pub fn load_outline(path: &Path) -> Result<OutlineNode, DataError> {
    parse_outline(&fs::read_to_string(path)?)
}

pub fn load_breadcrumb(path: &Path) -> Result<Breadcrumb, DataError> {
    parse_breadcrumb(&fs::read_to_string(path)?)
}

fn parse_global<T: DeserializeOwned>(text: &str, var: &str) -> Result<T, DataError> {
    let json = strip_assignment(text, var)?;
    Ok(serde_json::from_str(json)?)
}

/// Strip an optional `var <name> =` prefix and trailing `;`.
fn strip_assignment<'a>(text: &'a str, var: &str) -> Result<&'a str, DataError> {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("var ") else {
        return Ok(trimmed);
    };
    let (name, value) = rest.split_once('=').unwrap_or((rest, ""));
    let name = name.trim();
    if name != var {
        return Err(DataError::MissingAssignment {
            expected: var.to_string(),
            found: name.to_string(),
        });
    }
    Ok(value.trim().trim_end_matches(';').trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_bare_json_outline() {
        let toc = parse_outline(r#"{"title": "Root", "isFile": true, "children": []}"#).unwrap();
        assert_eq!(toc.title, "Root");
    }

    #[test]
    fn parses_script_form_outline() {
        let script = "\nvar toc = {\n\"title\": \"Manual\",\n\"url\": \"index.html\",\n\"isFile\": true,\n\"children\": [\n]\n};\n";
        let toc = parse_outline(script).unwrap();
        assert_eq!(toc.url.as_deref(), Some("index.html"));
    }

    #[test]
    fn parses_script_form_breadcrumb() {
        let crumb = parse_breadcrumb(r#"var breadcrumb = ["Manual","Preface"];"#).unwrap();
        assert_eq!(crumb, Breadcrumb::new(["Manual", "Preface"]));
    }

    #[test]
    fn rejects_wrong_variable_name() {
        let err = parse_breadcrumb(r#"var toc = ["Manual"];"#).unwrap_err();
        assert!(matches!(err, DataError::MissingAssignment { .. }));
        assert!(err.to_string().contains("breadcrumb"));
    }

    #[test]
    fn reports_malformed_json() {
        let err = parse_outline("var toc = {\"title\": };").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn loads_from_files() {
        let tmp = TempDir::new().unwrap();
        let toc_path = tmp.path().join("toc.js");
        let crumb_path = tmp.path().join("breadcrumb.json");
        std::fs::write(
            &toc_path,
            r#"var toc = {"title": "Root", "isFile": true, "children": [{"title": "A", "isFile": true}]};"#,
        )
        .unwrap();
        std::fs::write(&crumb_path, r#"["Root", "A"]"#).unwrap();

        let toc = load_outline(&toc_path).unwrap();
        let crumb = load_breadcrumb(&crumb_path).unwrap();
        assert_eq!(toc.children.len(), 1);
        assert_eq!(crumb.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_outline(&tmp.path().join("nope.js")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
