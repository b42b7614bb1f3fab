// SPDX-FileCopyrightText: 2026 Vaultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with "did you mean" suggestions.
//!
//! Unknown keys and unknown enum values (e.g. `failure_policy = "retyr"`)
//! get a Jaro-Winkler suggestion and, when the offending file can be found,
//! a labelled source span.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches `timout_secs` -> `timeout_secs` and `retyr` -> `retry`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(vaultgate::config::unknown_key),
        help("{}", format_choice_help(suggestion.as_deref(), "valid keys", valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction, if any key is close enough.
        suggestion: Option<String>,
        /// Comma-separated valid keys for the section.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source file content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// An enum-valued key holds a value outside its allowed set.
    #[error("unknown value `{value}` for `{key}`")]
    #[diagnostic(
        code(vaultgate::config::unknown_value),
        help("{}", format_choice_help(suggestion.as_deref(), "allowed values", allowed))
    )]
    UnknownValue {
        /// Dotted key path.
        key: String,
        /// The rejected value.
        value: String,
        /// Suggested correction, if any.
        suggestion: Option<String>,
        /// Comma-separated allowed values.
        allowed: String,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(vaultgate::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted key path.
        key: String,
        /// Description of the type mismatch.
        detail: String,
        /// What type was expected.
        expected: String,
    },

    /// A semantic validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(vaultgate::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(vaultgate::config::other))]
    Other(String),
}

fn format_choice_help(suggestion: Option<&str>, label: &str, choices: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {label}: {choices}"),
        None => format!("{label}: {choices}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may carry several underlying errors; each becomes one
/// diagnostic.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let key = dotted_path(&error);
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (span, src) = find_source_span(&error, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::UnknownVariant(value, expected) => ConfigError::UnknownValue {
                    key,
                    value: value.clone(),
                    suggestion: suggest_key(value, expected),
                    allowed: expected.join(", "),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(format!("{error}")),
            }
        })
        .collect()
}

fn dotted_path(error: &figment::error::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Point at the offending key inside the file figment read it from.
///
/// Files are matched by path; the span stays empty for keys that came from
/// the environment or a file that was not captured.
fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(figment::Source::file_path);
    let Some((name, content)) =
        origin.and_then(|file| toml_sources.iter().find(|(p, _)| same_file(file, Path::new(p))))
    else {
        return (None, None);
    };

    let table = dotted_path(error);
    match find_key_offset(content, &table, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    a == b
        || matches!(
            (a.canonicalize(), b.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        )
}

/// Byte offset of `field` inside the table `table` (dotted, empty for the
/// root table). Tracks `[header]` lines, so a key of the same name in another
/// table is never matched.
pub fn find_key_offset(content: &str, table: &str, field: &str) -> Option<usize> {
    let mut current = String::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let body = line.trim_start();
        if let Some(header) = body.strip_prefix('[') {
            current = header
                .split(']')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            continue;
        }
        if current != table {
            continue;
        }
        let is_key = body
            .strip_prefix(field)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            return Some(start + (line.len() - body.len()));
        }
    }
    None
}

/// Suggest the closest candidate above the similarity threshold.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|&candidate| (strsim::jaro_winkler(unknown, candidate), candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_timeout_secs() {
        let valid = &["reset", "timeout_secs", "failure_policy", "max_attempts"];
        assert_eq!(
            suggest_key("timout_secs", valid),
            Some("timeout_secs".to_string())
        );
    }

    #[test]
    fn suggests_policy_value() {
        let allowed = &["abort", "retry"];
        assert_eq!(suggest_key("retyr", allowed), Some("retry".to_string()));
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["name", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[app]\nname = \"x\"\n\n[bootstrap]\ntimout_secs = 5\n";
        let o = find_key_offset(content, "bootstrap", "timout_secs").expect("offset");
        assert_eq!(&content[o..o + 11], "timout_secs");
    }

    #[test]
    fn find_key_offset_ignores_prefix_matches() {
        let content = "[device]\ndata_dir_extra = 1\ndata_dir = \"/tmp\"\n";
        let o = find_key_offset(content, "device", "data_dir").expect("offset");
        assert!(content[o..].starts_with("data_dir ="));
    }

    #[test]
    fn find_key_offset_stays_in_its_table() {
        let content = "[assets]\nroot = \"a\"\n[device]\nroot = \"b\"\n";
        let o = find_key_offset(content, "device", "root").expect("offset");
        assert!(content[o..].starts_with("root = \"b\""));
        assert_eq!(find_key_offset(content, "app", "root"), None);
    }

    #[test]
    fn unknown_key_in_file_carries_a_span() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vaultgate.toml");
        let content = "[app]\nname = \"x\"\n\n[bootstrap]\ntimout_secs = 5\n";
        std::fs::write(&path, content).expect("write");

        let err = crate::loader::load_config_from_path(&path).expect_err("unknown key");
        let sources = vec![(path.display().to_string(), content.to_string())];
        let errors = figment_to_config_errors(err, &sources);

        let span = errors
            .iter()
            .find_map(|e| match e {
                ConfigError::UnknownKey { span, src, .. } if src.is_some() => *span,
                _ => None,
            })
            .expect("span");
        assert_eq!(&content[span.offset()..span.offset() + span.len()], "timout_secs");
    }

    #[test]
    fn unknown_variant_becomes_unknown_value() {
        let err = crate::loader::load_config_from_str("[bootstrap]\nfailure_policy = \"retyr\"\n")
            .expect_err("bad variant");
        let errors = figment_to_config_errors(err, &[]);
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownValue { value, suggestion: Some(s), .. }
                if value == "retyr" && s == "retry"
        )));
    }
}
