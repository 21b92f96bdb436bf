// Record Parser - Lenient INI reader for ACME client renewal records
//
// Renewal records are classic `key = value` / `[section]` INI files, except that
// nested sections are written with doubled brackets (`[[webroot_map]]`). Those
// headers are flattened to ordinary sections before parsing.

use crate::error::AuditError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A syntax error at a 1-based line of a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Section {
    options: Vec<(String, String)>,
}

impl Section {
    fn set(&mut self, key: &str, value: &str) {
        match self.options.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.options.push((key.to_string(), value.to_string())),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parsed renewal record
///
/// Lines before the first section header live in the global section, which is
/// addressed with `None` in [`RecordParser::get`] and [`RecordParser::options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordParser {
    global: Section,
    sections: Vec<(String, Section)>,
}

/// Rewrite every `[[name]]` header line into `[name]`
///
/// Only header lines are touched; values containing brackets are left alone.
pub fn normalize_brackets(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with("[[") && trimmed.ends_with("]]") && trimmed.len() >= 4 {
                let name = trimmed.trim_start_matches('[').trim_end_matches(']');
                format!("[{}]", name)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl RecordParser {
    /// Read and parse a renewal record file
    ///
    /// # Errors
    /// `AuditError::RecordRead` if the file cannot be read as UTF-8 text,
    /// `AuditError::RecordParse` if its content is not valid INI.
    pub fn from_path(path: &Path) -> Result<Self, AuditError> {
        let content = fs::read_to_string(path).map_err(|source| AuditError::RecordRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|e| AuditError::parse_at(path, e.line, e.message))
    }

    /// Parse record content after normalizing doubled-bracket headers
    pub fn parse(content: &str) -> Result<Self, SyntaxError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let normalized = normalize_brackets(content);

        let mut parser = RecordParser::default();
        let mut current: Option<usize> = None;

        for (idx, raw) in normalized.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or_else(|| SyntaxError::new(line_no, "unterminated section header"))?
                    .trim();

                if name.is_empty() {
                    return Err(SyntaxError::new(line_no, "empty section name"));
                }
                if parser.section_index(name).is_some() {
                    return Err(SyntaxError::new(
                        line_no,
                        format!("duplicate section [{}]", name),
                    ));
                }

                parser.sections.push((name.to_string(), Section::default()));
                current = Some(parser.sections.len() - 1);
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                SyntaxError::new(line_no, "expected `key = value` or a `[section]` header")
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(SyntaxError::new(line_no, "option without a name"));
            }

            let section = match current {
                Some(i) => &mut parser.sections[i].1,
                None => &mut parser.global,
            };
            section.set(key, value.trim());
        }

        Ok(parser)
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|(n, _)| n == name)
    }

    fn section(&self, name: Option<&str>) -> Option<&Section> {
        match name {
            None => Some(&self.global),
            Some(name) => self.section_index(name).map(|i| &self.sections[i].1),
        }
    }

    /// Look up `key` in `section` (`None` for the global section)
    pub fn get(&self, section: Option<&str>, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Option names of `section` in file order; empty if the section is absent
    pub fn options(&self, section: Option<&str>) -> Vec<&str> {
        self.section(section)
            .map(|s| s.options.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default()
    }

    /// Named sections in file order
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|(n, _)| n.as_str()).collect()
    }
}
