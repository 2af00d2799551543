use percent_encoding::percent_decode_str;
use std::fmt;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern must start with '/': {0}")]
    MissingRoot(String),
    #[error("Invalid capture in segment {segment:?} of {pattern}")]
    InvalidCapture { pattern: String, segment: String },
    #[error("Capture {name} is used more than once in {pattern}")]
    DuplicateCapture { pattern: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
}

/// Named values captured from the path, in the order of the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Structured path pattern like `/talks/{title}/comments`.
///
/// A capture covers exactly one non-empty segment, its value is percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let path = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingRoot(pattern.to_owned()))?;

        let mut segments = Vec::new();
        for segment in path.split('/') {
            let invalid = || PatternError::InvalidCapture {
                pattern: pattern.to_owned(),
                segment: segment.to_owned(),
            };

            if let Some(name) = segment.strip_prefix('{') {
                let name = name.strip_suffix('}').ok_or_else(invalid)?;
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(invalid());
                }
                if segments.iter().any(|s| matches!(s, Segment::Capture(n) if n == name)) {
                    return Err(PatternError::DuplicateCapture {
                        pattern: pattern.to_owned(),
                        name: name.to_owned(),
                    });
                }
                segments.push(Segment::Capture(name.to_owned()));
            } else if segment.contains(['{', '}']) {
                return Err(invalid());
            } else {
                segments.push(Segment::Literal(segment.to_owned()));
            }
        }

        Ok(Self {
            source: pattern.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match the whole path (without query) and return the decoded captures.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let path = path.strip_prefix('/')?;

        let mut params = Vec::new();
        let mut parts = path.split('/');
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Capture(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.push((name.clone(), value.into_owned()));
                }
            }
        }

        if parts.next().is_some() {
            None
        } else {
            Some(RouteParams(params))
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
#[path = "./path_pattern_test.rs"]
mod path_pattern_test;
