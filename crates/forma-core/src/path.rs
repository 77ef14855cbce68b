//! # Field Path Addressing
//!
//! Dotted/bracketed addresses for fields inside nested form data. Object
//! nesting joins segments with `.`; array elements carry a zero-based index
//! in brackets, as in `contacts[0].email`.
//!
//! Path strings double as touched-set keys: error visibility is gated on
//! either the full path or its top-level segment (everything before the
//! first `.` or `[`).

use std::fmt;

/// One step through nested form data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Named property of an object value.
    Key(String),
    /// Zero-based index into an array value.
    Index(usize),
}

/// A parsed field path such as `contacts[0].email`.
///
/// The leading segment is always a property name — form data is an object
/// at the root, so a path can never start with an index or a separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    head: String,
    tail: Vec<Segment>,
}

/// Error raised when a path string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("field path is empty")]
    Empty,
    /// The path started with `.` or `[` instead of a property name.
    #[error("field path {path:?} must start with a property name")]
    LeadingSeparator { path: String },
    /// An opening bracket with no matching `]`.
    #[error("unterminated index bracket in {path:?}")]
    UnterminatedBracket { path: String },
    /// Bracket contents that are not a decimal index.
    #[error("invalid array index {index:?} in {path:?}")]
    InvalidIndex { path: String, index: String },
    /// Two separators in a row, or a trailing separator.
    #[error("empty segment in field path {path:?}")]
    EmptySegment { path: String },
    /// A property name directly after an index bracket (missing dot).
    #[error("missing separator after index in {path:?}")]
    MissingSeparator { path: String },
}

impl FieldPath {
    /// Parse a dotted/bracketed path string.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.starts_with('.') || path.starts_with('[') {
            return Err(PathError::LeadingSeparator {
                path: path.to_string(),
            });
        }

        let mut head: Option<String> = None;
        let mut tail = Vec::new();
        let mut i = 0;
        // True whenever the next characters must form a property name.
        let mut expect_key = true;

        while i < path.len() {
            match path.as_bytes()[i] {
                b'[' => {
                    if expect_key {
                        return Err(PathError::EmptySegment {
                            path: path.to_string(),
                        });
                    }
                    let close = path[i..]
                        .find(']')
                        .map(|off| i + off)
                        .ok_or_else(|| PathError::UnterminatedBracket {
                            path: path.to_string(),
                        })?;
                    let digits = &path[i + 1..close];
                    let index =
                        digits
                            .parse::<usize>()
                            .map_err(|_| PathError::InvalidIndex {
                                path: path.to_string(),
                                index: digits.to_string(),
                            })?;
                    tail.push(Segment::Index(index));
                    i = close + 1;
                }
                b'.' => {
                    if expect_key {
                        return Err(PathError::EmptySegment {
                            path: path.to_string(),
                        });
                    }
                    expect_key = true;
                    i += 1;
                }
                _ => {
                    if !expect_key {
                        // A name can only follow `]` here; keys otherwise
                        // run until the next separator.
                        return Err(PathError::MissingSeparator {
                            path: path.to_string(),
                        });
                    }
                    let end = path[i..]
                        .find(['.', '['])
                        .map(|off| i + off)
                        .unwrap_or(path.len());
                    let name = path[i..end].to_string();
                    if head.is_none() {
                        head = Some(name);
                    } else {
                        tail.push(Segment::Key(name));
                    }
                    expect_key = false;
                    i = end;
                }
            }
        }

        if expect_key {
            // Trailing dot.
            return Err(PathError::EmptySegment {
                path: path.to_string(),
            });
        }
        match head {
            Some(head) => Ok(Self { head, tail }),
            None => Err(PathError::Empty),
        }
    }

    /// Path addressing a top-level field.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            head: name.into(),
            tail: Vec::new(),
        }
    }

    /// Extend with a nested property name.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.tail.push(Segment::Key(name.into()));
        next
    }

    /// Extend with an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.tail.push(Segment::Index(index));
        next
    }

    /// The top-level property name this path descends from.
    pub fn top_level(&self) -> &str {
        &self.head
    }

    /// Segments below the top-level property, in order.
    pub fn tail(&self) -> &[Segment] {
        &self.tail
    }

    /// Whether the path addresses a top-level field directly.
    pub fn is_top_level(&self) -> bool {
        self.tail.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for segment in &self.tail {
            match segment {
                Segment::Key(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
