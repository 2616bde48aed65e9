//! Error types for xshape

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidToken,
    Expected { expected: String, found: String },
    UnterminatedMarkup,
    MismatchedTag { open: String, close: String },
    DuplicateAttribute { name: String },
    InvalidEntity,
    InvalidUtf8,
    TruncatedRecord { expected: usize, found: usize },
    MissingElement { name: String },
    MissingAttribute { name: String },
    UnboundPrefix { prefix: String },
    InvalidNumber { value: String },
    EmptyDocument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => write!(f, "invalid token"),
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::UnterminatedMarkup => write!(f, "unterminated markup"),
            Self::MismatchedTag { open, close } => {
                write!(f, "mismatched closing tag: opened {open}, closed {close}")
            }
            Self::DuplicateAttribute { name } => {
                write!(f, "duplicate attribute: {name}")
            }
            Self::InvalidEntity => write!(f, "invalid entity reference"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::TruncatedRecord { expected, found } => {
                write!(f, "truncated record: expected {expected} fields, found {found}")
            }
            Self::MissingElement { name } => write!(f, "missing element: {name}"),
            Self::MissingAttribute { name } => {
                write!(f, "missing attribute: {name}")
            }
            Self::UnboundPrefix { prefix } => {
                write!(f, "no namespace bound to prefix: {prefix}")
            }
            Self::InvalidNumber { value } => {
                write!(f, "invalid number: {value}")
            }
            Self::EmptyDocument => write!(f, "document has no elements to aggregate"),
        }
    }
}

/// Main error type for xshape
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, offset: usize, line: u32, col: u32) -> Self {
        let pos = Pos::new(offset, line, col);
        Self::new(kind, Span::new(pos, pos))
    }

    /// Create error with no useful position, e.g. for lookups on a built tree
    pub fn unspanned(kind: ErrorKind) -> Self {
        Self::new(kind, Span::empty())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.span.start, self.message)
    }
}

/// Result type alias for xshape
pub type Result<T> = std::result::Result<T, Error>;
