use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarErrorKind {
    MissingLeftSide,
    LeftSideNotNonTerminal,
    MissingArrow,
    ReservedArrow,
    EmptyRightSide,
    UndefinedStartSymbol,
}

impl Display for GrammarErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarErrorKind::MissingLeftSide => write!(f, "missing left side"),
            GrammarErrorKind::LeftSideNotNonTerminal => {
                write!(f, "left side can only be a non-terminal")
            }
            GrammarErrorKind::MissingArrow => write!(f, "'->' hasn't been found"),
            GrammarErrorKind::ReservedArrow => write!(f, "'->' is a reserved word"),
            GrammarErrorKind::EmptyRightSide => write!(f, "right side is empty"),
            GrammarErrorKind::UndefinedStartSymbol => {
                write!(f, "start symbol 'S' is not defined")
            }
        }
    }
}

/// Fatal grammar-construction error. `line` is 1-based; 0 means the error
/// has no single offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    pub line: usize,
    pub kind: GrammarErrorKind,
}

impl GrammarError {
    pub(crate) fn new(line: usize, kind: GrammarErrorKind) -> Self {
        Self { line, kind }
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "Line {}: {}", self.line, self.kind)
        }
    }
}

impl Error for GrammarError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownSymbol(String),
    UnexpectedToken {
        expected: Vec<String>,
        received: String,
    },
    ExpectedEndOfInput {
        received: String,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownSymbol(symbol) => write!(f, "unknown symbol '{}'", symbol),
            ParseError::UnexpectedToken { expected, received } => {
                write!(f, "syntax error: expected ")?;
                for name in expected {
                    write!(f, "'{}' ", name)?;
                }
                write!(f, "received {}", received)
            }
            ParseError::ExpectedEndOfInput { received } => {
                write!(f, "syntax error: expected end of input, got '{}'", received)
            }
        }
    }
}

impl Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    EmptyDerivation,
    RuleOutOfRange(usize),
    RootMismatch { expected: String, found: String },
    MissingExpansion(String),
    TrailingRules { consumed: usize, total: usize },
}

impl Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::EmptyDerivation => write!(f, "empty rule sequence"),
            TreeError::RuleOutOfRange(id) => write!(f, "rule {} does not exist", id),
            TreeError::RootMismatch { expected, found } => {
                write!(
                    f,
                    "sequence starts with a rule for '{}', expected '{}'",
                    found, expected
                )
            }
            TreeError::MissingExpansion(name) => {
                write!(f, "no rule in sequence expands '{}'", name)
            }
            TreeError::TrailingRules { consumed, total } => {
                write!(f, "only {} of {} rules used", consumed, total)
            }
        }
    }
}

impl Error for TreeError {}
