//! Error types for the interval remapping engine
//!
//! Two families: malformed almanac text (detected entirely at parse time)
//! and precondition violations inside the engine. The computation itself is
//! deterministic and total, so there is no transient-failure or retry
//! surface; every error aborts the run.

use thiserror::Error;

/// Umbrella error for library operations.
#[derive(Debug, Error)]
pub enum IntervalRemapError {
    /// Almanac text parsing errors
    #[error("Almanac parse error: {0}")]
    Parse(#[from] AlmanacParseError),

    /// Engine precondition violations
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Errors detected while parsing almanac text.
///
/// All of these are fatal: no partial almanac is ever produced.
#[derive(Debug, Error)]
pub enum AlmanacParseError {
    /// Input does not begin with a `seeds:` line
    #[error("Expected 'seeds:' header at line {line}")]
    MissingSeeds { line: usize },

    /// Seed values do not form (start, length) pairs
    #[error("Seed list at line {line} has {count} values, expected an even count of (start, length) pairs")]
    UnpairedSeeds { line: usize, count: usize },

    /// A seed pair with zero length covers no values
    #[error("Zero-length seed range starting at {start} on line {line}")]
    EmptySeedRange { line: usize, start: u64 },

    /// A seed pair whose end does not fit in u64
    #[error("Seed range at line {line} overflows u64: start {start}, length {length}")]
    SeedRangeOverflow { line: usize, start: u64, length: u64 },

    /// Wrong field count on a mapping rule line
    #[error("Invalid rule at line {line}: expected 3 fields, got {fields}")]
    InvalidRuleLine { line: usize, fields: usize },

    /// A rule line encountered before any `<name> map:` header
    #[error("Rule at line {line} appears outside any map block")]
    RuleOutsideStage { line: usize },

    /// Unparsable numeric field
    #[error("Failed to parse integer '{value}' at line {line}")]
    ParseInt { line: usize, value: String },

    /// Rule rejected by the engine (empty or overflowing range)
    #[error("Invalid rule at line {line}: {source}")]
    Rule {
        line: usize,
        #[source]
        source: EngineError,
    },

    /// Stage rejected by the engine (overlapping source ranges)
    #[error("Invalid map block starting at line {line}: {source}")]
    Stage {
        line: usize,
        #[source]
        source: EngineError,
    },

    /// I/O error from the underlying reader
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Precondition violations inside the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Minimum extraction over an empty interval set
    #[error("Empty interval set: no minimum exists")]
    EmptyIntervalSet,

    /// Rule with a zero length or a range end past u64::MAX
    #[error("Invalid mapping rule: source {source_start}, dest {dest_start}, length {length}")]
    InvalidRule {
        source_start: u64,
        dest_start: u64,
        length: u64,
    },

    /// Two rules in one stage cover intersecting source ranges
    #[error("Stage '{stage}' has overlapping rule source ranges starting at {first} and {second}")]
    OverlappingRules {
        stage: String,
        first: u64,
        second: u64,
    },

    /// Worker pool construction failed
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, IntervalRemapError>;

/// Result type alias for parsing operations.
pub type ParseResult<T> = std::result::Result<T, AlmanacParseError>;

/// Result type alias for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
