//! IntervalRemap - interval remapping through piecewise-offset pipelines
//!
//! Given a set of integer ranges and a sequence of piecewise-offset mapping
//! tables, computes the set of ranges reachable after passing the input
//! through every table in order, without ever enumerating individual
//! values. Input ranges can span billions of values; each range is
//! decomposed against each rule into a translated overlap and an unchanged
//! remainder, so the work is bounded by rule counts rather than range
//! magnitudes.
//!
//! # Features
//!
//! - Pure interval arithmetic, no per-value materialization
//! - Optional parallel remapping across intervals with rayon
//! - Line-oriented almanac parsing from any `BufRead`
//! - A pointwise lookup path for single-value queries
//!
//! # Example
//!
//! ```
//! use interval_remap::parse_almanac_str;
//!
//! let almanac = parse_almanac_str(
//!     "seeds: 10 5\n\nstep map:\n100 10 3\n",
//! )?;
//!
//! // Ranges through every stage, then the minimum reachable value
//! assert_eq!(almanac.minimum_location()?, 13);
//!
//! // Pointwise lookup of a single value
//! assert_eq!(almanac.pipeline().destination_of(11), 101);
//! # Ok::<(), interval_remap::IntervalRemapError>(())
//! ```

pub mod core;

// Re-export commonly used types
pub use core::{
    minimum_start, parse_almanac_bytes, parse_almanac_reader, parse_almanac_str, remap_interval,
    Almanac, AlmanacParseError, EngineError, Interval, IntervalRemapError, IntervalSet,
    MappingRule, MappingStage, Pipeline,
};
