//! Core interval remapping functionality
//!
//! This module contains the interval arithmetic, the mapping stages,
//! the remapping algorithm and the pipeline driving them.

mod error;
mod interval;
mod parse;
mod pipeline;
mod remap;
mod stage;

pub use error::{
    AlmanacParseError, EngineError, EngineResult, IntervalRemapError, ParseResult, Result,
};
pub use interval::{Interval, IntervalSet};
pub use parse::{parse_almanac_bytes, parse_almanac_reader, parse_almanac_str};
pub use pipeline::{minimum_start, Almanac, Pipeline};
pub use remap::remap_interval;
pub use stage::{MappingRule, MappingStage};
