//! Almanac text parsing
//!
//! Parses the line-oriented almanac format into the engine's entry
//! contract: a seed interval set plus an ordered list of mapping stages.
//!
//! # Almanac format
//!
//! ```text
//! seeds: <u64> <u64> ...          (pairs of start, length)
//!
//! <name> map:
//! <destStart> <srcStart> <length>
//! ...
//!
//! ... (repeated per stage)
//! ```
//!
//! - The first content line must be the `seeds:` line
//! - A `<name> map:` header opens a stage; a blank line closes it
//! - Lines starting with `#` are comments
//!
//! Reading files from disk is deliberately out of scope; callers hand in
//! any `BufRead` (or a byte slice / string in tests).

use crate::core::error::{AlmanacParseError, ParseResult};
use crate::core::interval::{Interval, IntervalSet};
use crate::core::pipeline::Almanac;
use crate::core::stage::{MappingRule, MappingStage};
use log::debug;
use std::io::BufRead;

/// An open `<name> map:` block accumulating rules.
struct StageBlock {
    name: String,
    header_line: usize,
    rules: Vec<MappingRule>,
}

impl StageBlock {
    fn build(self) -> ParseResult<MappingStage> {
        MappingStage::new(self.name, self.rules).map_err(|source| AlmanacParseError::Stage {
            line: self.header_line,
            source,
        })
    }
}

/// Parse an almanac from a reader.
///
/// This is the core parsing entry point, supporting any `BufRead` source.
/// Any malformed line aborts the parse with a line-numbered error; no
/// partial almanac is produced.
pub fn parse_almanac_reader<R: BufRead>(reader: R) -> ParseResult<Almanac> {
    let mut seeds: Option<(usize, Vec<u64>)> = None;
    let mut stages: Vec<MappingStage> = Vec::new();
    let mut current: Option<StageBlock> = None;
    let mut line_number: usize = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let trimmed = line.trim();

        // Blank lines and comments close the open map block
        if trimmed.is_empty() || trimmed.starts_with('#') {
            if let Some(block) = current.take() {
                stages.push(block.build()?);
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("seeds:") {
            seeds = Some((line_number, parse_u64_fields(rest, line_number)?));
            continue;
        }

        if seeds.is_none() {
            return Err(AlmanacParseError::MissingSeeds { line: line_number });
        }

        if trimmed.ends_with("map:") {
            if let Some(block) = current.take() {
                stages.push(block.build()?);
            }
            let name = trimmed[..trimmed.len() - "map:".len()].trim();
            current = Some(StageBlock {
                name: name.to_string(),
                header_line: line_number,
                rules: Vec::new(),
            });
            continue;
        }

        let block = current
            .as_mut()
            .ok_or(AlmanacParseError::RuleOutsideStage { line: line_number })?;
        block.rules.push(parse_rule_line(trimmed, line_number)?);
    }

    if let Some(block) = current.take() {
        stages.push(block.build()?);
    }

    let (seeds_line, seed_values) = seeds.ok_or(AlmanacParseError::MissingSeeds { line: 1 })?;
    let seed_ranges = seed_pairs_to_ranges(&seed_values, seeds_line)?;

    debug!(
        "parsed almanac: {} seed values, {} ranges, {} stages",
        seed_values.len(),
        seed_ranges.len(),
        stages.len()
    );

    Ok(Almanac::new(seed_values, seed_ranges, stages))
}

/// Parse an almanac from bytes.
pub fn parse_almanac_bytes(data: &[u8]) -> ParseResult<Almanac> {
    parse_almanac_reader(data)
}

/// Parse an almanac from a string.
pub fn parse_almanac_str(text: &str) -> ParseResult<Almanac> {
    parse_almanac_reader(text.as_bytes())
}

/// Parse a `<destStart> <srcStart> <length>` rule line.
fn parse_rule_line(line: &str, line_number: usize) -> ParseResult<MappingRule> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(AlmanacParseError::InvalidRuleLine {
            line: line_number,
            fields: fields.len(),
        });
    }

    let dest_start = parse_u64(fields[0], line_number)?;
    let source_start = parse_u64(fields[1], line_number)?;
    let length = parse_u64(fields[2], line_number)?;

    MappingRule::new(source_start, dest_start, length).map_err(|source| AlmanacParseError::Rule {
        line: line_number,
        source,
    })
}

/// Interpret the seed list as `(start, length)` pairs.
fn seed_pairs_to_ranges(values: &[u64], line_number: usize) -> ParseResult<IntervalSet> {
    if values.len() % 2 != 0 {
        return Err(AlmanacParseError::UnpairedSeeds {
            line: line_number,
            count: values.len(),
        });
    }

    let mut ranges = IntervalSet::new();
    for pair in values.chunks_exact(2) {
        let (start, length) = (pair[0], pair[1]);
        if length == 0 {
            return Err(AlmanacParseError::EmptySeedRange {
                line: line_number,
                start,
            });
        }
        let range = Interval::from_start_len(start, length).ok_or(
            AlmanacParseError::SeedRangeOverflow {
                line: line_number,
                start,
                length,
            },
        )?;
        ranges.push(range);
    }
    Ok(ranges)
}

fn parse_u64_fields(text: &str, line_number: usize) -> ParseResult<Vec<u64>> {
    text.split_whitespace()
        .map(|field| parse_u64(field, line_number))
        .collect()
}

fn parse_u64(field: &str, line_number: usize) -> ParseResult<u64> {
    field.parse::<u64>().map_err(|_| AlmanacParseError::ParseInt {
        line: line_number,
        value: field.to_string(),
    })
}
