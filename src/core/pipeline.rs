//! Pipeline and almanac
//!
//! Drives an interval set through an ordered list of stages. Each stage
//! produces a brand-new interval set from the previous one; stage
//! boundaries are hard barriers, but within a stage every interval remaps
//! independently, which is what the parallel path exploits.

use crate::core::error::{EngineError, EngineResult};
use crate::core::interval::{Interval, IntervalSet};
use crate::core::remap::remap_interval;
use crate::core::stage::MappingStage;
use log::debug;
use rayon::prelude::*;

/// Smallest `start` reachable in a final interval set.
///
/// An empty set is a precondition violation: well-formed seed data always
/// survives every stage, so there is nothing sensible to return.
pub fn minimum_start(set: &IntervalSet) -> EngineResult<u64> {
    set.min_start().ok_or(EngineError::EmptyIntervalSet)
}

/// Ordered application of every stage to an interval set.
pub struct Pipeline<'a> {
    stages: &'a [MappingStage],
}

impl<'a> Pipeline<'a> {
    pub fn new(stages: &'a [MappingStage]) -> Self {
        Self { stages }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run the seed set through every stage in order.
    ///
    /// The returned set may contain overlapping members; nothing downstream
    /// requires them merged.
    pub fn run(&self, seeds: &IntervalSet) -> IntervalSet {
        let mut current = seeds.clone();
        for stage in self.stages {
            let next: IntervalSet = current
                .iter()
                .flat_map(|iv| remap_interval(*iv, stage))
                .collect();
            debug!(
                "stage '{}': {} intervals in, {} out",
                stage.name(),
                current.len(),
                next.len()
            );
            current = next;
        }
        current
    }

    /// Parallel variant of [`Pipeline::run`].
    ///
    /// Intervals within a stage remap independently on a dedicated rayon
    /// pool; fragment order within a stage is unspecified, which is fine
    /// since interval sets are unordered. Stage N+1 never starts before
    /// every interval of stage N has been remapped. `threads == 0` lets
    /// rayon pick the pool size.
    pub fn run_parallel(&self, seeds: &IntervalSet, threads: usize) -> EngineResult<IntervalSet> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        let result = pool.install(|| {
            let mut current = seeds.clone();
            for stage in self.stages {
                let next: Vec<Interval> = current
                    .as_slice()
                    .par_iter()
                    .flat_map_iter(|iv| remap_interval(*iv, stage))
                    .collect();
                debug!(
                    "stage '{}' (parallel): {} intervals in, {} out",
                    stage.name(),
                    current.len(),
                    next.len()
                );
                current = next.into();
            }
            current
        });
        Ok(result)
    }

    /// Thread a single value through every stage's pointwise lookup.
    ///
    /// Used when the pointwise answer is needed rather than the range
    /// answer, and as the independent oracle the interval algorithm is
    /// validated against.
    pub fn destination_of(&self, value: u64) -> u64 {
        self.stages
            .iter()
            .fold(value, |v, stage| stage.lookup(v))
    }

    /// Run the full pipeline and extract the minimum reachable value.
    pub fn minimum_location(&self, seeds: &IntervalSet) -> EngineResult<u64> {
        minimum_start(&self.run(seeds))
    }
}

/// Parsed almanac: the initial seed data plus the ordered stages.
///
/// Owns no behavior beyond bundling its parts for the pipeline. The raw
/// seed values are kept alongside the derived ranges because the pointwise
/// answer is taken over the raw list, not over the ranges.
#[derive(Debug)]
pub struct Almanac {
    seed_values: Vec<u64>,
    seed_ranges: IntervalSet,
    stages: Vec<MappingStage>,
}

impl Almanac {
    pub fn new(seed_values: Vec<u64>, seed_ranges: IntervalSet, stages: Vec<MappingStage>) -> Self {
        Self {
            seed_values,
            seed_ranges,
            stages,
        }
    }

    /// Raw values from the `seeds:` line.
    pub fn seed_values(&self) -> &[u64] {
        &self.seed_values
    }

    /// Seed `(start, length)` pairs as intervals.
    pub fn seed_ranges(&self) -> &IntervalSet {
        &self.seed_ranges
    }

    pub fn stages(&self) -> &[MappingStage] {
        &self.stages
    }

    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(&self.stages)
    }

    /// Minimum reachable value for the seed ranges through all stages.
    pub fn minimum_location(&self) -> EngineResult<u64> {
        self.pipeline().minimum_location(&self.seed_ranges)
    }

    /// Minimum over the raw seed values mapped pointwise through all stages.
    pub fn minimum_location_pointwise(&self) -> EngineResult<u64> {
        let pipeline = self.pipeline();
        self.seed_values
            .iter()
            .map(|&v| pipeline.destination_of(v))
            .min()
            .ok_or(EngineError::EmptyIntervalSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stage::MappingRule;

    fn two_stage_pipeline() -> Vec<MappingStage> {
        // Stage 1: [0,9] -> [100,109]; stage 2: [100,104] -> [0,4]
        vec![
            MappingStage::new("first", vec![MappingRule::new(0, 100, 10).unwrap()]).unwrap(),
            MappingStage::new("second", vec![MappingRule::new(100, 0, 5).unwrap()]).unwrap(),
        ]
    }

    #[test]
    fn test_run_chains_stages() {
        let stages = two_stage_pipeline();
        let pipeline = Pipeline::new(&stages);
        let seeds: IntervalSet = vec![Interval::new(0, 9)].into();

        let result = pipeline.run(&seeds);
        // [0,9] -> [100,109] -> split: [100,104] -> [0,4], [105,109] identity
        assert_eq!(result.sorted_pairs(), vec![(0, 4), (105, 109)]);
        assert_eq!(result.total_len(), 10);
    }

    #[test]
    fn test_run_empty_stage_list_is_identity() {
        let stages: Vec<MappingStage> = Vec::new();
        let pipeline = Pipeline::new(&stages);
        let seeds: IntervalSet = vec![Interval::new(5, 9)].into();
        assert_eq!(pipeline.run(&seeds), seeds);
    }

    #[test]
    fn test_destination_of() {
        let stages = two_stage_pipeline();
        let pipeline = Pipeline::new(&stages);
        assert_eq!(pipeline.destination_of(3), 3); // 3 -> 103 -> 3
        assert_eq!(pipeline.destination_of(7), 107); // 7 -> 107 -> identity
        assert_eq!(pipeline.destination_of(50), 50); // untouched throughout
    }

    #[test]
    fn test_minimum_start() {
        let set: IntervalSet = vec![Interval::new(46, 60), Interval::new(82, 84)].into();
        assert_eq!(minimum_start(&set).unwrap(), 46);
    }

    #[test]
    fn test_minimum_start_empty_set_fails() {
        let err = minimum_start(&IntervalSet::new()).unwrap_err();
        assert!(matches!(err, EngineError::EmptyIntervalSet));
    }

    #[test]
    fn test_run_parallel_matches_sequential() {
        let stages = two_stage_pipeline();
        let pipeline = Pipeline::new(&stages);
        let seeds: IntervalSet = vec![Interval::new(0, 9), Interval::new(102, 120)].into();

        let sequential = pipeline.run(&seeds);
        let parallel = pipeline.run_parallel(&seeds, 2).unwrap();
        assert_eq!(sequential.sorted_pairs(), parallel.sorted_pairs());
    }

    #[test]
    fn test_almanac_pointwise_minimum() {
        let stages = two_stage_pipeline();
        let almanac = Almanac::new(vec![7, 3, 50], IntervalSet::new(), stages);
        // 7 -> 107, 3 -> 3, 50 -> 50
        assert_eq!(almanac.minimum_location_pointwise().unwrap(), 3);
    }

    #[test]
    fn test_almanac_empty_seeds_fail_fast() {
        let almanac = Almanac::new(Vec::new(), IntervalSet::new(), two_stage_pipeline());
        assert!(matches!(
            almanac.minimum_location(),
            Err(EngineError::EmptyIntervalSet)
        ));
        assert!(matches!(
            almanac.minimum_location_pointwise(),
            Err(EngineError::EmptyIntervalSet)
        ));
    }
}
