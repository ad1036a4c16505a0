//! Hype random walk: seed list and the per-tick update rule.

use std::collections::HashSet;

use tracing::{instrument, warn};

use super::entropy::EntropySource;
use super::types::MarketEntity;
use crate::error::MarketError;
use crate::metrics;

/// Offset subtracted from each sample. Below the `0.5` mean of a uniform
/// draw, so the walk drifts upward in proportion to growth.
pub const DRIFT_OFFSET: f64 = 0.3;

/// Scale applied to the offset sample before weighting by growth.
pub const STEP_SCALE: f64 = 5.0;

const SEED_ENTITIES: [(&str, f64, f64); 5] = [
    ("NVIDIA", 95.0, 0.9),
    ("OpenAI", 98.0, 0.95),
    ("Oracle", 40.0, 0.2),
    ("IBM", 30.0, 0.1),
    ("HotNewStartup.ai", 60.0, 0.8),
];

/// The fixed opening market.
pub fn initialize() -> Vec<MarketEntity> {
    SEED_ENTITIES
        .iter()
        .map(|&(name, hype, growth)| MarketEntity::from_trusted(name, hype, growth))
        .collect()
}

/// Reject entity sets with repeated names.
pub fn validate_entities(entities: &[MarketEntity]) -> Result<(), MarketError> {
    let mut seen = HashSet::with_capacity(entities.len());
    for entity in entities {
        if !seen.insert(entity.name()) {
            return Err(MarketError::DuplicateName {
                name: entity.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Hype change for one sample: `(r - 0.3) * 5 * growth`.
pub fn hype_delta(r: f64, growth: f64) -> f64 {
    (r - DRIFT_OFFSET) * STEP_SCALE * growth
}

/// Advance a single entity by one sample.
///
/// A non-finite sample or sum keeps the previous hype.
pub fn step<S: EntropySource + ?Sized>(entity: &MarketEntity, source: &mut S) -> MarketEntity {
    let r = source.sample();
    let next = entity.hype() + hype_delta(r, entity.growth());

    if !next.is_finite() {
        warn!(entity = entity.name(), sample = r, "Discarding degenerate sample");
        metrics::inc_degenerate_samples();
        return entity.clone();
    }

    entity.with_hype(next)
}

/// Advance every entity once. Order, names and growth are preserved.
#[instrument(skip_all, fields(entities = entities.len()))]
pub fn tick<S: EntropySource + ?Sized>(entities: &[MarketEntity], source: &mut S) -> Vec<MarketEntity> {
    entities.iter().map(|entity| step(entity, &mut *source)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::mock::{ConstantEntropy, SequenceEntropy};
    use crate::market::types::{cost_for_hype, HYPE_CEILING, HYPE_FLOOR};
    use crate::market::RngEntropy;
    use pretty_assertions::assert_eq;

    fn entity(hype: f64, growth: f64) -> MarketEntity {
        MarketEntity::new("Test", hype, growth).unwrap()
    }

    #[test]
    fn initialize_returns_five_seeds() {
        let seeds = initialize();
        let names: Vec<&str> = seeds.iter().map(|e| e.name()).collect();

        assert_eq!(names, vec!["NVIDIA", "OpenAI", "Oracle", "IBM", "HotNewStartup.ai"]);
        assert_eq!(seeds[0].hype(), 95.0);
        assert_eq!(seeds[3].growth(), 0.1);
        assert!(validate_entities(&seeds).is_ok());
    }

    #[test]
    fn seed_table_passes_validation() {
        let seeds = initialize();
        assert_eq!(seeds.len(), SEED_ENTITIES.len());

        for (&(name, hype, growth), seed) in SEED_ENTITIES.iter().zip(&seeds) {
            assert_eq!(MarketEntity::new(name, hype, growth), Ok(seed.clone()));
        }
    }

    #[test]
    fn seed_costs_are_derived() {
        for seed in initialize() {
            assert_eq!(seed.cost(), cost_for_hype(seed.hype()));
        }
        assert_eq!(initialize()[2].cost(), 35);
    }

    #[test]
    fn hype_stays_in_range_for_any_sample() {
        let samples = [0.0, 0.3, 0.5, 0.999, 1.0, -50.0, 50.0, 1e300];
        for &hype in &[10.0, 11.0, 55.0, 99.0, 100.0] {
            for &r in &samples {
                let next = step(&entity(hype, 1.0), &mut ConstantEntropy(r));
                assert!(
                    (HYPE_FLOOR..=HYPE_CEILING).contains(&next.hype()),
                    "hype {} escaped range with r={}",
                    next.hype(),
                    r
                );
                assert_eq!(next.cost(), cost_for_hype(next.hype()));
            }
        }
    }

    #[test]
    fn zero_growth_is_frozen() {
        let start = entity(42.5, 0.0);
        let mut source = SequenceEntropy::new([0.0, 0.25, 0.75, 0.999]);

        let mut current = vec![start.clone()];
        for _ in 0..8 {
            current = tick(&current, &mut source);
        }

        assert_eq!(current[0].hype(), start.hype());
        assert_eq!(current[0].cost(), start.cost());
    }

    #[test]
    fn maximal_sample_from_95() {
        let next = step(&entity(95.0, 1.0), &mut ConstantEntropy(1.0));

        assert!((next.hype() - 98.5).abs() < 1e-9);
        assert_eq!(next.cost(), (10.0 + 98.5_f64.powf(1.5) / 10.0).floor() as u32);
    }

    #[test]
    fn ceiling_holds_under_repeated_pressure() {
        let mut current = vec![entity(100.0, 1.0)];
        let mut source = ConstantEntropy(1.0);
        for _ in 0..100 {
            current = tick(&current, &mut source);
            assert_eq!(current[0].hype(), HYPE_CEILING);
        }
    }

    #[test]
    fn floor_holds_with_zero_sample() {
        for &growth in &[0.1, 0.5, 1.0] {
            assert!(hype_delta(0.0, growth) < 0.0);
            assert!((hype_delta(0.0, growth) + 1.5 * growth).abs() < 1e-12);

            let next = step(&entity(10.0, growth), &mut ConstantEntropy(0.0));
            assert_eq!(next.hype(), HYPE_FLOOR);
        }
    }

    #[test]
    fn non_finite_sample_keeps_previous_hype() {
        let start = entity(50.0, 0.5);
        for r in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let next = step(&start, &mut ConstantEntropy(r));
            assert_eq!(next, start);
        }
    }

    #[test]
    fn names_and_cardinality_survive_ticks() {
        let seeds = initialize();
        let mut current = seeds.clone();
        let mut source = RngEntropy::seeded(2024);

        for _ in 0..500 {
            current = tick(&current, &mut source);
        }

        assert_eq!(current.len(), seeds.len());
        for (before, after) in seeds.iter().zip(&current) {
            assert_eq!(before.name(), after.name());
            assert_eq!(before.growth(), after.growth());
            assert!((HYPE_FLOOR..=HYPE_CEILING).contains(&after.hype()));
        }
    }

    #[test]
    fn each_entity_draws_its_own_sample() {
        let entities = vec![entity(50.0, 1.0), entity(50.0, 1.0)];
        let next = tick(&entities, &mut SequenceEntropy::new([0.3, 1.0]));

        assert_eq!(next[0].hype(), 50.0);
        assert!((next[1].hype() - 53.5).abs() < 1e-9);
    }

    #[test]
    fn duplicate_names_rejected() {
        let entities = vec![entity(20.0, 0.1), entity(30.0, 0.2)];
        assert_eq!(
            validate_entities(&entities),
            Err(MarketError::DuplicateName {
                name: "Test".to_string()
            })
        );
    }
}
