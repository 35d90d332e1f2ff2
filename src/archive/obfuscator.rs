use crate::archive::observation::{ArchivedRecord, Observation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Fixed shuffle seed. The permutation must be reproducible across runs so
/// that re-ingesting the same batch yields a byte-identical store.
pub const SCRAMBLE_SEED: u64 = 42;

const ID_MULTIPLIER: usize = 17;
const ID_OFFSET: usize = 42;
const ID_MODULUS: usize = 100_000;

/// Derives the opaque sequence identifier for the record at shuffled position
/// `index`. This is an obfuscation convenience, not a security boundary: the
/// transform is trivially invertible and has no collision resistance beyond
/// the modulus being larger than any realistic batch.
pub fn sequence_id(index: usize) -> String {
    format!("SC{:05}", (index * ID_MULTIPLIER + ID_OFFSET) % ID_MODULUS)
}

/// Returns a freshly seeded PRNG for the archival shuffle.
pub fn scramble_rng() -> StdRng {
    StdRng::seed_from_u64(SCRAMBLE_SEED)
}

/// Shuffles the full batch with the provided PRNG and assigns each record its
/// position-derived identifier. The PRNG is passed in rather than constructed
/// here so tests can verify determinism against an explicit seed.
pub fn scramble(mut observations: Vec<Observation>, rng: &mut StdRng) -> Vec<ArchivedRecord> {
    observations.shuffle(rng);
    observations
        .into_iter()
        .enumerate()
        .map(|(index, observation)| ArchivedRecord {
            id: sequence_id(index),
            observation,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: u32) -> Vec<Observation> {
        (1..=n)
            .map(|day| Observation {
                year: "2010".to_string(),
                month: "1".to_string(),
                day: day.to_string(),
                flagged: "F".to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn sequence_id_is_fixed_width_and_positional() {
        assert_eq!(sequence_id(0), "SC00042");
        assert_eq!(sequence_id(1), "SC00059");
        assert_eq!(sequence_id(100), "SC01742");
    }

    #[test]
    fn sequence_id_wraps_at_modulus() {
        // (5880 * 17 + 42) % 100000 == 2
        assert_eq!(sequence_id(5880), "SC00002");
    }

    #[test]
    fn same_seed_produces_identical_order_and_ids() {
        let first = scramble(batch(200), &mut scramble_rng());
        let second = scramble(batch(200), &mut scramble_rng());
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_actually_reorders() {
        let records = scramble(batch(200), &mut scramble_rng());
        let days: Vec<u32> = records.iter().map(|r| r.observation.day_number()).collect();
        let mut sorted = days.clone();
        sorted.sort_unstable();
        assert_ne!(days, sorted);
    }

    #[test]
    fn scramble_preserves_every_record() {
        let records = scramble(batch(31), &mut scramble_rng());
        assert_eq!(records.len(), 31);
        let mut days: Vec<u32> = records.iter().map(|r| r.observation.day_number()).collect();
        days.sort_unstable();
        assert_eq!(days, (1..=31).collect::<Vec<u32>>());
    }
}
