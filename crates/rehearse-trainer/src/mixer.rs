//! Annotation mixing for pseudo-rehearsal.
//!
//! Blends legacy-corpus examples into a newly collected annotation set so
//! an updated model keeps seeing the distribution it was originally
//! trained on. Optionally reserves disjoint evaluation slices from both
//! pools.

use tracing::warn;

use rehearse_core::TrainingExample;

use crate::shuffle;

/// Mixing parameters, passed in explicitly.
#[derive(Debug, Clone)]
pub struct MixOptions {
    /// Legacy examples to add per newly collected example.
    pub multiplier: usize,
    /// Reserve evaluation holdouts from both pools.
    pub split: bool,
    /// RNG seed for the shuffles.
    pub seed: u64,
}

/// Result of a mixing run.
#[derive(Debug, Clone)]
pub struct MixOutput {
    /// The augmented training collection: legacy slice + (remaining) new
    /// examples, shuffled.
    pub training: Vec<TrainingExample>,
    /// Legacy-pool evaluation holdout (empty unless splitting).
    pub legacy_eval: Vec<TrainingExample>,
    /// Newly-collected evaluation holdout (empty unless splitting).
    pub collected_eval: Vec<TrainingExample>,
}

/// Mix legacy examples into the collected set.
///
/// Both pools are shuffled independently, the first
/// `multiplier * |collected|` legacy examples become the augmentation
/// slice, and with `split` enabled the first 20% of the collected set is
/// held out for evaluation together with a disjoint legacy slice of five
/// times that size. Legacy records with no spans are dropped up front.
pub fn mix(
    collected: Vec<TrainingExample>,
    legacy: Vec<TrainingExample>,
    options: &MixOptions,
) -> MixOutput {
    let mut rng = oorandom::Rand64::new(options.seed as u128);

    let unlabeled = legacy.iter().filter(|e| e.spans.is_empty()).count();
    if unlabeled > 0 {
        warn!(count = unlabeled, "dropping legacy records with no spans");
    }
    let mut legacy: Vec<TrainingExample> =
        legacy.into_iter().filter(|e| !e.spans.is_empty()).collect();
    let mut collected = collected;

    shuffle(&mut legacy, &mut rng);
    shuffle(&mut collected, &mut rng);

    let requested = options.multiplier * collected.len();
    let take = requested.min(legacy.len());
    if take < requested {
        warn!(
            requested,
            available = legacy.len(),
            "legacy pool smaller than requested augmentation slice"
        );
    }

    let legacy_rest = legacy.split_off(take);
    let augment = legacy;

    let (collected_eval, collected_train) = if options.split {
        let cutpoint = (collected.len() as f64 * 0.2).round() as usize;
        let rest = collected.split_off(cutpoint);
        (collected, rest)
    } else {
        (Vec::new(), collected)
    };

    let legacy_eval = if options.split {
        let want = (5 * collected_eval.len()).min(legacy_rest.len());
        legacy_rest[..want].to_vec()
    } else {
        Vec::new()
    };

    let mut training = augment;
    training.extend(collected_train);
    shuffle(&mut training, &mut rng);

    MixOutput {
        training,
        legacy_eval,
        collected_eval,
    }
}
