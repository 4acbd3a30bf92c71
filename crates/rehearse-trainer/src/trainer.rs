//! Training loop for the NER tagger.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use rehearse_core::Label;

use crate::data::SequenceExample;
use crate::model::TaggerModel;
use crate::shuffle;

/// Training configuration, passed in explicitly. The trainer holds no
/// process-global state.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f32,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 30,
            learning_rate: 0.1,
            seed: 0,
        }
    }
}

/// Per-epoch training metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochReport {
    pub epoch: usize,
    pub token_errors: usize,
    pub accuracy: f32,
}

/// Model metadata written next to the weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    pub version: String,
    pub labels: Vec<String>,
    pub epochs_trained: usize,
}

pub struct Trainer {
    model: TaggerModel,
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self {
            model: TaggerModel::new(),
            config,
        }
    }

    /// Continue training an existing model.
    pub fn with_model(model: TaggerModel, config: TrainConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &TaggerModel {
        &self.model
    }

    /// Run the epoch loop over the examples, shuffling each epoch.
    pub fn train(&mut self, examples: &[SequenceExample]) -> Vec<EpochReport> {
        let mut rng = oorandom::Rand64::new(self.config.seed as u128);
        let mut order: Vec<usize> = (0..examples.len()).collect();
        let mut reports = Vec::with_capacity(self.config.epochs);

        for epoch in 0..self.config.epochs {
            shuffle(&mut order, &mut rng);

            let mut token_errors = 0usize;
            let mut tokens_total = 0usize;

            for &idx in &order {
                let example = &examples[idx];
                if example.tokens.is_empty() {
                    continue;
                }
                token_errors +=
                    self.model
                        .train_step(&example.tokens, &example.tags, self.config.learning_rate);
                tokens_total += example.tokens.len();
            }

            let accuracy = if tokens_total > 0 {
                1.0 - token_errors as f32 / tokens_total as f32
            } else {
                0.0
            };
            info!(
                epoch = epoch + 1,
                epochs = self.config.epochs,
                token_errors,
                accuracy = format!("{:.2}%", accuracy * 100.0).as_str(),
                "epoch complete"
            );
            reports.push(EpochReport {
                epoch: epoch + 1,
                token_errors,
                accuracy,
            });
        }

        reports
    }

    /// Save the model and its metadata into a directory artifact
    /// (`tagger.json` + `meta.json`).
    pub fn save(&self, dir: &Path, version: &str) -> Result<()> {
        fs::create_dir_all(dir)?;
        self.model.save(&dir.join("tagger.json"))?;

        let meta = ModelMeta {
            name: "rehearse_ner".to_string(),
            version: version.to_string(),
            labels: Label::all().iter().map(|l| l.as_str().to_string()).collect(),
            epochs_trained: self.config.epochs,
        };
        fs::write(dir.join("meta.json"), serde_json::to_string_pretty(&meta)?)?;
        info!(dir = %dir.display(), "model saved");
        Ok(())
    }
}

/// Load a model from a directory artifact.
pub fn load_model(dir: &Path) -> Result<TaggerModel> {
    TaggerModel::load(&dir.join("tagger.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::{BilouTag, Label};

    fn training_set() -> Vec<SequenceExample> {
        let person = |a: &str, b: &str| SequenceExample {
            tokens: vec![a.into(), b.into(), "called".into(), ".".into()],
            tags: vec![
                BilouTag::Begin(Label::Person).index(),
                BilouTag::Last(Label::Person).index(),
                BilouTag::Outside.index(),
                BilouTag::Outside.index(),
            ],
        };
        let city = |c: &str| SequenceExample {
            tokens: vec!["I".into(), "like".into(), c.into(), ".".into()],
            tags: vec![
                BilouTag::Outside.index(),
                BilouTag::Outside.index(),
                BilouTag::Unit(Label::Gpe).index(),
                BilouTag::Outside.index(),
            ],
        };
        vec![
            person("Shaka", "Khan"),
            person("Ada", "Lovelace"),
            city("London"),
            city("Berlin"),
        ]
    }

    #[test]
    fn training_converges_on_small_set() {
        let mut trainer = Trainer::new(TrainConfig {
            epochs: 20,
            learning_rate: 0.1,
            seed: 42,
        });
        let examples = training_set();
        let reports = trainer.train(&examples);

        assert_eq!(reports.len(), 20);
        let last = reports.last().unwrap();
        assert_eq!(last.token_errors, 0, "expected convergence on training set");

        for example in &examples {
            assert_eq!(trainer.model().predict(&example.tokens), example.tags);
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("model");

        let mut trainer = Trainer::new(TrainConfig {
            epochs: 10,
            learning_rate: 0.1,
            seed: 7,
        });
        let examples = training_set();
        trainer.train(&examples);
        trainer.save(&model_dir, "0.1.0").unwrap();

        let loaded = load_model(&model_dir).unwrap();
        for example in &examples {
            assert_eq!(
                loaded.predict(&example.tokens),
                trainer.model().predict(&example.tokens)
            );
        }

        let meta: ModelMeta = serde_json::from_str(
            &fs::read_to_string(model_dir.join("meta.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(meta.labels, vec!["PERSON", "GPE", "ORG", "MISC"]);
    }
}
