//! Feature-based sequence tagger for NER.
//!
//! Perceptron-trained emission weights over sparse token features, plus a
//! transition matrix over BILOU tags, decoded with Viterbi. Invalid BILOU
//! transitions start (and stay) heavily penalized.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use rehearse_core::BilouTag;

/// Number of distinct tags the model scores.
pub const NUM_TAGS: usize = BilouTag::NUM_TAGS;

/// Floor score for structurally invalid BILOU transitions.
const INVALID_TRANSITION: f32 = -10.0;

#[derive(Clone, Serialize, Deserialize)]
pub struct TaggerModel {
    /// Transition scores, indexed `[to * NUM_TAGS + from]`.
    transition: Vec<f32>,
    /// Sparse per-feature emission weights, one score per tag.
    feature_weights: HashMap<String, Vec<f32>>,
}

impl TaggerModel {
    pub fn new() -> Self {
        let mut transition = vec![0.0f32; NUM_TAGS * NUM_TAGS];
        for to in 0..NUM_TAGS {
            for from in 0..NUM_TAGS {
                let from_tag = BilouTag::from_index(from).unwrap();
                let to_tag = BilouTag::from_index(to).unwrap();
                if !BilouTag::is_valid_transition(from_tag, to_tag) {
                    transition[to * NUM_TAGS + from] = INVALID_TRANSITION;
                }
            }
        }

        Self {
            transition,
            feature_weights: HashMap::new(),
        }
    }

    /// Sparse features for the token at `i`.
    fn token_features(tokens: &[String], i: usize) -> Vec<String> {
        let token = &tokens[i];
        let lower = token.to_lowercase();

        let mut features = vec![
            "bias".to_string(),
            format!("w={lower}"),
            format!("shape={}", word_shape(token)),
        ];

        let chars: Vec<char> = lower.chars().collect();
        if chars.len() >= 3 {
            features.push(format!("suf3={}", chars[chars.len() - 3..].iter().collect::<String>()));
            features.push(format!("pre2={}", chars[..2].iter().collect::<String>()));
        }
        if token.chars().next().is_some_and(|c| c.is_uppercase()) {
            features.push("is_title".to_string());
        }
        if token.chars().all(|c| !c.is_alphabetic() || c.is_uppercase()) {
            features.push("is_upper".to_string());
        }
        if token.chars().any(|c| c.is_ascii_digit()) {
            features.push("has_digit".to_string());
        }

        if i > 0 {
            features.push(format!("prev={}", tokens[i - 1].to_lowercase()));
        } else {
            features.push("bos".to_string());
        }
        if i + 1 < tokens.len() {
            features.push(format!("next={}", tokens[i + 1].to_lowercase()));
        } else {
            features.push("eos".to_string());
        }

        features
    }

    fn emissions(&self, tokens: &[String]) -> Vec<f32> {
        let mut emissions = vec![0.0f32; tokens.len() * NUM_TAGS];
        for i in 0..tokens.len() {
            for feature in Self::token_features(tokens, i) {
                if let Some(weights) = self.feature_weights.get(&feature) {
                    for (tag, w) in weights.iter().enumerate() {
                        emissions[i * NUM_TAGS + tag] += w;
                    }
                }
            }
        }
        emissions
    }

    /// Predict a tag index sequence for the tokens.
    pub fn predict(&self, tokens: &[String]) -> Vec<usize> {
        let emissions = self.emissions(tokens);
        viterbi_decode(&emissions, &self.transition, NUM_TAGS)
    }

    /// One perceptron update. Returns the number of token errors before
    /// the update (the per-example loss).
    pub fn train_step(&mut self, tokens: &[String], gold: &[usize], lr: f32) -> usize {
        let pred = self.predict(tokens);
        let mut errors = 0usize;

        for i in 0..gold.len().min(pred.len()) {
            if pred[i] == gold[i] {
                continue;
            }
            errors += 1;
            for feature in Self::token_features(tokens, i) {
                let weights = self
                    .feature_weights
                    .entry(feature)
                    .or_insert_with(|| vec![0.0; NUM_TAGS]);
                weights[gold[i]] += lr;
                weights[pred[i]] -= lr;
            }
        }

        // Transition updates, smaller step than emissions.
        for i in 1..gold.len().min(pred.len()) {
            let (pf, pt) = (pred[i - 1], pred[i]);
            let (gf, gt) = (gold[i - 1], gold[i]);
            if (pf, pt) != (gf, gt) {
                self.transition[pt * NUM_TAGS + pf] -= lr * 0.1;
                self.transition[gt * NUM_TAGS + gf] += lr * 0.1;
            }
        }

        // Keep structurally invalid transitions pinned at the floor.
        for to in 0..NUM_TAGS {
            for from in 0..NUM_TAGS {
                let from_tag = BilouTag::from_index(from).unwrap();
                let to_tag = BilouTag::from_index(to).unwrap();
                if !BilouTag::is_valid_transition(from_tag, to_tag) {
                    self.transition[to * NUM_TAGS + from] = INVALID_TRANSITION;
                }
            }
        }

        errors
    }

    /// Number of distinct features the model has weights for.
    pub fn feature_count(&self) -> usize {
        self.feature_weights.len()
    }

    /// Write the model as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Read a model back from JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl Default for TaggerModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Viterbi decode over flattened emissions (`[token * num_tags + tag]`)
/// and transitions (`[to * num_tags + from]`).
pub fn viterbi_decode(emissions: &[f32], transitions: &[f32], num_tags: usize) -> Vec<usize> {
    if emissions.is_empty() || num_tags == 0 {
        return vec![];
    }
    let seq_len = emissions.len() / num_tags;
    if seq_len == 0 {
        return vec![];
    }

    let mut scores = vec![vec![f32::MIN / 1e10; num_tags]; seq_len];
    let mut backpointers = vec![vec![0usize; num_tags]; seq_len];

    scores[0][..num_tags].copy_from_slice(&emissions[..num_tags]);

    for t in 1..seq_len {
        for to in 0..num_tags {
            let mut best_score = f32::MIN / 1e10;
            let mut best_from = 0usize;
            for from in 0..num_tags {
                let score = scores[t - 1][from] + transitions[to * num_tags + from];
                if score > best_score {
                    best_score = score;
                    best_from = from;
                }
            }
            scores[t][to] = best_score + emissions[t * num_tags + to];
            backpointers[t][to] = best_from;
        }
    }

    let mut path = vec![0usize; seq_len];
    path[seq_len - 1] = scores[seq_len - 1]
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    for t in (0..seq_len - 1).rev() {
        path[t] = backpointers[t + 1][path[t + 1]];
    }

    path
}
