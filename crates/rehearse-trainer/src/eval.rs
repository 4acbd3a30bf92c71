//! Entity-level evaluation of a trained tagger against gold examples.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use rehearse_core::{spans_from_tags, tags, tokenize, BilouTag, Label, Span, TrainingExample};

use crate::model::TaggerModel;

/// Precision/recall/F1 with the raw counts behind them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PrfMetrics {
    pub tp: usize,
    pub fp: usize,
    pub missed: usize,
}

impl PrfMetrics {
    pub fn precision(&self) -> f32 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f32 {
        ratio(self.tp, self.tp + self.missed)
    }

    pub fn f1(&self) -> f32 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }
}

fn ratio(num: usize, denom: usize) -> f32 {
    if denom == 0 { 0.0 } else { num as f32 / denom as f32 }
}

/// Evaluation results over one example collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalStats {
    /// Entity-level counts per label, in label index order.
    pub per_label: Vec<(Label, PrfMetrics)>,
    /// Entity-level counts over all labels.
    pub overall: PrfMetrics,
    /// Per-token tag accuracy.
    pub token_accuracy: f32,
    /// Examples evaluated.
    pub examples: usize,
    /// Examples skipped because their gold spans were misaligned.
    pub skipped: usize,
}

/// Evaluate a model on gold examples: exact span+label matches count as
/// true positives.
pub fn evaluate(model: &TaggerModel, examples: &[TrainingExample]) -> EvalStats {
    let mut per_label = vec![PrfMetrics::default(); Label::NUM_LABELS];
    let mut overall = PrfMetrics::default();
    let mut tokens_right = 0usize;
    let mut tokens_total = 0usize;
    let mut evaluated = 0usize;
    let mut skipped = 0usize;

    for example in examples {
        let tokens = tokenize(&example.text);
        if tokens.is_empty() {
            skipped += 1;
            continue;
        }
        let Ok(gold_tags) = tags::tags_from_spans(&tokens, &example.spans) else {
            skipped += 1;
            continue;
        };

        let token_texts: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
        let pred_indices = model.predict(&token_texts);
        let pred_tags: Vec<BilouTag> = pred_indices
            .iter()
            .filter_map(|&i| BilouTag::from_index(i))
            .collect();

        tokens_total += gold_tags.len();
        tokens_right += gold_tags
            .iter()
            .zip(pred_tags.iter())
            .filter(|(g, p)| g == p)
            .count();

        let gold: HashSet<Span> = example.spans.iter().copied().collect();
        let pred: HashSet<Span> = spans_from_tags(&tokens, &pred_tags).into_iter().collect();

        for span in pred.intersection(&gold) {
            per_label[span.label.index()].tp += 1;
            overall.tp += 1;
        }
        for span in pred.difference(&gold) {
            per_label[span.label.index()].fp += 1;
            overall.fp += 1;
        }
        for span in gold.difference(&pred) {
            per_label[span.label.index()].missed += 1;
            overall.missed += 1;
        }
        evaluated += 1;
    }

    EvalStats {
        per_label: Label::all()
            .iter()
            .map(|l| (*l, per_label[l.index()]))
            .collect(),
        overall,
        token_accuracy: ratio(tokens_right, tokens_total),
        examples: evaluated,
        skipped,
    }
}
