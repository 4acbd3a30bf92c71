//! Word-vector vocabulary with frequency-based pruning.
//!
//! Reads `.vec`-style text files (header line `<rows> <dim>`, then one
//! `word v1 .. vdim` line per word, ordered by corpus frequency), caps
//! insertion per source, and prunes the table to a total row budget.
//! Pruned words are remapped to their most similar surviving row so
//! lookups still resolve.

use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A vocabulary of words mapped onto a frequency-ordered vector table.
/// Several words may share one row (after pruning or alias insertion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorVocab {
    dim: usize,
    words: HashMap<String, usize>,
    rows: Vec<Vec<f32>>,
}

impl VectorVocab {
    /// Creates an empty vocabulary of the given dimensionality.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            words: HashMap::new(),
            rows: Vec::new(),
        }
    }

    /// Vector dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of known words (including aliases sharing rows).
    #[must_use]
    pub fn n_words(&self) -> usize {
        self.words.len()
    }

    /// Number of distinct vector rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// The vector for a word, if known.
    #[must_use]
    pub fn vector(&self, word: &str) -> Option<&[f32]> {
        self.words.get(word).map(|&row| self.rows[row].as_slice())
    }

    /// Reads a text vector file, adding at most `max_add` new words.
    /// Words already present keep their existing row. Returns the number
    /// of words added.
    pub fn read_text_vectors(&mut self, path: &Path, max_add: usize) -> Result<usize> {
        let file = File::open(path)
            .with_context(|| format!("opening vector file {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let mut header = String::new();
        reader.read_line(&mut header)?;
        let mut parts = header.split_whitespace();
        let declared_rows: usize = parts
            .next()
            .and_then(|p| p.parse().ok())
            .context("vector file header missing row count")?;
        let dim: usize = parts
            .next()
            .and_then(|p| p.parse().ok())
            .context("vector file header missing dimension")?;
        if dim != self.dim {
            bail!(
                "vector file {} has dimension {dim}, vocabulary expects {}",
                path.display(),
                self.dim
            );
        }

        let mut added = 0usize;
        for line in reader.lines() {
            if added >= max_add {
                break;
            }
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            // The word may itself contain spaces; the vector is the last
            // `dim` fields.
            let fields: Vec<&str> = line.split(' ').collect();
            if fields.len() < dim + 1 {
                bail!("malformed vector line in {}: {line:?}", path.display());
            }
            let word = fields[..fields.len() - dim].join(" ");
            if self.words.contains_key(&word) {
                continue;
            }

            let mut vector = Vec::with_capacity(dim);
            for value in &fields[fields.len() - dim..] {
                vector.push(value.parse::<f32>().with_context(|| {
                    format!("bad vector value for word {word:?} in {}", path.display())
                })?);
            }

            self.words.insert(word, self.rows.len());
            self.rows.push(vector);
            added += 1;
        }

        info!(
            file = %path.display(),
            declared_rows,
            added,
            total_rows = self.rows.len(),
            "read vector file"
        );
        Ok(added)
    }

    /// Prunes the table to at most `max_rows` rows, keeping the
    /// highest-frequency (earliest) ones. Words whose row is dropped are
    /// remapped to the surviving row with the highest cosine similarity.
    /// Returns the number of remapped words.
    pub fn prune(&mut self, max_rows: usize) -> usize {
        if self.rows.len() <= max_rows || max_rows == 0 {
            return 0;
        }

        let kept_norms: Vec<f32> = self.rows[..max_rows].iter().map(|r| norm(r)).collect();
        let mut remapped = 0usize;

        let mut best_for_dropped: HashMap<usize, usize> = HashMap::new();
        for row in self.words.values_mut() {
            if *row < max_rows {
                continue;
            }
            let target = *best_for_dropped.entry(*row).or_insert_with(|| {
                nearest_row(&self.rows[*row], &self.rows[..max_rows], &kept_norms)
            });
            *row = target;
            remapped += 1;
        }

        self.rows.truncate(max_rows);
        remapped
    }

    /// Registers a title-case alias for every surviving word, sharing its
    /// row. Returns the number of aliases added.
    pub fn add_title_case_aliases(&mut self) -> usize {
        let mut aliases = Vec::new();
        for (word, &row) in &self.words {
            let titled = title_case(word);
            if titled != *word && !self.words.contains_key(&titled) {
                aliases.push((titled, row));
            }
        }
        let added = aliases.len();
        self.words.extend(aliases);
        added
    }

    /// Writes the vocabulary into a directory artifact (`vectors.json`).
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let path = dir.join("vectors.json");
        fs::write(&path, serde_json::to_string(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Reads a vocabulary back from a directory artifact.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join("vectors.json");
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Index of the kept row most cosine-similar to `query`.
fn nearest_row(query: &[f32], kept: &[Vec<f32>], kept_norms: &[f32]) -> usize {
    let query_norm = norm(query);
    let mut best = 0usize;
    let mut best_score = f32::MIN;
    for (i, row) in kept.iter().enumerate() {
        let denom = query_norm * kept_norms[i];
        let score = if denom == 0.0 {
            0.0
        } else {
            dot(query, row) / denom
        };
        if score > best_score {
            best_score = score;
            best = i;
        }
    }
    best
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
