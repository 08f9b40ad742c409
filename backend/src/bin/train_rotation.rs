//! Offline trainer for the crop rotation model.
//!
//! Reads a CSV of historical rotations, fits the categorical encoders,
//! trains a bootstrap ensemble of decision trees, and writes the JSON
//! artifact bundle the server loads at startup.
//!
//! Usage: train_rotation <input.csv> <output.json>

use std::fs;

use anyhow::{bail, Context};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use agro_advisor_backend::ml::{
    DecisionTree, Ensemble, LabelEncoder, RotationArtifacts, TreeParams,
};

const TREES: usize = 25;
const MAX_DEPTH: usize = 8;
const MIN_LEAF: usize = 1;
const HOLDOUT_RATIO: f64 = 0.2;

#[derive(Debug, Deserialize)]
struct RotationRow {
    last_crop: String,
    soil_type: String,
    season: String,
    recommended_crop: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "train_rotation=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .context("usage: train_rotation <input.csv> <output.json>")?;
    let output = args
        .next()
        .context("usage: train_rotation <input.csv> <output.json>")?;

    let rows = read_rows(&input)?;
    if rows.is_empty() {
        bail!("no training rows in {}", input);
    }
    tracing::info!("Loaded {} rotation rows from {}", rows.len(), input);

    let last_crop = LabelEncoder::fit(rows.iter().map(|r| r.last_crop.as_str()));
    let soil_type = LabelEncoder::fit(rows.iter().map(|r| r.soil_type.as_str()));
    let season = LabelEncoder::fit(rows.iter().map(|r| r.season.as_str()));
    let target = LabelEncoder::fit(rows.iter().map(|r| r.recommended_crop.as_str()));

    let mut samples = Vec::with_capacity(rows.len());
    let mut labels = Vec::with_capacity(rows.len());
    for row in &rows {
        samples.push(vec![
            last_crop.transform("last_crop", &row.last_crop)? as f64,
            soil_type.transform("soil_type", &row.soil_type)? as f64,
            season.transform("season", &row.season)? as f64,
        ]);
        labels.push(target.transform("recommended_crop", &row.recommended_crop)?);
    }

    let mut rng = rand::thread_rng();
    let (train_idx, test_idx) = holdout_split(samples.len(), HOLDOUT_RATIO, &mut rng);

    let train_samples: Vec<Vec<f64>> = train_idx.iter().map(|&i| samples[i].clone()).collect();
    let train_labels: Vec<usize> = train_idx.iter().map(|&i| labels[i]).collect();

    let model = train_ensemble(&train_samples, &train_labels, target.len(), &mut rng);

    if !test_idx.is_empty() {
        let correct = test_idx
            .iter()
            .filter(|&&i| model.predict(&samples[i]) == labels[i])
            .count();
        tracing::info!(
            "Holdout accuracy: {}/{} ({:.1}%)",
            correct,
            test_idx.len(),
            100.0 * correct as f64 / test_idx.len() as f64
        );
    }

    let artifacts = RotationArtifacts {
        model,
        last_crop,
        soil_type,
        season,
        target,
    };

    let json = serde_json::to_string_pretty(&artifacts)?;
    fs::write(&output, json).with_context(|| format!("cannot write {}", output))?;
    tracing::info!("Wrote model artifacts to {}", output);

    Ok(())
}

fn read_rows(path: &str) -> anyhow::Result<Vec<RotationRow>> {
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("cannot open {}", path))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Shuffle indices and carve off a holdout fraction for evaluation.
fn holdout_split(n: usize, ratio: f64, rng: &mut impl Rng) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    let holdout = ((n as f64) * ratio).round() as usize;
    // Keep at least one training row.
    let holdout = holdout.min(n.saturating_sub(1));
    let test = indices.split_off(n - holdout);
    (indices, test)
}

/// Train a bagged ensemble: each tree fits a bootstrap resample.
fn train_ensemble(
    samples: &[Vec<f64>],
    labels: &[usize],
    n_classes: usize,
    rng: &mut impl Rng,
) -> Ensemble {
    let params = TreeParams {
        max_depth: MAX_DEPTH,
        min_leaf: MIN_LEAF,
    };

    let trees = (0..TREES)
        .map(|_| {
            let mut boot_samples = Vec::with_capacity(samples.len());
            let mut boot_labels = Vec::with_capacity(labels.len());
            for _ in 0..samples.len() {
                let i = rng.gen_range(0..samples.len());
                boot_samples.push(samples[i].clone());
                boot_labels.push(labels[i]);
            }
            DecisionTree::fit(&boot_samples, &boot_labels, n_classes, params)
        })
        .collect();

    Ensemble::new(trees, n_classes)
}
