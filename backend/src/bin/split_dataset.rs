//! Split a class-per-directory dataset into train/ and test/ subsets.
//!
//! The source directory holds one subdirectory per class; each class's
//! files are shuffled and copied into <dest>/train/<class> and
//! <dest>/test/<class> at the given ratio.
//!
//! Usage: split_dataset <source> <dest> [train_ratio]

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use rand::seq::SliceRandom;

const DEFAULT_TRAIN_RATIO: f64 = 0.8;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "split_dataset=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let source = args
        .next()
        .context("usage: split_dataset <source> <dest> [train_ratio]")?;
    let dest = args
        .next()
        .context("usage: split_dataset <source> <dest> [train_ratio]")?;
    let ratio: f64 = match args.next() {
        Some(raw) => raw.parse().context("train_ratio must be a number")?,
        None => DEFAULT_TRAIN_RATIO,
    };
    if !(0.0..=1.0).contains(&ratio) {
        bail!("train_ratio must be between 0 and 1, got {}", ratio);
    }

    let source = Path::new(&source);
    let dest = Path::new(&dest);
    let mut rng = rand::thread_rng();

    for entry in fs::read_dir(source).with_context(|| format!("cannot read {}", source.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let class_dir = entry.path();
        let class_name = entry.file_name();

        let mut files: Vec<_> = fs::read_dir(&class_dir)?
            .filter_map(|f| f.ok())
            .filter(|f| f.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|f| f.path())
            .collect();
        files.sort();
        files.shuffle(&mut rng);

        let cut = ((files.len() as f64) * ratio).round() as usize;
        let (train, test) = files.split_at(cut.min(files.len()));

        copy_subset(train, &dest.join("train").join(&class_name))?;
        copy_subset(test, &dest.join("test").join(&class_name))?;

        tracing::info!(
            "{}: {} train, {} test",
            class_name.to_string_lossy(),
            train.len(),
            test.len()
        );
    }

    Ok(())
}

fn copy_subset(files: &[std::path::PathBuf], target: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(target).with_context(|| format!("cannot create {}", target.display()))?;
    for file in files {
        let name = file
            .file_name()
            .with_context(|| format!("no file name in {}", file.display()))?;
        fs::copy(file, target.join(name))
            .with_context(|| format!("cannot copy {}", file.display()))?;
    }
    Ok(())
}
