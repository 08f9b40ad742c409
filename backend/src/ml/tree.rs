//! Depth-limited CART decision trees and a majority-vote ensemble

use serde::{Deserialize, Serialize};

/// One tree node: either a class leaf or a binary threshold split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// A single CART tree trained by greedy Gini splitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

/// Training limits for one tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_leaf: 1,
        }
    }
}

impl DecisionTree {
    /// Fit a tree over row-major feature vectors and class labels.
    /// `labels` values must be below `n_classes`.
    pub fn fit(
        samples: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        params: TreeParams,
    ) -> Self {
        let indices: Vec<usize> = (0..samples.len()).collect();
        let root = build_node(samples, labels, &indices, n_classes, 0, params);
        Self { root }
    }

    pub fn predict(&self, features: &[f64]) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// Majority-vote ensemble over bootstrap-trained trees. Vote ties go to
/// the lowest class index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ensemble {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl Ensemble {
    pub fn new(trees: Vec<DecisionTree>, n_classes: usize) -> Self {
        Self { trees, n_classes }
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn predict(&self, features: &[f64]) -> usize {
        let mut votes = vec![0usize; self.n_classes.max(1)];
        for tree in &self.trees {
            let class = tree.predict(features);
            if class < votes.len() {
                votes[class] += 1;
            }
        }
        votes
            .iter()
            .enumerate()
            .max_by_key(|(class, count)| (**count, std::cmp::Reverse(*class)))
            .map(|(class, _)| class)
            .unwrap_or(0)
    }
}

fn class_counts(labels: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        if labels[i] < n_classes {
            counts[labels[i]] += 1;
        }
    }
    counts
}

fn majority_class(counts: &[usize]) -> usize {
    counts
        .iter()
        .enumerate()
        .max_by_key(|(class, count)| (**count, std::cmp::Reverse(*class)))
        .map(|(class, _)| class)
        .unwrap_or(0)
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn build_node(
    samples: &[Vec<f64>],
    labels: &[usize],
    indices: &[usize],
    n_classes: usize,
    depth: usize,
    params: TreeParams,
) -> TreeNode {
    let counts = class_counts(labels, indices, n_classes);
    let majority = majority_class(&counts);

    let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if pure || depth >= params.max_depth || indices.len() < 2 * params.min_leaf {
        return TreeNode::Leaf { class: majority };
    }

    let Some((feature, threshold)) = best_split(samples, labels, indices, n_classes, params)
    else {
        return TreeNode::Leaf { class: majority };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| samples[i][feature] <= threshold);

    if left_idx.is_empty() || right_idx.is_empty() {
        return TreeNode::Leaf { class: majority };
    }

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_node(
            samples, labels, &left_idx, n_classes, depth + 1, params,
        )),
        right: Box::new(build_node(
            samples, labels, &right_idx, n_classes, depth + 1, params,
        )),
    }
}

/// Exhaustive search over feature/midpoint candidates for the split with
/// the lowest weighted Gini impurity.
fn best_split(
    samples: &[Vec<f64>],
    labels: &[usize],
    indices: &[usize],
    n_classes: usize,
    params: TreeParams,
) -> Option<(usize, f64)> {
    let n_features = samples.first().map(Vec::len).unwrap_or(0);
    let parent_counts = class_counts(labels, indices, n_classes);
    let parent_gini = gini(&parent_counts, indices.len());

    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..n_features {
        let mut values: Vec<f64> = indices.iter().map(|&i| samples[i][feature]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let mut left = vec![0usize; n_classes];
            let mut right = vec![0usize; n_classes];
            let mut left_total = 0usize;
            for &i in indices {
                if samples[i][feature] <= threshold {
                    left[labels[i]] += 1;
                    left_total += 1;
                } else {
                    right[labels[i]] += 1;
                }
            }
            let right_total = indices.len() - left_total;
            if left_total < params.min_leaf || right_total < params.min_leaf {
                continue;
            }

            let weighted = (left_total as f64 * gini(&left, left_total)
                + right_total as f64 * gini(&right, right_total))
                / indices.len() as f64;

            if weighted + f64::EPSILON < parent_gini
                && best.map(|(_, _, g)| weighted < g).unwrap_or(true)
            {
                best = Some((feature, threshold, weighted));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}
