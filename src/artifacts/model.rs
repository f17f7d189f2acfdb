//! Regression model artifacts.
//!
//! Two model families are decodable:
//!
//! - `linear_regression`: `intercept + Σ coefficient[col] * row[col]`
//! - `tree_ensemble`: `base_score + Σ leaf(tree)` over boosted regression trees
//!
//! Both are stored keyed by feature column name and resolved to column
//! positions once at load, so prediction never looks anything up by string.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::features::{Feature, FeatureRow, FEATURE_COUNT};

/// Model kinds this build can decode.
pub const SUPPORTED_MODEL_KINDS: &[&str] = &["linear_regression", "tree_ensemble"];

/// On-disk shape of a model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    LinearRegression {
        coefficients: BTreeMap<String, f64>,
        #[serde(default)]
        intercept: f64,
    },
    TreeEnsemble {
        #[serde(default)]
        base_score: f64,
        trees: Vec<TreeSpec>,
    },
}

/// On-disk tree: a flat node list rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

/// On-disk tree node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

/// A decoded, validated regression model.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionModel {
    Linear(LinearModel),
    Trees(TreeEnsemble),
}

impl RegressionModel {
    /// Resolve an on-disk spec against the feature schema.
    ///
    /// # Errors
    ///
    /// Returns a description of the first inconsistency found.
    pub fn from_spec(spec: ModelSpec) -> std::result::Result<Self, String> {
        match spec {
            ModelSpec::LinearRegression {
                coefficients,
                intercept,
            } => {
                let mut weights = [0.0; FEATURE_COUNT];
                for (name, weight) in coefficients {
                    let feature = resolve_feature(&name)?;
                    weights[feature.index()] = weight;
                }
                Ok(Self::Linear(LinearModel { weights, intercept }))
            }
            ModelSpec::TreeEnsemble { base_score, trees } => {
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, tree)| {
                        RegressionTree::from_spec(tree).map_err(|e| format!("tree {i}: {e}"))
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(Self::Trees(TreeEnsemble { base_score, trees }))
            }
        }
    }

    /// Predict for a single row.
    #[must_use]
    pub fn predict(&self, row: &FeatureRow) -> f64 {
        match self {
            Self::Linear(model) => model.predict(row),
            Self::Trees(model) => model.predict(row),
        }
    }

    /// The artifact `kind` this model was decoded from.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear_regression",
            Self::Trees(_) => "tree_ensemble",
        }
    }
}

fn resolve_feature(name: &str) -> std::result::Result<Feature, String> {
    Feature::from_name(name).ok_or_else(|| format!("unknown feature column '{name}'"))
}

/// `y = w·x + b` over the full feature row.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    #[must_use]
    pub fn new(weights: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self { weights, intercept }
    }

    #[must_use]
    pub fn predict(&self, row: &FeatureRow) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .zip(row.values().iter())
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercept
    }
}

/// Additive ensemble of regression trees.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    base_score: f64,
    trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    #[must_use]
    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: Feature,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// A single tree. Children always sit after their parent, so traversal
/// from the root terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn from_spec(spec: TreeSpec) -> std::result::Result<Self, String> {
        if spec.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let len = spec.nodes.len();
        let nodes = spec
            .nodes
            .into_iter()
            .enumerate()
            .map(|(i, node)| match node {
                NodeSpec::Leaf { leaf } => Ok(Node::Leaf(leaf)),
                NodeSpec::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    for child in [left, right] {
                        if child <= i || child >= len {
                            return Err(format!("node {i}: child index {child} out of order"));
                        }
                    }
                    Ok(Node::Split {
                        feature: resolve_feature(&feature)?,
                        threshold,
                        left,
                        right,
                    })
                }
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { nodes })
    }

    /// Walk from the root; values strictly below the threshold go left.
    #[must_use]
    pub fn predict(&self, row: &FeatureRow) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row.get(feature) < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}
