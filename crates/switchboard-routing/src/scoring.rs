//! Linear multi-criteria score

use crate::analysis::complexity;
use crate::registry::ModelDescriptor;
use crate::weights::Weights;

/// Score a model for a request of the given complexity
///
/// Higher is better. Accuracy, confidence, and complexity add to the
/// score; latency, cost, and load subtract from it.
pub fn score(weights: &Weights, model: &ModelDescriptor, complexity: f64) -> f64 {
    weights.alpha1 * model.acc - weights.alpha2 * model.lat - weights.alpha3 * model.cost - weights.alpha4 * model.load
        + weights.alpha5 * complexity
        + weights.alpha6 * model.conf
}

/// Score a model directly against request text
pub fn score_text(weights: &Weights, model: &ModelDescriptor, text: &str) -> f64 {
    score(weights, model, complexity(text))
}
