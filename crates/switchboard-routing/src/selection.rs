//! Arg-max selection over the registry

use std::cmp::Ordering;

use crate::analysis::complexity;
use crate::error::RoutingError;
use crate::registry::{ModelDescriptor, ModelRegistry};
use crate::scoring::score;
use crate::weights::Weights;

/// A candidate paired with its score for one request
#[derive(Debug, Clone, Copy)]
pub struct ScoredModel<'a> {
    pub model: &'a ModelDescriptor,
    pub score: f64,
}

/// Outcome of a selection
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    /// Highest-scoring candidate
    pub model: &'a ModelDescriptor,
    /// Its score
    pub score: f64,
    /// Complexity of the request text the scores were computed for
    pub complexity: f64,
}

/// Pick the highest-scoring model for `text`
///
/// Scans the registry once in order, replacing the running best only on a
/// strictly greater score, so the earliest model wins ties. A NaN score
/// never beats anything.
pub fn select<'a>(weights: &Weights, registry: &'a ModelRegistry, text: &str) -> Result<Selection<'a>, RoutingError> {
    let complexity = complexity(text);

    let mut candidates = registry.models().iter().map(|model| ScoredModel {
        model,
        score: score(weights, model, complexity),
    });

    let first = candidates.next().ok_or(RoutingError::NoModelsAvailable)?;
    tracing::trace!(model = %first.model.name, score = first.score, "candidate scored");

    let best = candidates.fold(first, |best, candidate| {
        tracing::trace!(model = %candidate.model.name, score = candidate.score, "candidate scored");
        if comparable(candidate.score) > comparable(best.score) {
            candidate
        } else {
            best
        }
    });

    tracing::debug!(
        model = %best.model.name,
        score = best.score,
        complexity,
        candidates = registry.len(),
        "model selected"
    );

    Ok(Selection {
        model: best.model,
        score: best.score,
        complexity,
    })
}

/// All candidates ordered best first
///
/// The sort is stable, so equal scores keep registry order and the first
/// entry is always the model [`select`] returns.
pub fn rank<'a>(weights: &Weights, registry: &'a ModelRegistry, text: &str) -> Vec<ScoredModel<'a>> {
    let complexity = complexity(text);

    let mut scored: Vec<_> = registry
        .models()
        .iter()
        .map(|model| ScoredModel {
            model,
            score: score(weights, model, complexity),
        })
        .collect();

    scored.sort_by(|a, b| descending(a.score, b.score));
    scored
}

/// Map a score onto a totally ordered key: NaN sinks to the bottom and
/// `-0.0` compares equal to `0.0`
fn comparable(score: f64) -> f64 {
    if score.is_nan() { f64::NEG_INFINITY } else { score + 0.0 }
}

fn descending(a: f64, b: f64) -> Ordering {
    comparable(b).total_cmp(&comparable(a))
}
