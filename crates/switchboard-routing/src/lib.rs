//! Weighted model selection for Switchboard
//!
//! Every candidate gets a linear score over its static attributes plus a
//! complexity term derived from the request text:
//!
//! ```text
//! score = α1·acc − α2·lat − α3·cost − α4·load + α5·complexity + α6·conf
//! ```
//!
//! The highest score wins; ties go to the model listed first.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod analysis;
pub mod error;
pub mod registry;
pub mod scoring;
pub mod selection;
pub mod weights;

pub use analysis::complexity;
pub use error::RoutingError;
pub use registry::{ModelDescriptor, ModelRegistry};
pub use scoring::{score, score_text};
pub use selection::{ScoredModel, Selection, rank, select};
pub use weights::{WeightStore, Weights};
