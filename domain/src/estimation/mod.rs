//! Estimation and consensus domain
//!
//! # Core Concepts
//!
//! ## Scale
//! A Fibonacci-like ascending sequence (`1, 2, 3, 5, 8, ...`) of the values a
//! consensus may take.
//!
//! ## Estimation
//! The free text a voter submitted. Only votes that parse as finite numbers
//! take part in consensus.
//!
//! ## Consensus
//! Arithmetic mean of the numeric votes, snapped to the nearest scale value
//! with ties rounding up.
//!
//! ```text
//! votes ["3", "5", "?"]
//!    │  numeric projection
//!    ▼
//! [3.0, 5.0] ── mean ──▶ 4.0 ── snap ──▶ 5   (3 ← 4 → 5 is a tie, round up)
//! ```

pub mod consensus;
pub mod scale;
pub mod value;

pub use consensus::{ConsensusResult, SkipReason, compute_consensus, round_for_display};
pub use scale::{DEFAULT_SCALE_CEILING, EstimationScale, generate_scale, snap_to_scale};
pub use value::Estimation;
