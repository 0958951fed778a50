// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Rejected design configurations. Every variant is detected by
/// [`DesignConfig::validate`](crate::DesignConfig::validate) before any
/// scanning work begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pbs length bounds are invalid: min {min}, max {max} (need 0 < min <= max)")]
    PbsBounds { min: usize, max: usize },
    #[error("rtt length bounds are invalid: min {min}, max {max} (need 0 < min <= max)")]
    RttBounds { min: usize, max: usize },
    #[error("at least one PAM motif is required")]
    EmptyPamSet,
    #[error("PAM motif may not be empty")]
    EmptyPamMotif,
    #[error("PAM motif {motif:?} contains {symbol:?}; motifs are restricted to A, C, G, T and N")]
    InvalidPamSymbol { motif: String, symbol: char },
    #[error("pbs GC band [{min}, {max}] must satisfy 0 <= min <= max <= 1")]
    GcBand { min: f64, max: f64 },
}

/// Failures surfaced by [`design`](crate::design) and
/// [`design_batch`](crate::design_batch). All are deterministic
/// input-validation failures raised before candidate enumeration; an absence
/// of PAM matches or surviving candidates is an empty result, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    #[error("invalid design config: {0}")]
    Config(#[from] ConfigError),
    /// A sequence input contained a symbol outside A, C, G, T.
    #[error("{what} contains invalid symbol {symbol:?} at position {position}")]
    InvalidSequence {
        what: &'static str,
        symbol: char,
        position: usize,
    },
    /// An edit payload that must carry at least one base was empty.
    #[error("{what} must not be empty")]
    EmptyEdit { what: &'static str },
    /// An edit operation's affected range left the reference.
    #[error("edit range {start}..{end} lies outside the sequence (length {len})")]
    InvalidPosition { start: usize, end: usize, len: usize },
    /// A substitution declared reference bases that the reference does not
    /// actually contain at that position.
    #[error("substitution at {pos} declares {declared:?} but the reference reads {actual:?}")]
    ReferenceMismatch {
        pos: usize,
        declared: String,
        actual: String,
    },
    /// Reserved for the marshalling boundary: an edit operation tag this
    /// engine does not know. The closed [`EditOperation`](crate::EditOperation)
    /// sum type makes this unreachable from safe Rust callers.
    #[error("unsupported edit operation kind {0:?}")]
    UnsupportedEditVariant(String),
    /// An accelerator device was requested but this build has none (or none
    /// with that ordinal). The engine refuses rather than silently falling
    /// back to the CPU.
    #[error("accelerator device {ordinal} was requested but is not available in this build")]
    CapabilityUnavailable { ordinal: u32 },
}
