// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// Which strand of the reference a coordinate or protospacer refers to.
/// `Plus` orders before `Minus`, which is the tie-break used when two cut
/// sites share a nick position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    pub fn opposite(self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        }
    }
}

/// One edit to apply to the reference. This is a closed sum type: adding a
/// new operation kind requires updating every consumer explicitly.
///
/// Positions are expressed in the coordinate frame selected by
/// [`PrimeEditSpec::strand`]: indexes into the reference for `Plus`, indexes
/// into its reverse complement for `Minus` (payload bases likewise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditOperation {
    /// Replace `reference.len()` bases at `pos` with `alt`. The declared
    /// `reference` bases must match the actual sequence or the engine fails
    /// fast. `alt` may differ in length from `reference`.
    Substitution {
        pos: usize,
        #[serde(rename = "ref")]
        reference: String,
        alt: String,
    },
    /// Insert `inserted` (non-empty) before `pos`. `pos` may equal the
    /// sequence length to append.
    Insertion { pos: usize, inserted: String },
    /// Remove `start..start + length`.
    Deletion { start: usize, length: usize },
}

/// A requested genomic edit: the local reference window, the operations to
/// encode, and the strand the operations are written on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeEditSpec {
    pub id: String,
    pub ref_sequence: String,
    #[serde(default)]
    pub edits: Vec<EditOperation>,
    #[serde(default)]
    pub strand: Strand,
}

/// A fully specified pegRNA. All coordinates are absolute plus-reference
/// coordinates; `cut_index` names the first template base 3' of the nick on
/// the protospacer strand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PegRNA {
    /// 20-base guide sequence, excluding the PAM.
    pub spacer: String,
    pub cut_index: usize,
    /// Primer-binding site: anneals to the nicked strand.
    pub pbs: String,
    /// Reverse-transcriptase template: encodes the edited sequence.
    pub rtt: String,
}

/// Companion second-strand nick for PE3/PE3b designs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NickingSgRNA {
    pub spacer: String,
    pub cut_index: usize,
    /// True when the nick falls inside the pegRNA's RTT footprint (PE3b).
    pub is_pe3b: bool,
}

/// Deterministic per-candidate quality metrics. Thresholds come from
/// [`HeuristicThresholds`](crate::HeuristicThresholds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateHeuristics {
    pub pbs_gc: f64,
    pub rtt_gc: f64,
    pub edit_distance_from_nick: usize,
    pub flag_pbs_gc_extreme: bool,
    pub flag_edit_far: bool,
}

/// One structurally valid design. Constructed once per surviving
/// (cut site, pbs length, rtt length) combination and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimeCandidate {
    pub peg: PegRNA,
    /// Present only when nicking-sgRNA design is enabled and a qualifying
    /// opposite-strand nick exists.
    pub ngrna: Option<NickingSgRNA>,
    pub heuristics: CandidateHeuristics,
}
