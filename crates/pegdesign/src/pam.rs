// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::device::ScanKernel;
use crate::error::ConfigError;
use crate::sequence::SequenceIndex;
use crate::types::Strand;

/// Spacer length for the SpCas9-class nuclease this engine models.
pub const SPACER_LEN: usize = 20;

/// The nick sits this many bases 5' of the PAM on the protospacer strand.
pub const NICK_OFFSET: usize = 3;

/// A fixed-width PAM pattern over A, C, G, T and the N wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PamMotif {
    pattern: Vec<u8>,
}

impl PamMotif {
    /// Case-insensitive. Empty motifs and symbols outside ACGTN are
    /// configuration errors.
    pub fn parse(motif: &str) -> Result<Self, ConfigError> {
        if motif.is_empty() {
            return Err(ConfigError::EmptyPamMotif);
        }
        let mut pattern = Vec::with_capacity(motif.len());
        for symbol in motif.chars() {
            match symbol.to_ascii_uppercase() {
                up @ ('A' | 'C' | 'G' | 'T' | 'N') => pattern.push(up as u8),
                _ => {
                    return Err(ConfigError::InvalidPamSymbol {
                        motif: motif.to_string(),
                        symbol,
                    })
                }
            }
        }
        Ok(Self { pattern })
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// True when every window base equals the pattern base or the pattern
    /// base is the N wildcard.
    pub fn matches(&self, window: &[u8]) -> bool {
        window.len() == self.pattern.len()
            && self
                .pattern
                .iter()
                .zip(window)
                .all(|(&p, &s)| p == b'N' || p == s)
    }
}

/// A PAM match lifted to absolute plus-reference coordinates.
///
/// `nick_index` names the first template base 3' of the nick on the
/// protospacer strand; `spacer` is read from the scanning strand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutSite {
    pub strand: Strand,
    pub pam_index: usize,
    pub nick_index: usize,
    pub spacer: String,
}

/// Scans both strands for every motif. Matches whose spacer window would
/// leave the sequence are discarded; sites reported by more than one motif
/// are deduplicated. The result is sorted by ascending nick position with
/// `Plus` before `Minus` on ties, which fixes the enumeration order
/// downstream. No matches is an empty result, not an error.
pub(crate) fn scan_cut_sites(
    index: &SequenceIndex,
    motifs: &[PamMotif],
    kernel: &dyn ScanKernel,
) -> Vec<CutSite> {
    let mut sites = Vec::new();
    let mut seen: HashSet<(Strand, usize)> = HashSet::new();
    for strand in [Strand::Plus, Strand::Minus] {
        let scan = index.scanning_strand(strand);
        for motif in motifs {
            for pam_pos in kernel.find_pam_sites(scan.as_bytes(), motif) {
                if pam_pos < SPACER_LEN {
                    continue;
                }
                if !seen.insert((strand, pam_pos)) {
                    continue;
                }
                sites.push(CutSite {
                    strand,
                    pam_index: index.to_reference(strand, pam_pos),
                    nick_index: index.to_reference(strand, pam_pos - NICK_OFFSET),
                    spacer: scan[pam_pos - SPACER_LEN..pam_pos].to_string(),
                });
            }
        }
    }
    sites.sort_by_key(|site| (site.nick_index, site.strand));
    sites
}
