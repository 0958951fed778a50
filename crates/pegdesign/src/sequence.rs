// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use quickdna::{BaseSequence, DnaSequence, Nucleotide};

use crate::error::DesignError;
use crate::types::Strand;

/// A validated reference sequence together with its reverse complement,
/// exposing strand-aware lookups. Coordinates handed back to callers are
/// always absolute plus-reference coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceIndex {
    forward: String,
    reverse: String,
}

impl SequenceIndex {
    /// Validates and indexes a reference. Case-insensitive; any symbol
    /// outside A, C, G, T fails with `InvalidSequence`.
    pub fn new(reference: &str) -> Result<Self, DesignError> {
        let dna = parse_dna(reference, "reference sequence")?;
        let reverse = dna.reverse_complement().to_string();
        Ok(Self {
            forward: dna.to_string(),
            reverse,
        })
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The sequence scanned for a strand: the reference itself for `Plus`,
    /// its reverse complement for `Minus`.
    pub fn scanning_strand(&self, strand: Strand) -> &str {
        match strand {
            Strand::Plus => &self.forward,
            Strand::Minus => &self.reverse,
        }
    }

    /// Translates a scanning-strand coordinate back to an absolute
    /// plus-reference coordinate. `pos` must be within the sequence.
    pub fn to_reference(&self, strand: Strand, pos: usize) -> usize {
        debug_assert!(pos < self.len());
        match strand {
            Strand::Plus => pos,
            Strand::Minus => self.len() - 1 - pos,
        }
    }
}

/// Parses `seq` as strict DNA, reporting the first offending symbol.
pub(crate) fn parse_dna(
    seq: &str,
    what: &'static str,
) -> Result<DnaSequence<Nucleotide>, DesignError> {
    let upper = seq.to_ascii_uppercase();
    upper.parse().map_err(|_| {
        match upper
            .chars()
            .position(|c| !matches!(c, 'A' | 'C' | 'G' | 'T'))
        {
            Some(position) => DesignError::InvalidSequence {
                what,
                symbol: seq.chars().nth(position).unwrap_or('?'),
                position,
            },
            None => DesignError::InvalidSequence {
                what,
                symbol: '?',
                position: 0,
            },
        }
    })
}
