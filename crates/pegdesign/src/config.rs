// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pam::PamMotif;

/// Length, distance and PAM constraints for a design run.
///
/// Deserializes with per-field defaults, so partial configs are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    pub pbs_min_len: usize,
    pub pbs_max_len: usize,
    pub rtt_min_len: usize,
    pub rtt_max_len: usize,
    /// Cut sites whose nick is further than this from the edit window are
    /// not enumerated.
    pub max_nick_to_edit_distance: usize,
    /// Fixed-width patterns over A, C, G, T and the N wildcard.
    pub pam_motifs: Vec<String>,
    /// Also design a PE3/PE3b nicking sgRNA per candidate.
    pub design_ngrna: bool,
    pub heuristics: HeuristicThresholds,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            pbs_min_len: 8,
            pbs_max_len: 17,
            rtt_min_len: 10,
            rtt_max_len: 40,
            max_nick_to_edit_distance: 30,
            pam_motifs: vec!["NGG".to_string()],
            design_ngrna: false,
            heuristics: HeuristicThresholds::default(),
        }
    }
}

/// Thresholds behind the advisory candidate flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicThresholds {
    /// `flag_pbs_gc_extreme` fires when the PBS GC fraction leaves
    /// `[pbs_gc_min, pbs_gc_max]`.
    pub pbs_gc_min: f64,
    pub pbs_gc_max: f64,
    /// Secondary advisory bound for `flag_edit_far`. With `None` the flag
    /// compares against `max_nick_to_edit_distance`, which the enumerator
    /// already filters at, so it stays false for every surviving candidate.
    pub edit_far_distance: Option<usize>,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            pbs_gc_min: 0.3,
            pbs_gc_max: 0.75,
            edit_far_distance: None,
        }
    }
}

impl DesignConfig {
    /// Checks every paired bound and compiles the PAM motifs. Fails before
    /// any scanning work happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compiled_motifs().map(|_| ())
    }

    pub(crate) fn compiled_motifs(&self) -> Result<Vec<PamMotif>, ConfigError> {
        if self.pbs_min_len == 0 || self.pbs_min_len > self.pbs_max_len {
            return Err(ConfigError::PbsBounds {
                min: self.pbs_min_len,
                max: self.pbs_max_len,
            });
        }
        if self.rtt_min_len == 0 || self.rtt_min_len > self.rtt_max_len {
            return Err(ConfigError::RttBounds {
                min: self.rtt_min_len,
                max: self.rtt_max_len,
            });
        }
        if self.pam_motifs.is_empty() {
            return Err(ConfigError::EmptyPamSet);
        }
        let h = &self.heuristics;
        if !(0.0..=1.0).contains(&h.pbs_gc_min)
            || !(0.0..=1.0).contains(&h.pbs_gc_max)
            || h.pbs_gc_min > h.pbs_gc_max
        {
            return Err(ConfigError::GcBand {
                min: h.pbs_gc_min,
                max: h.pbs_gc_max,
            });
        }
        self.pam_motifs
            .iter()
            .map(|m| PamMotif::parse(m))
            .collect()
    }
}
