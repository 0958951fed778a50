// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::DesignConfig;
use crate::types::{CandidateHeuristics, PegRNA};

/// Fraction of G/C bases in `seq`; 0 for the empty sequence.
pub fn gc_content(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .bytes()
        .filter(|b| matches!(b, b'G' | b'C' | b'g' | b'c'))
        .count();
    gc as f64 / seq.len() as f64
}

/// Scores one candidate. `flag_edit_far` compares against the secondary
/// advisory threshold when configured, else against the enumeration bound
/// itself (under which it cannot fire for a surviving candidate).
pub(crate) fn score(
    peg: &PegRNA,
    edit_distance_from_nick: usize,
    config: &DesignConfig,
) -> CandidateHeuristics {
    let pbs_gc = gc_content(&peg.pbs);
    let far_bound = config
        .heuristics
        .edit_far_distance
        .unwrap_or(config.max_nick_to_edit_distance);
    CandidateHeuristics {
        pbs_gc,
        rtt_gc: gc_content(&peg.rtt),
        edit_distance_from_nick,
        flag_pbs_gc_extreme: pbs_gc < config.heuristics.pbs_gc_min
            || pbs_gc > config.heuristics.pbs_gc_max,
        flag_edit_far: edit_distance_from_nick > far_bound,
    }
}
