// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Range;

use crate::config::DesignConfig;
use crate::edit::{nick_distance, EditPlan};
use crate::pam::CutSite;
use crate::types::{NickingSgRNA, Strand};

/// The chosen companion nick for one pegRNA cut site. PE3 vs PE3b depends on
/// the RTT length and is decided per candidate by [`attach`].
#[derive(Debug, Clone)]
pub(crate) struct CompanionNick {
    pub spacer: String,
    pub cut_index: usize,
}

/// Picks the opposite-strand nick nearest to the edit window, with the
/// smaller reference coordinate breaking ties. Only sites within
/// `max_nick_to_edit_distance` of the edit qualify; with no operations every
/// opposite-strand site qualifies at distance 0. `None` when nothing
/// qualifies, which is not an error.
pub(crate) fn nearest_opposite_nick(
    sites: &[CutSite],
    peg_strand: Strand,
    plan: &EditPlan,
    config: &DesignConfig,
) -> Option<CompanionNick> {
    let mut best: Option<(usize, &CutSite)> = None;
    for site in sites.iter().filter(|s| s.strand == peg_strand.opposite()) {
        let distance = nick_distance(plan.window.as_ref(), site.nick_index);
        if distance > config.max_nick_to_edit_distance {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_distance, best_site)) => {
                distance < best_distance
                    || (distance == best_distance && site.nick_index < best_site.nick_index)
            }
        };
        if better {
            best = Some((distance, site));
        }
    }
    best.map(|(_, site)| CompanionNick {
        spacer: site.spacer.clone(),
        cut_index: site.nick_index,
    })
}

/// Builds the candidate's nicking sgRNA, classifying it as PE3b when the
/// companion nick falls inside the RTT footprint on the reference.
pub(crate) fn attach(
    nick: &CompanionNick,
    peg_strand: Strand,
    peg_cut: usize,
    rtt_len: usize,
) -> NickingSgRNA {
    let footprint: Range<usize> = match peg_strand {
        Strand::Plus => peg_cut..peg_cut + rtt_len,
        Strand::Minus => (peg_cut + 1).saturating_sub(rtt_len)..peg_cut + 1,
    };
    NickingSgRNA {
        spacer: nick.spacer.clone(),
        cut_index: nick.cut_index,
        is_pe3b: footprint.contains(&nick.cut_index),
    }
}
