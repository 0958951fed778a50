// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::DesignConfig;
use crate::edit::{nick_distance, EditPlan};
use crate::heuristics;
use crate::ngrna;
use crate::pam::CutSite;
use crate::sequence::SequenceIndex;
use crate::types::{PegRNA, PrimeCandidate, Strand};

/// Enumerates every structurally valid (cut site, pbs length, rtt length)
/// combination. `sites` must already be in scan order (ascending nick,
/// `Plus` before `Minus`); the loop structure here is the ordering contract
/// callers rely on: sites outermost, then pbs length, then rtt length, all
/// ascending.
pub(crate) fn enumerate_candidates(
    index: &SequenceIndex,
    plan: &EditPlan,
    sites: &[CutSite],
    config: &DesignConfig,
) -> Vec<PrimeCandidate> {
    let mut out = Vec::new();
    for site in sites {
        let distance = nick_distance(plan.window.as_ref(), site.nick_index);
        if distance > config.max_nick_to_edit_distance {
            continue;
        }
        let companion = if config.design_ngrna {
            ngrna::nearest_opposite_nick(sites, site.strand, plan, config)
        } else {
            None
        };
        enumerate_site(index, plan, site, distance, companion.as_ref(), config, &mut out);
    }
    out
}

fn enumerate_site(
    index: &SequenceIndex,
    plan: &EditPlan,
    site: &CutSite,
    distance: usize,
    companion: Option<&ngrna::CompanionNick>,
    config: &DesignConfig,
    out: &mut Vec<PrimeCandidate>,
) {
    let len = index.len();
    // Scan-frame coordinates for this site's strand.
    let nick = match site.strand {
        Strand::Plus => site.nick_index,
        Strand::Minus => len - 1 - site.nick_index,
    };
    let anti = index.scanning_strand(site.strand.opposite());
    let (edited_view, outcome) = match site.strand {
        Strand::Plus => (plan.edited.as_str(), plan.outcome.clone()),
        Strand::Minus => {
            let edited_len = plan.edited.len();
            (
                plan.edited_rc.as_str(),
                plan.outcome
                    .clone()
                    .map(|r| edited_len - r.end..edited_len - r.start),
            )
        }
    };

    for pbs_len in config.pbs_min_len..=config.pbs_max_len {
        if pbs_len > nick {
            continue;
        }
        // The PBS anneals to the nicked strand: the reverse complement of
        // the bases 5' of the nick, read straight off the opposite strand.
        let pbs = &anti[len - nick..len - nick + pbs_len];

        for rtt_len in config.rtt_min_len..=config.rtt_max_len {
            if nick + rtt_len > edited_view.len() {
                continue;
            }
            // The edit outcome must be fully encoded in the template.
            if let Some(o) = &outcome {
                if o.start < nick || o.end > nick + rtt_len {
                    continue;
                }
            }
            let peg = PegRNA {
                spacer: site.spacer.clone(),
                cut_index: site.nick_index,
                pbs: pbs.to_string(),
                rtt: edited_view[nick..nick + rtt_len].to_string(),
            };
            let heuristics = heuristics::score(&peg, distance, config);
            let ngrna = companion.map(|nick_choice| {
                ngrna::attach(nick_choice, site.strand, site.nick_index, rtt_len)
            });
            out.push(PrimeCandidate {
                peg,
                ngrna,
                heuristics,
            });
        }
    }
}
