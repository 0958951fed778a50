// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic design engine for prime-editing guide RNAs: PAM scanning on
//! both strands, combinatorial PBS/RTT enumeration, PE3/PE3b nicking-sgRNA
//! placement and heuristic scoring. The engine is stateless and returns the
//! full structurally valid candidate set in a fixed order; ranking and
//! selection are the caller's concern.

pub mod config;
pub mod device;
pub mod edit;
mod enumerate;
pub mod error;
pub mod heuristics;
mod ngrna;
pub mod pam;
pub mod sequence;
pub mod types;

pub use config::{DesignConfig, HeuristicThresholds};
pub use device::{
    is_accelerator_available, Device, DeviceKind, ParallelKernel, ScalarKernel, ScanKernel,
};
pub use error::{ConfigError, DesignError};
pub use pam::{CutSite, PamMotif, NICK_OFFSET, SPACER_LEN};
pub use sequence::SequenceIndex;
pub use types::{
    CandidateHeuristics, EditOperation, NickingSgRNA, PegRNA, PrimeCandidate, PrimeEditSpec,
    Strand,
};

use rayon::prelude::*;
use tracing::debug;

/// Designs every structurally valid pegRNA candidate for one edit spec.
///
/// Validates the config and spec eagerly, then scans, enumerates and scores.
/// Candidates come back ordered by ascending nick position (`Plus` before
/// `Minus` on ties), then ascending PBS length, then ascending RTT length —
/// a contract callers and tests may rely on. Two calls with identical
/// arguments produce identical output, whichever device runs the scan.
#[tracing::instrument(level = "debug", skip_all, fields(id = %spec.id))]
pub fn design(
    spec: &PrimeEditSpec,
    config: &DesignConfig,
    device: Device,
) -> Result<Vec<PrimeCandidate>, DesignError> {
    let motifs = config.compiled_motifs()?;
    let kernel = device::kernel_for(device)?;
    let index = SequenceIndex::new(&spec.ref_sequence)?;
    let plan = edit::locate_edits(&index, spec)?;
    let sites = pam::scan_cut_sites(&index, &motifs, kernel);
    debug!(sites = sites.len(), "scanned PAM sites");
    let candidates = enumerate::enumerate_candidates(&index, &plan, &sites, config);
    debug!(candidates = candidates.len(), "enumerated candidates");
    Ok(candidates)
}

/// Applies [`design`] to every spec, preserving input order.
///
/// The shared inputs are validated once up front and fail the whole call;
/// after that, one spec's failure cannot touch its neighbors — failures are
/// reported per index. Specs are dispatched across the rayon pool, which is
/// observationally equivalent to calling [`design`] in a loop.
pub fn design_batch(
    specs: &[PrimeEditSpec],
    config: &DesignConfig,
    device: Device,
) -> Result<Vec<Result<Vec<PrimeCandidate>, DesignError>>, DesignError> {
    config.validate()?;
    device::kernel_for(device)?;
    Ok(specs
        .par_iter()
        .map(|spec| design(spec, config, device))
        .collect())
}
