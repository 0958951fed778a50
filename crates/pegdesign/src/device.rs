// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DesignError;
use crate::pam::PamMotif;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Cpu,
    Accelerator,
}

/// Selects the execution backend for a design run. The device is a
/// throughput choice only: every backend must produce the identical,
/// deterministically ordered candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    /// Which accelerator unit to use; ignored for the CPU.
    #[serde(default)]
    pub ordinal: u32,
}

impl Device {
    pub fn cpu() -> Self {
        Self {
            kind: DeviceKind::Cpu,
            ordinal: 0,
        }
    }

    pub fn accelerator(ordinal: u32) -> Self {
        Self {
            kind: DeviceKind::Accelerator,
            ordinal,
        }
    }
}

/// Strategy seam between the engine and its execution backends.
///
/// Implementations return the start offsets of every motif match in `seq`,
/// in ascending order. Backend equivalence is a first-class contract, not an
/// incidental property; see the kernel tests.
pub trait ScanKernel: Sync {
    fn find_pam_sites(&self, seq: &[u8], motif: &PamMotif) -> Vec<usize>;
}

/// Sequential scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl ScanKernel for ScalarKernel {
    fn find_pam_sites(&self, seq: &[u8], motif: &PamMotif) -> Vec<usize> {
        if seq.len() < motif.len() {
            return Vec::new();
        }
        let windows = seq.len() - motif.len() + 1;
        (0..windows)
            .filter(|&i| motif.matches(&seq[i..i + motif.len()]))
            .collect()
    }
}

/// Data-parallel scan over the rayon pool; the accelerator backend shipped
/// in this build. GPU-class backends would implement the same trait, with
/// driver initialization owned by the host. Indexed parallel collection
/// preserves ascending hit order, keeping results identical to
/// [`ScalarKernel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelKernel;

impl ScanKernel for ParallelKernel {
    fn find_pam_sites(&self, seq: &[u8], motif: &PamMotif) -> Vec<usize> {
        if seq.len() < motif.len() {
            return Vec::new();
        }
        let windows = seq.len() - motif.len() + 1;
        (0..windows)
            .into_par_iter()
            .filter(|&i| motif.matches(&seq[i..i + motif.len()]))
            .collect()
    }
}

/// True when this build carries a non-CPU execution backend. Never fails.
pub fn is_accelerator_available() -> bool {
    cfg!(feature = "accelerator")
}

static SCALAR: ScalarKernel = ScalarKernel;
#[cfg(feature = "accelerator")]
static PARALLEL: ParallelKernel = ParallelKernel;

/// Resolves a device to its kernel. An accelerator request in a build
/// without one (or with an unknown ordinal; this build has a single unit) is
/// refused with `CapabilityUnavailable` rather than silently served by the
/// CPU.
pub(crate) fn kernel_for(device: Device) -> Result<&'static dyn ScanKernel, DesignError> {
    match device.kind {
        DeviceKind::Cpu => Ok(&SCALAR),
        #[cfg(feature = "accelerator")]
        DeviceKind::Accelerator if device.ordinal == 0 => Ok(&PARALLEL),
        DeviceKind::Accelerator => Err(DesignError::CapabilityUnavailable {
            ordinal: device.ordinal,
        }),
    }
}
