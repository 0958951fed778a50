// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use pegdesign::{
    design, design_batch, ConfigError, DesignConfig, DesignError, Device, EditOperation,
    PrimeEditSpec, Strand,
};

const REFERENCE: &str = "ACGTACCGACGTACGTACGTGGGACGTACGTACGTAC";

fn canonical_spec() -> PrimeEditSpec {
    PrimeEditSpec {
        id: "canonical-sub".to_string(),
        ref_sequence: REFERENCE.to_string(),
        edits: vec![EditOperation::Substitution {
            pos: 25,
            reference: "G".to_string(),
            alt: "A".to_string(),
        }],
        strand: Strand::Plus,
    }
}

fn canonical_config() -> DesignConfig {
    DesignConfig {
        pbs_min_len: 10,
        pbs_max_len: 12,
        rtt_min_len: 12,
        rtt_max_len: 18,
        max_nick_to_edit_distance: 25,
        design_ngrna: true,
        ..Default::default()
    }
}

#[test]
fn canonical_substitution_vector() {
    let candidates = design(&canonical_spec(), &canonical_config(), Device::cpu()).unwrap();

    // One plus-strand site survives (nick 17); the minus-strand site at nick
    // 10 has no room for a 12-base template. 3 PBS lengths x 7 RTT lengths.
    assert_eq!(candidates.len(), 21);

    let first = &candidates[0];
    assert_eq!(first.peg.spacer, "ACGTACCGACGTACGTACGT");
    assert_eq!(first.peg.cut_index, 17);
    assert_eq!(first.peg.pbs, "TACGTACGTC");
    assert_eq!(first.peg.rtt, "CGTGGGACATAC");
    assert_eq!(first.heuristics.edit_distance_from_nick, 8);
    assert_eq!(first.heuristics.pbs_gc, 0.5);
    assert!(!first.heuristics.flag_pbs_gc_extreme);
    assert!(!first.heuristics.flag_edit_far);

    let ngrna = first.ngrna.as_ref().expect("companion nick expected");
    assert_eq!(ngrna.spacer, "TACGTCCCACGTACGTACGT");
    assert_eq!(ngrna.cut_index, 10);
    assert!(!ngrna.is_pe3b);

    for candidate in &candidates {
        assert_eq!(candidate.peg.spacer.len(), 20);
        assert!((10..=12).contains(&candidate.peg.pbs.len()));
        assert!((12..=18).contains(&candidate.peg.rtt.len()));
        assert!(candidate.heuristics.edit_distance_from_nick <= 25);
        assert!(candidate.ngrna.is_some());
        // The RTT always carries the edited base, 8 positions past the nick.
        assert_eq!(candidate.peg.rtt.as_bytes()[8], b'A');
    }
}

#[test]
fn candidates_come_back_in_the_documented_order() {
    let candidates = design(&canonical_spec(), &canonical_config(), Device::cpu()).unwrap();

    let mut expected = Vec::new();
    for pbs_len in 10..=12 {
        for rtt_len in 12..=18 {
            expected.push((pbs_len, rtt_len));
        }
    }
    let actual: Vec<_> = candidates
        .iter()
        .map(|c| (c.peg.pbs.len(), c.peg.rtt.len()))
        .collect();
    assert_eq!(actual, expected);

    let nicks: Vec<_> = candidates.iter().map(|c| c.peg.cut_index).collect();
    let mut sorted = nicks.clone();
    sorted.sort_unstable();
    assert_eq!(nicks, sorted);
}

#[test]
fn design_is_deterministic() {
    let spec = canonical_spec();
    let config = canonical_config();
    let first = design(&spec, &config, Device::cpu()).unwrap();
    let second = design(&spec, &config, Device::cpu()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn batch_is_observationally_equivalent_to_independent_calls() {
    let specs = vec![
        canonical_spec(),
        PrimeEditSpec {
            id: "no-edits".to_string(),
            ref_sequence: REFERENCE.to_string(),
            edits: vec![],
            strand: Strand::Plus,
        },
    ];
    let config = canonical_config();

    let batch = design_batch(&specs, &config, Device::cpu()).unwrap();
    assert_eq!(batch.len(), specs.len());
    for (spec, result) in specs.iter().zip(&batch) {
        assert_eq!(result, &design(spec, &config, Device::cpu()));
    }
}

#[test]
fn batch_isolates_per_spec_failures() {
    let mut bad = canonical_spec();
    bad.id = "mismatch".to_string();
    bad.edits = vec![EditOperation::Substitution {
        pos: 25,
        reference: "T".to_string(),
        alt: "A".to_string(),
    }];
    let specs = vec![canonical_spec(), bad, canonical_spec()];

    let batch = design_batch(&specs, &canonical_config(), Device::cpu()).unwrap();
    assert!(batch[0].is_ok());
    assert!(matches!(
        &batch[1],
        Err(DesignError::ReferenceMismatch { pos: 25, .. })
    ));
    assert!(batch[2].is_ok());
    assert_eq!(batch[0], batch[2]);
}

#[test]
fn inverted_bounds_fail_before_any_scanning() {
    let config = DesignConfig {
        pbs_min_len: 12,
        pbs_max_len: 10,
        ..Default::default()
    };
    let err = design(&canonical_spec(), &config, Device::cpu()).unwrap_err();
    assert_eq!(
        err,
        DesignError::Config(ConfigError::PbsBounds { min: 12, max: 10 })
    );
}

#[test]
fn zero_edit_specs_still_design_structural_candidates() {
    let spec = PrimeEditSpec {
        id: "no-edits".to_string(),
        ref_sequence: REFERENCE.to_string(),
        edits: vec![],
        strand: Strand::Plus,
    };
    let candidates = design(&spec, &canonical_config(), Device::cpu()).unwrap();
    assert!(!candidates.is_empty());
    for candidate in &candidates {
        assert_eq!(candidate.heuristics.edit_distance_from_nick, 0);
        assert!(!candidate.heuristics.flag_edit_far);
    }
    // With no edit window, every opposite-strand nick qualifies.
    assert!(candidates[0].ngrna.is_some());

    // No PAM matches at all is an empty result, not an error.
    let bare = PrimeEditSpec {
        id: "no-pams".to_string(),
        ref_sequence: "ACGT".repeat(10),
        edits: vec![],
        strand: Strand::Plus,
    };
    assert_eq!(
        design(&bare, &canonical_config(), Device::cpu()).unwrap(),
        vec![]
    );
}

#[test]
fn minus_strand_deletion_designs_across_the_junction() {
    let spec = PrimeEditSpec {
        id: "e2e-del".to_string(),
        ref_sequence: "TTTACGTACCGACGTACGTCCGTTTGGGACGTACGTACGTACGTT".to_string(),
        // Minus-strand coordinates: plus-frame range 24..27.
        edits: vec![EditOperation::Deletion {
            start: 18,
            length: 3,
        }],
        strand: Strand::Minus,
    };
    let config = DesignConfig {
        pbs_min_len: 10,
        pbs_max_len: 15,
        rtt_min_len: 12,
        rtt_max_len: 25,
        max_nick_to_edit_distance: 30,
        design_ngrna: true,
        ..Default::default()
    };

    let candidates = design(&spec, &config, Device::cpu()).unwrap();
    assert!(!candidates.is_empty());

    let first = &candidates[0];
    assert_eq!(first.peg.spacer.len(), 20);
    assert_eq!(first.peg.cut_index, 21);
    // The 12-base template reads straight across the deletion junction.
    assert_eq!(first.peg.rtt, "GTTGACGTACGT");
    assert_eq!(first.heuristics.edit_distance_from_nick, 3);

    // The nearest opposite-strand nick sits inside the deleted window's
    // flank at 24, within the RTT footprint: a PE3b placement.
    let ngrna = first.ngrna.as_ref().expect("companion nick expected");
    assert_eq!(ngrna.cut_index, 24);
    assert!(ngrna.is_pe3b);

    for candidate in &candidates {
        assert!(candidate.peg.rtt.len() >= 12);
        assert!(candidate.heuristics.edit_distance_from_nick <= 30);
    }
}

#[test]
fn insertions_are_encoded_in_the_template() {
    let spec = PrimeEditSpec {
        id: "ins".to_string(),
        ref_sequence: REFERENCE.to_string(),
        edits: vec![EditOperation::Insertion {
            pos: 25,
            inserted: "TTT".to_string(),
        }],
        strand: Strand::Plus,
    };
    let candidates = design(&spec, &canonical_config(), Device::cpu()).unwrap();
    assert_eq!(candidates.len(), 21);
    assert_eq!(candidates[0].peg.rtt, "CGTGGGACTTTG");
}

#[test]
fn invalid_reference_symbols_fail_fast() {
    let spec = PrimeEditSpec {
        id: "bad-ref".to_string(),
        ref_sequence: "ACGTNACGT".to_string(),
        edits: vec![],
        strand: Strand::Plus,
    };
    let err = design(&spec, &canonical_config(), Device::cpu()).unwrap_err();
    assert_eq!(
        err,
        DesignError::InvalidSequence {
            what: "reference sequence",
            symbol: 'N',
            position: 4,
        }
    );
}
