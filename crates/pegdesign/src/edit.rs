// Copyright 2021-2024 SecureDNA Stiftung (SecureDNA Foundation) <licensing@securedna.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Range;

use quickdna::BaseSequence;

use crate::error::DesignError;
use crate::sequence::{parse_dna, SequenceIndex};
use crate::types::{EditOperation, PrimeEditSpec, Strand};

/// Everything the enumerator needs to know about an edit spec, normalized to
/// plus-reference coordinates.
#[derive(Debug, Clone)]
pub(crate) struct EditPlan {
    /// Union bounding range of the affected reference coordinates, used for
    /// nick-distance checks. `None` when there are no operations.
    pub window: Option<Range<usize>>,
    /// The reference with every operation applied, plus orientation.
    pub edited: String,
    /// Reverse complement of `edited`.
    pub edited_rc: String,
    /// Union bounding range of the edit outcome in `edited` coordinates,
    /// used for RTT containment and PE3b classification.
    pub outcome: Option<Range<usize>>,
}

/// Affected half-open range of one operation, in the coordinate frame the
/// operation is expressed in: `pos..pos + ref.len()` for a substitution, the
/// zero-width anchor `pos..pos` for an insertion, `start..start + length`
/// for a deletion.
pub fn affected_range(op: &EditOperation) -> Range<usize> {
    match op {
        EditOperation::Substitution { pos, reference, .. } => *pos..*pos + reference.len(),
        EditOperation::Insertion { pos, .. } => *pos..*pos,
        EditOperation::Deletion { start, length } => *start..*start + *length,
    }
}

/// Nucleotide distance between a nick and the edit window: 0 inside the
/// window, otherwise the gap to the nearer boundary. A missing window (spec
/// with no operations) imposes no distance.
pub(crate) fn nick_distance(window: Option<&Range<usize>>, nick: usize) -> usize {
    match window {
        None => 0,
        Some(w) if w.start == w.end => w.start.abs_diff(nick),
        Some(w) if nick < w.start => w.start - nick,
        Some(w) if nick >= w.end => nick - (w.end - 1),
        Some(_) => 0,
    }
}

/// Resolves a spec's operations against the reference: validates positions
/// and payloads, maps minus-strand operations into plus coordinates, applies
/// everything, and records the windows downstream stages check against.
/// All failures are raised here, before any scanning work.
pub(crate) fn locate_edits(
    index: &SequenceIndex,
    spec: &PrimeEditSpec,
) -> Result<EditPlan, DesignError> {
    let len = index.len();
    let reference = index.scanning_strand(Strand::Plus);

    let mut ops = Vec::with_capacity(spec.edits.len());
    for op in &spec.edits {
        ops.push(normalize(op, spec.strand, len)?);
    }

    for op in &ops {
        if let EditOperation::Substitution {
            pos,
            reference: declared,
            ..
        } = op
        {
            let actual = &reference[*pos..*pos + declared.len()];
            if actual != declared {
                return Err(DesignError::ReferenceMismatch {
                    pos: *pos,
                    declared: declared.clone(),
                    actual: actual.to_string(),
                });
            }
        }
    }

    let mut window = None;
    for op in &ops {
        extend(&mut window, affected_range(op));
    }

    let (edited, outcome) = apply_edits(reference, &ops)?;
    let edited_dna = parse_dna(&edited, "edited sequence")?;
    Ok(EditPlan {
        window,
        edited: edited_dna.to_string(),
        edited_rc: edited_dna.reverse_complement().to_string(),
        outcome,
    })
}

/// Validates one operation and re-expresses it in plus coordinates. For a
/// minus-strand spec, positions index into the reverse complement and
/// payload bases are minus-strand bases.
fn normalize(
    op: &EditOperation,
    strand: Strand,
    len: usize,
) -> Result<EditOperation, DesignError> {
    let range = affected_range(op);
    if range.end > len {
        return Err(DesignError::InvalidPosition {
            start: range.start,
            end: range.end,
            len,
        });
    }
    match op {
        EditOperation::Substitution {
            pos,
            reference,
            alt,
        } => {
            let reference = parse_payload(reference, "substitution ref")?;
            let alt = parse_payload(alt, "substitution alt")?;
            Ok(match strand {
                Strand::Plus => EditOperation::Substitution {
                    pos: *pos,
                    reference: reference.to_string(),
                    alt: alt.to_string(),
                },
                Strand::Minus => EditOperation::Substitution {
                    pos: len - (pos + reference.len()),
                    reference: reference.reverse_complement().to_string(),
                    alt: alt.reverse_complement().to_string(),
                },
            })
        }
        EditOperation::Insertion { pos, inserted } => {
            let inserted = parse_payload(inserted, "inserted sequence")?;
            Ok(match strand {
                Strand::Plus => EditOperation::Insertion {
                    pos: *pos,
                    inserted: inserted.to_string(),
                },
                Strand::Minus => EditOperation::Insertion {
                    pos: len - pos,
                    inserted: inserted.reverse_complement().to_string(),
                },
            })
        }
        EditOperation::Deletion { start, length } => {
            if *length == 0 {
                return Err(DesignError::EmptyEdit { what: "deletion" });
            }
            Ok(match strand {
                Strand::Plus => op.clone(),
                Strand::Minus => EditOperation::Deletion {
                    start: len - (start + length),
                    length: *length,
                },
            })
        }
    }
}

fn parse_payload(
    payload: &str,
    what: &'static str,
) -> Result<quickdna::DnaSequence<quickdna::Nucleotide>, DesignError> {
    if payload.is_empty() {
        return Err(DesignError::EmptyEdit { what });
    }
    parse_dna(payload, what)
}

/// Applies plus-frame operations in ascending position order, tracking the
/// running length delta so later operations land where they should. Returns
/// the edited sequence and the bounding outcome range in its coordinates.
fn apply_edits(
    reference: &str,
    ops: &[EditOperation],
) -> Result<(String, Option<Range<usize>>), DesignError> {
    let mut order: Vec<usize> = (0..ops.len()).collect();
    order.sort_by_key(|&i| affected_range(&ops[i]).start);

    let mut edited = reference.to_string();
    let mut offset: isize = 0;
    let mut outcome = None;

    for &i in &order {
        let op = &ops[i];
        let shifted = affected_range(op).start as isize + offset;
        let start = usize::try_from(shifted).map_err(|_| DesignError::InvalidPosition {
            start: affected_range(op).start,
            end: affected_range(op).end,
            len: edited.len(),
        })?;
        match op {
            EditOperation::Substitution {
                reference: declared,
                alt,
                ..
            } => {
                let end = start + declared.len();
                if end > edited.len() {
                    return Err(DesignError::InvalidPosition {
                        start,
                        end,
                        len: edited.len(),
                    });
                }
                edited.replace_range(start..end, alt);
                offset += alt.len() as isize - declared.len() as isize;
                extend(&mut outcome, start..start + alt.len());
            }
            EditOperation::Insertion { inserted, .. } => {
                if start > edited.len() {
                    return Err(DesignError::InvalidPosition {
                        start,
                        end: start,
                        len: edited.len(),
                    });
                }
                edited.insert_str(start, inserted);
                offset += inserted.len() as isize;
                extend(&mut outcome, start..start + inserted.len());
            }
            EditOperation::Deletion { length, .. } => {
                let end = start + length;
                if end > edited.len() {
                    return Err(DesignError::InvalidPosition {
                        start,
                        end,
                        len: edited.len(),
                    });
                }
                edited.replace_range(start..end, "");
                offset -= *length as isize;
                extend(&mut outcome, start..start);
            }
        }
    }
    Ok((edited, outcome))
}

fn extend(acc: &mut Option<Range<usize>>, range: Range<usize>) {
    match acc {
        Some(current) => {
            current.start = current.start.min(range.start);
            current.end = current.end.max(range.end);
        }
        None => *acc = Some(range),
    }
}
