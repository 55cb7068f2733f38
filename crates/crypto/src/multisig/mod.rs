//! Threshold multisignature verification against a validator roster.
//!
//! Verification uses an ordered two-pointer match: the caller supplies
//! signatures pre-sorted by the signer's position in the roster, and a
//! single cursor advances through the roster as signers are recovered. This
//! achieves O(threshold + |roster|) total work instead of
//! O(threshold × |roster|). Callers that supply signatures out of roster
//! order will spuriously fail even with a valid quorum; that is the caller
//! contract, not a verifier bug.

mod errors;
mod roster;

pub use errors::MultisigError;
pub use roster::{ValidatorSet, WeightedValidatorSet};

use weft_primitives::Buf32;

use crate::{signature::RecoverableSignature, validator::ValidatorId};

/// Verifies that at least `threshold` roster members signed `digest`.
///
/// Examines exactly the first `threshold` signatures. Each recovered signer
/// must appear in the roster at or after the previous match, so a validator
/// can never be counted twice.
pub fn verify_threshold(
    digest: &Buf32,
    set: &ValidatorSet,
    signatures: &[RecoverableSignature],
) -> Result<(), MultisigError> {
    let threshold = set.threshold() as usize;
    if threshold == 0 {
        return Err(MultisigError::NoThreshold);
    }
    if signatures.len() < threshold {
        return Err(MultisigError::ThresholdNotMet);
    }

    let mut cursor = RosterCursor::new(set.validators());
    for sig in &signatures[..threshold] {
        let signer = sig.recover(digest)?;
        cursor.advance_to(&signer)?;
    }
    Ok(())
}

/// Weighted variant: matched validators contribute their weight, and the
/// quorum is met once accumulated weight reaches the threshold weight.
pub fn verify_weighted(
    digest: &Buf32,
    set: &WeightedValidatorSet,
    signatures: &[RecoverableSignature],
) -> Result<(), MultisigError> {
    if set.threshold_weight() == 0 {
        return Err(MultisigError::NoThreshold);
    }

    let roster: Vec<ValidatorId> = set.validators().iter().map(|(id, _)| *id).collect();
    let mut cursor = RosterCursor::new(&roster);
    let mut accumulated = 0u64;
    for sig in signatures {
        if accumulated >= set.threshold_weight() {
            break;
        }
        let signer = sig.recover(digest)?;
        let pos = cursor.advance_to(&signer)?;
        accumulated = accumulated.saturating_add(set.validators()[pos].1);
    }

    if accumulated < set.threshold_weight() {
        return Err(MultisigError::ThresholdNotMet);
    }
    Ok(())
}

/// One-way cursor over the roster.
struct RosterCursor<'r> {
    roster: &'r [ValidatorId],
    next: usize,
}

impl<'r> RosterCursor<'r> {
    fn new(roster: &'r [ValidatorId]) -> Self {
        Self { roster, next: 0 }
    }

    /// Advances through the roster until `signer` is found, returning its
    /// roster position and stepping past it. Errors with
    /// [`MultisigError::ThresholdNotMet`] when the roster is exhausted.
    fn advance_to(&mut self, signer: &ValidatorId) -> Result<usize, MultisigError> {
        while self.next < self.roster.len() && self.roster[self.next] != *signer {
            self.next += 1;
        }
        if self.next >= self.roster.len() {
            return Err(MultisigError::ThresholdNotMet);
        }
        let pos = self.next;
        self.next += 1;
        Ok(pos)
    }
}
