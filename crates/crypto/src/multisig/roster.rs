//! Validator roster configuration.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{multisig::errors::MultisigError, validator::ValidatorId};

/// A per-origin validator roster plus the signature count required to
/// accept a checkpoint.
///
/// Roster ordering is significant: signature sets presented for
/// verification must be sorted into the same order.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
pub struct ValidatorSet {
    validators: Vec<ValidatorId>,
    threshold: u8,
}

impl ValidatorSet {
    /// Creates a new roster, validating `1 <= threshold <= |validators|`.
    pub fn try_new(validators: Vec<ValidatorId>, threshold: u8) -> Result<Self, MultisigError> {
        if validators.is_empty() {
            return Err(MultisigError::EmptyValidators);
        }
        if threshold == 0 {
            return Err(MultisigError::NoThreshold);
        }
        if threshold as usize > validators.len() {
            return Err(MultisigError::InvalidThreshold {
                threshold: threshold as u64,
                available: validators.len() as u64,
            });
        }
        Ok(Self {
            validators,
            threshold,
        })
    }

    pub fn validators(&self) -> &[ValidatorId] {
        &self.validators
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl<'a> Arbitrary<'a> for ValidatorSet {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let count = u.int_in_range(1..=20)?;
        let mut validators = Vec::with_capacity(count);
        for _ in 0..count {
            validators.push(ValidatorId::arbitrary(u)?);
        }
        let threshold = u.int_in_range(1..=count as u8)?;
        Ok(Self {
            validators,
            threshold,
        })
    }
}

/// Weighted roster: each validator carries a weight, and a quorum requires
/// accumulated weight to reach `threshold_weight`.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize, Deserialize, Serialize)]
pub struct WeightedValidatorSet {
    validators: Vec<(ValidatorId, u64)>,
    threshold_weight: u64,
}

impl WeightedValidatorSet {
    /// Creates a new weighted roster, validating that the threshold weight
    /// is nonzero and attainable.
    pub fn try_new(
        validators: Vec<(ValidatorId, u64)>,
        threshold_weight: u64,
    ) -> Result<Self, MultisigError> {
        if validators.is_empty() {
            return Err(MultisigError::EmptyValidators);
        }
        if threshold_weight == 0 {
            return Err(MultisigError::NoThreshold);
        }
        let total: u64 = validators.iter().map(|(_, w)| *w).sum();
        if threshold_weight > total {
            return Err(MultisigError::InvalidThreshold {
                threshold: threshold_weight,
                available: total,
            });
        }
        Ok(Self {
            validators,
            threshold_weight,
        })
    }

    pub fn validators(&self) -> &[(ValidatorId, u64)] {
        &self.validators
    }

    pub fn threshold_weight(&self) -> u64 {
        self.threshold_weight
    }
}
