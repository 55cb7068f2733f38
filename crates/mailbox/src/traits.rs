//! Seams to external collaborators.

use thiserror::Error;
use weft_crypto::ValidatorSet;
use weft_primitives::{Buf32, DomainId};

/// Read-only lookup of the validator roster agreed for an origin domain.
///
/// Roster membership is managed elsewhere; the engine only consumes it.
pub trait RosterSource {
    /// The roster and threshold for `origin`, if one is configured.
    fn roster(&self, origin: DomainId) -> Option<&ValidatorSet>;
}

impl RosterSource for std::collections::HashMap<DomainId, ValidatorSet> {
    fn roster(&self, origin: DomainId) -> Option<&ValidatorSet> {
        self.get(&origin)
    }
}

/// Failure raised by a recipient handler.
///
/// Caught at the process boundary and reported as an unsuccessful delivery
/// outcome; never propagated as a failure of `process` itself.
#[derive(Debug, Error)]
#[error("recipient failed: {reason}")]
pub struct RecipientError {
    reason: String,
}

impl RecipientError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A message recipient's handler capability.
///
/// The engine does not interpret `body`; it delivers it along with the
/// origin context and reports whatever comes back.
pub trait MessageRecipient {
    /// Handles a delivered message, returning diagnostic/return data.
    fn handle(
        &mut self,
        origin: DomainId,
        sender: Buf32,
        body: &[u8],
    ) -> Result<Vec<u8>, RecipientError>;
}

/// Maps 32-byte recipient identifiers to live handlers.
///
/// A recipient that resolves to nothing (never deployed) is treated as
/// vacuous delivery success.
pub trait RecipientResolver {
    /// The handler registered under `recipient`, if any.
    fn resolve(&mut self, recipient: Buf32) -> Option<&mut dyn MessageRecipient>;
}
