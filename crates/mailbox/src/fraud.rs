//! Fraud evidence judging.
//!
//! These two checks are the only paths that halt an outbound instance. Both
//! take validator-signed checkpoints as evidence; evidence whose quorum does
//! not verify is inadmissible and changes nothing. Admissible evidence of
//! fraud fails the instance permanently, after which every mutating
//! operation on it is refused.

use tracing::warn;
use weft_checkpoint_types::{message_id_digest, SignedCheckpoint};
use weft_crypto::{verify_threshold, ValidatorSet};

use crate::{errors::MailboxError, outbox::Outbox};

/// Judges a checkpoint the validators signed but the outbox never produced.
///
/// Validators may only attest roots the outbox recorded via its own
/// checkpoint operation. A valid quorum over any (root, index) pair absent
/// from the outbox's history convicts the quorum; the claim cannot be an
/// honest observation.
///
/// Returns `Ok(true)` and halts the outbox when the evidence proves fraud,
/// `Ok(false)` when the claim matches the recorded history.
pub fn check_improper_checkpoint(
    outbox: &mut Outbox,
    signed: &SignedCheckpoint,
    set: &ValidatorSet,
) -> Result<bool, MailboxError> {
    let checkpoint = signed.checkpoint();
    let digest = message_id_digest(&outbox.context(), &checkpoint);
    verify_threshold(&digest, set, signed.signatures())
        .map_err(MailboxError::InvalidValidatorSignature)?;

    if outbox.checkpointed_root(checkpoint.index()) == Some(checkpoint.root()) {
        return Ok(false);
    }

    warn!(
        index = checkpoint.index(),
        root = %checkpoint.root(),
        "improper checkpoint, halting outbox"
    );
    outbox.fail();
    Ok(true)
}

/// Judges two validly signed checkpoints at the same index with different
/// roots.
///
/// The accumulator assigns exactly one root per index, so at most one of
/// the two claims can be honest. Conviction does not consult history; the
/// contradiction alone suffices.
pub fn check_double_checkpoint(
    outbox: &mut Outbox,
    first: &SignedCheckpoint,
    second: &SignedCheckpoint,
    set: &ValidatorSet,
) -> Result<bool, MailboxError> {
    let ctx = outbox.context();
    let a = first.checkpoint();
    let b = second.checkpoint();
    verify_threshold(&message_id_digest(&ctx, &a), set, first.signatures())
        .map_err(MailboxError::InvalidValidatorSignature)?;
    verify_threshold(&message_id_digest(&ctx, &b), set, second.signatures())
        .map_err(MailboxError::InvalidValidatorSignature)?;

    if a.index() != b.index() || a.root() == b.root() {
        return Ok(false);
    }

    warn!(
        index = a.index(),
        first = %a.root(),
        second = %b.root(),
        "double checkpoint, halting outbox"
    );
    outbox.fail();
    Ok(true)
}
