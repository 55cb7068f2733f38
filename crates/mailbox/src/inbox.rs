//! Destination-side checkpoint acceptance, inclusion proving, and delivery.

use std::collections::HashMap;

use tracing::{info, warn};
use weft_checkpoint_types::{
    merkle_root_digest, message_id_digest, Checkpoint, CheckpointContext, DigestScheme,
};
use weft_crypto::{verify_threshold, RecoverableSignature};
use weft_merkle::branch_root;
use weft_msg_types::Message;
use weft_primitives::{
    constants::{MESSAGE_VERSION, TREE_DEPTH},
    Buf32, DomainId,
};

use crate::{
    errors::MailboxError,
    state::InstanceState,
    traits::{RecipientResolver, RosterSource},
};

/// A validator-signed checkpoint claim, shaped for one digest scheme.
///
/// The inbound instance is configured for exactly one scheme at
/// construction; a submission of the other shape is rejected outright.
#[derive(Clone, Debug)]
pub enum CheckpointSubmission {
    /// A checkpoint signed under the raw-root digest.
    MessageId(Checkpoint),
    /// A checkpoint reconstructed from an inclusion proof of `message_id`,
    /// signed under the proof-binding digest.
    MerkleRoot {
        /// Identity hash of the message the proof opens.
        message_id: Buf32,
        /// Sibling path from the leaf to the root.
        path: Box<[Buf32; TREE_DEPTH]>,
        /// Leaf position the proof opens.
        message_index: u32,
        /// Index of the checkpoint the quorum signed. May be later than
        /// `message_index`: a signature on checkpoint `s` retroactively
        /// attests any message at `m <= s`.
        signed_index: u32,
    },
}

/// Delivery progress of a single message id.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DeliveryState {
    /// Never proven here.
    #[default]
    None,
    /// Inclusion proven against an accepted checkpoint; awaiting process.
    Pending,
    /// Delivered (or vacuously settled). Terminal.
    Processed,
}

/// What happened when a pending message was processed.
///
/// Recipient-internal failure is an outcome, not an error: the message is
/// settled either way and cannot be replayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcessOutcome {
    id: Buf32,
    success: bool,
    return_data: Vec<u8>,
}

impl ProcessOutcome {
    /// Identity hash of the processed message.
    pub fn id(&self) -> Buf32 {
        self.id
    }

    /// Whether the recipient handler completed without error.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Data the handler returned, empty on failure or vacuous delivery.
    pub fn return_data(&self) -> &[u8] {
        &self.return_data
    }
}

/// Budget parameters an inbound instance enforces on delivery.
#[derive(Copy, Clone, Debug)]
pub struct InboxConfig {
    /// Budget forwarded to the recipient handler.
    pub process_budget: u64,
    /// Overhead reserved for the instance's own bookkeeping, on top of the
    /// process budget.
    pub reserve_budget: u64,
}

impl InboxConfig {
    /// Minimum budget a caller must supply to `process`.
    pub fn required_budget(&self) -> u64 {
        self.process_budget.saturating_add(self.reserve_budget)
    }
}

/// Destination-side mirror of one remote outbox.
///
/// Tracks every checkpoint root a validator quorum has attested, the
/// delivery state of every message id ever proven against one, and performs
/// at-most-once delivery to recipient handlers.
#[derive(Debug)]
pub struct Inbox<R> {
    local_domain: DomainId,
    ctx: CheckpointContext,
    scheme: DigestScheme,
    rosters: R,
    config: InboxConfig,
    state: InstanceState,
    latest_index: Option<u32>,
    /// Accepted checkpoint roots, each with the index it was signed at.
    accepted: HashMap<Buf32, u32>,
    deliveries: HashMap<Buf32, DeliveryState>,
}

impl<R: RosterSource> Inbox<R> {
    /// Creates an inbound instance mirroring the remote outbox described by
    /// `ctx`, verifying quorums from `rosters` under `scheme`.
    pub fn new(
        local_domain: DomainId,
        ctx: CheckpointContext,
        scheme: DigestScheme,
        rosters: R,
        config: InboxConfig,
    ) -> Self {
        Self {
            local_domain,
            ctx,
            scheme,
            rosters,
            config,
            state: InstanceState::default(),
            latest_index: None,
            accepted: HashMap::new(),
            deliveries: HashMap::new(),
        }
    }

    /// The domain this instance delivers into.
    pub fn local_domain(&self) -> DomainId {
        self.local_domain
    }

    /// Context of the remote outbox this instance mirrors.
    pub fn context(&self) -> CheckpointContext {
        self.ctx
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Index of the most recently accepted checkpoint, if any.
    pub fn latest_index(&self) -> Option<u32> {
        self.latest_index
    }

    /// Delivery state of a message id. Ids never seen report
    /// [`DeliveryState::None`].
    pub fn delivery_state(&self, id: &Buf32) -> DeliveryState {
        self.deliveries.get(id).copied().unwrap_or_default()
    }

    /// Whether `root` was accepted by some earlier checkpoint submission.
    pub fn is_accepted_root(&self, root: &Buf32) -> bool {
        self.accepted.contains_key(root)
    }

    /// Verifies a validator quorum over a checkpoint claim and records its
    /// root as accepted.
    ///
    /// Signatures must be ordered by the signer's roster position. A failed
    /// quorum rejects only this submission; the instance stays active and
    /// later submissions are unaffected.
    pub fn submit_checkpoint(
        &mut self,
        submission: &CheckpointSubmission,
        signatures: &[RecoverableSignature],
    ) -> Result<Checkpoint, MailboxError> {
        if self.state.is_failed() {
            return Err(MailboxError::InstanceFailed);
        }

        let (checkpoint, digest) = match (self.scheme, submission) {
            (DigestScheme::MessageId, CheckpointSubmission::MessageId(cp)) => {
                (*cp, message_id_digest(&self.ctx, cp))
            }
            (
                DigestScheme::MerkleRoot,
                CheckpointSubmission::MerkleRoot {
                    message_id,
                    path,
                    message_index,
                    signed_index,
                },
            ) => {
                let root = branch_root(message_id, path, *message_index);
                let digest = merkle_root_digest(
                    &self.ctx,
                    *message_id,
                    path,
                    *message_index,
                    *signed_index,
                );
                (Checkpoint::new(root, *signed_index), digest)
            }
            _ => return Err(MailboxError::SchemeMismatch),
        };

        if let Some(last) = self.latest_index {
            if checkpoint.index() <= last {
                return Err(MailboxError::StaleCheckpoint {
                    got: checkpoint.index(),
                    last,
                });
            }
        }

        let origin = self.ctx.origin();
        let set = self
            .rosters
            .roster(origin)
            .ok_or(MailboxError::UnknownOrigin(origin))?;
        verify_threshold(&digest, set, signatures)
            .map_err(MailboxError::InvalidValidatorSignature)?;

        self.accepted.insert(checkpoint.root(), checkpoint.index());
        self.latest_index = Some(checkpoint.index());
        info!(origin, index = checkpoint.index(), root = %checkpoint.root(), "accepted checkpoint");
        Ok(checkpoint)
    }

    /// Proves inclusion of the message id `leaf` under some accepted
    /// checkpoint root, moving it to [`DeliveryState::Pending`] on success.
    ///
    /// Returns `Ok(false)` when the recomputed root is simply not (yet)
    /// accepted; the same proof may succeed after a later checkpoint lands.
    /// Proving is one-way: a pending or processed id cannot be re-proven.
    pub fn prove(
        &mut self,
        leaf: Buf32,
        path: &[Buf32; TREE_DEPTH],
        index: u32,
    ) -> Result<bool, MailboxError> {
        if self.state.is_failed() {
            return Err(MailboxError::InstanceFailed);
        }
        if self.delivery_state(&leaf) != DeliveryState::None {
            return Err(MailboxError::AlreadyProcessedOrPending);
        }

        let root = branch_root(&leaf, path, index);
        if !self.accepted.contains_key(&root) {
            return Ok(false);
        }

        self.deliveries.insert(leaf, DeliveryState::Pending);
        Ok(true)
    }

    /// Delivers a pending message to its recipient handler, at most once.
    ///
    /// The message is marked processed before the handler runs, so a
    /// reentrant or failing handler can never cause redelivery. A recipient
    /// id with no registered handler settles as vacuous success.
    pub fn process(
        &mut self,
        message: &Message,
        supplied_budget: u64,
        resolver: &mut dyn RecipientResolver,
    ) -> Result<ProcessOutcome, MailboxError> {
        if self.state.is_failed() {
            return Err(MailboxError::InstanceFailed);
        }
        if message.version != MESSAGE_VERSION {
            return Err(MailboxError::UnsupportedVersion {
                got: message.version,
                expected: MESSAGE_VERSION,
            });
        }

        let id = message.id();
        match self.delivery_state(&id) {
            DeliveryState::Pending => {}
            DeliveryState::Processed => return Err(MailboxError::AlreadyProcessedOrPending),
            DeliveryState::None => return Err(MailboxError::NotProven),
        }

        if message.destination != self.local_domain {
            return Err(MailboxError::WrongDestination {
                got: message.destination,
                local: self.local_domain,
            });
        }

        let required = self.config.required_budget();
        if supplied_budget < required {
            return Err(MailboxError::InsufficientBudget {
                supplied: supplied_budget,
                required,
            });
        }

        // Settle before touching the recipient.
        self.deliveries.insert(id, DeliveryState::Processed);

        let outcome = match resolver.resolve(message.recipient) {
            Some(handler) => match handler.handle(message.origin, message.sender, &message.body) {
                Ok(return_data) => ProcessOutcome {
                    id,
                    success: true,
                    return_data,
                },
                Err(err) => {
                    warn!(%id, reason = err.reason(), "recipient handler failed");
                    ProcessOutcome {
                        id,
                        success: false,
                        return_data: Vec::new(),
                    }
                }
            },
            // Nothing registered under this recipient id. The message is
            // settled so it cannot block the queue forever.
            None => ProcessOutcome {
                id,
                success: true,
                return_data: Vec::new(),
            },
        };

        info!(%id, success = outcome.success, "processed message");
        Ok(outcome)
    }

    /// Permanently halts this instance.
    ///
    /// Reserved to the accountability component (see [`crate::fraud`]);
    /// once set, every mutating operation fails forever.
    pub fn fail(&mut self) {
        warn!(origin = self.ctx.origin(), "inbound instance failed");
        self.state = InstanceState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use weft_crypto::test_utils::{sign_all, signer_roster, TestSigner};
    use weft_crypto::ValidatorSet;
    use weft_merkle::Prover;

    use super::*;
    use crate::traits::{MessageRecipient, RecipientError};

    const ORIGIN: DomainId = 1000;
    const LOCAL: DomainId = 2000;

    fn tree_id() -> Buf32 {
        Buf32::new([0x11; 32])
    }

    fn rosters(signers: &[TestSigner], threshold: u8) -> HashMap<DomainId, ValidatorSet> {
        let set =
            ValidatorSet::try_new(signers.iter().map(|s| s.id()).collect(), threshold).unwrap();
        HashMap::from([(ORIGIN, set)])
    }

    fn inbox(
        signers: &[TestSigner],
        threshold: u8,
        scheme: DigestScheme,
    ) -> Inbox<HashMap<DomainId, ValidatorSet>> {
        Inbox::new(
            LOCAL,
            CheckpointContext::new(ORIGIN, tree_id()),
            scheme,
            rosters(signers, threshold),
            InboxConfig {
                process_budget: 90,
                reserve_budget: 10,
            },
        )
    }

    fn message(nonce: u32) -> Message {
        Message {
            version: MESSAGE_VERSION,
            nonce,
            origin: ORIGIN,
            sender: Buf32::new([0xaa; 32]),
            destination: LOCAL,
            recipient: Buf32::new([0xbb; 32]),
            body: b"payload".to_vec(),
        }
    }

    struct TestRecipient {
        calls: u32,
        fail: bool,
    }

    impl MessageRecipient for TestRecipient {
        fn handle(
            &mut self,
            _origin: DomainId,
            _sender: Buf32,
            body: &[u8],
        ) -> Result<Vec<u8>, RecipientError> {
            self.calls += 1;
            if self.fail {
                return Err(RecipientError::new("handler refused"));
            }
            Ok(body.to_vec())
        }
    }

    struct SingleResolver {
        recipient: Buf32,
        handler: TestRecipient,
    }

    impl RecipientResolver for SingleResolver {
        fn resolve(&mut self, recipient: Buf32) -> Option<&mut dyn MessageRecipient> {
            if recipient == self.recipient {
                Some(&mut self.handler)
            } else {
                None
            }
        }
    }

    /// Builds an accepted message-id checkpoint over `ids` and returns a
    /// prover positioned on the same leaves.
    fn accept_checkpoint(
        inbox: &mut Inbox<HashMap<DomainId, ValidatorSet>>,
        signers: &[TestSigner],
        ids: &[Buf32],
    ) -> Prover {
        let mut prover = Prover::default();
        for id in ids {
            prover.ingest(*id);
        }
        let cp = Checkpoint::new(prover.root(), ids.len() as u32 - 1);
        let digest = message_id_digest(&inbox.context(), &cp);
        let sigs = sign_all(signers, &digest);
        inbox
            .submit_checkpoint(&CheckpointSubmission::MessageId(cp), &sigs)
            .unwrap();
        prover
    }

    #[test]
    fn test_submit_and_stale_rejection() {
        let signers = signer_roster(4);
        let mut inbox = inbox(&signers, 3, DigestScheme::MessageId);

        let cp = Checkpoint::new(Buf32::new([0x42; 32]), 7);
        let digest = message_id_digest(&inbox.context(), &cp);
        let sigs = sign_all(&signers[..3], &digest);
        inbox
            .submit_checkpoint(&CheckpointSubmission::MessageId(cp), &sigs)
            .unwrap();
        assert!(inbox.is_accepted_root(&cp.root()));
        assert_eq!(inbox.latest_index(), Some(7));

        // Same index again is stale, even with a fresh quorum.
        let err = inbox
            .submit_checkpoint(&CheckpointSubmission::MessageId(cp), &sigs)
            .unwrap_err();
        assert!(matches!(
            err,
            MailboxError::StaleCheckpoint { got: 7, last: 7 }
        ));
    }

    #[test]
    fn test_scheme_mismatch() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MerkleRoot);

        let cp = Checkpoint::new(Buf32::new([0x42; 32]), 0);
        let err = inbox
            .submit_checkpoint(&CheckpointSubmission::MessageId(cp), &[])
            .unwrap_err();
        assert!(matches!(err, MailboxError::SchemeMismatch));
    }

    #[test]
    fn test_unknown_origin() {
        let signers = signer_roster(3);
        let mut inbox = Inbox::new(
            LOCAL,
            CheckpointContext::new(ORIGIN, tree_id()),
            DigestScheme::MessageId,
            HashMap::new(),
            InboxConfig {
                process_budget: 1,
                reserve_budget: 0,
            },
        );
        let cp = Checkpoint::new(Buf32::new([0x42; 32]), 0);
        let digest = message_id_digest(&inbox.context(), &cp);
        let sigs = sign_all(&signers, &digest);
        let err = inbox
            .submit_checkpoint(&CheckpointSubmission::MessageId(cp), &sigs)
            .unwrap_err();
        assert!(matches!(err, MailboxError::UnknownOrigin(ORIGIN)));
    }

    #[test]
    fn test_bad_quorum_keeps_instance_active() {
        let signers = signer_roster(4);
        let mut inbox = inbox(&signers, 3, DigestScheme::MessageId);

        let cp = Checkpoint::new(Buf32::new([0x42; 32]), 3);
        // Quorum over the wrong digest: signers attested different material.
        let wrong = weft_primitives::hash::raw(b"unrelated");
        let sigs = sign_all(&signers[..3], &wrong);
        let err = inbox
            .submit_checkpoint(&CheckpointSubmission::MessageId(cp), &sigs)
            .unwrap_err();
        assert!(matches!(err, MailboxError::InvalidValidatorSignature(_)));
        assert!(!inbox.state().is_failed());

        // The very same checkpoint goes through with a proper quorum.
        let digest = message_id_digest(&inbox.context(), &cp);
        let sigs = sign_all(&signers[..3], &digest);
        inbox
            .submit_checkpoint(&CheckpointSubmission::MessageId(cp), &sigs)
            .unwrap();
    }

    #[test]
    fn test_merkle_root_submission() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MerkleRoot);

        let first = message(0);
        let second = message(1);
        let mut prover = Prover::default();
        prover.ingest(first.id());
        prover.ingest(second.id());
        let signed_index = 1;

        // The quorum signs checkpoint 1 through a proof of the earlier
        // message at leaf 0: the later root retroactively attests it.
        let proof = prover.prove(0).unwrap();
        let digest =
            merkle_root_digest(&inbox.context(), first.id(), proof.path(), 0, signed_index);
        let sigs = sign_all(&signers[..2], &digest);
        let cp = inbox
            .submit_checkpoint(
                &CheckpointSubmission::MerkleRoot {
                    message_id: first.id(),
                    path: Box::new(*proof.path()),
                    message_index: 0,
                    signed_index,
                },
                &sigs,
            )
            .unwrap();
        assert_eq!(cp.root(), prover.root());
        // Acceptance is recorded at the signed checkpoint index, not the
        // proof position.
        assert_eq!(cp.index(), signed_index);
        assert_eq!(inbox.latest_index(), Some(signed_index));

        // Both messages prove against the accepted root.
        assert!(inbox.prove(first.id(), proof.path(), 0).unwrap());
        let second_proof = prover.prove(1).unwrap();
        assert!(inbox.prove(second.id(), second_proof.path(), 1).unwrap());
    }

    #[test]
    fn test_prove_process_exactly_once() {
        let signers = signer_roster(4);
        let mut inbox = inbox(&signers, 3, DigestScheme::MessageId);

        let msg = message(0);
        let id = msg.id();
        let prover = accept_checkpoint(&mut inbox, &signers[..3], &[id]);
        let proof = prover.prove(0).unwrap();

        assert_eq!(inbox.delivery_state(&id), DeliveryState::None);
        assert!(inbox.prove(id, proof.path(), 0).unwrap());
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Pending);

        // Re-proving a pending message is refused.
        let err = inbox.prove(id, proof.path(), 0).unwrap_err();
        assert!(matches!(err, MailboxError::AlreadyProcessedOrPending));

        let mut resolver = SingleResolver {
            recipient: msg.recipient,
            handler: TestRecipient {
                calls: 0,
                fail: false,
            },
        };
        let outcome = inbox.process(&msg, 100, &mut resolver).unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.return_data(), b"payload");
        assert_eq!(resolver.handler.calls, 1);
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Processed);

        // Second delivery attempt is refused without reaching the handler.
        let err = inbox.process(&msg, 100, &mut resolver).unwrap_err();
        assert!(matches!(err, MailboxError::AlreadyProcessedOrPending));
        assert_eq!(resolver.handler.calls, 1);
    }

    #[test]
    fn test_failed_handler_still_settles() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MessageId);

        let msg = message(0);
        let id = msg.id();
        let prover = accept_checkpoint(&mut inbox, &signers[..2], &[id]);
        let proof = prover.prove(0).unwrap();
        assert!(inbox.prove(id, proof.path(), 0).unwrap());

        let mut resolver = SingleResolver {
            recipient: msg.recipient,
            handler: TestRecipient {
                calls: 0,
                fail: true,
            },
        };
        let outcome = inbox.process(&msg, 100, &mut resolver).unwrap();
        assert!(!outcome.success());
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Processed);
    }

    #[test]
    fn test_unresolvable_recipient_is_vacuous_success() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MessageId);

        let msg = message(0);
        let id = msg.id();
        let prover = accept_checkpoint(&mut inbox, &signers[..2], &[id]);
        let proof = prover.prove(0).unwrap();
        assert!(inbox.prove(id, proof.path(), 0).unwrap());

        let mut resolver = SingleResolver {
            recipient: Buf32::new([0xcd; 32]),
            handler: TestRecipient {
                calls: 0,
                fail: false,
            },
        };
        let outcome = inbox.process(&msg, 100, &mut resolver).unwrap();
        assert!(outcome.success());
        assert!(outcome.return_data().is_empty());
        assert_eq!(resolver.handler.calls, 0);
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Processed);
    }

    #[test]
    fn test_insufficient_budget_keeps_pending() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MessageId);

        let msg = message(0);
        let id = msg.id();
        let prover = accept_checkpoint(&mut inbox, &signers[..2], &[id]);
        let proof = prover.prove(0).unwrap();
        assert!(inbox.prove(id, proof.path(), 0).unwrap());

        let mut resolver = SingleResolver {
            recipient: msg.recipient,
            handler: TestRecipient {
                calls: 0,
                fail: false,
            },
        };

        // Under the required budget: rejected, still pending.
        let err = inbox.process(&msg, 99, &mut resolver).unwrap_err();
        assert!(matches!(
            err,
            MailboxError::InsufficientBudget {
                supplied: 99,
                required: 100
            }
        ));
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Pending);

        assert!(inbox.process(&msg, 100, &mut resolver).unwrap().success());
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MessageId);

        let mut msg = message(0);
        msg.version = MESSAGE_VERSION + 1;
        let id = msg.id();
        let prover = accept_checkpoint(&mut inbox, &signers[..2], &[id]);
        let proof = prover.prove(0).unwrap();
        assert!(inbox.prove(id, proof.path(), 0).unwrap());

        let mut resolver = SingleResolver {
            recipient: msg.recipient,
            handler: TestRecipient {
                calls: 0,
                fail: false,
            },
        };
        let err = inbox.process(&msg, 100, &mut resolver).unwrap_err();
        assert!(matches!(
            err,
            MailboxError::UnsupportedVersion { got, expected }
                if got == MESSAGE_VERSION + 1 && expected == MESSAGE_VERSION
        ));
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Pending);
        assert_eq!(resolver.handler.calls, 0);
    }

    #[test]
    fn test_wrong_destination_rejected_after_prove() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MessageId);

        // Genuinely dispatched from the origin, but destined for a third
        // domain. It proves fine against the shared accumulator and must be
        // stopped at delivery.
        let mut msg = message(0);
        msg.destination = LOCAL + 1;
        let id = msg.id();
        let prover = accept_checkpoint(&mut inbox, &signers[..2], &[id]);
        let proof = prover.prove(0).unwrap();
        assert!(inbox.prove(id, proof.path(), 0).unwrap());

        let mut resolver = SingleResolver {
            recipient: msg.recipient,
            handler: TestRecipient {
                calls: 0,
                fail: false,
            },
        };
        let err = inbox.process(&msg, 100, &mut resolver).unwrap_err();
        assert!(matches!(
            err,
            MailboxError::WrongDestination { got, local: LOCAL } if got == LOCAL + 1
        ));
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Pending);
        assert_eq!(resolver.handler.calls, 0);
    }

    #[test]
    fn test_failed_instance_rejects_everything() {
        let signers = signer_roster(3);
        let mut inbox = inbox(&signers, 2, DigestScheme::MessageId);

        let msg = message(0);
        let other = message(1);
        let id = msg.id();
        let prover = accept_checkpoint(&mut inbox, &signers[..2], &[id, other.id()]);
        let proof = prover.prove(0).unwrap();
        let mut resolver = SingleResolver {
            recipient: msg.recipient,
            handler: TestRecipient {
                calls: 0,
                fail: false,
            },
        };
        assert!(inbox.prove(id, proof.path(), 0).unwrap());
        assert!(inbox.process(&msg, 100, &mut resolver).unwrap().success());

        inbox.fail();
        assert!(inbox.state().is_failed());
        // The halt does not revert settled deliveries.
        assert_eq!(inbox.delivery_state(&id), DeliveryState::Processed);

        let cp = Checkpoint::new(Buf32::new([0x42; 32]), 9);
        let digest = message_id_digest(&inbox.context(), &cp);
        let sigs = sign_all(&signers[..2], &digest);
        assert!(matches!(
            inbox.submit_checkpoint(&CheckpointSubmission::MessageId(cp), &sigs),
            Err(MailboxError::InstanceFailed)
        ));
        assert!(matches!(
            inbox.prove(other.id(), proof.path(), 0),
            Err(MailboxError::InstanceFailed)
        ));
        assert!(matches!(
            inbox.process(&msg, 100, &mut resolver),
            Err(MailboxError::InstanceFailed)
        ));
        assert_eq!(resolver.handler.calls, 1);
    }
}
