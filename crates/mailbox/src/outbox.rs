//! Origin-side dispatch and checkpointing.

use std::collections::{BTreeMap, HashMap};

use tracing::{info, warn};
use weft_checkpoint_types::{Checkpoint, CheckpointContext};
use weft_merkle::IncrementalMerkle;
use weft_msg_types::Message;
use weft_primitives::{
    constants::{MAX_MESSAGE_BODY_BYTES, MESSAGE_VERSION},
    Buf32, DomainId, Nonce,
};

use crate::{errors::MailboxError, state::InstanceState};

/// The result of a successful dispatch: the message as enveloped, its
/// identity hash, and its position in the accumulator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dispatch {
    message: Message,
    id: Buf32,
    index: u32,
}

impl Dispatch {
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn id(&self) -> Buf32 {
        self.id
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Origin-side message store.
///
/// Owns the accumulator exclusively: every inserted leaf is the identity
/// hash of a message dispatched here, in dispatch order. Also records every
/// checkpoint it has ever produced, which is what the fraud judge compares
/// signed claims against.
#[derive(Debug)]
pub struct Outbox {
    local_domain: DomainId,
    tree_id: Buf32,
    tree: IncrementalMerkle,
    nonces: HashMap<DomainId, Nonce>,
    latest_checkpoint: Option<Checkpoint>,
    history: BTreeMap<u32, Buf32>,
    state: InstanceState,
}

impl Outbox {
    /// Creates a new outbox for `local_domain`, identified by `tree_id` in
    /// checkpoint signing contexts.
    pub fn new(local_domain: DomainId, tree_id: Buf32) -> Self {
        Self {
            local_domain,
            tree_id,
            tree: IncrementalMerkle::new(),
            nonces: HashMap::new(),
            latest_checkpoint: None,
            history: BTreeMap::new(),
            state: InstanceState::Active,
        }
    }

    pub fn local_domain(&self) -> DomainId {
        self.local_domain
    }

    /// The signing context remote inboxes verify checkpoints under.
    pub fn context(&self) -> CheckpointContext {
        CheckpointContext::new(self.local_domain, self.tree_id)
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Current accumulator root.
    pub fn root(&self) -> Buf32 {
        self.tree.root()
    }

    /// Number of messages dispatched.
    pub fn count(&self) -> u32 {
        self.tree.count()
    }

    /// The most recent checkpoint snapshot, if any.
    pub fn latest_checkpoint(&self) -> Option<Checkpoint> {
        self.latest_checkpoint
    }

    /// The root this outbox recorded at checkpoint `index`, if it ever
    /// checkpointed that index.
    pub fn checkpointed_root(&self, index: u32) -> Option<Buf32> {
        self.history.get(&index).copied()
    }

    /// Envelopes and commits an outgoing message.
    ///
    /// Assigns the next nonce for `destination`, inserts the message's
    /// identity hash into the accumulator, and returns the envelope with
    /// its id and insertion index.
    pub fn dispatch(
        &mut self,
        destination: DomainId,
        recipient: Buf32,
        sender: Buf32,
        body: Vec<u8>,
    ) -> Result<Dispatch, MailboxError> {
        if self.state.is_failed() {
            return Err(MailboxError::InstanceFailed);
        }
        if body.len() > MAX_MESSAGE_BODY_BYTES {
            return Err(MailboxError::BodyTooLarge {
                got: body.len(),
                max: MAX_MESSAGE_BODY_BYTES,
            });
        }

        let nonce = self.nonces.entry(destination).or_insert(0);
        let message = Message {
            version: MESSAGE_VERSION,
            nonce: *nonce,
            origin: self.local_domain,
            sender,
            destination,
            recipient,
            body,
        };

        let id = message.id();
        self.tree.ingest(id)?;
        *nonce += 1;

        let index = self.tree.count() - 1;
        info!(%id, index, destination, "dispatched message");
        Ok(Dispatch { message, id, index })
    }

    /// Snapshots the current `(root, count - 1)` as the latest checkpoint
    /// and records it into history.
    ///
    /// Idempotent: with no new insertions since the last call it returns
    /// the same pair; the index never regresses.
    pub fn checkpoint(&mut self) -> Result<Checkpoint, MailboxError> {
        if self.state.is_failed() {
            return Err(MailboxError::InstanceFailed);
        }
        if self.tree.count() == 0 {
            return Err(MailboxError::NoDispatchedMessages);
        }

        let checkpoint = Checkpoint::new(self.tree.root(), self.tree.count() - 1);
        self.latest_checkpoint = Some(checkpoint);
        self.history.insert(checkpoint.index(), checkpoint.root());
        Ok(checkpoint)
    }

    /// Permanently halts this instance.
    ///
    /// Reserved to the accountability component (see [`crate::fraud`]);
    /// downstream consumers observe the state change and stop trusting this
    /// instance.
    pub fn fail(&mut self) {
        warn!(domain = self.local_domain, "outbox permanently failed");
        self.state = InstanceState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbox() -> Outbox {
        Outbox::new(1000, Buf32::new([0x01; 32]))
    }

    #[test]
    fn test_dispatch_assigns_per_destination_nonces() {
        let mut ob = outbox();
        let a = ob.dispatch(2000, Buf32::zero(), Buf32::zero(), vec![1]).unwrap();
        let b = ob.dispatch(2000, Buf32::zero(), Buf32::zero(), vec![2]).unwrap();
        let c = ob.dispatch(3000, Buf32::zero(), Buf32::zero(), vec![3]).unwrap();

        assert_eq!(a.message().nonce, 0);
        assert_eq!(b.message().nonce, 1);
        assert_eq!(c.message().nonce, 0);
        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
    }

    #[test]
    fn test_dispatch_rejects_oversized_body() {
        let mut ob = outbox();
        let body = vec![0u8; MAX_MESSAGE_BODY_BYTES + 1];
        assert!(matches!(
            ob.dispatch(2000, Buf32::zero(), Buf32::zero(), body),
            Err(MailboxError::BodyTooLarge { .. })
        ));
        // Nothing was committed.
        assert_eq!(ob.count(), 0);
    }

    #[test]
    fn test_checkpoint_idempotent() {
        let mut ob = outbox();
        assert!(matches!(
            ob.checkpoint(),
            Err(MailboxError::NoDispatchedMessages)
        ));

        ob.dispatch(2000, Buf32::zero(), Buf32::zero(), vec![1]).unwrap();
        let first = ob.checkpoint().unwrap();
        let second = ob.checkpoint().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.index(), 0);
        assert_eq!(ob.checkpointed_root(0), Some(first.root()));
    }

    #[test]
    fn test_failed_outbox_rejects_mutations() {
        let mut ob = outbox();
        ob.dispatch(2000, Buf32::zero(), Buf32::zero(), vec![1]).unwrap();
        ob.fail();

        assert!(matches!(
            ob.dispatch(2000, Buf32::zero(), Buf32::zero(), vec![2]),
            Err(MailboxError::InstanceFailed)
        ));
        assert!(matches!(ob.checkpoint(), Err(MailboxError::InstanceFailed)));
        // Reads still work.
        assert_eq!(ob.count(), 1);
    }
}
