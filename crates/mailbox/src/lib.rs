//! Dispatch/prove/process lifecycle engine.
//!
//! An [`Outbox`] owns the origin-side accumulator: it assigns nonces,
//! inserts message identity hashes, and records historical checkpoints. An
//! [`Inbox`] accepts validator-signed checkpoints for a remote outbox,
//! verifies Merkle inclusion of individual messages against them, and
//! performs budget-bounded delivery to recipient handlers exactly once.
//! [`fraud`] holds the only two paths by which an instance is permanently
//! halted.

mod errors;
pub mod fraud;
mod inbox;
mod outbox;
mod state;
mod traits;

pub use errors::MailboxError;
pub use inbox::{CheckpointSubmission, DeliveryState, Inbox, InboxConfig, ProcessOutcome};
pub use outbox::{Dispatch, Outbox};
pub use state::InstanceState;
pub use traits::{MessageRecipient, RecipientError, RecipientResolver, RosterSource};
