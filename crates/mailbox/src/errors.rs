use thiserror::Error;
use weft_crypto::MultisigError;
use weft_merkle::MerkleError;
use weft_primitives::DomainId;

/// Mailbox engine error types.
///
/// Everything except [`MailboxError::InstanceFailed`] is recoverable by
/// resubmission with corrected input; a failed instance stays failed.
#[derive(Debug, Error)]
pub enum MailboxError {
    /// The instance was halted by fraud evidence; every mutating operation
    /// fails permanently.
    #[error("instance permanently failed")]
    InstanceFailed,

    /// Dispatch body exceeds the protocol bound.
    #[error("message body of {got} bytes exceeds maximum {max}")]
    BodyTooLarge {
        /// Body size submitted.
        got: usize,
        /// The protocol maximum.
        max: usize,
    },

    /// Asked to checkpoint an empty accumulator.
    #[error("no dispatched messages to checkpoint")]
    NoDispatchedMessages,

    /// Submitted checkpoint index does not advance past the last accepted
    /// one.
    #[error("stale checkpoint index {got}, last accepted {last}")]
    StaleCheckpoint {
        /// Index submitted.
        got: u32,
        /// Last accepted index.
        last: u32,
    },

    /// No validator roster is configured for the claimed origin.
    #[error("no validator roster for origin {0}")]
    UnknownOrigin(DomainId),

    /// The signature set did not establish a quorum over the checkpoint
    /// digest. Fails this call only; the instance stays active.
    #[error("invalid validator signature set: {0}")]
    InvalidValidatorSignature(#[source] MultisigError),

    /// The submission shape does not match the digest scheme this instance
    /// was configured with.
    #[error("checkpoint submission does not match configured digest scheme")]
    SchemeMismatch,

    /// The message is already pending or processed; proving is one-way.
    #[error("message already processed or pending")]
    AlreadyProcessedOrPending,

    /// Processing requires a prior successful prove.
    #[error("message not proven")]
    NotProven,

    /// The envelope carries a protocol version this instance does not
    /// speak.
    #[error("unsupported message version {got}, expected {expected}")]
    UnsupportedVersion {
        /// Version in the envelope.
        got: u8,
        /// Version this instance delivers.
        expected: u8,
    },

    /// The message names a different destination domain.
    #[error("message destined for domain {got}, local domain is {local}")]
    WrongDestination {
        /// The message's destination domain.
        got: DomainId,
        /// This instance's domain.
        local: DomainId,
    },

    /// Caller supplied less than the process budget plus the bookkeeping
    /// reserve. Distinguished from recipient-internal failures, which are
    /// reported in the process outcome instead.
    #[error("supplied budget {supplied} below required {required}")]
    InsufficientBudget {
        /// Budget supplied by the caller.
        supplied: u64,
        /// Minimum the call requires.
        required: u64,
    },

    /// Accumulator-level failure.
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}
