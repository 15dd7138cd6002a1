use srl_protocol::TokenId;
use thiserror::Error;

/// A parse that breaks the single-rooted tree invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("sentence has no tokens")]
    Empty,
    #[error("token at position {position} has id {found}, expected {expected}")]
    NonSequentialId {
        position: usize,
        found: TokenId,
        expected: TokenId,
    },
    #[error("sentence has no root token")]
    NoRoot,
    #[error("sentence has {count} root tokens, expected exactly one")]
    MultipleRoots { count: usize },
    #[error("token {token} points to head {head}, which is not in the sentence")]
    DanglingHead { token: TokenId, head: TokenId },
    #[error("head chain starting at token {token} contains a cycle")]
    Cycle { token: TokenId },
}
