use thiserror::Error;

/// Raised when a caller hands the domain a value outside its contract.
///
/// Ordinary gameplay outcomes (locked layers, clicks during a sequence) are
/// never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("step {0} is outside the 0..=3 sequence range")]
    StepOutOfRange(u8),
    #[error("unknown layer `{0}`; expected perception, network, middleware or application")]
    UnknownLayer(String),
}
