use thiserror::Error;

/// The remote execution call itself did not complete.
///
/// This is deliberately a different condition from a submission that
/// compiled or ran with errors: the orchestrator surfaces the two with
/// different verdict messages and they must never be conflated.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("execution service request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("execution service returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed execution service response: {0}")]
    Decode(#[source] reqwest::Error),
}
