// codequest-verifier: the verification core of the platform.
//
// One verification run is a single compile+run round trip against a remote
// execution service, followed by synchronous, in-memory checks:
//
// - piston:     HTTP client for the execution service (the only suspend
//               point in a run)
// - constructs: heuristic probes for required language constructs
// - output:     expected-output / output-pattern matching against stdout
// - verifier:   orchestration of the above into a verdict
//
// The core knows nothing about the course catalog beyond the `TestCase`
// records handed to it, and never persists anything.

pub mod constructs;
pub mod error;
pub mod output;
pub mod piston;
pub mod verifier;

pub use error::TransportError;
pub use piston::ExecutionClient;
pub use verifier::{Verifier, COMPILE_FAILED_MESSAGE, EXECUTION_FAILED_MESSAGE};
