// Shared data model and configuration for the codequest workspace.
//
// Everything the API bin serializes over HTTP and the CLI prints lives here,
// so the verifier, the API and the CLI never drift on wire shapes.

pub mod catalog;
pub mod config;
pub mod types;
