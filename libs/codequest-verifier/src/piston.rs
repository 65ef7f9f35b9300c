// Remote execution client for a Piston-style execute endpoint.
//
// One outbound POST per invocation, no retries, no caching. No client-side
// timeout is applied beyond what the transport enforces, so a hung execution
// service hangs the run; the orchestrator documents this and the caller
// guards against concurrent runs instead.

use codequest_common::types::ExecutionResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TransportError;

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<SourceFile<'a>>,
    stdin: &'a str,
    args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SourceFile<'a> {
    content: &'a str,
}

/// Wire shape of the execution service response. Both stages and all their
/// fields are optional on the wire.
#[derive(Debug, Default, Deserialize)]
struct ExecuteResponse {
    compile: Option<StageOutput>,
    run: Option<StageOutput>,
}

#[derive(Debug, Default, Deserialize)]
struct StageOutput {
    stdout: Option<String>,
    stderr: Option<String>,
}

/// HTTP client for the remote execution service.
///
/// The language and version are fixed per deployment; every submission goes
/// out with the same pair.
#[derive(Debug, Clone)]
pub struct ExecutionClient {
    http: reqwest::Client,
    endpoint: String,
    language: String,
    version: String,
}

impl ExecutionClient {
    pub fn new(
        endpoint: impl Into<String>,
        language: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            language: language.into(),
            version: version.into(),
        }
    }

    /// Submit source text for one compile+run round trip.
    ///
    /// A non-2xx status, a network failure and a malformed response body are
    /// all transport errors; "the program compiled but crashed" is not an
    /// error here, it comes back inside the `ExecutionResult`.
    pub async fn execute(
        &self,
        source: &str,
        stdin: &str,
    ) -> Result<ExecutionResult, TransportError> {
        let request = ExecuteRequest {
            language: &self.language,
            version: &self.version,
            files: vec![SourceFile { content: source }],
            stdin,
            args: Vec::new(),
        };

        debug!(
            endpoint = %self.endpoint,
            language = %self.language,
            source_size = source.len(),
            "Submitting source to execution service"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(TransportError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body: ExecuteResponse = response.json().await.map_err(TransportError::Decode)?;
        Ok(normalize(body))
    }
}

/// Collapse the two-stage wire response into the flat result the verifier
/// consumes. Empty stage text is treated as absent so presence checks stay
/// meaningful downstream.
fn normalize(response: ExecuteResponse) -> ExecutionResult {
    let compile = response.compile.unwrap_or_default();
    let run = response.run.unwrap_or_default();
    ExecutionResult {
        compile_errors: non_empty(compile.stderr),
        compile_output: non_empty(compile.stdout),
        runtime_errors: non_empty(run.stderr),
        stdout: run.stdout.unwrap_or_default(),
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_matches_wire_format() {
        let request = ExecuteRequest {
            language: "c++",
            version: "10.2.0",
            files: vec![SourceFile {
                content: "int main() { return 0; }",
            }],
            stdin: "",
            args: Vec::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["language"], "c++");
        assert_eq!(value["version"], "10.2.0");
        assert_eq!(value["files"][0]["content"], "int main() { return 0; }");
        assert_eq!(value["stdin"], "");
        assert_eq!(value["args"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn normalize_full_response() {
        let body = r#"{
            "compile": {"stdout": "note: compiled", "stderr": ""},
            "run": {"stdout": "Hello, World!\n", "stderr": "warning"}
        }"#;
        let response: ExecuteResponse = serde_json::from_str(body).unwrap();
        let result = normalize(response);
        assert_eq!(result.compile_output.as_deref(), Some("note: compiled"));
        assert!(result.compile_errors.is_none(), "empty stderr is absent");
        assert_eq!(result.runtime_errors.as_deref(), Some("warning"));
        assert_eq!(result.stdout, "Hello, World!\n");
    }

    #[test]
    fn normalize_missing_stages() {
        let response: ExecuteResponse = serde_json::from_str("{}").unwrap();
        let result = normalize(response);
        assert!(result.compile_errors.is_none());
        assert!(result.compile_output.is_none());
        assert!(result.runtime_errors.is_none());
        assert_eq!(result.stdout, "");
    }

    #[test]
    fn normalize_compile_error() {
        let body = r#"{"compile": {"stderr": "error: expected ';'"}}"#;
        let response: ExecuteResponse = serde_json::from_str(body).unwrap();
        let result = normalize(response);
        assert_eq!(result.compile_errors.as_deref(), Some("error: expected ';'"));
        assert_eq!(result.stdout, "");
    }
}
