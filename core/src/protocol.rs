//! Wire format of the recommendation flow.

use serde::Serialize;
use strive_common::Problem;

/// Routing key of the recommendation flow on the backend.
pub const FLOW_KEY: &str = "/flow/striveFlow";

/// The backend wraps its JSON payload in a code fence of exactly this shape:
/// 8 leading bytes ("```json\n") and 3 trailing bytes ("```"). The offsets
/// are a contract of the upstream format; do not widen or narrow them.
pub const FENCE_PREFIX_LEN: usize = 8;
pub const FENCE_SUFFIX_LEN: usize = 3;

/// Body of `POST /api/streamAction`.
#[derive(Debug, Clone, Serialize)]
pub struct StreamActionRequest {
    pub key: &'static str,
    pub input: FlowInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowInput {
    pub start: StartStep,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartStep {
    pub input: ProblemInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProblemInput {
    pub role: String,
    pub problem: String,
}

impl StreamActionRequest {
    /// Empty strings pass through verbatim; the backend accepts them.
    pub fn new(problem: &Problem) -> Self {
        Self {
            key: FLOW_KEY,
            input: FlowInput {
                start: StartStep {
                    input: ProblemInput {
                        role: problem.role.clone(),
                        problem: problem.struggle.clone(),
                    },
                },
            },
        }
    }
}

/// Strip the fixed-width fence. `None` when the string is shorter than the
/// fence or an offset would land inside a multi-byte character.
pub fn unwrap_fenced(raw: &str) -> Option<&str> {
    if raw.len() < FENCE_PREFIX_LEN + FENCE_SUFFIX_LEN {
        return None;
    }
    let end = raw.len() - FENCE_SUFFIX_LEN;
    if !raw.is_char_boundary(FENCE_PREFIX_LEN) || !raw.is_char_boundary(end) {
        return None;
    }
    Some(&raw[FENCE_PREFIX_LEN..end])
}
