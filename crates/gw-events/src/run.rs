// run.rs — Owning-build identity.
//
// Supplied by the host per node lookup. The host may fail to map an
// execution back to a build; callers treat that as a recoverable skip, so
// resolution returns Option<RunContext> rather than an error.

use serde::{Deserialize, Serialize};

/// Identity of the build whose graph produced a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunContext {
    /// Absolute root URL of the host, e.g. "https://ci.example.com/".
    pub host_url: String,

    /// URL of the job run, relative to the host root, e.g. "job/foo/32/".
    pub job_url: String,

    /// Fully-qualified job name, e.g. "folder/foo".
    pub job_full_name: String,

    /// Build number of this run.
    pub build_number: u32,
}

impl RunContext {
    pub fn new(
        host_url: impl Into<String>,
        job_url: impl Into<String>,
        job_full_name: impl Into<String>,
        build_number: u32,
    ) -> Self {
        Self {
            host_url: host_url.into(),
            job_url: job_url.into(),
            job_full_name: job_full_name.into(),
            build_number,
        }
    }
}
