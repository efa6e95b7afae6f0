//! `ems-diagnostics` — manual backend reachability and CORS probe.
//!
//! Issues a fixed list of `GET`s and one preflight `OPTIONS` against the
//! portal API and reports what came back. No retries; requests go out one
//! after another.

pub mod config;
pub mod probe;
pub mod report;

pub use config::ProbeConfig;
pub use probe::{BackendProbe, ProbeError};
pub use report::{CorsReport, EndpointReport, EndpointStatus, ProbeSummary};
