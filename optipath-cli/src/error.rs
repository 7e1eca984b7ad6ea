//! Error types emitted by the OptiPath CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use optipath_core::{BuildError, SolveError, SolveRequestError};
use optipath_data::routing::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the OptiPath CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A numeric option was set to zero.
    #[error("{field} must be greater than zero (set --{field} or {env})")]
    ZeroArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the solve request file failed.
    #[error("failed to open solve request at {path:?}: {source}")]
    OpenSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Solve request JSON could not be decoded.
    #[error("failed to parse solve request JSON at {path:?}: {source}")]
    ParseSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The solve request payload failed validation.
    #[error("solve request in {path:?} failed validation: {source}")]
    InvalidSolveRequest {
        path: Utf8PathBuf,
        #[source]
        source: SolveRequestError,
    },
    /// Constructing the distance client failed.
    #[error("failed to build distance client for {base_url:?}: {source}")]
    BuildDistanceClient {
        base_url: String,
        #[source]
        source: ClientBuildError,
    },
    /// The async runtime driving distance requests could not start.
    #[error("failed to solve tour due to an internal error: failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Building the distance matrix failed.
    #[error("failed to solve tour due to an internal error: {source}")]
    BuildMatrix {
        #[source]
        source: BuildError,
    },
    /// The solver rejected the matrix.
    #[error("failed to solve tour due to an internal error: solver failed: {source}")]
    Solve {
        #[source]
        source: SolveError,
    },
    /// Serializing the solve response failed.
    #[error("failed to serialize solve response: {0}")]
    SerializeSolveResponse(#[source] serde_json::Error),
    /// Writing the solve output failed.
    #[error("failed to write solve output: {0}")]
    WriteSolveOutput(#[source] std::io::Error),
}
