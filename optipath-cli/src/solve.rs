//! Solve command implementation for the OptiPath CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{debug, info};
use optipath_core::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_LOCATIONS, DistanceMatrix,
    DistanceQuery, Location, MatrixBuilder, MatrixBuilderConfig, SolveRequest, SolveResponse,
    TourSolver,
};
use optipath_data::routing::{DEFAULT_BASE_URL, HttpDistanceQueryClient, HttpDistanceQueryConfig};
use optipath_solver_exact::{HeldKarpConfig, HeldKarpSolver};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_SOLVE_API_KEY, ARG_SOLVE_BATCH_SIZE, ARG_SOLVE_DISTANCE_URL, ARG_SOLVE_MAX_CONCURRENCY,
    ARG_SOLVE_MAX_LOCATIONS, ARG_SOLVE_REQUEST, CliError, ENV_SOLVE_API_KEY,
    ENV_SOLVE_BATCH_SIZE, ENV_SOLVE_MAX_CONCURRENCY, ENV_SOLVE_REQUEST,
};

const REDACTED: &str = "<redacted>";

/// CLI arguments for the `solve` subcommand.
#[derive(Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a tour request by querying a distance matrix service \
                 for every pair of locations and finding the exact \
                 minimum-cost round trip. The request itself is provided as \
                 a JSON file of the form {\"locations\": [...]}.",
    about = "Solve a round-trip tour request"
)]
#[ortho_config(prefix = "OPTIPATH")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing a solve request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// API key for the distance matrix service.
    #[arg(long = ARG_SOLVE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Distance matrix endpoint (defaults to the Google Distance Matrix API).
    #[arg(long = ARG_SOLVE_DISTANCE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) distance_url: Option<String>,
    /// Maximum origins and destinations per upstream request.
    #[arg(long = ARG_SOLVE_BATCH_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) batch_size: Option<usize>,
    /// Maximum upstream requests in flight at once.
    #[arg(long = ARG_SOLVE_MAX_CONCURRENCY, value_name = "count")]
    #[serde(default)]
    pub(crate) max_concurrency: Option<usize>,
    /// Largest number of locations accepted in one request.
    #[arg(long = ARG_SOLVE_MAX_LOCATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_locations: Option<usize>,
}

impl std::fmt::Debug for SolveArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveArgs")
            .field("request_path", &self.request_path)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("distance_url", &self.distance_url)
            .field("batch_size", &self.batch_size)
            .field("max_concurrency", &self.max_concurrency)
            .field("max_locations", &self.max_locations)
            .finish()
    }
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Distance service credential.
    pub(crate) api_key: String,
    /// Distance matrix endpoint.
    pub(crate) distance_url: String,
    /// Maximum origins and destinations per upstream request.
    pub(crate) batch_size: usize,
    /// Maximum upstream requests in flight.
    pub(crate) max_concurrency: usize,
    /// Largest number of locations accepted.
    pub(crate) max_locations: usize,
}

impl std::fmt::Debug for SolveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveConfig")
            .field("request_path", &self.request_path)
            .field("api_key", &REDACTED)
            .field("distance_url", &self.distance_url)
            .field("batch_size", &self.batch_size)
            .field("max_concurrency", &self.max_concurrency)
            .field("max_locations", &self.max_locations)
            .finish()
    }
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SOLVE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Solver settings; the location cap is clamped to what the solver supports.
    pub(crate) fn solver_config(&self) -> HeldKarpConfig {
        HeldKarpConfig::default().with_max_locations(self.max_locations)
    }

    pub(crate) const fn matrix_builder_config(&self) -> MatrixBuilderConfig {
        MatrixBuilderConfig {
            batch_size: self.batch_size,
            max_concurrency: self.max_concurrency,
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_SOLVE_API_KEY,
                env: ENV_SOLVE_API_KEY,
            })?;

        let batch_size = non_zero(
            args.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            ARG_SOLVE_BATCH_SIZE,
            ENV_SOLVE_BATCH_SIZE,
        )?;
        let max_concurrency = non_zero(
            args.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY),
            ARG_SOLVE_MAX_CONCURRENCY,
            ENV_SOLVE_MAX_CONCURRENCY,
        )?;

        Ok(Self {
            request_path,
            api_key,
            distance_url: args
                .distance_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            batch_size,
            max_concurrency,
            max_locations: args.max_locations.unwrap_or(DEFAULT_MAX_LOCATIONS),
        })
    }
}

fn non_zero(value: usize, field: &'static str, env: &'static str) -> Result<usize, CliError> {
    if value == 0 {
        Err(CliError::ZeroArgument { field, env })
    } else {
        Ok(value)
    }
}

/// Builds the distance client for the current solve invocation.
pub(super) trait DistanceQueryFactory {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn DistanceQuery>, CliError>;
}

pub(super) struct HttpDistanceQueryFactory;

impl DistanceQueryFactory for HttpDistanceQueryFactory {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn DistanceQuery>, CliError> {
        let client_config = HttpDistanceQueryConfig::new(config.api_key.clone())
            .with_base_url(config.distance_url.clone());
        let client = HttpDistanceQueryClient::with_config(client_config).map_err(|source| {
            CliError::BuildDistanceClient {
                base_url: config.distance_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(client))
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &HttpDistanceQueryFactory, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    factory: &dyn DistanceQueryFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_solve(args, factory)?;
    write_solve_response(writer, &response)
}

fn execute_solve(
    args: SolveArgs,
    factory: &dyn DistanceQueryFactory,
) -> Result<SolveResponse, CliError> {
    let config = resolve_solve_config(args)?;
    let request = load_solve_request(&config.request_path)?;
    let solver_config = config.solver_config();
    let locations = request
        .into_locations(solver_config.effective_max_locations())
        .map_err(|source| CliError::InvalidSolveRequest {
            path: config.request_path.clone(),
            source,
        })?;
    info!("solving tour over {} locations", locations.len());

    let query = factory.build(&config)?;
    let matrix = build_matrix(query.as_ref(), &locations, config.matrix_builder_config())?;
    let solver = HeldKarpSolver::with_config(solver_config);
    let result = solver
        .solve(&matrix)
        .map_err(|source| CliError::Solve { source })?;
    Ok(SolveResponse::from(&result))
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    debug!("resolved solve configuration: {config:?}");
    Ok(config)
}

/// Drive the matrix build to completion on a current-thread runtime.
fn build_matrix(
    query: &dyn DistanceQuery,
    locations: &[Location],
    config: MatrixBuilderConfig,
) -> Result<DistanceMatrix, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let builder = MatrixBuilder::with_config(query, config);
    runtime
        .block_on(builder.build(locations))
        .map_err(|source| CliError::BuildMatrix { source })
}

/// Loads a JSON-encoded [`SolveRequest`] from disk.
pub(super) fn load_solve_request(path: &Utf8Path) -> Result<SolveRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSolveRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solve_response(writer: &mut dyn Write, response: &SolveResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerializeSolveResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSolveOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteSolveOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
