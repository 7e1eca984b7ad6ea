//! Test helpers for writing request files and stubbing the distance service.

use super::solve::{DistanceQueryFactory, SolveConfig};
use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use optipath_core::test_support::StubDistanceQuery;
use optipath_core::{Cost, DistanceQuery, DistanceQueryError, SolveRequest};
use std::fs;
use tempfile::TempDir;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory exposed as a UTF-8 path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Serialise a request listing `locations`.
pub(super) fn request_payload(locations: &[&str]) -> Vec<u8> {
    serde_json::to_vec_pretty(&SolveRequest::new(locations.iter().copied()))
        .expect("serialise request")
}

/// Factory handing out stub clients answering from a fixed matrix.
pub(super) enum StubFactory {
    Matrix(Vec<Vec<Cost>>),
    Failing(DistanceQueryError),
}

impl DistanceQueryFactory for StubFactory {
    fn build(&self, _config: &SolveConfig) -> Result<Box<dyn DistanceQuery>, CliError> {
        let stub = match self {
            Self::Matrix(rows) => StubDistanceQuery::with_matrix(rows.clone()),
            Self::Failing(error) => {
                StubDistanceQuery::with_unit_matrix(1).failing_at(0, 0, error.clone())
            }
        };
        Ok(Box::new(stub))
    }
}
