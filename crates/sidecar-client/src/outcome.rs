use sidecar_types::BlobSidecars;

use crate::error::{FetchError, OK_STATUS};

/// Result of one fetch: a status, the decoded sidecars, and maybe an error.
///
/// Exactly one of these holds:
/// - `error` is set and `sidecars` is empty,
/// - status is 200 and `sidecars` is the decoded payload,
/// - status is not 200, `sidecars` is empty and there is no error.
#[derive(Debug)]
pub struct FetchOutcome {
    status: u16,
    sidecars: BlobSidecars,
    error: Option<FetchError>,
}

impl FetchOutcome {
    pub fn found(sidecars: BlobSidecars) -> Self {
        Self {
            status: OK_STATUS,
            sidecars,
            error: None,
        }
    }

    /// A response the server answered with something other than 200.
    ///
    /// A 200 must go through [`FetchOutcome::found`] or [`FetchOutcome::failed`].
    pub fn passthrough(status: u16) -> Self {
        debug_assert_ne!(status, OK_STATUS, "200 responses carry decoded sidecars");
        Self {
            status,
            sidecars: BlobSidecars::default(),
            error: None,
        }
    }

    pub fn failed(error: FetchError) -> Self {
        Self {
            status: error.status(),
            sidecars: BlobSidecars::default(),
            error: Some(error),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn sidecars(&self) -> &BlobSidecars {
        &self.sidecars
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// 200 with a successfully decoded payload.
    pub fn is_found(&self) -> bool {
        self.error.is_none() && self.status == OK_STATUS
    }

    pub fn into_parts(self) -> (u16, BlobSidecars, Option<FetchError>) {
        (self.status, self.sidecars, self.error)
    }

    /// Fold the outcome into a `Result`, keeping non-200 statuses as data.
    pub fn into_result(self) -> Result<(u16, BlobSidecars), FetchError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok((self.status, self.sidecars)),
        }
    }
}

#[cfg(test)]
mod tests {
    use sidecar_types::test_support::sample_sidecars;

    use super::*;

    #[test]
    fn passthrough_is_empty_without_error() {
        let outcome = FetchOutcome::passthrough(404);
        assert_eq!(outcome.status(), 404);
        assert!(outcome.sidecars().is_empty());
        assert!(outcome.error().is_none());
        assert!(!outcome.is_found());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "200 responses carry decoded sidecars")]
    fn passthrough_refuses_ok_status() {
        FetchOutcome::passthrough(200);
    }

    #[test]
    fn failed_takes_status_from_error() {
        let json_err = serde_json::from_str::<BlobSidecars>("nope").unwrap_err();
        let outcome = FetchOutcome::failed(FetchError::Json(json_err));
        assert_eq!(outcome.status(), 200);
        assert!(outcome.sidecars().is_empty());
        assert!(outcome.error().is_some());
        assert!(!outcome.is_found());
    }

    #[test]
    fn found_keeps_payload() {
        let sidecars = sample_sidecars(5, 2);
        let outcome = FetchOutcome::found(sidecars.clone());
        assert!(outcome.is_found());

        let (status, decoded) = outcome.into_result().unwrap();
        assert_eq!(status, 200);
        assert_eq!(decoded, sidecars);
    }

    #[test]
    fn into_parts_preserves_error() {
        let json_err = serde_json::from_str::<BlobSidecars>("[").unwrap_err();
        let (status, sidecars, error) =
            FetchOutcome::failed(FetchError::Json(json_err)).into_parts();
        assert_eq!(status, 200);
        assert!(sidecars.is_empty());
        assert!(matches!(error, Some(FetchError::Json(_))));
    }
}
