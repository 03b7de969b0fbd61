use std::fmt;

use anyhow::{Result, bail};
use sidecar_client::{BlobSidecarClient, FetchOutcome, Format};

/// Which endpoint a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Beacon,
    Archiver,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beacon => write!(f, "beacon"),
            Self::Archiver => write!(f, "archiver"),
        }
    }
}

/// Verdict for one identifier fetched from both endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Match { status: u16, count: usize },
    StatusMismatch { beacon: u16, archiver: u16 },
    CountMismatch { beacon: usize, archiver: usize },
    /// Same number of sidecars, first differing position.
    DataMismatch { position: usize },
    /// `bad_payload` separates "answered 200 with junk" from "never answered".
    Failed {
        side: Side,
        bad_payload: bool,
        message: String,
    },
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match { status, count } => write!(f, "ok (HTTP {status}, {count} sidecars)"),
            Self::StatusMismatch { beacon, archiver } => {
                write!(f, "status mismatch: beacon {beacon}, archiver {archiver}")
            }
            Self::CountMismatch { beacon, archiver } => {
                write!(f, "count mismatch: beacon {beacon}, archiver {archiver}")
            }
            Self::DataMismatch { position } => {
                write!(f, "sidecar at position {position} differs")
            }
            Self::Failed {
                side,
                bad_payload: true,
                message,
            } => write!(f, "{side} returned an unusable payload: {message}"),
            Self::Failed { side, message, .. } => write!(f, "{side} fetch failed: {message}"),
        }
    }
}

/// Compare the beacon node's answer against the archiver's.
pub fn compare(beacon: &FetchOutcome, archiver: &FetchOutcome) -> Comparison {
    for (side, outcome) in [(Side::Beacon, beacon), (Side::Archiver, archiver)] {
        if let Some(error) = outcome.error() {
            return Comparison::Failed {
                side,
                bad_payload: error.is_decode(),
                message: error.to_string(),
            };
        }
    }

    if beacon.status() != archiver.status() {
        return Comparison::StatusMismatch {
            beacon: beacon.status(),
            archiver: archiver.status(),
        };
    }

    let (ours, theirs) = (&beacon.sidecars().data, &archiver.sidecars().data);
    if ours.len() != theirs.len() {
        return Comparison::CountMismatch {
            beacon: ours.len(),
            archiver: theirs.len(),
        };
    }

    if let Some(position) = ours.iter().zip(theirs).position(|(a, b)| a != b) {
        return Comparison::DataMismatch { position };
    }

    Comparison::Match {
        status: beacon.status(),
        count: ours.len(),
    }
}

/// Fetch every id from both endpoints, two requests in flight at a time.
pub async fn check(
    beacon: &dyn BlobSidecarClient,
    archiver: &dyn BlobSidecarClient,
    ids: &[String],
    format: Format,
) -> Vec<(String, Comparison)> {
    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        let (ours, theirs) = tokio::join!(
            beacon.fetch_sidecars(id, format),
            archiver.fetch_sidecars(id, format)
        );
        results.push((id.clone(), compare(&ours, &theirs)));
    }
    results
}

pub async fn run(
    beacon: &dyn BlobSidecarClient,
    archiver: &dyn BlobSidecarClient,
    ids: &[String],
    format: Format,
) -> Result<()> {
    let results = check(beacon, archiver, ids, format).await;

    let mut mismatched = 0usize;
    for (id, comparison) in &results {
        if !comparison.is_match() {
            mismatched += 1;
        }
        println!("{id}: {comparison}");
    }

    if mismatched > 0 {
        bail!("{mismatched} of {} identifiers did not match", results.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use sidecar_client::FetchError;
    use sidecar_types::BlobSidecars;
    use sidecar_types::test_support::{sample_sidecar, sample_sidecars};

    use super::*;

    /// Answers from a fixed table; unknown ids get a 404.
    #[derive(Default)]
    struct StaticClient {
        responses: HashMap<String, BlobSidecars>,
    }

    impl StaticClient {
        fn with(mut self, id: &str, sidecars: BlobSidecars) -> Self {
            self.responses.insert(id.to_owned(), sidecars);
            self
        }
    }

    #[async_trait::async_trait]
    impl BlobSidecarClient for StaticClient {
        async fn fetch_sidecars(&self, id: &str, _format: Format) -> FetchOutcome {
            match self.responses.get(id) {
                Some(sidecars) => FetchOutcome::found(sidecars.clone()),
                None => FetchOutcome::passthrough(404),
            }
        }
    }

    fn decode_failure() -> FetchOutcome {
        let err = serde_json::from_str::<BlobSidecars>("{").unwrap_err();
        FetchOutcome::failed(FetchError::Json(err))
    }

    #[test]
    fn identical_payloads_match() {
        let a = FetchOutcome::found(sample_sidecars(10, 2));
        let b = FetchOutcome::found(sample_sidecars(10, 2));
        assert_eq!(compare(&a, &b), Comparison::Match { status: 200, count: 2 });
    }

    #[test]
    fn both_missing_is_a_match() {
        let a = FetchOutcome::passthrough(404);
        let b = FetchOutcome::passthrough(404);
        assert!(compare(&a, &b).is_match());
    }

    #[test]
    fn differing_status_is_reported() {
        let a = FetchOutcome::found(sample_sidecars(10, 1));
        let b = FetchOutcome::passthrough(404);
        assert_eq!(
            compare(&a, &b),
            Comparison::StatusMismatch { beacon: 200, archiver: 404 }
        );
    }

    #[test]
    fn differing_count_is_reported() {
        let a = FetchOutcome::found(sample_sidecars(10, 3));
        let b = FetchOutcome::found(sample_sidecars(10, 2));
        assert_eq!(
            compare(&a, &b),
            Comparison::CountMismatch { beacon: 3, archiver: 2 }
        );
    }

    #[test]
    fn first_differing_sidecar_is_reported() {
        let mut tampered = sample_sidecars(10, 3);
        tampered.data[1] = sample_sidecar(1, 11);

        let a = FetchOutcome::found(sample_sidecars(10, 3));
        let b = FetchOutcome::found(tampered);
        assert_eq!(compare(&a, &b), Comparison::DataMismatch { position: 1 });
    }

    #[test]
    fn errors_win_over_status() {
        let a = FetchOutcome::passthrough(404);
        let b = decode_failure();
        match compare(&a, &b) {
            Comparison::Failed {
                side,
                bad_payload,
                message,
            } => {
                assert_eq!(side, Side::Archiver);
                assert!(bad_payload);
                assert!(message.starts_with("failed to decode json response"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn decode_failure_is_reported_as_bad_payload() {
        let verdict = compare(&FetchOutcome::passthrough(404), &decode_failure());
        assert!(verdict
            .to_string()
            .starts_with("archiver returned an unusable payload: failed to decode json"));
    }

    #[tokio::test]
    async fn transport_failure_is_not_a_bad_payload() {
        let err = reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err();
        let beacon = FetchOutcome::failed(FetchError::Transport(err));
        let archiver = FetchOutcome::passthrough(404);

        let verdict = compare(&beacon, &archiver);
        assert!(matches!(
            verdict,
            Comparison::Failed {
                side: Side::Beacon,
                bad_payload: false,
                ..
            }
        ));
        assert!(verdict.to_string().starts_with("beacon fetch failed: "));
    }

    #[tokio::test]
    async fn check_walks_every_id() {
        let beacon = StaticClient::default()
            .with("1", sample_sidecars(1, 1))
            .with("2", sample_sidecars(2, 2));
        let archiver = StaticClient::default().with("1", sample_sidecars(1, 1));

        let ids = vec!["1".to_owned(), "2".to_owned(), "3".to_owned()];
        let results = check(&beacon, &archiver, &ids, Format::Json).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_match());
        assert_eq!(
            results[1].1,
            Comparison::StatusMismatch { beacon: 200, archiver: 404 }
        );
        assert_eq!(results[2].1, Comparison::Match { status: 404, count: 0 });
    }

    #[tokio::test]
    async fn run_fails_when_anything_mismatches() {
        let beacon = StaticClient::default().with("5", sample_sidecars(5, 1));
        let archiver = StaticClient::default();

        let err = run(&beacon, &archiver, &["5".to_owned()], Format::Ssz)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "1 of 1 identifiers did not match");
    }

    #[tokio::test]
    async fn run_succeeds_when_everything_matches() {
        let beacon = StaticClient::default().with("5", sample_sidecars(5, 1));
        let archiver = StaticClient::default().with("5", sample_sidecars(5, 1));

        assert!(run(&beacon, &archiver, &["5".to_owned()], Format::Json).await.is_ok());
    }
}
