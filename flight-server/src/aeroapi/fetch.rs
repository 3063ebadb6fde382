//! Paginated record fetching.
//!
//! AeroAPI wraps result arrays in an envelope with an optional
//! `links.next` continuation path. The loop here drains those pages
//! into one record list and localizes the timestamps on the way out.
//!
//! Failure policy: an error on the first page fails the call; an error
//! on a later page stops the loop and returns what has accumulated,
//! marked as truncated. The caller can always tell a partial result
//! from a complete one via [`FetchOutcome::truncated`].

use std::future::Future;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::localize_batch;

use super::error::AeroError;

/// Ceiling on pages followed in one call, in case the upstream keeps
/// handing out continuation links.
pub const MAX_PAGES: usize = 50;

/// One unit of upstream work: a URL, its query parameters, and the
/// envelope key holding the record array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub url: String,
    pub params: Option<Vec<(String, String)>>,
    /// `"departures"`, `"arrivals"`, or `"scheduled"`.
    pub data_key: &'static str,
}

/// The assembled result of a (possibly multi-page) fetch.
#[derive(Debug, Default, PartialEq)]
pub struct FetchOutcome {
    /// Flight records, page order preserved, timestamps localized.
    pub records: Vec<Value>,
    /// True when a later-page failure or the page ceiling cut the
    /// result short.
    pub truncated: bool,
}

/// A source of raw response pages.
///
/// [`super::AeroClient`] is the production implementation; tests supply
/// canned envelopes.
pub trait PageSource {
    fn fetch_page(
        &self,
        url: &str,
        params: Option<&[(String, String)]>,
    ) -> impl Future<Output = Result<Value, AeroError>> + Send;
}

/// Drain a paginated response into a single localized record list.
///
/// With `fetch_all` false, exactly one page is requested regardless of
/// further pages existing. Continuation URLs already embed all query
/// state, so params are dropped after the first page.
pub async fn fetch_records<S: PageSource>(
    source: &S,
    base_url: &str,
    request: QueryRequest,
    fetch_all: bool,
) -> Result<FetchOutcome, AeroError> {
    let mut url = request.url;
    let mut params = request.params;
    let mut records: Vec<Value> = Vec::new();
    let mut truncated = false;
    let mut page = 0;

    loop {
        if page == MAX_PAGES {
            warn!(%url, "page ceiling reached, returning partial result");
            truncated = true;
            break;
        }

        let envelope = match source.fetch_page(&url, params.as_deref()).await {
            Ok(envelope) => envelope,
            Err(err) if records.is_empty() => return Err(err),
            Err(err) => {
                warn!(%err, page, "continuation page failed, returning partial result");
                truncated = true;
                break;
            }
        };
        page += 1;

        if let Some(items) = envelope.get(request.data_key).and_then(Value::as_array) {
            records.extend(items.iter().cloned());
        }

        if !fetch_all {
            break;
        }

        match envelope.pointer("/links/next").and_then(Value::as_str) {
            Some(next) => {
                url = absolute_url(base_url, next);
                params = None;
            }
            None => break,
        }
    }

    info!(pages = page, records = records.len(), truncated, "fetch complete");
    localize_batch(&mut records);
    Ok(FetchOutcome { records, truncated })
}

/// Continuation links come back as paths relative to the API base.
fn absolute_url(base: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("{}{}", base.trim_end_matches('/'), link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    const BASE: &str = "https://aeroapi.flightaware.com/aeroapi";

    /// Serves a fixed script of page responses and records each request.
    struct ScriptedSource {
        script: Mutex<Vec<Result<Value, AeroError>>>,
        requests: Mutex<Vec<(String, Option<Vec<(String, String)>>)>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Value, AeroError>>) -> Self {
            Self {
                script: Mutex::new(script),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, Option<Vec<(String, String)>>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl PageSource for ScriptedSource {
        async fn fetch_page(
            &self,
            url: &str,
            params: Option<&[(String, String)]>,
        ) -> Result<Value, AeroError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), params.map(<[_]>::to_vec)));
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                // Past the end of the script: keep promising more pages
                return Ok(json!({
                    "departures": [{"ident": "LOOP"}],
                    "links": {"next": "/airports/RJTT/flights/departures?cursor=loop"},
                }));
            }
            script.remove(0)
        }
    }

    fn departures_request() -> QueryRequest {
        QueryRequest {
            url: format!("{BASE}/airports/RJTT/flights/departures"),
            params: Some(vec![
                ("start".to_string(), "2024-03-15T10:00:00Z".to_string()),
                ("end".to_string(), "2024-03-15T12:00:00Z".to_string()),
            ]),
            data_key: "departures",
        }
    }

    fn upstream_error() -> AeroError {
        AeroError::Upstream {
            status: 500,
            message: "boom".into(),
        }
    }

    #[tokio::test]
    async fn single_page_mode_ignores_next_link() {
        let source = ScriptedSource::new(vec![Ok(json!({
            "departures": [{"ident": "ANA1"}],
            "links": {"next": "/airports/RJTT/flights/departures?cursor=abc"},
        }))]);

        let outcome = fetch_records(&source, BASE, departures_request(), false)
            .await
            .unwrap();

        assert_eq!(source.requests().len(), 1);
        assert_eq!(outcome.records.len(), 1);
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn follows_continuation_links_in_order() {
        let source = ScriptedSource::new(vec![
            Ok(json!({
                "departures": [{"ident": "ANA1"}, {"ident": "ANA2"}],
                "links": {"next": "/airports/RJTT/flights/departures?cursor=abc"},
            })),
            Ok(json!({
                "departures": [{"ident": "JAL3"}],
            })),
        ]);

        let outcome = fetch_records(&source, BASE, departures_request(), true)
            .await
            .unwrap();

        let idents: Vec<_> = outcome
            .records
            .iter()
            .map(|r| r["ident"].as_str().unwrap())
            .collect();
        assert_eq!(idents, ["ANA1", "ANA2", "JAL3"]);
        assert!(!outcome.truncated);

        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        // Relative link absolutized against the base
        assert_eq!(
            requests[1].0,
            format!("{BASE}/airports/RJTT/flights/departures?cursor=abc")
        );
        // Continuation request carries no params
        assert!(requests[0].1.is_some());
        assert!(requests[1].1.is_none());
    }

    #[tokio::test]
    async fn absolute_next_link_passes_through() {
        let source = ScriptedSource::new(vec![
            Ok(json!({
                "departures": [],
                "links": {"next": "https://elsewhere.example/page2"},
            })),
            Ok(json!({"departures": []})),
        ]);

        fetch_records(&source, BASE, departures_request(), true)
            .await
            .unwrap();

        assert_eq!(source.requests()[1].0, "https://elsewhere.example/page2");
    }

    #[tokio::test]
    async fn records_are_localized() {
        let source = ScriptedSource::new(vec![Ok(json!({
            "departures": [{"ident": "ANA1", "scheduled_out": "2024-01-01T00:00:00Z"}],
        }))]);

        let outcome = fetch_records(&source, BASE, departures_request(), true)
            .await
            .unwrap();

        assert_eq!(
            outcome.records[0]["scheduled_out"],
            "2024-01-01T09:00:00+09:00"
        );
    }

    #[tokio::test]
    async fn first_page_failure_is_an_error() {
        let source = ScriptedSource::new(vec![Err(upstream_error())]);

        let result = fetch_records(&source, BASE, departures_request(), true).await;

        assert!(matches!(
            result,
            Err(AeroError::Upstream { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn later_page_failure_degrades_to_partial_result() {
        let source = ScriptedSource::new(vec![
            Ok(json!({
                "departures": [{"ident": "ANA1", "scheduled_out": "2024-01-01T00:00:00Z"}],
                "links": {"next": "/cursor=abc"},
            })),
            Err(upstream_error()),
        ]);

        let outcome = fetch_records(&source, BASE, departures_request(), true)
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.truncated);
        // The surviving page is still localized
        assert_eq!(
            outcome.records[0]["scheduled_out"],
            "2024-01-01T09:00:00+09:00"
        );
    }

    #[tokio::test]
    async fn page_ceiling_stops_an_endless_chain() {
        // Empty script: the source hands out a next link forever
        let source = ScriptedSource::new(vec![]);

        let outcome = fetch_records(&source, BASE, departures_request(), true)
            .await
            .unwrap();

        assert_eq!(source.requests().len(), MAX_PAGES);
        assert_eq!(outcome.records.len(), MAX_PAGES);
        assert!(outcome.truncated);
    }

    #[tokio::test]
    async fn missing_data_key_yields_empty_page() {
        let source = ScriptedSource::new(vec![Ok(json!({"num_pages": 1}))]);

        let outcome = fetch_records(&source, BASE, departures_request(), true)
            .await
            .unwrap();

        assert!(outcome.records.is_empty());
        assert!(!outcome.truncated);
    }

    #[test]
    fn absolute_url_joins_relative_paths() {
        assert_eq!(
            absolute_url(BASE, "/airports/RJTT/flights?cursor=x"),
            format!("{BASE}/airports/RJTT/flights?cursor=x")
        );
        assert_eq!(
            absolute_url(&format!("{BASE}/"), "/p"),
            format!("{BASE}/p")
        );
        assert_eq!(absolute_url(BASE, "https://a.example/p"), "https://a.example/p");
    }
}
