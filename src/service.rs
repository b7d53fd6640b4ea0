// src/service.rs

use serde::Deserialize;
use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};
use tracing::info;
use warp::{reject::Rejection, reply::Reply, Filter};

use crate::{
    container::FieldContainer,
    fetch::CsvSource,
    links::ParseMode,
    populator::{FormPopulator, PopulateOutcome},
};

#[derive(Debug, Deserialize)]
pub struct FieldsQuery {
    /// Raw value of the count input, exactly as typed.
    pub count: Option<String>,
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "company-fields"
    })))
}

/// Render the field pairs for one count as an HTML fragment. Every failure
/// path answers 200 with an empty fragment, matching what the form shows.
async fn render_fields(
    query: FieldsQuery,
    source: Arc<dyn CsvSource>,
    limits: (ParseMode, usize),
) -> Result<impl Reply, Rejection> {
    let (parse_mode, max_pairs) = limits;
    let raw = query.count.unwrap_or_default();
    let container = Arc::new(Mutex::new(FieldContainer::new()));
    let populator = FormPopulator::new(source, container.clone())
        .with_parse_mode(parse_mode)
        .with_max_pairs(max_pairs);

    let outcome = populator.on_count_input(&raw).await;
    if let PopulateOutcome::Rendered { pairs, .. } = outcome {
        info!(pairs, "served company fields");
    }

    let html = container
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .render_html();
    Ok(warp::reply::html(html))
}

fn with_source(
    source: Arc<dyn CsvSource>,
) -> impl Filter<Extract = (Arc<dyn CsvSource>,), Error = Infallible> + Clone {
    warp::any().map(move || source.clone())
}

/// `GET /health` and `GET /fields?count=<raw>`. Counts above `max_pairs`
/// get an empty fragment.
pub fn routes(
    source: Arc<dyn CsvSource>,
    parse_mode: ParseMode,
    max_pairs: usize,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_check);

    let fields = warp::path("fields")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<FieldsQuery>())
        .and(with_source(source))
        .and(warp::any().map(move || (parse_mode, max_pairs)))
        .and_then(render_fields);

    health.or(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FileCsvSource;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn csv_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "home_name,link_name,link_type\nGlobex,Acme &amp; Co,customer\nInitech,Globex,investment\n"
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let api = routes(Arc::new(FileCsvSource::new("unused.csv")), ParseMode::Naive, 10);
        let resp = warp::test::request().path("/health").reply(&api).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn fields_renders_fragment() {
        let file = csv_file();
        let api = routes(Arc::new(FileCsvSource::new(file.path())), ParseMode::Naive, 10);

        let resp = warp::test::request()
            .path("/fields?count=2")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), 200);
        let html = String::from_utf8(resp.body().to_vec()).unwrap();

        assert_eq!(html.matches("<select").count(), 4);
        assert!(html.contains(r#"name="company-2""#));
        assert!(html.contains(r#"name="type-2""#));
        assert!(html.contains(r#"<option value="Acme &amp; Co">Acme &amp; Co</option>"#));
    }

    #[tokio::test]
    async fn invalid_count_gives_empty_fragment() {
        let file = csv_file();
        let api = routes(Arc::new(FileCsvSource::new(file.path())), ParseMode::Naive, 10);

        for path in ["/fields?count=abc", "/fields?count=0", "/fields"] {
            let resp = warp::test::request().path(path).reply(&api).await;
            assert_eq!(resp.status(), 200);
            assert!(resp.body().is_empty(), "expected empty body for {}", path);
        }
    }

    #[tokio::test]
    async fn oversized_count_gives_empty_fragment() {
        let file = csv_file();
        let api = routes(Arc::new(FileCsvSource::new(file.path())), ParseMode::Naive, 10);

        for path in ["/fields?count=11", "/fields?count=9223372036854775807"] {
            let resp = warp::test::request().path(path).reply(&api).await;
            assert_eq!(resp.status(), 200);
            assert!(resp.body().is_empty(), "expected empty body for {}", path);
        }

        let resp = warp::test::request()
            .path("/fields?count=10")
            .reply(&api)
            .await;
        let html = String::from_utf8(resp.body().to_vec()).unwrap();
        assert_eq!(html.matches("<select").count(), 20);
    }

    #[tokio::test]
    async fn fetch_failure_gives_empty_fragment() {
        let dir = tempdir().unwrap();
        let api = routes(
            Arc::new(FileCsvSource::new(dir.path().join("missing.csv"))),
            ParseMode::Naive,
            10,
        );
        let resp = warp::test::request()
            .path("/fields?count=3")
            .reply(&api)
            .await;
        assert_eq!(resp.status(), 200);
        assert!(resp.body().is_empty());
    }
}
