use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::eutils::EutilsClient;

use super::models::{HealthResponse, SearchPapersParams, SearchPapersResponse};

pub async fn search_papers_handler(
    State(eutils): State<Arc<EutilsClient>>,
    Query(params): Query<SearchPapersParams>,
) -> Result<Json<SearchPapersResponse>, ApiError> {
    let start = Instant::now();

    let term = params
        .term
        .filter(|term| !term.trim().is_empty())
        .ok_or(ApiError::MissingParameter)?;

    // search must finish first, the fetch needs its IDs
    let id_list = eutils.search(&term).await?;
    if id_list.is_empty() {
        log::info!("no articles found for term {:?}", term);
        return Err(ApiError::NoResultsFound);
    }
    log::debug!(
        "term {:?} matched {} ids ({:?} total)",
        term,
        id_list.len(),
        id_list.count()
    );

    let articles = eutils.fetch(id_list.ids()).await?;
    let titles = articles.titles_in_order(id_list.ids());
    if titles.is_empty() {
        log::info!(
            "no titles extracted from {} article records for term {:?}",
            articles.len(),
            term
        );
        return Err(ApiError::NoTitlesExtracted);
    }

    log::info!(
        "term {:?}: {} titles in {}ms",
        term,
        titles.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(SearchPapersResponse { titles }))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
