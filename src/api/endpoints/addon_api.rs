use crate::api::model::AppState;
use crate::model::{MetasResponse, StreamsResponse};
use crate::processing::parser::m3u::write_m3u;
use crate::processing::processor::catalog::{list_catalog, list_genre_groups, CatalogRequest};
use crate::processing::processor::manifest::build_manifest;
use crate::processing::processor::stream::resolve_stream;
use crate::utils::{CATALOG_CHANNELS, CATALOG_GENRES, CONTENT_TYPE_TV, JSON_EXT};
use axum::extract::{Path, RawQuery, State};
use axum::response::IntoResponse;
use log::debug;
use std::sync::Arc;

#[inline]
fn strip_json_ext(value: &str) -> &str {
    value.strip_suffix(JSON_EXT).unwrap_or(value)
}

/// Catalog lookup for the addon protocol. Unknown types or catalogs get an empty list.
pub async fn list_catalog_entries(app_state: &AppState, content_type: &str, catalog_id: &str, request: &CatalogRequest) -> MetasResponse {
    if content_type != CONTENT_TYPE_TV || !matches!(catalog_id, CATALOG_CHANNELS | CATALOG_GENRES) {
        debug!("Unsupported catalog {content_type}/{catalog_id}");
        return MetasResponse::default();
    }
    let channels = app_state.playlist.get_channels().await;
    let cfg = &app_state.config.catalog;
    let metas = if catalog_id == CATALOG_GENRES {
        list_genre_groups(&channels, request, cfg)
    } else {
        list_catalog(&channels, request, cfg)
    };
    MetasResponse { metas }
}

/// Stream lookup for the addon protocol. Ids without the channel prefix are not served.
pub async fn resolve_stream_entries(app_state: &AppState, content_type: &str, stream_id: &str) -> StreamsResponse {
    let id_prefix = &app_state.config.catalog.id_prefix;
    if content_type != CONTENT_TYPE_TV || !stream_id.starts_with(id_prefix.as_str()) {
        debug!("Unsupported stream {content_type}/{stream_id}");
        return StreamsResponse::default();
    }
    let channels = app_state.playlist.get_channels().await;
    StreamsResponse {
        streams: resolve_stream(&channels, stream_id, id_prefix).into_iter().collect(),
    }
}

async fn manifest_api(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let cache = &app_state.playlist;
    let genres = cache.get_snapshot().await
        .or_else(|| cache.current())
        .map(|snapshot| snapshot.genres.to_vec())
        .unwrap_or_default();
    axum::Json(build_manifest(&app_state.config, &genres))
}

async fn catalog(app_state: &AppState, content_type: &str, catalog_id: &str, query: Option<&str>, extra: Option<&str>) -> impl IntoResponse {
    // path extras override query extras
    let extras = format!("{}&{}", query.unwrap_or_default(), extra.map_or("", strip_json_ext));
    let request = CatalogRequest::from_extra(&extras);
    let catalog_id = strip_json_ext(catalog_id);
    debug!("Catalog requested: {content_type}/{catalog_id} {request:?}");
    axum::Json(list_catalog_entries(app_state, content_type, catalog_id, &request).await)
}

async fn catalog_api(
    State(app_state): State<Arc<AppState>>,
    Path((content_type, catalog_id)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    catalog(&app_state, &content_type, &catalog_id, query.as_deref(), None).await
}

async fn catalog_extra_api(
    State(app_state): State<Arc<AppState>>,
    Path((content_type, catalog_id, extra)): Path<(String, String, String)>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    catalog(&app_state, &content_type, &catalog_id, query.as_deref(), Some(&extra)).await
}

async fn stream_api(
    State(app_state): State<Arc<AppState>>,
    Path((content_type, stream_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let stream_id = strip_json_ext(&stream_id);
    debug!("Stream requested: {content_type}/{stream_id}");
    axum::Json(resolve_stream_entries(&app_state, &content_type, stream_id).await)
}

async fn playlist_api(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let channels = app_state.playlist.get_channels().await;
    (
        [(axum::http::header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.to_string())],
        write_m3u(&channels),
    )
}

pub fn addon_api_register() -> axum::Router<Arc<AppState>> {
    axum::Router::new()
        .route("/manifest.json", axum::routing::get(manifest_api))
        .route("/catalog/{content_type}/{catalog_id}", axum::routing::get(catalog_api))
        .route("/catalog/{content_type}/{catalog_id}/{extra}", axum::routing::get(catalog_extra_api))
        .route("/stream/{content_type}/{stream_id}", axum::routing::get(stream_api))
        .route("/playlist.m3u", axum::routing::get(playlist_api))
}
