use crate::model::{CatalogConfig, Channel, MetaPreview};
use crate::utils::{encode_component, CONTENT_TYPE_TV, POSTER_SHAPE_SQUARE, UNCATEGORIZED};
use std::collections::HashSet;

/// Catalog request extras, `genre=...&skip=...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRequest {
    pub genre: Option<String>,
    pub skip: usize,
}

impl CatalogRequest {
    /// Reads form encoded extras. Unknown keys are ignored, a missing or unparsable skip is `0`.
    pub fn from_extra(extra: &str) -> Self {
        let mut request = Self::default();
        for (key, value) in url::form_urlencoded::parse(extra.as_bytes()) {
            match key.as_ref() {
                "genre" => request.genre = Some(value.into_owned()),
                "skip" => request.skip = parse_skip(&value),
                _ => {}
            }
        }
        request
    }

    pub fn genre_filter(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}

pub fn parse_skip(value: &str) -> usize {
    value.trim().parse::<usize>().unwrap_or(0)
}

pub fn channel_id(id_prefix: &str, name: &str) -> String {
    format!("{id_prefix}{}", encode_component(name))
}

fn to_meta_preview(channel: &Channel, id_prefix: &str) -> MetaPreview {
    MetaPreview {
        id: channel_id(id_prefix, &channel.name),
        content_type: CONTENT_TYPE_TV.to_string(),
        name: channel.name.clone(),
        poster: channel.logo.clone(),
        genres: vec![channel.genre.clone()],
        poster_shape: POSTER_SHAPE_SQUARE.to_string(),
    }
}

/// Filters by genre (exact match) and returns one page in playlist order.
pub fn list_catalog(channels: &[Channel], request: &CatalogRequest, cfg: &CatalogConfig) -> Vec<MetaPreview> {
    let genre = request.genre_filter();
    channels.iter()
        .filter(|channel| genre.is_none_or(|g| channel.genre == g))
        .skip(request.skip)
        .take(cfg.page_size)
        .map(|channel| to_meta_preview(channel, &cfg.id_prefix))
        .collect()
}

#[inline]
fn group_name(genre: &str) -> &str {
    if genre.is_empty() { UNCATEGORIZED } else { genre }
}

/// One entry per genre in order of first appearance, the first channel's logo is used as poster.
pub fn list_genre_groups(channels: &[Channel], request: &CatalogRequest, cfg: &CatalogConfig) -> Vec<MetaPreview> {
    let mut groups: Vec<(&str, &Channel)> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for channel in channels {
        let group = group_name(&channel.genre);
        if seen.insert(group) {
            groups.push((group, channel));
        }
    }

    groups.into_iter()
        .skip(request.skip)
        .take(cfg.page_size)
        .map(|(group, first)| {
            let poster = if first.logo.is_empty() {
                cfg.placeholder_poster.clone().unwrap_or_default()
            } else {
                first.logo.clone()
            };
            MetaPreview {
                id: channel_id(&cfg.genre_id_prefix, group),
                content_type: CONTENT_TYPE_TV.to_string(),
                name: group.to_string(),
                poster,
                genres: vec![group.to_string()],
                poster_shape: POSTER_SHAPE_SQUARE.to_string(),
            }
        })
        .collect()
}
