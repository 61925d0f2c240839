use crate::model::{AddonManifest, CatalogDescriptor, CatalogExtra, Config};
use crate::utils::{CATALOG_CHANNELS, CATALOG_GENRES, CONTENT_TYPE_TV};

const RESOURCE_CATALOG: &str = "catalog";
const RESOURCE_STREAM: &str = "stream";

fn skip_extra() -> CatalogExtra {
    CatalogExtra {
        name: "skip".to_string(),
        is_required: false,
        options: None,
        options_limit: None,
    }
}

/// Builds the manifest, genre options come from the current playlist snapshot.
pub fn build_manifest(cfg: &Config, genres: &[String]) -> AddonManifest {
    let addon = &cfg.addon;
    let catalog = &cfg.catalog;
    AddonManifest {
        id: addon.id.clone(),
        version: addon.version.clone(),
        name: addon.name.clone(),
        description: addon.description.clone(),
        logo: addon.logo.clone(),
        resources: vec![RESOURCE_CATALOG.to_string(), RESOURCE_STREAM.to_string()],
        types: vec![CONTENT_TYPE_TV.to_string()],
        id_prefixes: vec![catalog.id_prefix.clone()],
        catalogs: vec![
            CatalogDescriptor {
                content_type: CONTENT_TYPE_TV.to_string(),
                id: CATALOG_CHANNELS.to_string(),
                name: catalog.channels_name.clone(),
                extra: vec![
                    CatalogExtra {
                        name: "genre".to_string(),
                        is_required: false,
                        options: Some(genres.to_vec()),
                        options_limit: Some(catalog.genre_options_limit),
                    },
                    skip_extra(),
                ],
            },
            CatalogDescriptor {
                content_type: CONTENT_TYPE_TV.to_string(),
                id: CATALOG_GENRES.to_string(),
                name: catalog.genres_name.clone(),
                extra: vec![skip_extra()],
            },
        ],
    }
}
