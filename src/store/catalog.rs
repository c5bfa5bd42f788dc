use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

use super::models::{DataDragonChampions, DataDragonItems};

pub const CHAMPION_ENDPOINT: &str =
    "https://ddragon.leagueoflegends.com/cdn/{version}/data/en_US/champion.json";
pub const ITEM_ENDPOINT: &str =
    "https://ddragon.leagueoflegends.com/cdn/{version}/data/en_US/item.json";

#[derive(Debug, Clone)]
pub struct Champion {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub tags: Vec<String>,
    pub builds_from: Vec<u32>,
    pub upgrades_into: Vec<u32>,
    pub total_cost: u32,
}

/// Indexed champion and item lookup tables.
#[derive(Debug, Default)]
pub struct Catalog {
    champions: HashMap<i32, Champion>,
    items: HashMap<u32, Item>,
}

impl Catalog {
    pub fn new(champions: Vec<Champion>, items: Vec<Item>) -> Self {
        Catalog {
            champions: champions.into_iter().map(|c| (c.id, c)).collect(),
            items: items.into_iter().map(|i| (i.id, i)).collect(),
        }
    }

    pub fn from_data_dragon(
        champions: DataDragonChampions,
        items: DataDragonItems,
    ) -> Result<Self, AppError> {
        let mut catalog = Catalog::default();

        for (key, dto) in champions.data {
            let id: i32 = dto.key.parse().map_err(|_| {
                AppError::CatalogError(format!("Champion {} has a non-numeric key", key))
            })?;
            catalog.champions.insert(
                id,
                Champion {
                    id,
                    name: dto.name,
                },
            );
        }

        for (key, dto) in items.data {
            let id: u32 = key
                .parse()
                .map_err(|_| AppError::CatalogError(format!("Item key {} is not numeric", key)))?;
            catalog.items.insert(
                id,
                Item {
                    id,
                    name: dto.name,
                    tags: dto.tags,
                    builds_from: parse_id_list(&dto.builds_from),
                    upgrades_into: parse_id_list(&dto.upgrades_into),
                    total_cost: dto.gold.total,
                },
            );
        }

        Ok(catalog)
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.get(&id)
    }

    #[allow(dead_code)]
    pub fn champion(&self, id: i32) -> Option<&Champion> {
        self.champions.get(&id)
    }

    pub fn item_name(&self, id: u32) -> String {
        self.items
            .get(&id)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| format!("Item {}", id))
    }

    pub fn champion_name(&self, id: i32) -> String {
        self.champions
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Champion {}", id))
    }

    #[allow(dead_code)]
    pub fn item_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.keys().copied()
    }
}

fn parse_id_list(ids: &[String]) -> Vec<u32> {
    ids.iter().filter_map(|s| s.parse().ok()).collect()
}

/// Loads both Data Dragon catalogs, from a local directory when one is
/// configured, otherwise over HTTP through a versioned on-disk cache.
pub fn load_catalog(
    version: &str,
    local_dir: Option<&Path>,
    refresh: bool,
) -> Result<Catalog, AppError> {
    let (champions_raw, items_raw) = match local_dir {
        Some(dir) => (
            read_local(&dir.join("champion.json"))?,
            read_local(&dir.join("item.json"))?,
        ),
        None => {
            let client = CatalogClient::new(version);
            (
                client.cached_body("champion", refresh)?,
                client.cached_body("item", refresh)?,
            )
        }
    };

    let champions: DataDragonChampions =
        serde_json::from_str(&champions_raw).map_err(|e| AppError::JsonError(e.to_string()))?;
    let items: DataDragonItems =
        serde_json::from_str(&items_raw).map_err(|e| AppError::JsonError(e.to_string()))?;

    Catalog::from_data_dragon(champions, items)
}

fn read_local(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path)
        .map_err(|e| AppError::CatalogError(format!("{}: {}", path.display(), e)))
}

pub struct CatalogClient {
    version: String,
}

impl CatalogClient {
    pub fn new(version: &str) -> Self {
        CatalogClient {
            version: version.to_string(),
        }
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        let cache_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".league_builds");

        let _ = fs::create_dir_all(&cache_dir);

        cache_dir.join(format!("{}-{}.json", name, self.version))
    }

    /// Returns the raw catalog body, refetching when the cache file is
    /// absent or a refresh was requested.
    fn cached_body(&self, name: &str, refresh: bool) -> Result<String, AppError> {
        let path = self.cache_path(name);

        if !refresh {
            if let Ok(body) = fs::read_to_string(&path) {
                return Ok(body);
            }
        }

        let endpoint = match name {
            "champion" => CHAMPION_ENDPOINT,
            _ => ITEM_ENDPOINT,
        };
        let body = self.execute_request(&endpoint.replace("{version}", &self.version))?;

        // Cache write failures are not worth failing the run over.
        let _ = fs::write(&path, &body);

        Ok(body)
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let response = ureq::get(url)
            .set("User-Agent", "league_builds/0.1.0")
            .call();

        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| AppError::HttpError(e.to_string())),
            Err(e) => Err(AppError::HttpError(e.to_string())),
        }
    }
}
