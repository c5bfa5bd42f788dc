use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the corpus chunk files.
    pub data_dir: PathBuf,
    /// Region prefix of the chunk files, e.g. "PRO" for PRO-0.json.
    pub region: String,
    /// Data Dragon version the catalogs are fetched for.
    pub catalog_version: String,
    /// Local directory with champion.json and item.json; skips the fetch.
    pub catalog_dir: Option<PathBuf>,
    /// Directory the JSON reports are written to.
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_dir = env::var("LEAGUE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let region = env::var("LEAGUE_REGION").unwrap_or_else(|_| "PRO".to_string());
        let catalog_version =
            env::var("LEAGUE_CATALOG_VERSION").unwrap_or_else(|_| "5.16.1".to_string());
        let catalog_dir = env::var("LEAGUE_CATALOG_DIR").ok().map(PathBuf::from);
        let output_dir = env::var("LEAGUE_OUTPUT_DIR").unwrap_or_else(|_| "output".to_string());

        Config {
            data_dir: PathBuf::from(data_dir),
            region,
            catalog_version,
            catalog_dir,
            output_dir: PathBuf::from(output_dir),
        }
    }
}
