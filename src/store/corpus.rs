use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

use super::models::MatchDto;

/// Corpus of match records stored as fixed-size JSON chunk files named
/// `{region}-{start}.json`, where `start` is the index of the chunk's
/// first match.
pub struct MatchStore {
    data_dir: PathBuf,
    region: String,
}

impl MatchStore {
    pub fn new(data_dir: &Path, region: &str) -> Self {
        MatchStore {
            data_dir: data_dir.to_path_buf(),
            region: region.to_string(),
        }
    }

    pub fn chunk_path(&self, start: usize) -> PathBuf {
        self.data_dir.join(format!("{}-{}.json", self.region, start))
    }

    /// Loads one chunk. A missing or unreadable chunk aborts the run; there
    /// is no partial-result recovery.
    pub fn load_chunk(&self, start: usize) -> Result<Vec<MatchDto>, AppError> {
        let path = self.chunk_path(start);

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::MissingChunk(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_chunk_of_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("PRO-100.json"),
            r#"[{
                "participants": [
                    {"participantId": 1, "championId": 22, "teamId": 100, "stats": {"minionsKilled": 210}}
                ],
                "teams": [{"teamId": 100}, {"teamId": 200}],
                "timeline": {"frames": []}
            }]"#,
        )
        .unwrap();

        let store = MatchStore::new(dir.path(), "PRO");
        let matches = store.load_chunk(100).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].participants[0].stats.minions_killed, 210);
    }

    #[test]
    fn missing_chunk_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = MatchStore::new(dir.path(), "PRO");

        let result = store.load_chunk(0);
        assert!(matches!(result, Err(AppError::MissingChunk(_))));
    }

    #[test]
    fn malformed_chunk_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("PRO-0.json"), "not json").unwrap();

        let store = MatchStore::new(dir.path(), "PRO");
        assert!(matches!(store.load_chunk(0), Err(AppError::JsonError(_))));
    }
}
