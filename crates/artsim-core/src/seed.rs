//! Seed dataset loading
//!
//! The seed file is a static JSON document of the form
//! `{ "data": [ { "title", "link", "imglink", "vector" }, ... ] }`.
//! It is read exactly once, at bootstrap time, and never re-synced.

use crate::{Article, ArtsimError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of the seed dataset.
///
/// Accepts both the historical field names (`imglink`, `vector`) and
/// the spelled-out ones (`image_link`, `embedding`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEntry {
    pub title: String,
    pub link: String,
    #[serde(alias = "imglink")]
    pub image_link: String,
    #[serde(alias = "vector")]
    pub embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    data: Vec<SeedEntry>,
}

/// Read the seed dataset and turn it into articles with dense ids.
///
/// Each entry's position in the dataset becomes its `id`; the other
/// fields pass through unchanged. Any read, parse, or schema
/// violation is fatal to bootstrap.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Vec<Article>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ArtsimError::Seed(format!("failed to read {}: {e}", path.display())))?;

    let file: SeedFile = serde_json::from_str(&raw)
        .map_err(|e| ArtsimError::Seed(format!("failed to parse {}: {e}", path.display())))?;

    file.data
        .into_iter()
        .enumerate()
        .map(|(i, entry)| Article::from_seed(i as u64, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EMBEDDING_DIM;
    use std::io::Write;

    fn write_temp(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "artsim-seed-{}-{}.json",
            std::process::id(),
            content.len()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn vector_json() -> String {
        let values = vec!["0.1"; EMBEDDING_DIM].join(",");
        format!("[{values}]")
    }

    #[test]
    fn loads_original_field_names() {
        let vector = vector_json();
        let json = format!(
            r#"{{"data":[
                {{"title":"first","link":"l0","imglink":"i0","vector":{vector}}},
                {{"title":"second","link":"l1","imglink":"i1","vector":{vector}}}
            ]}}"#
        );
        let path = write_temp(&json);
        let articles = load_seed(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, 0);
        assert_eq!(articles[1].id, 1);
        assert_eq!(articles[1].title, "second");
        assert_eq!(articles[0].image_link, "i0");
    }

    #[test]
    fn loads_spelled_out_field_names() {
        let vector = vector_json();
        let json = format!(
            r#"{{"data":[{{"title":"t","link":"l","image_link":"i","embedding":{vector}}}]}}"#
        );
        let path = write_temp(&json);
        let articles = load_seed(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].image_link, "i");
    }

    #[test]
    fn missing_file_is_a_seed_error() {
        let err = load_seed("/nonexistent/data.json").unwrap_err();
        assert!(matches!(err, ArtsimError::Seed(_)));
    }

    #[test]
    fn malformed_json_is_a_seed_error() {
        let path = write_temp("{not json");
        let err = load_seed(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ArtsimError::Seed(_)));
    }

    #[test]
    fn wrong_dimension_is_a_seed_error() {
        let json = r#"{"data":[{"title":"t","link":"l","imglink":"i","vector":[0.1,0.2]}]}"#;
        let path = write_temp(json);
        let err = load_seed(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ArtsimError::Seed(_)));
    }
}
