//! The fixed model catalog and per-mount asset requests.

use std::path::Path;

/// One catalog entry, as shown on the browse grid and the model page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
}

impl ModelEntry {
    /// URL of the binary scene asset backing this entry.
    pub fn asset_url(&self, base: &str) -> String {
        format!("{}/models/{}.glb", base.trim_end_matches('/'), self.id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Catalog {
    entries: Vec<ModelEntry>,
}

impl Catalog {
    /// The built-in seven-model catalog.
    pub fn builtin() -> Self {
        let entries = [
            (
                "earth-layers",
                "Earth Layers",
                "Explore the internal structure of Earth including crust, mantle, outer core, and inner core with detailed cross-sectional views.",
                "Geography",
                "Beginner",
            ),
            (
                "prokaryotes-eukaryotes",
                "Prokaryotes & Eukaryotes Cell",
                "Compare and contrast the cellular structures of prokaryotic and eukaryotic cells with interactive 3D models.",
                "Biology",
                "Intermediate",
            ),
            (
                "root-structure",
                "Root Structure",
                "Discover the anatomy of plant root systems including primary and secondary growth structures.",
                "Botany",
                "Intermediate",
            ),
            (
                "blood-components",
                "Components of Blood",
                "Learn about red blood cells, white blood cells, platelets, and plasma through detailed 3D visualization.",
                "Biology",
                "Beginner",
            ),
            (
                "harappa-stamp",
                "Harappa Stamp",
                "Examine ancient Indus Valley civilization seals and stamps with intricate designs and undeciphered scripts.",
                "Archaeology",
                "Advanced",
            ),
            (
                "priest-king",
                "Priest King Mohenjodaro",
                "Study the famous Priest-King sculpture from Mohenjo-daro, showcasing Indus Valley artistic excellence.",
                "Archaeology",
                "Advanced",
            ),
            (
                "varaha",
                "Varaha",
                "Explore the Hindu deity Varaha avatar sculpture with detailed religious and cultural significance.",
                "Culture",
                "Intermediate",
            ),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(id, title, description, category, difficulty)| ModelEntry {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    category: category.to_string(),
                    difficulty: difficulty.to_string(),
                })
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }
}

/// Everything the viewer needs to identify one asset. Immutable per mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub url: String,
    /// Cache/identity key, also the placeholder-shape selector.
    pub asset_id: String,
    pub display_title: String,
}

impl AssetRequest {
    pub fn new(url: impl Into<String>, display_title: impl Into<String>) -> Self {
        let url = url.into();
        let asset_id = derive_asset_id(&url);
        Self {
            url,
            asset_id,
            display_title: display_title.into(),
        }
    }

    pub fn for_entry(entry: &ModelEntry, base: &str) -> Self {
        Self::new(entry.asset_url(base), entry.title.clone())
    }
}

/// Last path segment of the URL with its extension stripped.
pub fn derive_asset_id(url: &str) -> String {
    let path = url
        .split_once(['?', '#'])
        .map(|(path, _)| path)
        .unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let stem = segment
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(segment);
    stem.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_the_seven_models() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.entries().len(), 7);
        let entry = catalog.find("priest-king").unwrap();
        assert_eq!(entry.title, "Priest King Mohenjodaro");
        assert_eq!(entry.difficulty, "Advanced");
        assert!(catalog.find("atlantis").is_none());
    }

    #[test]
    fn asset_urls_are_built_from_the_base() {
        let catalog = Catalog::builtin();
        let entry = catalog.find("varaha").unwrap();
        assert_eq!(
            entry.asset_url("http://localhost:8000"),
            "http://localhost:8000/models/varaha.glb"
        );
        assert_eq!(
            entry.asset_url("http://localhost:8000/"),
            "http://localhost:8000/models/varaha.glb"
        );
    }

    #[test]
    fn asset_id_is_the_last_segment_without_extension() {
        assert_eq!(derive_asset_id("/models/earth-layers.glb"), "earth-layers");
        assert_eq!(
            derive_asset_id("https://example.org/models/varaha.glb?v=2"),
            "varaha"
        );
        assert_eq!(derive_asset_id("/models/no-extension"), "no-extension");
        assert_eq!(derive_asset_id("priest-king.glb"), "priest-king");
    }

    #[test]
    fn request_carries_the_derived_id() {
        let request = AssetRequest::new("/models/harappa-stamp.glb", "Harappa Stamp");
        assert_eq!(request.asset_id, "harappa-stamp");
        assert_eq!(request.display_title, "Harappa Stamp");
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_string_pretty(&catalog).unwrap();
        let loaded = Catalog::from_json_str(&json).unwrap();
        assert_eq!(loaded.entries(), catalog.entries());
    }
}
