//! Location context loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::PoolContext;

use crate::loaders::{LoadResult, read_file};

/// Loader for location contexts from RON files.
pub struct LocationLoader;

impl LocationLoader {
    /// RON format: `Vec<PoolContext>`, one entry per location id.
    pub fn load(path: &Path) -> LoadResult<Vec<PoolContext>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<PoolContext>> {
        let locations: Vec<PoolContext> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse locations RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for location in &locations {
            if !seen.insert(location.location.clone()) {
                anyhow::bail!("Duplicate location '{}'", location.location);
            }
        }

        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_is_visible_as_attribute() {
        let locations = LocationLoader::parse(
            r#"[(location: "crypt", attributes: { "biome": "undead" }, difficulty: 3)]"#,
        )
        .unwrap();

        let crypt = &locations[0];
        assert_eq!(crypt.attribute("biome").as_deref(), Some("undead"));
        assert_eq!(crypt.attribute("difficulty").as_deref(), Some("3"));
    }
}
