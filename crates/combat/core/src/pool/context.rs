use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::stats::LocationId;

/// Selection context: where the encounter happens and how hard it is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolContext {
    pub location: LocationId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty: u32,
}

impl PoolContext {
    /// Attribute key that resolves to the difficulty level.
    pub const DIFFICULTY_KEY: &'static str = "difficulty";

    pub fn new(location: impl Into<LocationId>, difficulty: u32) -> Self {
        Self {
            location: location.into(),
            attributes: BTreeMap::new(),
            difficulty,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Looks up an attribute.
    ///
    /// Explicit attributes win; otherwise [`Self::DIFFICULTY_KEY`] yields the
    /// difficulty level as a decimal string.
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, str>> {
        if let Some(value) = self.attributes.get(key) {
            return Some(Cow::Borrowed(value.as_str()));
        }
        (key == Self::DIFFICULTY_KEY).then(|| Cow::Owned(self.difficulty.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_is_addressable_as_attribute() {
        let ctx = PoolContext::new("crypt", 3);
        assert_eq!(ctx.attribute("difficulty").as_deref(), Some("3"));
        assert_eq!(ctx.attribute("biome"), None);
    }

    #[test]
    fn explicit_attributes_take_precedence() {
        let ctx = PoolContext::new("crypt", 3)
            .with_attribute("difficulty", "hard")
            .with_attribute("biome", "swamp");
        assert_eq!(ctx.attribute("difficulty").as_deref(), Some("hard"));
        assert_eq!(ctx.attribute("biome").as_deref(), Some("swamp"));
    }
}
