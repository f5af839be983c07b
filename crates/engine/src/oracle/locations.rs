//! Location contexts backed by an in-memory map.
use std::collections::HashMap;

use async_trait::async_trait;
use combat_core::{LocationId, PoolContext};

use crate::api::{CollaboratorError, CollaboratorResult, LocationDirectory};

#[derive(Debug, Default)]
pub struct StaticLocationDirectory {
    contexts: HashMap<LocationId, PoolContext>,
}

impl StaticLocationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, context: PoolContext) {
        self.contexts.insert(context.location.clone(), context);
    }

    pub fn with_location(mut self, context: PoolContext) -> Self {
        self.insert(context);
        self
    }
}

#[async_trait]
impl LocationDirectory for StaticLocationDirectory {
    async fn context(&self, location: &LocationId) -> CollaboratorResult<PoolContext> {
        self.contexts
            .get(location)
            .cloned()
            .ok_or_else(|| CollaboratorError::not_found("location", location))
    }
}
