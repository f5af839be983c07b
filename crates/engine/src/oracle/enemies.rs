//! Enemy realization from static templates.
use std::collections::HashMap;

use async_trait::async_trait;
use combat_core::{EnemyId, EnemyStats, EnemyTemplate};

use crate::api::{CollaboratorError, CollaboratorResult, EnemyCatalog};

#[derive(Debug, Default)]
pub struct StaticEnemyCatalog {
    templates: HashMap<EnemyId, EnemyTemplate>,
}

impl StaticEnemyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: EnemyTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn with_template(mut self, template: EnemyTemplate) -> Self {
        self.insert(template);
        self
    }
}

#[async_trait]
impl EnemyCatalog for StaticEnemyCatalog {
    async fn realize(&self, enemy: &EnemyId, difficulty: u32) -> CollaboratorResult<EnemyStats> {
        self.templates
            .get(enemy)
            .map(|template| template.realize(difficulty))
            .ok_or_else(|| CollaboratorError::not_found("enemy", enemy))
    }
}
