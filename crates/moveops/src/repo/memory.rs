//! In-memory repository implementation.
//!
//! The counterpart of running the real stack against an in-memory database:
//! a `BTreeMap` behind a tokio `RwLock`, with repository-assigned ids and
//! timestamps. Iteration order is insertion-independent but deterministic,
//! which keeps test output stable.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::error::{RepoError, Result};
use super::{Entity, EntityRepo, EquipmentRepo, Filter};
use crate::model::Equipment;

/// Generic in-memory collection for one entity type.
pub struct MemoryRepo<T> {
    rows: RwLock<BTreeMap<String, T>>,
}

impl<T> MemoryRepo<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T> Default for MemoryRepo<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_value<T: serde::Serialize>(entity: &T) -> Result<serde_json::Value> {
    serde_json::to_value(entity).map_err(|e| RepoError::Storage(e.to_string()))
}

#[async_trait]
impl<T: Entity + 'static> EntityRepo<T> for MemoryRepo<T> {
    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn list_by_filter(&self, filter: &Filter) -> Result<Vec<T>> {
        let rows = self.rows.read().await;
        let mut out = Vec::new();
        for row in rows.values() {
            if filter.is_empty() || filter.matches(&to_value(row)?) {
                out.push(row.clone());
            }
        }
        Ok(out)
    }

    async fn insert(&self, entities: Vec<T>) -> Result<Vec<T>> {
        let now = Utc::now();
        let mut rows = self.rows.write().await;
        let mut stored = Vec::with_capacity(entities.len());
        for mut entity in entities {
            if entity.id().is_empty() {
                entity.set_id(crate::model::new_id());
            }
            if rows.contains_key(entity.id()) {
                return Err(RepoError::Conflict(format!(
                    "{} already exists: {}",
                    T::kind(),
                    entity.id()
                )));
            }
            entity.set_created_at(Some(now));
            entity.set_updated_at(Some(now));
            rows.insert(entity.id().to_string(), entity.clone());
            stored.push(entity);
        }
        Ok(stored)
    }

    async fn update(&self, id: &str, mut entity: T) -> Result<T> {
        let mut rows = self.rows.write().await;
        let existing = rows
            .get(id)
            .ok_or_else(|| RepoError::not_found(T::kind(), id))?;
        entity.set_id(id.to_string());
        entity.set_created_at(existing.created_at());
        entity.set_updated_at(Some(Utc::now()));
        rows.insert(id.to_string(), entity.clone());
        Ok(entity)
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<()> {
        let mut rows = self.rows.write().await;
        for id in ids {
            rows.remove(id);
        }
        Ok(())
    }
}

#[async_trait]
impl EquipmentRepo for MemoryRepo<Equipment> {
    async fn adjust_quantity(&self, id: &str, delta: i64) -> Result<i64> {
        // Read-modify-write under the write lock, so concurrent adjustments
        // serialize instead of losing updates.
        let mut rows = self.rows.write().await;
        let equipment = rows
            .get_mut(id)
            .ok_or_else(|| RepoError::not_found(Equipment::kind(), id))?;
        equipment.total_quantity += delta;
        equipment.updated_at = Some(Utc::now());
        Ok(equipment.total_quantity)
    }
}
