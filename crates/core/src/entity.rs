//! Typed references to entities that comments and audit entries can target.
//!
//! Comments and audit entries store the target as an `(entity, entity_id)`
//! pair. The kind is checked against [`EntityKind`] at the HTTP boundary so a
//! reference can never name an unknown table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Kinds of entity a comment or audit entry may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    ConnectionRequest,
    Alumni,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::ConnectionRequest,
        EntityKind::Alumni,
        EntityKind::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::ConnectionRequest => "ConnectionRequest",
            EntityKind::Alumni => "Alumni",
            EntityKind::User => "User",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
                CoreError::Validation(format!(
                    "Unknown entity '{s}'. Must be one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for EntityKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A reference to one entity row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: DbId,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: DbId) -> Self {
        Self { kind, id }
    }

    /// Build a reference from the raw `entity` / `entity_id` pair a client sends.
    ///
    /// Both parts are required; the kind must be whitelisted.
    pub fn parse(entity: Option<&str>, entity_id: Option<DbId>) -> Result<Self, CoreError> {
        let entity = entity.map(str::trim).filter(|e| !e.is_empty());
        match (entity, entity_id) {
            (Some(entity), Some(id)) => Ok(Self::new(entity.parse()?, id)),
            _ => Err(CoreError::Validation(
                "entity and entity_id are required".to_string(),
            )),
        }
    }
}
