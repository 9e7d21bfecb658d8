//! Domain primitives for the recipe subsystem.
//!
//! Strong-typed identifiers plus the pure ownership policy that gates
//! edit/delete actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Recipe in the system.
///
/// Newtype wrapper preventing recipe ids from being mixed with user or
/// ingredient ids.
///
/// # Examples
///
/// ```rust
/// use simmer::domain::RecipeId;
///
/// let id = RecipeId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecipeId(i32);

impl RecipeId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying i32 value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecipeId> for i32 {
    fn from(id: RecipeId) -> Self {
        id.0
    }
}

impl From<i32> for RecipeId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for RecipeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Ownership policy for recipe management actions.
///
/// A principal may manage (edit or delete) a recipe only when their resolved
/// identity equals the recipe's recorded creator. An unresolved principal
/// never qualifies. Pure and side-effect free; callers resolve the principal
/// before asking.
#[must_use]
pub fn can_manage(principal: Option<i32>, created_by_id: i32) -> bool {
    principal == Some(created_by_id)
}
