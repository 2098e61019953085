//! Raw movie records, as handed over by the dataset reader.

use serde::{Deserialize, Serialize};
use super::{PropertyMap, Value};

/// One row of movie metadata.
///
/// Numeric columns stay as the text the reader found; the graph builder
/// coerces malformed or empty cells to zero and reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    pub title: String,
    pub director: String,
    /// Credited actors in billing order.
    pub actors: Vec<String>,
    pub release_year: String,
    pub gross: String,
    pub budget: String,
    pub extras: PropertyMap,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, release_year: i32, director: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            release_year: release_year.to_string(),
            ..Self::default()
        }
    }

    pub fn with_actor(mut self, name: impl Into<String>) -> Self {
        self.actors.push(name.into());
        self
    }

    pub fn with_actors(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.actors.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_gross(mut self, gross: i64) -> Self {
        self.gross = gross.to_string();
        self
    }

    pub fn with_budget(mut self, budget: i64) -> Self {
        self.budget = budget.to_string();
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}
