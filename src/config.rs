use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    /// n-th record to n-th view.
    #[default]
    Positional,
    /// Record identifier matched against view name.
    ByName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub association: Association,
    /// Mark views estimated after a name-keyed merge. Positional binds always do.
    pub mark_estimated: bool,
    /// Fail unless every view gets a prior: no truncation when positional,
    /// no unmatched view names when by name.
    pub strict: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            association: Association::Positional,
            mark_estimated: true,
            strict: false,
        }
    }
}
