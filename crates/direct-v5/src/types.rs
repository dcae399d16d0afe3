//! Result types of mutating v5 methods.

use serde::Deserialize;

/// A warning or error attached to a single object in a batch result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExceptionNotification {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Outcome for one object of an `add`/`update`/`delete`-style call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub warnings: Vec<ExceptionNotification>,
    #[serde(default)]
    pub errors: Vec<ExceptionNotification>,
}

impl ActionResult {
    /// True if the object was processed without errors.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of an `add` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddResults {
    #[serde(rename = "AddResults", default)]
    pub results: Vec<ActionResult>,
}

/// Result of an `update` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateResults {
    #[serde(rename = "UpdateResults", default)]
    pub results: Vec<ActionResult>,
}

macro_rules! batch_helpers {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// Ids of objects processed successfully.
                pub fn ids(&self) -> Vec<i64> {
                    self.results
                        .iter()
                        .filter(|r| r.is_success())
                        .filter_map(|r| r.id)
                        .collect()
                }

                /// Results that carry errors.
                pub fn failures(&self) -> impl Iterator<Item = &ActionResult> {
                    self.results.iter().filter(|r| !r.is_success())
                }

                /// True if every object was processed without errors.
                pub fn all_succeeded(&self) -> bool {
                    self.results.iter().all(ActionResult::is_success)
                }
            }
        )*
    };
}

batch_helpers!(AddResults, UpdateResults);
