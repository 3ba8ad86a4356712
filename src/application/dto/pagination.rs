use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

/// Offset-paginated listing result. `total` counts every non-deleted record
/// regardless of the requested window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        Self {
            items,
            pagination: PageInfo { page, limit, total },
        }
    }
}
