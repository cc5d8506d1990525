//! Query-string parameters.
//!
//! Each struct ignores unknown keys, so several of them can be extracted
//! from the same query string.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: i64 = 20;

fn default_items_per_page() -> i64 {
    DEFAULT_ITEMS_PER_PAGE
}

/// `offset` + `itemPerPage` pagination. Values are validated by the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub offset: i64,
    #[serde(rename = "itemPerPage", default = "default_items_per_page")]
    pub item_per_page: i64,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            item_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Post search filters. Dates are epoch milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostSearchQuery {
    pub text: Option<String>,
    pub author: Option<String>,
    pub tag: Option<String>,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
}

/// Publication time of a created or edited post; zero means now.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PublishQuery {
    #[serde(default)]
    pub publish_date: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagSearchQuery {
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TagIdQuery {
    pub id: i64,
}
