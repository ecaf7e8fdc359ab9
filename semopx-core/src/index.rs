use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::ReportSource;
use semopx_types::{IndexQuery, SemopxError};

/// Resources published on one calendar date, in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentGroup {
    /// Calendar date key (`YYYY-MM-DD`).
    pub date: String,
    /// Resource identifiers in the order the index returned them.
    pub resources: Vec<String>,
}

/// Date groups in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentGroups {
    groups: Vec<DocumentGroup>,
    by_date: HashMap<String, usize>,
}

impl DocumentGroups {
    /// Create an empty set of groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `resource` to the group for `date`, creating the group on first sight.
    pub fn push(&mut self, date: impl Into<String>, resource: impl Into<String>) {
        let date = date.into();
        let idx = match self.by_date.get(&date) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.groups.push(DocumentGroup {
                    date: date.clone(),
                    resources: Vec::new(),
                });
                self.by_date.insert(date, idx);
                idx
            }
        };
        self.groups[idx].resources.push(resource.into());
    }

    /// Number of distinct dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if no resource has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group for a date key.
    #[must_use]
    pub fn get(&self, date: &str) -> Option<&DocumentGroup> {
        self.by_date.get(date).map(|&idx| &self.groups[idx])
    }

    /// Groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentGroup> {
        self.groups.iter()
    }

    /// All resource identifiers, group by group, in index order (duplicates kept).
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.resources.iter().map(String::as_str))
    }
}

impl<'a> IntoIterator for &'a DocumentGroups {
    type Item = &'a DocumentGroup;
    type IntoIter = std::slice::Iter<'a, DocumentGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Parameters of one index walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Static query parameters; the page number is replaced per request.
    pub query: IndexQuery,
    /// Stop once more than this many distinct dates have been seen.
    pub min_days: usize,
    /// Pause before every page request.
    pub page_delay: Duration,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            query: IndexQuery::default(),
            min_days: 5,
            page_delay: Duration::from_secs(1),
        }
    }
}

/// Walk the static-report index from page 1, grouping resources by date.
///
/// Stops after the first page where `page >= totalPages` or more than
/// `min_days` dates have been seen, so the last needed day may be followed by
/// part of one extra day. No page beyond `totalPages` is requested.
///
/// # Errors
/// - `Structure` if a page has no content, lacks `items` or `pagination.totalPages`,
///   or lists an item with a malformed `Date`.
/// - Any error returned by the source.
pub async fn walk_index(
    source: &dyn ReportSource,
    opts: &WalkOptions,
) -> Result<DocumentGroups, SemopxError> {
    let mut groups = DocumentGroups::new();
    let mut page: u32 = 0;

    loop {
        page += 1;
        if !opts.page_delay.is_zero() {
            tokio::time::sleep(opts.page_delay).await;
        }

        let query = opts.query.with_page(page);
        let body = source.index_page(&query).await?.ok_or_else(|| {
            SemopxError::structure(format!("index page {page} returned no content"))
        })?;

        let items = body
            .items
            .ok_or_else(|| SemopxError::structure(format!("index page {page} has no items")))?;
        for item in items {
            let date = item.date_key()?.to_owned();
            groups.push(date, item.resource_name);
        }

        let total_pages = body
            .pagination
            .and_then(|p| p.total_pages)
            .ok_or_else(|| {
                SemopxError::structure(format!("index page {page} has no pagination.totalPages"))
            })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            source = source.name(),
            page,
            total_pages,
            dates = groups.len(),
            "walked index page"
        );

        if page >= total_pages || groups.len() > opts.min_days {
            break;
        }
    }

    Ok(groups)
}
