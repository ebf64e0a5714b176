//! Level Query Builder
//!
//! Specializes a widget's base navigation query for one request. The builder
//! only produces the query; executing it is the catalog's job.
//!
//! Rules, in order:
//!
//! 1. Work on a copy of the base query
//! 2. Drop the `portal_type` filter when content type filtering is suppressed
//! 3. Constrain `path` to the immediate children of the requested location
//! 4. Default `is_default_page` to `false`; drop it if it admits both values

use crate::models::{NavQuery, QueryValue, DEFAULT_PAGE_INDEX, PORTAL_TYPE_INDEX};

/// Build the catalog query for one tree level below `location`
///
/// # Examples
///
/// ```rust
/// use contenttree_core::models::{NavQuery, QueryValue};
/// use contenttree_core::services::build_level_query;
///
/// let base = NavQuery::new();
/// let query = build_level_query(&base, Some("/site/docs"), true);
///
/// assert_eq!(query.path().unwrap().depth, Some(1));
/// assert_eq!(query.get("is_default_page"), Some(&QueryValue::Bool(false)));
/// ```
pub fn build_level_query(
    base: &NavQuery,
    location: Option<&str>,
    suppress_type_filter: bool,
) -> NavQuery {
    let mut query = base.clone();

    if suppress_type_filter && query.remove(PORTAL_TYPE_INDEX).is_some() {
        tracing::debug!("Content type filter suppressed for level query");
    }

    if let Some(location) = location {
        query.set_path(location, Some(1));
    }

    normalize_default_page(&mut query);
    query
}

/// Build the catalog query locating a single item for preview
///
/// Unlike a level query the path is not depth limited, so the item itself is
/// the first hit, and the content type filter is always kept.
pub fn build_preview_query(base: &NavQuery, location: Option<&str>) -> NavQuery {
    let mut query = base.clone();

    if let Some(location) = location {
        query.set_path(location, None);
    }

    normalize_default_page(&mut query);
    query
}

/// Apply the default page rule
///
/// Absent means "exclude default pages". A constraint admitting both truth
/// values would match nothing useful, so it is removed outright.
pub fn normalize_default_page(query: &mut NavQuery) {
    if !query.contains_key(DEFAULT_PAGE_INDEX) {
        query.insert(DEFAULT_PAGE_INDEX, QueryValue::Bool(false));
        return;
    }

    let contradictory = query
        .get(DEFAULT_PAGE_INDEX)
        .map(|value| value.contains_bool(true) && value.contains_bool(false))
        .unwrap_or(false);

    if contradictory {
        tracing::debug!("Dropping contradictory is_default_page constraint");
        query.remove(DEFAULT_PAGE_INDEX);
    }
}

#[cfg(test)]
#[path = "query_builder_test.rs"]
mod query_builder_test;
