//! Widget Configuration
//!
//! Settings of one content tree widget and of the source vocabulary bound to
//! it. Everything deserializes from JSON with the widget defaults filled in,
//! so a fixture only has to spell out what differs.

use super::{Brain, LibraryEntry, NavQuery};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

fn default_event() -> String {
    "click".to_string()
}

fn default_speed() -> u32 {
    200
}

/// How the source vocabulary issues tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScheme {
    /// Token is the absolute physical path
    #[default]
    Path,
    /// Token is the item's UID
    Uid,
}

/// Which brains may be chosen, by catalog field
///
/// Every listed field must match one of its allowed values. An empty filter
/// makes everything selectable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectableFilter {
    criteria: BTreeMap<String, Vec<String>>,
}

impl SelectableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `field` to `values`
    pub fn with<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria
            .insert(field.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, brain: &Brain) -> bool {
        self.criteria.iter().all(|(field, allowed)| {
            brain
                .field(field)
                .map(|value| allowed.iter().any(|candidate| *candidate == value))
                .unwrap_or(false)
        })
    }
}

/// Settings of the source vocabulary the widget chooses from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSettings {
    /// Path of the site root; path tokens outside it do not resolve
    pub portal_path: String,

    #[serde(default)]
    pub token_scheme: TokenScheme,

    /// Base catalog query for every tree level
    #[serde(default)]
    pub navigation_tree_query: NavQuery,

    #[serde(default)]
    pub selectable_filter: SelectableFilter,
}

impl SourceSettings {
    pub fn new(portal_path: impl Into<String>) -> Self {
        Self {
            portal_path: portal_path.into(),
            token_scheme: TokenScheme::default(),
            navigation_tree_query: NavQuery::new(),
            selectable_filter: SelectableFilter::new(),
        }
    }
}

/// Settings of one content tree widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    /// Field name, e.g. `form.widgets.related_items`
    pub name: String,

    pub source: SourceSettings,

    /// Ignore the base query's content type filter when browsing
    #[serde(default = "default_true")]
    pub show_all_content_types: bool,

    /// Show every node rather than only folders and selectable items
    #[serde(default)]
    pub show_all_nodes: bool,

    #[serde(default)]
    pub multi_select: bool,

    #[serde(default = "default_event")]
    pub folder_event: String,

    #[serde(default = "default_event")]
    pub select_event: String,

    #[serde(default = "default_speed")]
    pub expand_speed: u32,

    #[serde(default = "default_speed")]
    pub collapse_speed: u32,

    #[serde(default = "default_true")]
    pub multi_folder: bool,

    /// Bookmarked roots offered by the bookmark library provider
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
}

impl WidgetSettings {
    pub fn new(name: impl Into<String>, source: SourceSettings) -> Self {
        Self {
            name: name.into(),
            source,
            show_all_content_types: true,
            show_all_nodes: false,
            multi_select: false,
            folder_event: default_event(),
            select_event: default_event(),
            expand_speed: default_speed(),
            collapse_speed: default_speed(),
            multi_folder: true,
            libraries: Vec::new(),
        }
    }

    /// Element id prefix used by the client script
    pub fn dom_id(&self) -> String {
        self.name.replace('.', "-")
    }
}

/// Parameters handed to the client-side tree script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub id: String,
    /// Fetch endpoint URL
    pub script: String,
    pub preview_script: String,
    pub folder_event: String,
    pub select_event: String,
    pub expand_speed: u32,
    pub collapse_speed: u32,
    pub multi_folder: bool,
    pub multi_select: bool,
    /// Path the client tree starts at
    pub root_url: String,
}

impl ClientConfig {
    /// Build the client parameters for a widget rendered on `form_url`
    ///
    /// `libraries` must already be resolved; the first entry becomes the root.
    pub fn for_widget(form_url: &str, widget: &WidgetSettings, libraries: &[LibraryEntry]) -> Self {
        let form_url = form_url.trim_end_matches('/');
        let widget_url = format!("{}/++widget++{}", form_url, widget.name);
        Self {
            id: widget.dom_id(),
            script: format!("{}/@@contenttree-fetch", widget_url),
            preview_script: format!("{}/@@contenttree-preview", widget_url),
            folder_event: widget.folder_event.clone(),
            select_event: widget.select_event.clone(),
            expand_speed: widget.expand_speed,
            collapse_speed: widget.collapse_speed,
            multi_folder: widget.multi_folder,
            multi_select: widget.multi_select,
            root_url: libraries
                .first()
                .map(|entry| entry.query.clone())
                .unwrap_or_else(|| widget.source.portal_path.clone()),
        }
    }
}
