use serde::Deserialize;
use std::{env, path::PathBuf};

/// Class names and selectors the page template uses for like buttons.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LikeMarkup {
    pub button_class: String,
    pub active_class: String,
    pub inactive_class: String,
    pub icon_selector: String,
    pub fill_attribute: String,
    pub solid_fill: String,
    pub empty_fill: String,
    pub count_selector: String,
    pub container_selector: String,
    pub secondary_count_selector: String,
    pub list_label_prefix: String,
    pub rejected_status: u16,
}

impl Default for LikeMarkup {
    fn default() -> Self {
        Self {
            button_class: "like-button".to_string(),
            active_class: "text-gray-900".to_string(),
            inactive_class: "text-gray-500".to_string(),
            icon_selector: "svg".to_string(),
            fill_attribute: "fill".to_string(),
            solid_fill: "currentColor".to_string(),
            empty_fill: "none".to_string(),
            count_selector: ".likes-count".to_string(),
            container_selector: "article".to_string(),
            secondary_count_selector: ".post-likes-count".to_string(),
            list_label_prefix: "좋아요 ".to_string(),
            rejected_status: 400,
        }
    }
}

impl LikeMarkup {
    pub fn list_label(&self, likes_count: u64) -> String {
        format!("{}{likes_count}", self.list_label_prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    pub page_path: PathBuf,
    pub events_path: PathBuf,
    pub output_path: PathBuf,
    pub markup_path: Option<PathBuf>,
}

impl ReplayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let page_path = non_empty("LIKE_PAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/page.json"));
        let events_path = non_empty("LIKE_EVENTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/events.json"));
        let output_path = non_empty("LIKE_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| page_path.clone());
        let markup_path = non_empty("LIKE_MARKUP_PATH").map(PathBuf::from);

        Self {
            page_path,
            events_path,
            output_path,
            markup_path,
        }
    }

    pub fn renders_html(&self) -> bool {
        self.output_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
    }
}
