use crate::errors::LikeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponsePayload {
    pub liked: bool,
    pub likes_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// A finished request as reported by the request-dispatch layer.
#[derive(Debug, Clone)]
pub struct RequestCompleted<E> {
    pub target: E,
    pub status: u16,
    pub body: String,
}

/// Where the secondary like count for a button lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContext<E> {
    /// The button sits inside a list item container.
    Container(E),
    /// No container; the page is a single post's detail view.
    Detail,
}

impl<E> PostContext<E> {
    pub fn view(&self) -> PostView {
        match self {
            PostContext::Container(_) => PostView::List,
            PostContext::Detail => PostView::Detail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostView {
    List,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// The target was not a like button.
    Ignored,
    Rejected {
        message: String,
    },
    Applied {
        liked: bool,
        likes_count: u64,
        view: PostView,
    },
    Failed(LikeError),
}

/// Serialized form of a page, one node per element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageNode {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageNode>,
}

impl PageNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn child(mut self, child: PageNode) -> Self {
        self.children.push(child);
        self
    }
}

/// One recorded completion, targeting an element by its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayEvent {
    pub target: String,
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub applied: u64,
    pub rejected: u64,
    pub ignored: u64,
    pub failed: u64,
    pub unresolved: u64,
}
