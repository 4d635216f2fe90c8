use crate::errors::LikeError;
use crate::models::PageNode;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Lookups return `Ok(None)` when nothing matches.
pub trait LikeDom {
    type Element: Clone;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn add_class(&mut self, element: &Self::Element, class: &str) -> Result<(), LikeError>;

    fn remove_class(&mut self, element: &Self::Element, class: &str) -> Result<(), LikeError>;

    fn query_selector(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, LikeError>;

    /// Nearest inclusive ancestor of `element` matching `selector`.
    fn closest(
        &self,
        element: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, LikeError>;

    fn document_query_selector(&self, selector: &str) -> Result<Option<Self::Element>, LikeError>;

    fn set_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), LikeError>;

    fn set_text_content(&mut self, element: &Self::Element, text: &str) -> Result<(), LikeError>;
}

/// A compound selector such as `span.likes-count` or `#post-1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl FromStr for Selector {
    type Err = LikeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(LikeError::processing("empty selector"));
        }

        let is_marker = |c: char| c == '.' || c == '#';
        let mut selector = Selector::default();

        let tag_len = input.find(is_marker).unwrap_or(input.len());
        if tag_len > 0 {
            let tag = &input[..tag_len];
            check_name(tag, input)?;
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        let mut rest = &input[tag_len..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[marker.len_utf8()..];
            let len = body.find(is_marker).unwrap_or(body.len());
            let name = &body[..len];
            check_name(name, input)?;
            if marker == '.' {
                selector.classes.push(name.to_string());
            } else if selector.id.replace(name.to_string()).is_some() {
                return Err(LikeError::processing(format!(
                    "selector `{input}` names more than one id"
                )));
            }
            rest = &body[len..];
        }

        Ok(selector)
    }
}

fn check_name(name: &str, selector: &str) -> Result<(), LikeError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(LikeError::processing(format!(
            "unsupported selector `{selector}`"
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Node ids are only meaningful for the document that issued them.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_snapshot(&PageNode::new("body"))
    }
}

impl Document {
    pub fn from_snapshot(page: &PageNode) -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        document.root = document.insert(page, None);
        document
    }

    pub fn to_snapshot(&self) -> PageNode {
        self.snapshot_of(self.root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Nodes held by the arena, including ones detached by `set_text_content`.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Rebuilds the arena from the attached tree, dropping detached nodes.
    /// Every previously issued `NodeId` is invalid afterwards.
    pub fn compact(&mut self) {
        *self = Self::from_snapshot(&self.to_snapshot());
    }

    /// Appends `page` (and its subtree) as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, page: &PageNode) -> NodeId {
        self.insert(page, Some(parent))
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|node| self.node(*node).id.as_deref() == Some(id))
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.node(node).classes
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attributes.get(name).map(String::as_str)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    /// Concatenated text of the element and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = self.node(node).text.clone();
        for child in &self.node(node).children {
            text.push_str(&self.text_content(*child));
        }
        text
    }

    /// Pre-order walk of everything below `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        out
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let node = self.node(node);
        selector
            .tag
            .as_ref()
            .is_none_or(|tag| node.tag.eq_ignore_ascii_case(tag))
            && selector
                .id
                .as_ref()
                .is_none_or(|id| node.id.as_ref() == Some(id))
            && selector
                .classes
                .iter()
                .all(|class| node.classes.contains(class))
    }

    fn first_match(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, LikeError> {
        let selector: Selector = selector.parse()?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|node| self.matches(*node, &selector)))
    }

    fn insert(&mut self, page: &PageNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: page.tag.to_ascii_lowercase(),
            id: page.id.clone(),
            classes: Vec::new(),
            attributes: page.attributes.clone(),
            text: page.text.clone(),
            parent,
            children: Vec::new(),
        });
        for class in &page.classes {
            push_class(&mut self.node_mut(id).classes, class);
        }
        if let Some(parent) = parent {
            self.node_mut(parent).children.push(id);
        }
        for child in &page.children {
            self.insert(child, Some(id));
        }
        id
    }

    fn snapshot_of(&self, id: NodeId) -> PageNode {
        let node = self.node(id);
        PageNode {
            tag: node.tag.clone(),
            id: node.id.clone(),
            classes: node.classes.clone(),
            attributes: node.attributes.clone(),
            text: node.text.clone(),
            children: node
                .children
                .iter()
                .map(|child| self.snapshot_of(*child))
                .collect(),
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

fn push_class(classes: &mut Vec<String>, class: &str) {
    if !classes.iter().any(|existing| existing == class) {
        classes.push(class.to_string());
    }
}

impl LikeDom for Document {
    type Element = NodeId;

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.node(*element).classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, element: &NodeId, class: &str) -> Result<(), LikeError> {
        push_class(&mut self.node_mut(*element).classes, class);
        Ok(())
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) -> Result<(), LikeError> {
        self.node_mut(*element).classes.retain(|c| c != class);
        Ok(())
    }

    fn query_selector(&self, scope: &NodeId, selector: &str) -> Result<Option<NodeId>, LikeError> {
        self.first_match(*scope, selector)
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Result<Option<NodeId>, LikeError> {
        let selector: Selector = selector.parse()?;
        let mut current = Some(*element);
        while let Some(node) = current {
            if self.matches(node, &selector) {
                return Ok(Some(node));
            }
            current = self.parent(node);
        }
        Ok(None)
    }

    fn document_query_selector(&self, selector: &str) -> Result<Option<NodeId>, LikeError> {
        let parsed: Selector = selector.parse()?;
        if self.matches(self.root, &parsed) {
            return Ok(Some(self.root));
        }
        self.first_match(self.root, selector)
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<(), LikeError> {
        self.node_mut(*element)
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_text_content(&mut self, element: &NodeId, text: &str) -> Result<(), LikeError> {
        // detached children stay in the arena until `compact`
        let children = std::mem::take(&mut self.node_mut(*element).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
        self.node_mut(*element).text = text.to_string();
        Ok(())
    }
}
