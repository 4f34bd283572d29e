//! Input tree contract
//!
//! The extractor never parses markup itself. It walks any tree that implements
//! [`TreeNode`], and only reads from it. An owned [`Node`] tree is provided for
//! callers that do not bring their own DOM; [`crate::html`] fills it from markup.

/// What a node is, as far as template extraction cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// Element with its tag name
    Element(&'a str),
    /// Text node with its content
    Text(&'a str),
    /// Comments, doctypes, processing instructions, fragments, ...
    Other,
}

/// A read-only node of the input tree
///
/// `attributes` must yield pairs in declaration order and nothing for
/// non-elements. `children` yields nothing for leaves.
pub trait TreeNode: Sized {
    /// Kind discriminator
    fn kind(&self) -> NodeKind<'_>;

    /// Attribute `(name, value)` pairs
    fn attributes(&self) -> impl Iterator<Item = (&str, &str)>;

    /// Child nodes in document order
    fn children(&self) -> impl Iterator<Item = Self>;
}

/// An owned element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag_name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes and no children
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }
}

/// An owned node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    /// Container with no markup of its own, e.g. a parsed fragment
    Fragment(Vec<Node>),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Node::Comment(content.into())
    }

    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Fragment(children.into_iter().collect())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl<'a> TreeNode for &'a Node {
    fn kind(&self) -> NodeKind<'_> {
        match self {
            Node::Element(element) => NodeKind::Element(&element.tag_name),
            Node::Text(text) => NodeKind::Text(text),
            Node::Comment(_) | Node::Fragment(_) => NodeKind::Other,
        }
    }

    fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        let attributes: &[(String, String)] = match self {
            Node::Element(element) => &element.attributes,
            _ => &[],
        };
        attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        let children: &'a [Node] = match *self {
            Node::Element(element) => &element.children,
            Node::Fragment(children) => children,
            Node::Text(_) | Node::Comment(_) => &[],
        };
        children.iter()
    }
}
