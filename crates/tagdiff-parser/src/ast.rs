//! Document tree for tagdiff markup.
//!
//! Nodes live in an arena owned by `Tree` and refer to each other by
//! `NodeId`. Elements own their children through the id list; every node
//! except the root also records its parent id, which is a back-reference
//! only and never owns anything.

/// Index of a node inside its `Tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A `name="value"` pair on a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A leading `<?name attrs?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl From<tagdiff_lexer::Prolog> for Declaration {
    fn from(prolog: tagdiff_lexer::Prolog) -> Self {
        Self {
            name: prolog.name,
            attributes: prolog
                .attributes
                .into_iter()
                .map(|(name, value)| Attribute { name, value })
                .collect(),
        }
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A tagged element with attributes and children.
    Element(Element),

    /// Literal text. Always a leaf.
    Text(Text),
}

/// A tagged element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// In source order.
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
}

/// Text content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
}

impl Node {
    /// Element name, `None` for text.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element(el) => Some(&el.name),
            Node::Text(_) => None,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Node::Element(el) => &el.attributes,
            Node::Text(_) => &[],
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Element(el) => &el.children,
            Node::Text(_) => &[],
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
}

/// A parsed document: one root element plus an optional declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    slots: Vec<Slot>,
    root: NodeId,
    declaration: Option<Declaration>,
}

impl Tree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.slots[id.0].node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of levels, counting the root as level 0.
    pub fn depth(&self) -> usize {
        self.walk().map(|(_, depth)| depth + 1).max().unwrap_or(0)
    }

    /// Depth-first, pre-order walk yielding each node with its depth.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }

    pub fn root_ref(&self) -> NodeRef<'_> {
        self.node_ref(self.root)
    }

    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }
}

/// Iterator returned by [`Tree::walk`].
pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Walk<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((id, depth))
    }
}

/// Borrowed handle for navigating a tree up and down.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a Node {
        self.tree.node(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.node().name()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        tree.parent(self.id).map(|id| NodeRef { tree, id })
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.children(self.id)
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }
}

/// Node storage used while a tree is being built bottom-up.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
}

impl Arena {
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        self.slots.push(Slot { node, parent: None });
        NodeId(self.slots.len() - 1)
    }

    /// Point every child of `id` back at it.
    pub(crate) fn adopt(&mut self, id: NodeId) {
        let children = self.slots[id.0].node.children().to_vec();
        for child in children {
            self.slots[child.0].parent = Some(id);
        }
    }

    pub(crate) fn finish(self, root: NodeId, declaration: Option<Declaration>) -> Tree {
        Tree {
            slots: self.slots,
            root,
            declaration,
        }
    }
}
