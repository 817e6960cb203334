//! Closed syntax tree consumed by the metrics and rule passes.

use std::collections::VecDeque;

/// Short-circuiting boolean operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// The kind of a syntax node.
///
/// Only the shapes the analysis cares about are distinguished; everything
/// else collapses into `Other` and is kept only for its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The module root.
    Module,
    /// A call expression. `callee` is set only when the callee is a bare name
    /// (`eval(x)`), never for attribute access or computed callees.
    Call {
        /// Name of a directly called function.
        callee: Option<String>,
    },
    /// An `if` statement or an `elif` arm.
    If,
    /// A synchronous `for` loop. `async for` is `Other`.
    For,
    /// A `while` loop.
    While,
    /// An `and`/`or` expression.
    BoolOp(BoolOperator),
    /// A synchronous function definition. `async def` is `Other`.
    FunctionDef,
    /// A class definition.
    ClassDef,
    /// Any other statement, expression or structural node (handlers,
    /// comprehensions, keywords, parameters and the like).
    Other,
}

impl NodeKind {
    /// Returns true for `for` and `while` loops.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        matches!(self, NodeKind::For | NodeKind::While)
    }

    /// Returns true for nodes that add a decision point.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            NodeKind::If | NodeKind::For | NodeKind::While | NodeKind::BoolOp(_)
        )
    }
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    /// 1-indexed line where the node starts (0 for the module root).
    pub line: usize,
    /// Child nodes in source order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a node.
    #[must_use]
    pub fn new(kind: NodeKind, line: usize, children: Vec<Node>) -> Self {
        Self {
            kind,
            line,
            children,
        }
    }

    /// Creates a node without children.
    #[must_use]
    pub fn leaf(kind: NodeKind, line: usize) -> Self {
        Self::new(kind, line, Vec::new())
    }
}

/// A parsed unit of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: Node,
}

impl SyntaxTree {
    /// Wraps module-level statements in a tree.
    #[must_use]
    pub fn new(body: Vec<Node>) -> Self {
        Self {
            root: Node::new(NodeKind::Module, 0, body),
        }
    }

    /// The module root.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Iterates over every node breadth-first, starting at the root.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            queue: VecDeque::from([&self.root]),
        }
    }

    /// Counts the nodes matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&NodeKind) -> bool) -> usize {
        self.walk().filter(|node| predicate(&node.kind)).count()
    }
}

/// Breadth-first iterator over a [`SyntaxTree`].
pub struct Walk<'a> {
    queue: VecDeque<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}
