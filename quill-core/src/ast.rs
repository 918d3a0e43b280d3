/// Kind of a node in the parsed program tree.
///
/// The enumeration is closed and the code generator matches on it
/// exhaustively, so a new kind cannot be ignored by accident. `Noop`
/// is a deliberate do-nothing statement, not a fallthrough default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Print a string literal followed by a newline.
    PrintString { value: String },
    /// A statement that emits nothing.
    Noop,
}

/// A node in the parsed program tree.
///
/// The tree is owned by whoever built it (the parser, or a test); the
/// backend only reads it. Statements chain through `left` with the
/// newest statement as the root. `depend` subtrees carry ordering
/// constraints resolved by the evaluator and are never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub left: Option<Box<AstNode>>,
    pub right: Option<Box<AstNode>>,
    pub depend: Option<Box<AstNode>>,
}

impl AstNode {
    pub fn new(kind: NodeKind) -> Self {
        AstNode {
            kind,
            left: None,
            right: None,
            depend: None,
        }
    }

    pub fn print_string(value: impl Into<String>) -> Self {
        AstNode::new(NodeKind::PrintString {
            value: value.into(),
        })
    }

    pub fn noop() -> Self {
        AstNode::new(NodeKind::Noop)
    }

    /// Make `previous` the `left` child, chaining statements the way
    /// the parser does.
    pub fn chained_onto(mut self, previous: AstNode) -> Self {
        self.left = Some(Box::new(previous));
        self
    }
}
