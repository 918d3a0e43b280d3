use crate::ast::AstNode;

/// Collaborator that resolves dependency subtrees ahead of emission.
///
/// The code generator hands `depend`, `right` and `left` children to
/// the evaluator before emitting anything for the current node, and
/// never interprets the result. `depend` subtrees exist only for
/// their evaluation side effects and are not transpiled.
pub trait Evaluator {
    fn evaluate(&mut self, node: &AstNode, module: &str);
}

/// Evaluator for runs with no interpreter attached.
#[derive(Debug, Default)]
pub struct NoopEvaluator;

impl Evaluator for NoopEvaluator {
    fn evaluate(&mut self, _node: &AstNode, _module: &str) {}
}
