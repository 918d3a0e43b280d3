//! C code generation for the Quill backend.
//!
//! The generator walks the AST depth-first and emits one C statement
//! per recognized node into a single translation unit. The traversal
//! order is a contract, not an accident: at each node the `depend`
//! subtree goes to the evaluator only, then the `right` and `left`
//! subtrees are evaluated and transpiled, then the node itself is
//! emitted. Statements chained through `left` therefore come out in
//! source order.

use std::fs;
use std::path::Path;

use crate::ast::{AstNode, NodeKind};
use crate::error::CoreError;
use crate::eval::Evaluator;

/// Per-invocation formatting knobs. Threaded through the traversal
/// instead of living in process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Width of one indentation step, in columns.
    pub indent_width: usize,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions { indent_width: 4 }
    }
}

const PREAMBLE: &str = "#include <stdio.h>\n\nint main() {\n";
const POSTAMBLE: &str = "}\n";

/// A finished C translation unit.
///
/// Built once per compile invocation, written to the staged source
/// file, never mutated after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    pub source: String,
}

impl GeneratedProgram {
    /// Write the whole unit to `path`, replacing any previous file.
    /// The handle is closed before this returns, so the toolchain
    /// never sees a half-written file.
    pub fn write_to(&self, path: &Path) -> Result<(), CoreError> {
        fs::write(path, &self.source).map_err(|source| CoreError::SourceWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Generate the C translation unit for `root`.
///
/// An absent root yields an empty body: the entry-point open is
/// immediately followed by the close. Traversal itself cannot fail.
pub fn generate(
    root: Option<&AstNode>,
    module: &str,
    evaluator: &mut dyn Evaluator,
    options: CodegenOptions,
) -> GeneratedProgram {
    let mut source = String::from(PREAMBLE);
    if let Some(node) = root {
        transpile_node(node, module, &mut source, options.indent_width, evaluator);
    }
    source.push_str(POSTAMBLE);
    GeneratedProgram { source }
}

fn transpile_node(
    node: &AstNode,
    module: &str,
    out: &mut String,
    indent: usize,
    evaluator: &mut dyn Evaluator,
) {
    if let Some(depend) = &node.depend {
        evaluator.evaluate(depend, module);
    }
    if let Some(right) = &node.right {
        evaluator.evaluate(right, module);
        transpile_node(right, module, out, indent, evaluator);
    }
    if let Some(left) = &node.left {
        evaluator.evaluate(left, module);
        transpile_node(left, module, out, indent, evaluator);
    }

    out.push_str(&" ".repeat(indent));
    match &node.kind {
        NodeKind::PrintString { value } => {
            out.push_str("printf(\"");
            out.push_str(&escape_c(value));
            out.push_str("\\n\");");
        }
        NodeKind::Noop => {}
    }
    // Every node ends its line, Noop included; column state stays
    // predictable across statements.
    out.push('\n');
}

/// Escape a literal so it stays a single C string literal and a
/// format string without conversions (`%` is doubled).
fn escape_c(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '%' => escaped.push_str("%%"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::NoopEvaluator;

    /// Records which subtrees the generator hands to the evaluator.
    #[derive(Debug, Default)]
    struct RecordingEvaluator {
        seen: Vec<String>,
    }

    impl Evaluator for RecordingEvaluator {
        fn evaluate(&mut self, node: &AstNode, module: &str) {
            let label = match &node.kind {
                NodeKind::PrintString { value } => value.clone(),
                NodeKind::Noop => "<noop>".to_string(),
            };
            self.seen.push(format!("{module}:{label}"));
        }
    }

    fn generate_default(root: Option<&AstNode>) -> GeneratedProgram {
        generate(root, "main", &mut NoopEvaluator, CodegenOptions::default())
    }

    #[test]
    fn single_print_node_matches_golden_output() {
        let root = AstNode::print_string("hello");
        let program = generate_default(Some(&root));
        assert_eq!(
            program.source,
            "#include <stdio.h>\n\nint main() {\n    printf(\"hello\\n\");\n}\n"
        );
    }

    #[test]
    fn absent_root_yields_empty_body() {
        let program = generate_default(None);
        assert_eq!(program.source, "#include <stdio.h>\n\nint main() {\n}\n");
    }

    #[test]
    fn left_chain_is_emitted_in_source_order() {
        let root = AstNode::print_string("c")
            .chained_onto(AstNode::print_string("b").chained_onto(AstNode::print_string("a")));
        let program = generate_default(Some(&root));
        assert_eq!(
            program.source,
            "#include <stdio.h>\n\nint main() {\n    \
             printf(\"a\\n\");\n    printf(\"b\\n\");\n    printf(\"c\\n\");\n}\n"
        );
    }

    #[test]
    fn noop_nodes_emit_an_indented_empty_line() {
        let root = AstNode::noop().chained_onto(AstNode::noop());
        let program = generate_default(Some(&root));
        assert_eq!(
            program.source,
            "#include <stdio.h>\n\nint main() {\n    \n    \n}\n"
        );
    }

    #[test]
    fn literal_is_escaped_for_c() {
        let root = AstNode::print_string("50% \"sure\"\\path");
        let program = generate_default(Some(&root));
        assert!(
            program
                .source
                .contains("printf(\"50%% \\\"sure\\\"\\\\path\\n\");")
        );
    }

    #[test]
    fn indent_width_is_honored() {
        let root = AstNode::print_string("x");
        let program = generate(
            Some(&root),
            "main",
            &mut NoopEvaluator,
            CodegenOptions { indent_width: 2 },
        );
        assert!(program.source.contains("\n  printf(\"x\\n\");\n"));
    }

    #[test]
    fn depend_subtree_is_evaluated_but_never_emitted() {
        let mut root = AstNode::print_string("visible");
        root.depend = Some(Box::new(AstNode::print_string("dependency")));

        let mut evaluator = RecordingEvaluator::default();
        let program = generate(
            Some(&root),
            "main",
            &mut evaluator,
            CodegenOptions::default(),
        );

        assert_eq!(evaluator.seen, vec!["main:dependency".to_string()]);
        assert!(program.source.contains("printf(\"visible\\n\");"));
        assert!(!program.source.contains("dependency"));
    }

    #[test]
    fn children_are_evaluated_in_depend_right_left_order() {
        let mut root = AstNode::print_string("current");
        root.depend = Some(Box::new(AstNode::print_string("dep")));
        root.right = Some(Box::new(AstNode::print_string("right")));
        root.left = Some(Box::new(AstNode::print_string("left")));

        let mut evaluator = RecordingEvaluator::default();
        let program = generate(
            Some(&root),
            "main",
            &mut evaluator,
            CodegenOptions::default(),
        );

        assert_eq!(
            evaluator.seen,
            vec![
                "main:dep".to_string(),
                "main:right".to_string(),
                "main:left".to_string(),
            ]
        );
        // Emission order: right subtree, left subtree, current node.
        let right_at = program.source.find("printf(\"right").expect("right emitted");
        let left_at = program.source.find("printf(\"left").expect("left emitted");
        let current_at = program
            .source
            .find("printf(\"current")
            .expect("current emitted");
        assert!(right_at < left_at && left_at < current_at);
    }

    #[test]
    fn generation_is_deterministic() {
        let root = AstNode::print_string("b").chained_onto(AstNode::print_string("a"));
        let first = generate_default(Some(&root));
        let second = generate_default(Some(&root));
        assert_eq!(first, second);
    }

    #[test]
    fn write_to_overwrites_previous_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("main.c");
        std::fs::write(&path, "stale contents").expect("seed file");

        let root = AstNode::print_string("fresh");
        let program = generate_default(Some(&root));
        program.write_to(&path).expect("write");

        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, program.source);
    }
}
