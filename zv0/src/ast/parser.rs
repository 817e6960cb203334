//! Parser adapter: turns source text into a [`SyntaxTree`].
//!
//! Python is parsed with `ruff_python_parser` and then lowered into the
//! closed node type. The lowered tree has the shape of CPython's `ast`
//! module, which is what the breadth-first passes are defined against:
//!
//! - children appear in `_fields` order (assignment targets before the value,
//!   a loop target before its iterable, a comprehension's element before its
//!   generators), not in evaluation order;
//! - structural nodes that are not statements or expressions (`arguments`,
//!   `arg`, `keyword`, `comprehension`, `withitem`, `excepthandler`,
//!   `match_case`, patterns, type parameters, f-string replacement fields)
//!   still get a node of their own;
//! - every `elif` is an `If` nested inside the previous arm.

use super::tree::{BoolOperator, Node, NodeKind, SyntaxTree};
use crate::analyzer::AnalysisError;
use crate::utils::LineIndex;
use ruff_python_ast::visitor::{self, Visitor};
use ruff_python_ast::{
    BoolOp, Comprehension, Decorator, ElifElseClause, ExceptHandler, Expr, FStringPart,
    InterpolatedStringElement, Keyword, MatchCase, Parameter, Parameters, Pattern, Stmt,
    TypeParams, WithItem,
};
use ruff_text_size::{Ranged, TextSize};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A language the analyzer can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python 3.
    #[default]
    Python,
}

impl Language {
    /// Marker that starts a line comment.
    #[must_use]
    pub fn comment_marker(self) -> &'static str {
        match self {
            Language::Python => "#",
        }
    }

    /// Canonical tag of the language.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AnalysisError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            _ => Err(AnalysisError::UnsupportedLanguage(tag.to_owned())),
        }
    }
}

/// Parses `source` as `language`.
///
/// # Errors
///
/// Returns [`AnalysisError::Parse`] when the text is not valid for the language.
pub fn parse(source: &str, language: Language) -> Result<SyntaxTree, AnalysisError> {
    match language {
        Language::Python => parse_python(source),
    }
}

fn parse_python(source: &str) -> Result<SyntaxTree, AnalysisError> {
    let line_index = LineIndex::new(source);
    let parsed = ruff_python_parser::parse_module(source).map_err(|err| AnalysisError::Parse {
        line: line_index.line_index(err.location.start()),
        message: err.error.to_string(),
    })?;
    let module = parsed.into_syntax();

    let mut builder = TreeBuilder::new(&line_index);
    for stmt in &module.body {
        builder.visit_stmt(stmt);
    }
    Ok(SyntaxTree::new(builder.finish()))
}

/// Builds nodes bottom-up: every lowered node opens a frame that collects
/// its children, and closing the frame attaches the finished node to the
/// enclosing frame.
struct TreeBuilder<'a> {
    line_index: &'a LineIndex,
    stack: Vec<Vec<Node>>,
}

impl<'a> TreeBuilder<'a> {
    fn new(line_index: &'a LineIndex) -> Self {
        Self {
            line_index,
            stack: vec![Vec::new()],
        }
    }

    fn open(&mut self) {
        self.stack.push(Vec::new());
    }

    fn close(&mut self, kind: NodeKind, start: TextSize) {
        let children = self.stack.pop().unwrap_or_default();
        let node = Node::new(kind, self.line_index.line_index(start), children);
        if let Some(parent) = self.stack.last_mut() {
            parent.push(node);
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.stack.pop().unwrap_or_default()
    }

    fn lower_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    fn lower_if(
        &mut self,
        start: TextSize,
        test: &Expr,
        body: &[Stmt],
        clauses: &[ElifElseClause],
    ) {
        self.open();
        self.visit_expr(test);
        self.lower_body(body);
        if let Some((clause, rest)) = clauses.split_first() {
            match &clause.test {
                Some(elif_test) => self.lower_if(clause.start(), elif_test, &clause.body, rest),
                None => self.lower_body(&clause.body),
            }
        }
        self.close(NodeKind::If, start);
    }

    /// Children of a statement, in `_fields` order.
    fn lower_stmt_fields(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDef(node) => {
                self.lower_parameters(&node.parameters);
                self.lower_body(&node.body);
                self.lower_decorators(&node.decorator_list);
                if let Some(returns) = &node.returns {
                    self.visit_expr(returns);
                }
                self.lower_type_params(node.type_params.as_deref());
            }
            Stmt::ClassDef(node) => {
                if let Some(arguments) = &node.arguments {
                    for base in arguments.args.iter() {
                        self.visit_expr(base);
                    }
                    for keyword in arguments.keywords.iter() {
                        self.lower_keyword(keyword);
                    }
                }
                self.lower_body(&node.body);
                self.lower_decorators(&node.decorator_list);
                self.lower_type_params(node.type_params.as_deref());
            }
            Stmt::Assign(node) => {
                for target in &node.targets {
                    self.visit_expr(target);
                }
                self.visit_expr(&node.value);
            }
            Stmt::AugAssign(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.value);
            }
            Stmt::AnnAssign(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.annotation);
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Stmt::TypeAlias(node) => {
                self.visit_expr(&node.name);
                self.lower_type_params(node.type_params.as_deref());
                self.visit_expr(&node.value);
            }
            Stmt::For(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.iter);
                self.lower_body(&node.body);
                self.lower_body(&node.orelse);
            }
            Stmt::With(node) => {
                for item in &node.items {
                    self.lower_with_item(item);
                }
                self.lower_body(&node.body);
            }
            Stmt::Try(node) => {
                self.lower_body(&node.body);
                for handler in &node.handlers {
                    self.lower_handler(handler);
                }
                self.lower_body(&node.orelse);
                self.lower_body(&node.finalbody);
            }
            Stmt::Match(node) => {
                self.visit_expr(&node.subject);
                for case in &node.cases {
                    self.lower_match_case(case);
                }
            }
            // Remaining statements already walk their children in field order.
            _ => visitor::walk_stmt(self, stmt),
        }
    }

    /// Children of an expression, in `_fields` order.
    fn lower_expr_fields(&mut self, expr: &Expr) {
        match expr {
            Expr::Named(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.value);
            }
            Expr::Lambda(node) => {
                if let Some(parameters) = &node.parameters {
                    self.lower_parameters(parameters);
                }
                self.visit_expr(&node.body);
            }
            Expr::Dict(node) => {
                for key in node.items.iter().filter_map(|item| item.key.as_ref()) {
                    self.visit_expr(key);
                }
                for item in &node.items {
                    self.visit_expr(&item.value);
                }
            }
            Expr::ListComp(node) => {
                self.visit_expr(&node.elt);
                self.lower_generators(&node.generators);
            }
            Expr::SetComp(node) => {
                self.visit_expr(&node.elt);
                self.lower_generators(&node.generators);
            }
            Expr::Generator(node) => {
                self.visit_expr(&node.elt);
                self.lower_generators(&node.generators);
            }
            Expr::DictComp(node) => {
                if let Some(key) = node.key.as_ref() {
                    self.visit_expr(key);
                }
                self.visit_expr(&node.value);
                self.lower_generators(&node.generators);
            }
            Expr::Call(node) => {
                self.visit_expr(&node.func);
                for arg in node.arguments.args.iter() {
                    self.visit_expr(arg);
                }
                for keyword in node.arguments.keywords.iter() {
                    self.lower_keyword(keyword);
                }
            }
            Expr::FString(node) => {
                for part in &node.value {
                    if let FStringPart::FString(fstring) = part {
                        self.lower_interpolations(&fstring.elements);
                    }
                }
            }
            _ => visitor::walk_expr(self, expr),
        }
    }

    fn lower_decorators(&mut self, decorators: &[Decorator]) {
        for decorator in decorators {
            self.visit_expr(&decorator.expression);
        }
    }

    /// `arguments`: parameters, then keyword-only defaults, then `**kwargs`,
    /// then positional defaults.
    fn lower_parameters(&mut self, parameters: &Parameters) {
        self.open();
        for parameter in parameters.posonlyargs.iter().chain(&parameters.args) {
            self.lower_parameter(&parameter.parameter);
        }
        if let Some(vararg) = &parameters.vararg {
            self.lower_parameter(vararg);
        }
        for parameter in &parameters.kwonlyargs {
            self.lower_parameter(&parameter.parameter);
        }
        for default in parameters
            .kwonlyargs
            .iter()
            .filter_map(|parameter| parameter.default.as_deref())
        {
            self.visit_expr(default);
        }
        if let Some(kwarg) = &parameters.kwarg {
            self.lower_parameter(kwarg);
        }
        for default in parameters
            .posonlyargs
            .iter()
            .chain(&parameters.args)
            .filter_map(|parameter| parameter.default.as_deref())
        {
            self.visit_expr(default);
        }
        self.close(NodeKind::Other, parameters.start());
    }

    fn lower_parameter(&mut self, parameter: &Parameter) {
        self.open();
        if let Some(annotation) = &parameter.annotation {
            self.visit_expr(annotation);
        }
        self.close(NodeKind::Other, parameter.start());
    }

    fn lower_keyword(&mut self, keyword: &Keyword) {
        self.open();
        self.visit_expr(&keyword.value);
        self.close(NodeKind::Other, keyword.start());
    }

    fn lower_with_item(&mut self, item: &WithItem) {
        self.open();
        self.visit_expr(&item.context_expr);
        if let Some(vars) = &item.optional_vars {
            self.visit_expr(vars);
        }
        self.close(NodeKind::Other, item.start());
    }

    fn lower_handler(&mut self, handler: &ExceptHandler) {
        let ExceptHandler::ExceptHandler(handler) = handler;
        self.open();
        if let Some(type_) = &handler.type_ {
            self.visit_expr(type_);
        }
        self.lower_body(&handler.body);
        self.close(NodeKind::Other, handler.start());
    }

    fn lower_generators(&mut self, generators: &[Comprehension]) {
        for generator in generators {
            self.open();
            self.visit_expr(&generator.target);
            self.visit_expr(&generator.iter);
            for condition in &generator.ifs {
                self.visit_expr(condition);
            }
            self.close(NodeKind::Other, generator.start());
        }
    }

    fn lower_match_case(&mut self, case: &MatchCase) {
        self.open();
        self.lower_pattern(&case.pattern);
        if let Some(guard) = &case.guard {
            self.visit_expr(guard);
        }
        self.lower_body(&case.body);
        self.close(NodeKind::Other, case.start());
    }

    fn lower_pattern(&mut self, pattern: &Pattern) {
        self.open();
        match pattern {
            Pattern::MatchValue(node) => self.visit_expr(&node.value),
            Pattern::MatchSingleton(_) | Pattern::MatchStar(_) => {}
            Pattern::MatchSequence(node) => {
                for sub in &node.patterns {
                    self.lower_pattern(sub);
                }
            }
            Pattern::MatchMapping(node) => {
                for key in &node.keys {
                    self.visit_expr(key);
                }
                for sub in &node.patterns {
                    self.lower_pattern(sub);
                }
            }
            Pattern::MatchClass(node) => {
                self.visit_expr(&node.cls);
                for sub in &node.arguments.patterns {
                    self.lower_pattern(sub);
                }
                for keyword in &node.arguments.keywords {
                    self.lower_pattern(&keyword.pattern);
                }
            }
            Pattern::MatchAs(node) => {
                if let Some(sub) = &node.pattern {
                    self.lower_pattern(sub);
                }
            }
            Pattern::MatchOr(node) => {
                for sub in &node.patterns {
                    self.lower_pattern(sub);
                }
            }
        }
        self.close(NodeKind::Other, pattern.start());
    }

    fn lower_type_params(&mut self, type_params: Option<&TypeParams>) {
        for type_param in type_params.into_iter().flat_map(|params| &params.type_params) {
            self.open();
            visitor::walk_type_param(self, type_param);
            self.close(NodeKind::Other, type_param.start());
        }
    }

    /// `FormattedValue` nodes: the replacement expression, then the format
    /// spec as a nested `JoinedStr`.
    fn lower_interpolations<'e>(
        &mut self,
        elements: impl IntoIterator<Item = &'e InterpolatedStringElement>,
    ) {
        for element in elements {
            if let InterpolatedStringElement::Interpolation(interpolation) = element {
                self.open();
                self.visit_expr(&interpolation.expression);
                if let Some(spec) = &interpolation.format_spec {
                    self.open();
                    self.lower_interpolations(&spec.elements);
                    self.close(NodeKind::Other, interpolation.start());
                }
                self.close(NodeKind::Other, interpolation.start());
            }
        }
    }
}

impl<'a> Visitor<'a> for TreeBuilder<'_> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if let Stmt::If(node) = stmt {
            self.lower_if(
                node.start(),
                &node.test,
                &node.body,
                &node.elif_else_clauses,
            );
            return;
        }
        self.open();
        self.lower_stmt_fields(stmt);
        self.close(stmt_kind(stmt), stmt.start());
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        self.open();
        self.lower_expr_fields(expr);
        self.close(expr_kind(expr), expr.start());
    }
}

/// Only synchronous definitions and loops get their own kind; `async def`
/// and `async for` are distinct node types in Python's `ast` and stay `Other`.
fn stmt_kind(stmt: &Stmt) -> NodeKind {
    match stmt {
        Stmt::FunctionDef(node) if !node.is_async => NodeKind::FunctionDef,
        Stmt::ClassDef(_) => NodeKind::ClassDef,
        Stmt::For(node) if !node.is_async => NodeKind::For,
        Stmt::While(_) => NodeKind::While,
        Stmt::If(_) => NodeKind::If,
        _ => NodeKind::Other,
    }
}

fn expr_kind(expr: &Expr) -> NodeKind {
    match expr {
        Expr::Call(call) => NodeKind::Call {
            callee: match call.func.as_ref() {
                Expr::Name(name) => Some(name.id.to_string()),
                _ => None,
            },
        },
        Expr::BoolOp(node) => NodeKind::BoolOp(match node.op {
            BoolOp::And => BoolOperator::And,
            BoolOp::Or => BoolOperator::Or,
        }),
        _ => NodeKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_with_lines(tree: &SyntaxTree) -> Vec<(NodeKind, usize)> {
        tree.walk()
            .filter(|n| n.kind != NodeKind::Other)
            .map(|n| (n.kind.clone(), n.line))
            .collect()
    }

    #[test]
    fn test_language_from_tag() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("Py".parse::<Language>().unwrap(), Language::Python);
        assert!(matches!(
            "cobol".parse::<Language>(),
            Err(AnalysisError::UnsupportedLanguage(tag)) if tag == "cobol"
        ));
        assert_eq!(Language::Python.comment_marker(), "#");
    }

    #[test]
    fn test_parse_empty_source() {
        let tree = parse("", Language::Python).unwrap();
        assert!(tree.root().children.is_empty());
    }

    #[test]
    fn test_lowering_kinds_and_lines() {
        let source = "\
class Box:
    def get(self):
        while self.x and self.y:
            eval(self.x)
        obj.run()
";
        let tree = parse(source, Language::Python).unwrap();
        let kinds = kinds_with_lines(&tree);
        assert!(kinds.contains(&(NodeKind::ClassDef, 1)));
        assert!(kinds.contains(&(NodeKind::FunctionDef, 2)));
        assert!(kinds.contains(&(NodeKind::While, 3)));
        assert!(kinds.contains(&(NodeKind::BoolOp(BoolOperator::And), 3)));
        assert!(kinds.contains(&(
            NodeKind::Call {
                callee: Some("eval".into())
            },
            4
        )));
        assert!(kinds.contains(&(NodeKind::Call { callee: None }, 5)));
    }

    #[test]
    fn test_elif_chain_nests_like_python_ast() {
        let source = "\
if a:
    pass
elif b:
    pass
elif c:
    pass
else:
    pass
";
        let tree = parse(source, Language::Python).unwrap();
        assert_eq!(tree.count(|k| *k == NodeKind::If), 3);

        let outer = &tree.root().children[0];
        assert_eq!(outer.kind, NodeKind::If);
        let first_elif = outer
            .children
            .iter()
            .find(|n| n.kind == NodeKind::If)
            .unwrap();
        assert_eq!(first_elif.line, 3);
        let second_elif = first_elif
            .children
            .iter()
            .find(|n| n.kind == NodeKind::If)
            .unwrap();
        assert_eq!(second_elif.line, 5);
        // test, body and the else body hang off the innermost arm
        assert_eq!(second_elif.children.len(), 3);
    }

    fn callees(tree: &SyntaxTree) -> Vec<String> {
        tree.walk()
            .filter_map(|n| match &n.kind {
                NodeKind::Call { callee } => callee.clone(),
                _ => None,
            })
            .collect()
    }

    fn depth_of(node: &Node, kind: &NodeKind, depth: usize) -> Option<usize> {
        if node.kind == *kind {
            return Some(depth);
        }
        node.children
            .iter()
            .find_map(|child| depth_of(child, kind, depth + 1))
    }

    #[test]
    fn test_assignment_targets_come_before_the_value() {
        let tree = parse("d[first(k)] = [second(v)]\n", Language::Python).unwrap();
        assert_eq!(callees(&tree), vec!["first", "second"]);
    }

    #[test]
    fn test_loop_target_comes_before_the_iterable() {
        let tree = parse("for x[first()] in y[second()]:\n    pass\n", Language::Python).unwrap();
        assert_eq!(callees(&tree), vec!["first", "second"]);
    }

    #[test]
    fn test_comprehension_element_comes_before_generators() {
        let tree = parse("r = [first(i) for i in second()]\n", Language::Python).unwrap();
        // The element is a direct child of the comprehension expression, the
        // iterable sits one level lower inside the generator node.
        assert_eq!(callees(&tree), vec!["first", "second"]);

        let tree = parse("r = {first(k): v for k in second() if third(k)}\n", Language::Python)
            .unwrap();
        assert_eq!(callees(&tree), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_dict_keys_come_before_values() {
        let tree = parse("d = {a: first(), second(): b}\n", Language::Python).unwrap();
        assert_eq!(callees(&tree), vec!["second", "first"]);
    }

    #[test]
    fn test_structural_nodes_add_a_level() {
        let call = NodeKind::Call {
            callee: Some("g".into()),
        };
        // Module > Try > handler > Expr > Call
        let tree = parse("try:\n    pass\nexcept E:\n    g()\n", Language::Python).unwrap();
        assert_eq!(depth_of(tree.root(), &call, 0), Some(4));

        // Module > Expr > Call(f) > keyword > Call(g)
        let tree = parse("f(key=g())\n", Language::Python).unwrap();
        assert_eq!(depth_of(tree.root(), &call, 0), Some(4));

        // Module > With > withitem > Call
        let tree = parse("with g():\n    pass\n", Language::Python).unwrap();
        assert_eq!(depth_of(tree.root(), &call, 0), Some(3));

        // Module > FunctionDef > arguments > Call (default value)
        let tree = parse("def f(x=g()):\n    pass\n", Language::Python).unwrap();
        assert_eq!(depth_of(tree.root(), &call, 0), Some(3));

        // Module > Expr > JoinedStr > FormattedValue > Call
        let tree = parse("f\"{g()}\"\n", Language::Python).unwrap();
        assert_eq!(depth_of(tree.root(), &call, 0), Some(4));

        // Module > Match > match_case > Expr > Call
        let tree = parse("match x:\n    case 1:\n        g()\n", Language::Python).unwrap();
        assert_eq!(depth_of(tree.root(), &call, 0), Some(4));
    }

    #[test]
    fn test_async_definitions_and_loops_are_other() {
        let source = "\
async def fetch(rows):
    async for row in rows:
        pass
    for row in rows:
        pass
";
        let tree = parse(source, Language::Python).unwrap();
        assert_eq!(tree.count(|k| *k == NodeKind::FunctionDef), 0);
        assert_eq!(tree.count(|k| *k == NodeKind::For), 1);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse("x = 1\ndef broken(:\n", Language::Python).unwrap_err();
        match err {
            AnalysisError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
