//! Syntax tree walking utilities.
//!
//! Pre-order traversal over every node family. The visitor is a closure
//! receiving a [`Node`] borrowed from the tree; it owns whatever state it
//! accumulates.
//!
//! ```rust,ignore
//! use fern_ast::walk::{walk_module, Node};
//!
//! let mut lambdas = 0;
//! walk_module(&module, &mut |node| {
//!     if let Node::Expr(expr) = node {
//!         if matches!(expr.kind, ExprKind::Lambda { .. }) {
//!             lambdas += 1;
//!         }
//!     }
//! });
//! ```

use super::{
    DeclKind, Declaration, Expr, ExprKind, ExternalItem, ImportDecl, LetBinding, ListElement,
    Module, Pattern, PatternKind, RecordEntry, TypeDefinition, TypeExpr, TypeExprKind,
};
use crate::foundation::{Located, Location};

/// A borrowed reference to any node root.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// Import declaration
    Import(&'a ImportDecl),
    /// Top-level declaration
    Decl(&'a Declaration),
    /// Expression
    Expr(&'a Expr),
    /// Pattern
    Pattern(&'a Pattern),
    /// Type expression
    Type(&'a TypeExpr),
}

impl Located for Node<'_> {
    fn location(&self) -> &Location {
        match self {
            Node::Import(node) => &node.loc,
            Node::Decl(node) => &node.loc,
            Node::Expr(node) => &node.loc,
            Node::Pattern(node) => &node.loc,
            Node::Type(node) => &node.loc,
        }
    }
}

/// Walk a module in pre-order.
///
/// Imports and declarations are stored apart but may interleave in the
/// source; they are visited merged by location so the walk follows source
/// order.
pub fn walk_module<'a, V>(module: &'a Module, visitor: &mut V)
where
    V: FnMut(Node<'a>),
{
    let mut imports = module.imports.iter().peekable();
    let mut decls = module.declarations.iter().peekable();

    loop {
        let take_import = match (imports.peek(), decls.peek()) {
            (Some(import), Some(decl)) => import.loc.offset <= decl.loc.offset,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if take_import {
            if let Some(import) = imports.next() {
                visitor(Node::Import(import));
            }
        } else if let Some(decl) = decls.next() {
            walk_decl(decl, visitor);
        }
    }
}

/// Walk a declaration in pre-order.
pub fn walk_decl<'a, V>(decl: &'a Declaration, visitor: &mut V)
where
    V: FnMut(Node<'a>),
{
    visitor(Node::Decl(decl));

    match &decl.kind {
        DeclKind::Let { binding, .. } => walk_binding(binding, visitor),
        DeclKind::LetRecGroup { bindings, .. } => {
            for binding in bindings {
                walk_binding(binding, visitor);
            }
        }
        DeclKind::Type(type_decl) => match &type_decl.definition {
            TypeDefinition::Alias(ty) => walk_type(ty, visitor),
            TypeDefinition::Record(fields) => {
                for field in fields {
                    walk_type(&field.type_expr, visitor);
                }
            }
            TypeDefinition::Variant(constructors) => {
                for constructor in constructors {
                    for arg in &constructor.args {
                        walk_type(arg, visitor);
                    }
                }
            }
        },
        DeclKind::External(external) => walk_type(&external.type_expr, visitor),
        DeclKind::ExternalBlock(block) => {
            for item in &block.items {
                match item {
                    ExternalItem::Value { type_expr, .. } | ExternalItem::Type { type_expr, .. } => {
                        walk_type(type_expr, visitor)
                    }
                }
            }
        }
        DeclKind::Export(_) | DeclKind::ReExport { .. } => {}
    }
}

fn walk_binding<'a, V>(binding: &'a LetBinding, visitor: &mut V)
where
    V: FnMut(Node<'a>),
{
    walk_pattern(&binding.pattern, visitor);
    if let Some(ty) = &binding.type_annotation {
        walk_type(ty, visitor);
    }
    walk_expr(&binding.value, visitor);
}

/// Walk an expression in pre-order.
pub fn walk_expr<'a, V>(expr: &'a Expr, visitor: &mut V)
where
    V: FnMut(Node<'a>),
{
    visitor(Node::Expr(expr));

    match &expr.kind {
        ExprKind::Lambda {
            params,
            return_type,
            body,
        } => {
            for param in params {
                walk_pattern(&param.pattern, visitor);
                if let Some(ty) = &param.type_annotation {
                    walk_type(ty, visitor);
                }
            }
            if let Some(ty) = return_type {
                walk_type(ty, visitor);
            }
            walk_expr(body, visitor);
        }

        ExprKind::App { func, args } => {
            walk_expr(func, visitor);
            for arg in args {
                walk_expr(arg, visitor);
            }
        }

        ExprKind::Binary { left, right, .. } => {
            walk_expr(left, visitor);
            walk_expr(right, visitor);
        }

        ExprKind::Unary { operand, .. } => walk_expr(operand, visitor),

        ExprKind::Pipe { value, func } => {
            walk_expr(value, visitor);
            walk_expr(func, visitor);
        }

        ExprKind::TypeAnnotation { expr, type_expr } => {
            walk_expr(expr, visitor);
            walk_type(type_expr, visitor);
        }

        ExprKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            walk_expr(condition, visitor);
            walk_expr(then_branch, visitor);
            walk_expr(else_branch, visitor);
        }

        ExprKind::Match { scrutinee, cases } => {
            walk_expr(scrutinee, visitor);
            for case in cases {
                walk_pattern(&case.pattern, visitor);
                if let Some(guard) = &case.guard {
                    walk_expr(guard, visitor);
                }
                walk_expr(&case.body, visitor);
            }
        }

        ExprKind::Record { fields } => walk_entries(fields, visitor),

        ExprKind::RecordUpdate { base, updates } => {
            walk_expr(base, visitor);
            walk_entries(updates, visitor);
        }

        ExprKind::RecordAccess { record, .. } => walk_expr(record, visitor),

        ExprKind::Tuple(elements) | ExprKind::Block(elements) => {
            for element in elements {
                walk_expr(element, visitor);
            }
        }

        ExprKind::List(elements) => {
            for element in elements {
                match element {
                    ListElement::Item(item) | ListElement::Spread(item) => {
                        walk_expr(item, visitor)
                    }
                }
            }
        }

        ExprKind::Let { binding, .. } => walk_binding(binding, visitor),

        ExprKind::LetRecGroup(bindings) => {
            for binding in bindings {
                walk_binding(binding, visitor);
            }
        }

        ExprKind::Unsafe(body) => walk_expr(body, visitor),

        ExprKind::While { condition, body } => {
            walk_expr(condition, visitor);
            walk_expr(body, visitor);
        }

        // === Leaf nodes ===
        ExprKind::IntLit(_)
        | ExprKind::FloatLit(_)
        | ExprKind::StringLit(_)
        | ExprKind::BoolLit(_)
        | ExprKind::UnitLit
        | ExprKind::Var(_) => {}
    }
}

fn walk_entries<'a, V>(entries: &'a [RecordEntry], visitor: &mut V)
where
    V: FnMut(Node<'a>),
{
    for entry in entries {
        match entry {
            RecordEntry::Field { value, .. } => walk_expr(value, visitor),
            RecordEntry::Spread { expr, .. } => walk_expr(expr, visitor),
        }
    }
}

/// Walk a pattern in pre-order.
pub fn walk_pattern<'a, V>(pattern: &'a Pattern, visitor: &mut V)
where
    V: FnMut(Node<'a>),
{
    visitor(Node::Pattern(pattern));

    match &pattern.kind {
        PatternKind::Constructor { args, .. } => {
            for arg in args {
                walk_pattern(arg, visitor);
            }
        }
        PatternKind::Tuple(elements) => {
            for element in elements {
                walk_pattern(element, visitor);
            }
        }
        PatternKind::List { elements, rest } => {
            for element in elements {
                walk_pattern(element, visitor);
            }
            if let Some(rest) = rest {
                walk_pattern(rest, visitor);
            }
        }
        PatternKind::Record(fields) => {
            for field in fields {
                walk_pattern(&field.pattern, visitor);
            }
        }
        PatternKind::Annotated { pattern, type_expr } => {
            walk_pattern(pattern, visitor);
            walk_type(type_expr, visitor);
        }
        PatternKind::Wildcard | PatternKind::Var(_) | PatternKind::Literal(_) => {}
    }
}

/// Walk a type expression in pre-order.
pub fn walk_type<'a, V>(ty: &'a TypeExpr, visitor: &mut V)
where
    V: FnMut(Node<'a>),
{
    visitor(Node::Type(ty));

    match &ty.kind {
        TypeExprKind::App { constructor, args } => {
            walk_type(constructor, visitor);
            for arg in args {
                walk_type(arg, visitor);
            }
        }
        TypeExprKind::Function {
            params,
            return_type,
        } => {
            for param in params {
                walk_type(param, visitor);
            }
            walk_type(return_type, visitor);
        }
        TypeExprKind::Tuple(elements) | TypeExprKind::Union(elements) => {
            for element in elements {
                walk_type(element, visitor);
            }
        }
        TypeExprKind::Record(fields) => {
            for field in fields {
                walk_type(&field.type_expr, visitor);
            }
        }
        TypeExprKind::Var(_) | TypeExprKind::Const(_) | TypeExprKind::Unit => {}
    }
}
