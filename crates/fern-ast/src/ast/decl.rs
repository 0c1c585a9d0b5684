//! Top-level declarations, imports and the module root.

use super::expr::LetBinding;
use super::types::{RecordTypeField, TypeExpr};
use crate::foundation::{Located, Location};
use serde::{Deserialize, Serialize};

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    /// Imports in source order
    pub imports: Vec<ImportDecl>,
    /// Declarations in source order
    pub declarations: Vec<Declaration>,
}

/// A top-level declaration with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// What kind of declaration this is
    pub kind: DeclKind,
    /// Location of the first token (`let`, `type`, `external`, `and`, `export`)
    pub loc: Location,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(kind: DeclKind, loc: Location) -> Self {
        Self { kind, loc }
    }

    /// Whether the declaration was written with `export`.
    pub fn is_exported(&self) -> bool {
        match &self.kind {
            DeclKind::Let { exported, .. } | DeclKind::LetRecGroup { exported, .. } => *exported,
            DeclKind::Type(decl) => decl.exported,
            DeclKind::External(decl) => decl.exported,
            DeclKind::ExternalBlock(block) => block.exported,
            DeclKind::Export(_) | DeclKind::ReExport { .. } => false,
        }
    }
}

impl Located for Declaration {
    fn location(&self) -> &Location {
        &self.loc
    }
}

/// Declaration variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclKind {
    /// `let [mut] [rec] p: T = v`
    Let {
        /// The binding
        binding: LetBinding,
        /// Whether `rec` was given
        recursive: bool,
        /// Whether `export` was given
        exported: bool,
    },

    /// `let rec f = ... and g = ...`
    LetRecGroup {
        /// Bindings in source order
        bindings: Vec<LetBinding>,
        /// Whether `export` was given
        exported: bool,
    },

    /// `type Name<a> = ...`; each `and` sibling is its own declaration
    Type(TypeDecl),

    /// `external name: T = "foreign" [from "module"]`
    External(ExternalDecl),

    /// `external [from "module"] { ... }`
    ExternalBlock(ExternalBlock),

    /// Local export list: `export { a, type T }`
    Export(Vec<Specifier>),

    /// Re-export: `export { a } from "m"`, `export * from "m"`
    ReExport {
        /// What is re-exported
        items: ReExportItems,
        /// Source module
        source: String,
    },
}

/// A type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Declared type name
    pub name: String,
    /// Type parameters in order
    pub params: Vec<String>,
    /// Right-hand side
    pub definition: TypeDefinition,
    /// Whether `export` was given
    pub exported: bool,
}

/// Right-hand side of a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDefinition {
    /// `type T = SomeType`
    Alias(TypeExpr),
    /// `type T = { f: A, g: B }`
    Record(Vec<RecordTypeField>),
    /// `type T = | A | B(Int)`
    Variant(Vec<VariantConstructor>),
}

/// One constructor of a variant type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConstructor {
    /// Constructor name
    pub name: String,
    /// Argument types; empty for a nullary constructor
    pub args: Vec<TypeExpr>,
    /// Location of the constructor name
    pub loc: Location,
}

/// A single foreign value declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDecl {
    /// Local name
    pub name: String,
    /// Generic parameters from `<T, ...>`
    pub type_params: Vec<String>,
    /// Declared type
    pub type_expr: TypeExpr,
    /// Name in the foreign module
    pub foreign_name: String,
    /// Foreign module from `from "module"`
    pub module: Option<String>,
    /// Whether `export` was given
    pub exported: bool,
}

/// An `external { ... }` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalBlock {
    /// Foreign module shared by every item
    pub module: Option<String>,
    /// Items in source order; repeated names are kept
    pub items: Vec<ExternalItem>,
    /// Whether `export` was given
    pub exported: bool,
}

/// An item of an `external` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExternalItem {
    /// `name: [<T>] Type = "foreign"`
    Value {
        /// Local name
        name: String,
        /// Generic parameters
        type_params: Vec<String>,
        /// Declared type
        type_expr: TypeExpr,
        /// Name in the foreign module
        foreign_name: String,
        /// Location of the name
        loc: Location,
    },
    /// `type Name[<a>] = Type`
    Type {
        /// Alias name
        name: String,
        /// Type parameters
        params: Vec<String>,
        /// Aliased type
        type_expr: TypeExpr,
        /// Location of `type`
        loc: Location,
    },
}

impl Located for ExternalItem {
    fn location(&self) -> &Location {
        match self {
            ExternalItem::Value { loc, .. } | ExternalItem::Type { loc, .. } => loc,
        }
    }
}

/// An `import` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// What is imported
    pub kind: ImportKind,
    /// Source module
    pub source: String,
    /// Location of `import`
    pub loc: Location,
}

impl Located for ImportDecl {
    fn location(&self) -> &Location {
        &self.loc
    }
}

/// Import forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportKind {
    /// `import { a, type T, b as c } from "m"`
    Named(Vec<Specifier>),
    /// `import [type] * as M from "m"`
    Namespace {
        /// Namespace binding
        alias: String,
        /// Whether `type *` was written
        type_only: bool,
    },
}

/// Re-export forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReExportItems {
    /// `export { a, type T } from "m"`
    Named(Vec<Specifier>),
    /// `export * from "m"`
    All,
}

/// One entry of an import or export list: `[type] name [as alias]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specifier {
    /// Name in the source module
    pub name: String,
    /// Local name from `as alias`
    pub alias: Option<String>,
    /// Whether the entry was prefixed with `type`
    pub is_type: bool,
    /// Location of the entry's first token
    pub loc: Location,
}

impl Specifier {
    /// Name bound locally: the alias if present, else the name.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
