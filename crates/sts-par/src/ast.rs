//! sts-par - AST node definitions for the disciplined source-language subset.
//!
//! Every node carries exactly one [`Span`] (its source range); a
//! parent's span always covers each of its direct children's spans.
//! Nodes are plain, immutable-after-construction value types — no node
//! forms a cycle, and the only back-pointer in the tree is the weak
//! [`SourceId`] recorded on each top-level statement (see
//! [`TopLevelStmt`]), set once when the statement is appended to its
//! [`crate::Source`].

use sts_util::{Span, Symbol};

/// Weak, index-based back-pointer from a top-level statement to the
/// [`crate::Source`] that owns it. A systems-language re-rendering of
/// the reference implementation's single mutable `parent` link: rather
/// than an actual pointer (which would make the tree cyclic), a
/// `SourceId` is just the owning source's position in the `Program`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(pub usize);

/// A top-level statement plus the [`SourceId`] of the `Source` it was
/// appended to.
#[derive(Debug, Clone)]
pub struct TopLevelStmt {
    pub stmt: Stmt,
    pub source: SourceId,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Expr {
    Ident(IdentExpr),
    Null(Span),
    Bool(BoolLit),
    Integer(IntegerLit),
    Float(FloatLit),
    Str(StringLit),
    Regexp(RegexpLit),
    This(Span),
    Array(ArrayLit),
    Paren(ParenExpr),
    UnaryPrefix(UnaryExpr),
    UnaryPostfix(UnaryExpr),
    Binary(BinaryExpr),
    Select(SelectExpr),
    Call(CallExpr),
    New(NewExpr),
    Element(ElementAccessExpr),
    Property(PropertyAccessExpr),
    AssertPrefix(AssertExpr),
    AssertPostfix(AssertExpr),
    /// A malformed sub-expression that was replaced so that parsing of
    /// its surroundings can continue; only produced after an error has
    /// already been emitted at `span`.
    Error(Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(e) => e.span,
            Expr::Null(s) => *s,
            Expr::Bool(e) => e.span,
            Expr::Integer(e) => e.span,
            Expr::Float(e) => e.span,
            Expr::Str(e) => e.span,
            Expr::Regexp(e) => e.span,
            Expr::This(s) => *s,
            Expr::Array(e) => e.span,
            Expr::Paren(e) => e.span,
            Expr::UnaryPrefix(e) => e.span,
            Expr::UnaryPostfix(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::Select(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::New(e) => e.span,
            Expr::Element(e) => e.span,
            Expr::Property(e) => e.span,
            Expr::AssertPrefix(e) => e.span,
            Expr::AssertPostfix(e) => e.span,
            Expr::Error(s) => *s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentExpr {
    pub name: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BoolLit {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IntegerLit {
    pub value: u64,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FloatLit {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StringLit {
    pub value: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct RegexpLit {
    pub value: Symbol,
    pub span: Span,
}

/// Array literal. Elided elements (adjacent commas, e.g. `[1, , 3]`)
/// are represented as `None` slots.
#[derive(Debug, Clone)]
pub struct ArrayLit {
    pub elements: Vec<Option<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    Typeof,
    Void,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Comma,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShlAssign,
    ShrAssign,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    In,
    Instanceof,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Ternary `cond ? then : else`.
#[derive(Debug, Clone)]
pub struct SelectExpr {
    pub condition: Box<Expr>,
    pub then_branch: Box<Expr>,
    pub else_branch: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub type_arguments: Vec<TypeNode>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NewExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ElementAccessExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PropertyAccessExpr {
    pub object: Box<Expr>,
    pub property: IdentExpr,
    pub span: Span,
}

/// A type assertion: prefix `<T>e` or postfix `e as T`; `is_prefix`
/// distinguishes the two written forms (both carry the same shape).
#[derive(Debug, Clone)]
pub struct AssertExpr {
    pub expr: Box<Expr>,
    pub ty: TypeNode,
    pub is_prefix: bool,
    pub span: Span,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(BlockStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    DoWhile(DoWhileStmt),
    Empty(Span),
    Expr(ExprStmt),
    For(ForStmt),
    If(IfStmt),
    Return(ReturnStmt),
    Switch(SwitchStmt),
    Throw(ThrowStmt),
    Try(TryStmt),
    While(WhileStmt),
    Variable(VariableStmt),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Class(ClassDecl),
    Import(ImportStmt),
    Export(ExportStmt),
    ExportFrom(ExportFromStmt),
    ExportImport(ExportImportStmt),
    /// An unrecoverable parse failure already reported at `span`; the
    /// top-level file loop stops after producing one of these.
    Error(Span),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(s) => s.span,
            Stmt::Break(s) => s.span,
            Stmt::Continue(s) => s.span,
            Stmt::DoWhile(s) => s.span,
            Stmt::Empty(s) => *s,
            Stmt::Expr(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::Throw(s) => s.span,
            Stmt::Try(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::Variable(s) => s.span,
            Stmt::Enum(s) => s.span,
            Stmt::Function(s) => s.span,
            Stmt::Class(s) => s.span,
            Stmt::Import(s) => s.span,
            Stmt::Export(s) => s.span,
            Stmt::ExportFrom(s) => s.span,
            Stmt::ExportImport(s) => s.span,
            Stmt::Error(s) => *s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub label: Option<IdentExpr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub label: Option<IdentExpr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct DoWhileStmt {
    pub body: Box<Stmt>,
    pub condition: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// The initializer slot of a classic `for (init; cond; update)` loop.
#[derive(Debug, Clone)]
pub enum ForInit {
    Expr(Expr),
    Variable(VariableStmt),
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// `None` for `default:`.
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub discriminant: Expr,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ThrowStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    pub binding: IdentExpr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone)]
pub struct TryStmt {
    pub block: BlockStmt,
    pub catch: Option<CatchClause>,
    pub finally: Option<BlockStmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

// ---------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Const,
    Let,
    Var,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    pub name: IdentExpr,
    pub ty: Option<TypeNode>,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct VariableStmt {
    pub kind: VariableKind,
    pub declarators: Vec<VariableDeclarator>,
    pub modifiers: Vec<Modifier>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: IdentExpr,
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: IdentExpr,
    pub is_const: bool,
    pub members: Vec<EnumMember>,
    pub modifiers: Vec<Modifier>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeParameter {
    pub name: IdentExpr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: IdentExpr,
    pub ty: Option<TypeNode>,
    pub default: Option<Expr>,
    pub is_spread: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: IdentExpr,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeNode>,
    pub body: Option<BlockStmt>,
    pub decorators: Vec<Decorator>,
    pub modifiers: Vec<Modifier>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Export,
    Declare,
    Public,
    Private,
    Protected,
    Static,
    Abstract,
    Get,
    Set,
    Const,
}

#[derive(Debug, Clone)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Decorator {
    pub callee: IdentExpr,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldMember {
    pub name: IdentExpr,
    pub ty: Option<TypeNode>,
    pub init: Option<Expr>,
    pub modifiers: Vec<Modifier>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodMember {
    pub name: IdentExpr,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeNode>,
    pub body: Option<BlockStmt>,
    pub modifiers: Vec<Modifier>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ClassMember {
    Field(FieldMember),
    Method(MethodMember),
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: IdentExpr,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Option<TypeNode>,
    pub implements: Vec<TypeNode>,
    pub members: Vec<ClassMember>,
    pub decorators: Vec<Decorator>,
    pub modifiers: Vec<Modifier>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ImportSpecifier {
    pub name: IdentExpr,
    pub alias: Option<IdentExpr>,
}

#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub specifiers: Vec<ImportSpecifier>,
    pub module_path: StringLit,
    /// The normalized module path enqueued onto the work-list.
    pub resolved_path: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExportSpecifier {
    pub name: IdentExpr,
    pub alias: Option<IdentExpr>,
}

/// `export { a, b as c };` (no re-export source).
#[derive(Debug, Clone)]
pub struct ExportStmt {
    pub specifiers: Vec<ExportSpecifier>,
    pub span: Span,
}

/// `export { a, b as c } from "./mod";`
#[derive(Debug, Clone)]
pub struct ExportFromStmt {
    pub specifiers: Vec<ExportSpecifier>,
    pub module_path: StringLit,
    pub resolved_path: String,
    pub span: Span,
}

/// `export import Alias = Target;`
#[derive(Debug, Clone)]
pub struct ExportImportStmt {
    pub alias: IdentExpr,
    pub target: IdentExpr,
    pub span: Span,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNodeKind {
    Void,
    This,
    Bool,
    /// A string-literal type, normalized to `string`.
    StringLiteral,
    Named(Symbol),
}

/// A named type together with its type arguments and array/nullable
/// wrapping. `array_depth` counts trailing `[]` suffixes applied to the
/// base named/primitive type; each level wraps the previous one in
/// `Array<...>` conceptually. `nullable` marks a trailing `| null`,
/// which may only follow the outermost array level.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub kind: TypeNodeKind,
    pub type_arguments: Vec<TypeNode>,
    pub array_depth: u32,
    pub nullable: bool,
    pub span: Span,
}
