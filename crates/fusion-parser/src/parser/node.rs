//! Syntax node definitions.
//!
//! `Node` is a closed sum type: every kind the parser can produce is a
//! variant, and children are referenced by `NodeIndex` into the owning
//! `NodeArena`. Optional children use `NodeIndex::NONE`. Parent links and
//! comments are not stored on nodes; see `SyntaxTree`.
//!
//! Child slots are enumerated in source order by `Node::slots` /
//! `Node::slots_mut`, which is what traversal, replacement and deep cloning
//! are built on.

use super::base::{NodeIndex, NodeList};
use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Class, member and promoted-parameter modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const READONLY = 1 << 6;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    /// `Foo` or `Foo\Bar`
    Normal,
    /// `\Foo\Bar`
    FullyQualified,
    /// `namespace\Foo`
    Relative,
}

/// A (possibly qualified) name. `text` never carries the leading `\` or
/// `namespace\` prefix.
#[derive(Clone, Debug, PartialEq)]
pub struct NameData {
    pub text: String,
    pub kind: NameKind,
}

impl NameData {
    pub fn new(text: impl Into<String>, kind: NameKind) -> Self {
        NameData {
            text: text.into(),
            kind,
        }
    }

    /// Last `\`-separated segment.
    pub fn last_segment(&self) -> &str {
        self.text.rsplit('\\').next().unwrap_or(&self.text)
    }

    pub fn is_fully_qualified(&self) -> bool {
        self.kind == NameKind::FullyQualified
    }

    /// The name as written in source.
    pub fn to_source(&self) -> String {
        match self.kind {
            NameKind::Normal => self.text.clone(),
            NameKind::FullyQualified => format!("\\{}", self.text),
            NameKind::Relative => format!("namespace\\{}", self.text),
        }
    }
}

/// A string literal without interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct StringLit {
    /// Decoded value.
    pub value: String,
    /// Source spelling including quotes; `None` for synthesized strings.
    pub raw: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayKind {
    /// `[...]`
    Short,
    /// `array(...)`
    Long,
    /// `list(...)`
    List,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayLit {
    pub kind: ArrayKind,
    /// `NONE` entries are skipped destructuring slots (`[, $b]`).
    pub items: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayItem {
    pub key: NodeIndex,
    pub value: NodeIndex,
    pub by_ref: bool,
    pub unpack: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Plus,
    Minus,
    Mul,
    Div,
    Concat,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    Coalesce,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Plus => "+=",
            AssignOp::Minus => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Concat => ".=",
            AssignOp::Mod => "%=",
            AssignOp::Pow => "**=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::ShiftLeft => "<<=",
            AssignOp::ShiftRight => ">>=",
            AssignOp::Coalesce => "??=",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignData {
    pub target: NodeIndex,
    pub op: AssignOp,
    pub value: NodeIndex,
    /// `$a = &$b`
    pub by_ref: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Pow,
    Mul,
    Div,
    Mod,
    Plus,
    Minus,
    ShiftLeft,
    ShiftRight,
    Concat,
    Smaller,
    SmallerOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Spaceship,
    BitAnd,
    BitXor,
    BitOr,
    BooleanAnd,
    BooleanOr,
    Coalesce,
    LogicalAnd,
    LogicalXor,
    LogicalOr,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Pow => "**",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Concat => ".",
            BinaryOp::Smaller => "<",
            BinaryOp::SmallerOrEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Identical => "===",
            BinaryOp::NotIdentical => "!==",
            BinaryOp::Spaceship => "<=>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::BooleanAnd => "&&",
            BinaryOp::BooleanOr => "||",
            BinaryOp::Coalesce => "??",
            BinaryOp::LogicalAnd => "and",
            BinaryOp::LogicalXor => "xor",
            BinaryOp::LogicalOr => "or",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryData {
    pub left: NodeIndex,
    pub op: BinaryOp,
    pub right: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
    BitNot,
    Silence,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryData {
    pub op: UnaryOp,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CastData {
    /// Canonical cast type: `int`, `float`, `string`, `bool`, `array`, `object`, `unset`.
    pub ty: String,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TernaryData {
    pub cond: NodeIndex,
    /// `NONE` for the short form `a ?: b`.
    pub then: NodeIndex,
    pub otherwise: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InstanceofData {
    pub expr: NodeIndex,
    pub class: NodeIndex,
}

/// A free function call. `callee` is a `Name` or an arbitrary expression.
#[derive(Clone, Debug, PartialEq)]
pub struct CallData {
    pub callee: NodeIndex,
    pub args: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodCallData {
    pub receiver: NodeIndex,
    /// `Identifier` or a dynamic name expression.
    pub name: NodeIndex,
    pub args: NodeList,
    pub nullsafe: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StaticCallData {
    pub class: NodeIndex,
    pub name: NodeIndex,
    pub args: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyFetchData {
    pub receiver: NodeIndex,
    pub name: NodeIndex,
    pub nullsafe: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StaticPropertyFetchData {
    pub class: NodeIndex,
    /// `Identifier` holding the name without `$`, or a dynamic expression.
    pub name: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassConstFetchData {
    pub class: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayDimFetchData {
    pub array: NodeIndex,
    /// `NONE` for the append form `$a[]`.
    pub dim: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewData {
    /// `Name`, a dynamic class expression, or an anonymous `Class`.
    pub class: NodeIndex,
    pub args: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncludeKind {
    Include,
    IncludeOnce,
    Require,
    RequireOnce,
}

impl IncludeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IncludeKind::Include => "include",
            IncludeKind::IncludeOnce => "include_once",
            IncludeKind::Require => "require",
            IncludeKind::RequireOnce => "require_once",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IncludeData {
    pub kind: IncludeKind,
    pub expr: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExitData {
    /// Spelled `die` rather than `exit`.
    pub die: bool,
    pub expr: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClosureData {
    pub attr_groups: NodeList,
    pub is_static: bool,
    pub by_ref: bool,
    pub params: NodeList,
    pub uses: NodeList,
    pub return_type: NodeIndex,
    pub body: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClosureUse {
    pub name: String,
    pub by_ref: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowFunctionData {
    pub attr_groups: NodeList,
    pub is_static: bool,
    pub by_ref: bool,
    pub params: NodeList,
    pub return_type: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchData {
    pub subject: NodeIndex,
    pub arms: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchArm {
    /// Empty for the `default` arm.
    pub conditions: NodeList,
    pub body: NodeIndex,
}

/// A call argument.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgData {
    /// Parameter name for named arguments (`name: value`).
    pub name: Option<String>,
    pub value: NodeIndex,
    pub unpack: bool,
    pub by_ref: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamData {
    pub attr_groups: NodeList,
    /// Constructor promotion modifiers.
    pub modifiers: Modifiers,
    pub ty: NodeIndex,
    pub by_ref: bool,
    pub variadic: bool,
    /// Variable name without `$`.
    pub name: String,
    pub default: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttributeData {
    pub name: NodeIndex,
    pub args: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfData {
    pub cond: NodeIndex,
    pub stmts: NodeList,
    pub else_ifs: NodeList,
    pub else_branch: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElseIfData {
    pub cond: NodeIndex,
    pub stmts: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileData {
    pub cond: NodeIndex,
    pub stmts: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoWhileData {
    pub stmts: NodeList,
    pub cond: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForData {
    pub init: NodeList,
    pub cond: NodeList,
    pub step: NodeList,
    pub stmts: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForeachData {
    pub expr: NodeIndex,
    pub key: NodeIndex,
    pub value: NodeIndex,
    pub by_ref: bool,
    pub stmts: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchData {
    pub subject: NodeIndex,
    pub cases: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseData {
    /// `NONE` for `default:`.
    pub cond: NodeIndex,
    pub stmts: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryData {
    pub stmts: NodeList,
    pub catches: NodeList,
    pub finally: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchData {
    pub types: NodeList,
    /// Variable name without `$`.
    pub var: Option<String>,
    pub stmts: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseKind {
    /// Class import, or an item of a group whose kind is given per item.
    Normal,
    Function,
    Const,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UseData {
    pub kind: UseKind,
    pub items: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupUseData {
    pub kind: UseKind,
    pub prefix: NodeIndex,
    pub items: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UseItemData {
    /// Per-item kind inside a mixed group (`use A\{B, function c}`).
    pub kind: UseKind,
    pub name: NodeIndex,
    pub alias: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceData {
    /// `NONE` for the global `namespace { }` block.
    pub name: NodeIndex,
    pub stmts: NodeList,
    pub braced: bool,
}

/// A class declaration; anonymous when `name` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassData {
    pub attr_groups: NodeList,
    pub modifiers: Modifiers,
    pub name: Option<String>,
    pub extends: NodeIndex,
    pub implements: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodData {
    pub attr_groups: NodeList,
    pub modifiers: Modifiers,
    pub by_ref: bool,
    pub name: String,
    pub params: NodeList,
    pub return_type: NodeIndex,
    pub body: NodeList,
    /// False for abstract and interface-style `;` bodies.
    pub has_body: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyData {
    pub attr_groups: NodeList,
    pub modifiers: Modifiers,
    pub ty: NodeIndex,
    pub items: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyItem {
    /// Name without `$`.
    pub name: String,
    pub default: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassConstData {
    pub attr_groups: NodeList,
    pub modifiers: Modifiers,
    pub items: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstItem {
    pub name: String,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionData {
    pub attr_groups: NodeList,
    pub by_ref: bool,
    pub name: String,
    pub params: NodeList,
    pub return_type: NodeIndex,
    pub body: NodeList,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Root of a parsed file.
    File(NodeList),

    // Names and types
    Name(NameData),
    Identifier(String),
    NullableType(NodeIndex),
    UnionType(NodeList),
    IntersectionType(NodeList),

    // Literals
    StringLit(StringLit),
    /// Double-quoted string with interpolation, heredoc or nowdoc; raw source.
    InterpolatedString(String),
    IntLit(String),
    FloatLit(String),
    ArrayLit(ArrayLit),
    ArrayItem(ArrayItem),

    // Expressions
    /// Variable name without `$`.
    Variable(String),
    /// `$$name` / `${expr}`
    VariableVariable(NodeIndex),
    ConstFetch(NodeIndex),
    ClassConstFetch(ClassConstFetchData),
    Assign(AssignData),
    Binary(BinaryData),
    Unary(UnaryData),
    Cast(CastData),
    Ternary(TernaryData),
    Instanceof(InstanceofData),
    FuncCall(CallData),
    MethodCall(MethodCallData),
    StaticCall(StaticCallData),
    PropertyFetch(PropertyFetchData),
    StaticPropertyFetch(StaticPropertyFetchData),
    ArrayDimFetch(ArrayDimFetchData),
    New(NewData),
    Clone(NodeIndex),
    Print(NodeIndex),
    Throw(NodeIndex),
    Include(IncludeData),
    Isset(NodeList),
    Empty(NodeIndex),
    Exit(ExitData),
    Closure(ClosureData),
    ClosureUse(ClosureUse),
    ArrowFunction(ArrowFunctionData),
    Match(MatchData),
    MatchArm(MatchArm),
    Arg(ArgData),
    /// The `...` of a first-class callable `foo(...)`.
    VariadicPlaceholder,
    Param(ParamData),
    AttributeGroup(NodeList),
    Attribute(AttributeData),

    // Statements
    ExprStmt(NodeIndex),
    Echo(NodeList),
    Return(NodeIndex),
    If(IfData),
    ElseIf(ElseIfData),
    Else(NodeList),
    While(WhileData),
    DoWhile(DoWhileData),
    For(ForData),
    Foreach(ForeachData),
    Switch(SwitchData),
    Case(CaseData),
    Break(NodeIndex),
    Continue(NodeIndex),
    TryCatch(TryData),
    Catch(CatchData),
    Finally(NodeList),
    Unset(NodeList),
    Global(NodeList),
    Block(NodeList),
    /// Comment-only statement.
    Nop,

    // Declarations
    Use(UseData),
    GroupUse(GroupUseData),
    UseItem(UseItemData),
    Namespace(NamespaceData),
    Class(ClassData),
    ClassMethod(MethodData),
    Property(PropertyData),
    PropertyItem(PropertyItem),
    ClassConst(ClassConstData),
    ConstItem(ConstItem),
    TraitUse(NodeList),
    Function(FunctionData),
    Const(NodeList),
}

/// A child position of a node.
#[derive(Debug)]
pub enum ChildSlot<'a> {
    One(&'a NodeIndex),
    Many(&'a NodeList),
}

#[derive(Debug)]
pub enum ChildSlotMut<'a> {
    One(&'a mut NodeIndex),
    Many(&'a mut NodeList),
}

macro_rules! node_slots {
    ($node:expr, $One:path, $Many:path $(, $m:tt)?) => {{
        let mut slots = SmallVec::new();
        match $node {
            Node::File(stmts) => slots.push($Many(& $($m)? *stmts)),
            Node::Name(_)
            | Node::Identifier(_)
            | Node::StringLit(_)
            | Node::InterpolatedString(_)
            | Node::IntLit(_)
            | Node::FloatLit(_)
            | Node::Variable(_)
            | Node::ClosureUse(_)
            | Node::VariadicPlaceholder
            | Node::Nop => {}
            Node::NullableType(inner)
            | Node::VariableVariable(inner)
            | Node::ConstFetch(inner)
            | Node::Clone(inner)
            | Node::Print(inner)
            | Node::Throw(inner)
            | Node::Empty(inner)
            | Node::ExprStmt(inner)
            | Node::Return(inner)
            | Node::Break(inner)
            | Node::Continue(inner) => slots.push($One(& $($m)? *inner)),
            Node::UnionType(list)
            | Node::IntersectionType(list)
            | Node::Isset(list)
            | Node::AttributeGroup(list)
            | Node::Echo(list)
            | Node::Else(list)
            | Node::Finally(list)
            | Node::Unset(list)
            | Node::Global(list)
            | Node::Block(list)
            | Node::TraitUse(list)
            | Node::Const(list) => slots.push($Many(& $($m)? *list)),
            Node::ArrayLit(d) => slots.push($Many(& $($m)? d.items)),
            Node::ArrayItem(d) => slots.extend([$One(& $($m)? d.key), $One(& $($m)? d.value)]),
            Node::ClassConstFetch(d) => {
                slots.extend([$One(& $($m)? d.class), $One(& $($m)? d.name)])
            }
            Node::Assign(d) => slots.extend([$One(& $($m)? d.target), $One(& $($m)? d.value)]),
            Node::Binary(d) => slots.extend([$One(& $($m)? d.left), $One(& $($m)? d.right)]),
            Node::Unary(d) => slots.push($One(& $($m)? d.operand)),
            Node::Cast(d) => slots.push($One(& $($m)? d.operand)),
            Node::Ternary(d) => slots.extend([
                $One(& $($m)? d.cond),
                $One(& $($m)? d.then),
                $One(& $($m)? d.otherwise),
            ]),
            Node::Instanceof(d) => slots.extend([$One(& $($m)? d.expr), $One(& $($m)? d.class)]),
            Node::FuncCall(d) => slots.extend([$One(& $($m)? d.callee), $Many(& $($m)? d.args)]),
            Node::MethodCall(d) => slots.extend([
                $One(& $($m)? d.receiver),
                $One(& $($m)? d.name),
                $Many(& $($m)? d.args),
            ]),
            Node::StaticCall(d) => slots.extend([
                $One(& $($m)? d.class),
                $One(& $($m)? d.name),
                $Many(& $($m)? d.args),
            ]),
            Node::PropertyFetch(d) => {
                slots.extend([$One(& $($m)? d.receiver), $One(& $($m)? d.name)])
            }
            Node::StaticPropertyFetch(d) => {
                slots.extend([$One(& $($m)? d.class), $One(& $($m)? d.name)])
            }
            Node::ArrayDimFetch(d) => {
                slots.extend([$One(& $($m)? d.array), $One(& $($m)? d.dim)])
            }
            Node::New(d) => slots.extend([$One(& $($m)? d.class), $Many(& $($m)? d.args)]),
            Node::Include(d) => slots.push($One(& $($m)? d.expr)),
            Node::Exit(d) => slots.push($One(& $($m)? d.expr)),
            Node::Closure(d) => slots.extend([
                $Many(& $($m)? d.attr_groups),
                $Many(& $($m)? d.params),
                $Many(& $($m)? d.uses),
                $One(& $($m)? d.return_type),
                $Many(& $($m)? d.body),
            ]),
            Node::ArrowFunction(d) => slots.extend([
                $Many(& $($m)? d.attr_groups),
                $Many(& $($m)? d.params),
                $One(& $($m)? d.return_type),
                $One(& $($m)? d.body),
            ]),
            Node::Match(d) => slots.extend([$One(& $($m)? d.subject), $Many(& $($m)? d.arms)]),
            Node::MatchArm(d) => {
                slots.extend([$Many(& $($m)? d.conditions), $One(& $($m)? d.body)])
            }
            Node::Arg(d) => slots.push($One(& $($m)? d.value)),
            Node::Param(d) => slots.extend([
                $Many(& $($m)? d.attr_groups),
                $One(& $($m)? d.ty),
                $One(& $($m)? d.default),
            ]),
            Node::Attribute(d) => slots.extend([$One(& $($m)? d.name), $Many(& $($m)? d.args)]),
            Node::If(d) => slots.extend([
                $One(& $($m)? d.cond),
                $Many(& $($m)? d.stmts),
                $Many(& $($m)? d.else_ifs),
                $One(& $($m)? d.else_branch),
            ]),
            Node::ElseIf(d) => slots.extend([$One(& $($m)? d.cond), $Many(& $($m)? d.stmts)]),
            Node::While(d) => slots.extend([$One(& $($m)? d.cond), $Many(& $($m)? d.stmts)]),
            Node::DoWhile(d) => slots.extend([$Many(& $($m)? d.stmts), $One(& $($m)? d.cond)]),
            Node::For(d) => slots.extend([
                $Many(& $($m)? d.init),
                $Many(& $($m)? d.cond),
                $Many(& $($m)? d.step),
                $Many(& $($m)? d.stmts),
            ]),
            Node::Foreach(d) => slots.extend([
                $One(& $($m)? d.expr),
                $One(& $($m)? d.key),
                $One(& $($m)? d.value),
                $Many(& $($m)? d.stmts),
            ]),
            Node::Switch(d) => slots.extend([$One(& $($m)? d.subject), $Many(& $($m)? d.cases)]),
            Node::Case(d) => slots.extend([$One(& $($m)? d.cond), $Many(& $($m)? d.stmts)]),
            Node::TryCatch(d) => slots.extend([
                $Many(& $($m)? d.stmts),
                $Many(& $($m)? d.catches),
                $One(& $($m)? d.finally),
            ]),
            Node::Catch(d) => slots.extend([$Many(& $($m)? d.types), $Many(& $($m)? d.stmts)]),
            Node::Use(d) => slots.push($Many(& $($m)? d.items)),
            Node::GroupUse(d) => {
                slots.extend([$One(& $($m)? d.prefix), $Many(& $($m)? d.items)])
            }
            Node::UseItem(d) => slots.push($One(& $($m)? d.name)),
            Node::Namespace(d) => slots.extend([$One(& $($m)? d.name), $Many(& $($m)? d.stmts)]),
            Node::Class(d) => slots.extend([
                $Many(& $($m)? d.attr_groups),
                $One(& $($m)? d.extends),
                $Many(& $($m)? d.implements),
                $Many(& $($m)? d.members),
            ]),
            Node::ClassMethod(d) => slots.extend([
                $Many(& $($m)? d.attr_groups),
                $Many(& $($m)? d.params),
                $One(& $($m)? d.return_type),
                $Many(& $($m)? d.body),
            ]),
            Node::Property(d) => slots.extend([
                $Many(& $($m)? d.attr_groups),
                $One(& $($m)? d.ty),
                $Many(& $($m)? d.items),
            ]),
            Node::PropertyItem(d) => slots.push($One(& $($m)? d.default)),
            Node::ClassConst(d) => {
                slots.extend([$Many(& $($m)? d.attr_groups), $Many(& $($m)? d.items)])
            }
            Node::ConstItem(d) => slots.push($One(& $($m)? d.value)),
            Node::Function(d) => slots.extend([
                $Many(& $($m)? d.attr_groups),
                $Many(& $($m)? d.params),
                $One(& $($m)? d.return_type),
                $Many(& $($m)? d.body),
            ]),
        }
        slots
    }};
}

impl Node {
    /// Child positions in source order.
    pub fn slots(&self) -> SmallVec<[ChildSlot<'_>; 4]> {
        node_slots!(self, ChildSlot::One, ChildSlot::Many)
    }

    pub fn slots_mut(&mut self) -> SmallVec<[ChildSlotMut<'_>; 4]> {
        node_slots!(self, ChildSlotMut::One, ChildSlotMut::Many, mut)
    }

    /// Direct children in source order, skipping absent slots.
    pub fn children(&self) -> NodeList {
        let mut children = Vec::new();
        for slot in self.slots() {
            match slot {
                ChildSlot::One(idx) => {
                    if idx.is_some() {
                        children.push(*idx);
                    }
                }
                ChildSlot::Many(list) => {
                    children.extend(list.iter().copied().filter(|idx| idx.is_some()))
                }
            }
        }
        children
    }

    /// Human-readable kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::File(_) => "File",
            Node::Name(_) => "Name",
            Node::Identifier(_) => "Identifier",
            Node::NullableType(_) => "NullableType",
            Node::UnionType(_) => "UnionType",
            Node::IntersectionType(_) => "IntersectionType",
            Node::StringLit(_) => "String",
            Node::InterpolatedString(_) => "InterpolatedString",
            Node::IntLit(_) => "Int",
            Node::FloatLit(_) => "Float",
            Node::ArrayLit(_) => "Array",
            Node::ArrayItem(_) => "ArrayItem",
            Node::Variable(_) => "Variable",
            Node::VariableVariable(_) => "VariableVariable",
            Node::ConstFetch(_) => "ConstFetch",
            Node::ClassConstFetch(_) => "ClassConstFetch",
            Node::Assign(_) => "Assign",
            Node::Binary(_) => "BinaryOp",
            Node::Unary(_) => "UnaryOp",
            Node::Cast(_) => "Cast",
            Node::Ternary(_) => "Ternary",
            Node::Instanceof(_) => "Instanceof",
            Node::FuncCall(_) => "FuncCall",
            Node::MethodCall(_) => "MethodCall",
            Node::StaticCall(_) => "StaticCall",
            Node::PropertyFetch(_) => "PropertyFetch",
            Node::StaticPropertyFetch(_) => "StaticPropertyFetch",
            Node::ArrayDimFetch(_) => "ArrayDimFetch",
            Node::New(_) => "New",
            Node::Clone(_) => "Clone",
            Node::Print(_) => "Print",
            Node::Throw(_) => "Throw",
            Node::Include(_) => "Include",
            Node::Isset(_) => "Isset",
            Node::Empty(_) => "Empty",
            Node::Exit(_) => "Exit",
            Node::Closure(_) => "Closure",
            Node::ClosureUse(_) => "ClosureUse",
            Node::ArrowFunction(_) => "ArrowFunction",
            Node::Match(_) => "Match",
            Node::MatchArm(_) => "MatchArm",
            Node::Arg(_) => "Arg",
            Node::VariadicPlaceholder => "VariadicPlaceholder",
            Node::Param(_) => "Param",
            Node::AttributeGroup(_) => "AttributeGroup",
            Node::Attribute(_) => "Attribute",
            Node::ExprStmt(_) => "Expression",
            Node::Echo(_) => "Echo",
            Node::Return(_) => "Return",
            Node::If(_) => "If",
            Node::ElseIf(_) => "ElseIf",
            Node::Else(_) => "Else",
            Node::While(_) => "While",
            Node::DoWhile(_) => "Do",
            Node::For(_) => "For",
            Node::Foreach(_) => "Foreach",
            Node::Switch(_) => "Switch",
            Node::Case(_) => "Case",
            Node::Break(_) => "Break",
            Node::Continue(_) => "Continue",
            Node::TryCatch(_) => "TryCatch",
            Node::Catch(_) => "Catch",
            Node::Finally(_) => "Finally",
            Node::Unset(_) => "Unset",
            Node::Global(_) => "Global",
            Node::Block(_) => "Block",
            Node::Nop => "Nop",
            Node::Use(_) => "Use",
            Node::GroupUse(_) => "GroupUse",
            Node::UseItem(_) => "UseItem",
            Node::Namespace(_) => "Namespace",
            Node::Class(_) => "Class",
            Node::ClassMethod(_) => "ClassMethod",
            Node::Property(_) => "Property",
            Node::PropertyItem(_) => "PropertyItem",
            Node::ClassConst(_) => "ClassConst",
            Node::ConstItem(_) => "ConstItem",
            Node::TraitUse(_) => "TraitUse",
            Node::Function(_) => "Function",
            Node::Const(_) => "Const",
        }
    }

    /// Whether this node can appear in a statement list.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::ExprStmt(_)
                | Node::Echo(_)
                | Node::Return(_)
                | Node::If(_)
                | Node::While(_)
                | Node::DoWhile(_)
                | Node::For(_)
                | Node::Foreach(_)
                | Node::Switch(_)
                | Node::Break(_)
                | Node::Continue(_)
                | Node::TryCatch(_)
                | Node::Unset(_)
                | Node::Global(_)
                | Node::Block(_)
                | Node::Nop
                | Node::Use(_)
                | Node::GroupUse(_)
                | Node::Namespace(_)
                | Node::Class(_)
                | Node::ClassMethod(_)
                | Node::Property(_)
                | Node::ClassConst(_)
                | Node::TraitUse(_)
                | Node::Function(_)
                | Node::Const(_)
        )
    }
}

/// Arena storage for nodes.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}
