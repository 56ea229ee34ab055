//! Syntax kinds for JPQL 3.1.
//!
//! One enum covers both halves of the syntax tree:
//!
//! - Token kinds (terminals): produced by the lexer. Logos is derived
//!   directly on this enum; keyword tokens match case-insensitively but the
//!   matched source text keeps its original spelling.
//! - Node kinds (non-terminals): created by the parser. They carry no token
//!   or regex attributes and are never produced by the lexer.
//!
//! Rowan requires a `Language` implementation to convert between this enum
//! and its internal `rowan::SyntaxKind` (a newtype over `u16`); that is what
//! [`JpqlLanguage`] provides.
//!
//! ## Layout
//!
//! Variants are ordered tokens first, then nodes, then the `__LAST` sentinel
//! used for bounds checking in `kind_from_raw`.

use logos::Logos;
use rowan::Language;

/// All kinds of tokens and nodes in a JPQL syntax tree.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // ------------------------------------------------------------------
    // Punctuation and operators
    // ------------------------------------------------------------------
    #[token(".")]
    Dot = 0,

    #[token(",")]
    Comma,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("=")]
    Equals,

    /// Inequality. JPQL spells it `<>`; `!=` is accepted because every
    /// persistence provider does.
    #[token("<>")]
    #[token("!=")]
    NotEquals,

    #[token(">")]
    Greater,

    #[token(">=")]
    GreaterEquals,

    #[token("<")]
    Less,

    #[token("<=")]
    LessEquals,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    /// Positional input parameter prefix (`?1`).
    #[token("?")]
    Question,

    /// Named input parameter prefix (`:name`).
    #[token(":")]
    Colon,

    // ------------------------------------------------------------------
    // Expression-language escape delimiters (`#{…}` forms)
    // ------------------------------------------------------------------
    /// Opens `#{func(arg)}`.
    #[token("#{")]
    SpelFunctionOpen,

    /// Opens `#{#dotted.name}`.
    #[token("#{#")]
    SpelNameOpen,

    /// Opens `#{#[0]}`.
    #[token("#{#[")]
    SpelIndexOpen,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    /// Closes `#{#[0]}`.
    #[token("]}")]
    BracketBraceClose,

    /// Closes `#{func(arg)}`.
    #[token(")}")]
    ParenBraceClose,

    // ------------------------------------------------------------------
    // Literals and identifiers
    // ------------------------------------------------------------------
    /// String literal. JPQL escapes a quote by doubling it (`'O''Reilly'`).
    #[regex(r"'(?:[^']|'')*'")]
    #[regex(r#""(?:[^"]|"")*""#)]
    StringLit,

    #[regex(r"[0-9]+[lL]?")]
    IntLit,

    #[regex(r"[0-9]+\.[0-9]*(?:[eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9]+[fFdD]")]
    FloatLit,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    // ------------------------------------------------------------------
    // Keywords (case-insensitive; source spelling preserved)
    // ------------------------------------------------------------------
    #[token("select", ignore(ascii_case))]
    KwSelect,
    #[token("from", ignore(ascii_case))]
    KwFrom,
    #[token("where", ignore(ascii_case))]
    KwWhere,
    #[token("update", ignore(ascii_case))]
    KwUpdate,
    #[token("set", ignore(ascii_case))]
    KwSet,
    #[token("delete", ignore(ascii_case))]
    KwDelete,
    #[token("join", ignore(ascii_case))]
    KwJoin,
    #[token("left", ignore(ascii_case))]
    KwLeft,
    #[token("outer", ignore(ascii_case))]
    KwOuter,
    #[token("inner", ignore(ascii_case))]
    KwInner,
    #[token("fetch", ignore(ascii_case))]
    KwFetch,
    #[token("on", ignore(ascii_case))]
    KwOn,
    #[token("treat", ignore(ascii_case))]
    KwTreat,
    #[token("as", ignore(ascii_case))]
    KwAs,
    #[token("in", ignore(ascii_case))]
    KwIn,
    #[token("distinct", ignore(ascii_case))]
    KwDistinct,
    #[token("new", ignore(ascii_case))]
    KwNew,
    #[token("object", ignore(ascii_case))]
    KwObject,
    #[token("avg", ignore(ascii_case))]
    KwAvg,
    #[token("max", ignore(ascii_case))]
    KwMax,
    #[token("min", ignore(ascii_case))]
    KwMin,
    #[token("sum", ignore(ascii_case))]
    KwSum,
    #[token("count", ignore(ascii_case))]
    KwCount,
    #[token("group", ignore(ascii_case))]
    KwGroup,
    #[token("by", ignore(ascii_case))]
    KwBy,
    #[token("having", ignore(ascii_case))]
    KwHaving,
    #[token("order", ignore(ascii_case))]
    KwOrder,
    #[token("asc", ignore(ascii_case))]
    KwAsc,
    #[token("desc", ignore(ascii_case))]
    KwDesc,
    #[token("between", ignore(ascii_case))]
    KwBetween,
    #[token("and", ignore(ascii_case))]
    KwAnd,
    #[token("or", ignore(ascii_case))]
    KwOr,
    #[token("not", ignore(ascii_case))]
    KwNot,
    #[token("like", ignore(ascii_case))]
    KwLike,
    #[token("escape", ignore(ascii_case))]
    KwEscape,
    #[token("is", ignore(ascii_case))]
    KwIs,
    #[token("null", ignore(ascii_case))]
    KwNull,
    #[token("empty", ignore(ascii_case))]
    KwEmpty,
    #[token("member", ignore(ascii_case))]
    KwMember,
    #[token("of", ignore(ascii_case))]
    KwOf,
    #[token("exists", ignore(ascii_case))]
    KwExists,
    #[token("all", ignore(ascii_case))]
    KwAll,
    #[token("any", ignore(ascii_case))]
    KwAny,
    #[token("some", ignore(ascii_case))]
    KwSome,
    #[token("case", ignore(ascii_case))]
    KwCase,
    #[token("when", ignore(ascii_case))]
    KwWhen,
    #[token("then", ignore(ascii_case))]
    KwThen,
    #[token("else", ignore(ascii_case))]
    KwElse,
    #[token("end", ignore(ascii_case))]
    KwEnd,
    #[token("coalesce", ignore(ascii_case))]
    KwCoalesce,
    #[token("nullif", ignore(ascii_case))]
    KwNullif,
    #[token("type", ignore(ascii_case))]
    KwType,
    #[token("key", ignore(ascii_case))]
    KwKey,
    #[token("value", ignore(ascii_case))]
    KwValue,
    #[token("entry", ignore(ascii_case))]
    KwEntry,
    #[token("current_date", ignore(ascii_case))]
    KwCurrentDate,
    #[token("current_time", ignore(ascii_case))]
    KwCurrentTime,
    #[token("current_timestamp", ignore(ascii_case))]
    KwCurrentTimestamp,
    #[token("local", ignore(ascii_case))]
    KwLocal,
    #[token("date", ignore(ascii_case))]
    KwDate,
    #[token("time", ignore(ascii_case))]
    KwTime,
    #[token("datetime", ignore(ascii_case))]
    KwDatetime,
    #[token("length", ignore(ascii_case))]
    KwLength,
    #[token("locate", ignore(ascii_case))]
    KwLocate,
    #[token("abs", ignore(ascii_case))]
    KwAbs,
    #[token("ceiling", ignore(ascii_case))]
    KwCeiling,
    #[token("exp", ignore(ascii_case))]
    KwExp,
    #[token("floor", ignore(ascii_case))]
    KwFloor,
    #[token("ln", ignore(ascii_case))]
    KwLn,
    #[token("sign", ignore(ascii_case))]
    KwSign,
    #[token("sqrt", ignore(ascii_case))]
    KwSqrt,
    #[token("mod", ignore(ascii_case))]
    KwMod,
    #[token("power", ignore(ascii_case))]
    KwPower,
    #[token("round", ignore(ascii_case))]
    KwRound,
    #[token("size", ignore(ascii_case))]
    KwSize,
    #[token("index", ignore(ascii_case))]
    KwIndex,
    #[token("concat", ignore(ascii_case))]
    KwConcat,
    #[token("substring", ignore(ascii_case))]
    KwSubstring,
    #[token("trim", ignore(ascii_case))]
    KwTrim,
    #[token("lower", ignore(ascii_case))]
    KwLower,
    #[token("upper", ignore(ascii_case))]
    KwUpper,
    #[token("leading", ignore(ascii_case))]
    KwLeading,
    #[token("trailing", ignore(ascii_case))]
    KwTrailing,
    #[token("both", ignore(ascii_case))]
    KwBoth,
    #[token("function", ignore(ascii_case))]
    KwFunction,
    #[token("extract", ignore(ascii_case))]
    KwExtract,
    #[token("true", ignore(ascii_case))]
    KwTrue,
    #[token("false", ignore(ascii_case))]
    KwFalse,

    // ------------------------------------------------------------------
    // Trivia and lexer errors
    // ------------------------------------------------------------------
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Consecutive unrecognized characters coalesced into one token.
    UnexpectedFragment,

    /// End-of-input sentinel used by the parser; never stored in the tree.
    Eof,

    // ------------------------------------------------------------------
    // Node kinds
    // ------------------------------------------------------------------
    /// Root node containing a single statement.
    Root,
    SelectStatement,
    UpdateStatement,
    DeleteStatement,

    /// Top-level `SELECT` clause (count rewriting and projection capture
    /// apply here).
    SelectClause,
    /// Subquery `SELECT` clause (single item, never rewritten).
    SimpleSelectClause,
    SelectItem,
    /// `OBJECT(ident)` select expression.
    ObjectExpr,
    /// `NEW fqcn(args…)` constructor expression.
    ConstructorExpr,

    FromClause,
    SubqueryFromClause,
    /// One `FROM` declaration: a range variable plus its joins.
    FromRoot,
    /// `EntityName [AS] alias`.
    RangeDecl,
    /// Any join form: `[left [outer] | inner] join [fetch] path [[AS] alias] [ON cond]`.
    Join,
    /// `IN (path) [AS] alias` collection member declaration.
    CollectionMemberDecl,
    /// Dotted entity or derived-path name in a range declaration.
    EntityName,

    /// A dotted path expression, including a `KEY`/`VALUE`/`ENTRY` head or
    /// treated segments.
    PathExpr,
    /// `TREAT(path AS Subtype)`.
    TreatedPath,
    /// `KEY(m)`, `VALUE(m)` or `ENTRY(m)`.
    KeyValueExpr,

    WhereClause,
    GroupByClause,
    HavingClause,
    OrderByClause,
    OrderByItem,

    UpdateClause,
    /// `path = new_value` inside `SET`.
    UpdateItem,
    DeleteClause,

    Subquery,

    OrExpr,
    AndExpr,
    /// `NOT conditional_primary`.
    NotExpr,
    ComparisonExpr,
    BetweenExpr,
    InExpr,
    LikeExpr,
    /// `x IS [NOT] NULL`.
    NullCheckExpr,
    /// `path IS [NOT] EMPTY`.
    EmptyCheckExpr,
    /// `x [NOT] MEMBER [OF] path`.
    MemberExpr,
    ExistsExpr,
    /// `ALL`/`ANY`/`SOME` over a subquery.
    AllAnyExpr,

    /// Additive arithmetic chain.
    ArithExpr,
    /// Multiplicative arithmetic chain.
    ArithTerm,
    /// Unary `+`/`-`.
    ArithFactor,
    /// Parenthesized expression or subquery.
    GroupedExpr,

    /// `AVG`/`MAX`/`MIN`/`SUM`/`COUNT` with optional `DISTINCT`.
    AggregateExpr,
    /// Built-in function call with plain argument list (`lower(x)`,
    /// `mod(a, b)`, `coalesce(a, b, c)`, …).
    FunctionCall,
    /// `TRIM([spec] [char] [FROM] string)`.
    TrimExpr,
    /// `EXTRACT(field FROM datetime)`.
    ExtractExpr,
    /// `FUNCTION('name', args…)`.
    FunctionInvocation,
    /// `TYPE(x)` discriminator.
    TypeExpr,
    CaseExpr,
    WhenClause,

    /// `?1` or `:name`.
    InputParam,
    /// One of the three `#{…}` expression-language escapes.
    SpelExpr,

    /// Error node wrapping input the parser gave up on.
    Error,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Returns `true` for the whitespace token (dropped before parsing).
    #[inline]
    pub fn is_trivia(self) -> bool {
        self == Whitespace
    }

    /// Returns `true` for token kinds the parser accepts in identifier
    /// position. JPQL does not reserve `count`, `order` or `key`: entities
    /// and attributes may legally carry those names.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        matches!(self, Ident | KwCount | KwOrder | KwKey)
    }

    /// Returns `true` for the comparison operator tokens.
    #[inline]
    pub fn is_comparison_op(self) -> bool {
        matches!(
            self,
            Equals | NotEquals | Greater | GreaterEquals | Less | LessEquals
        )
    }

    /// Returns `true` for node kinds that open a clause in the rendered
    /// query. Their first token carries a line break in debug renders.
    #[inline]
    pub fn is_clause(self) -> bool {
        matches!(
            self,
            FromClause | SubqueryFromClause | WhereClause | GroupByClause | HavingClause
                | OrderByClause
        )
    }
}

/// Language tag parameterizing Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JpqlLanguage {}

impl Language for JpqlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: bounds checked above, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<JpqlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JpqlLanguage>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;
