//! Conditional and scalar expression productions, paths, functions,
//! parameters and SpEL escapes.

use rowan::Checkpoint;

use crate::syntax::kind::SyntaxKind::{self, *};
use crate::syntax::parser::Parser;

impl Parser<'_> {
    // =====================================================================
    // Conditionals
    // =====================================================================

    /// `conditional_expression = conditional_term (OR conditional_term)*`
    ///
    /// Binary chains wrap retroactively at a checkpoint, giving the same
    /// left-nested shape as the BNF's left recursion.
    pub(crate) fn parse_conditional_expression(&mut self) {
        let cp = self.checkpoint();
        self.parse_conditional_term();
        while self.at(KwOr) {
            self.start_node_at(cp, OrExpr);
            self.bump();
            self.parse_conditional_term();
            self.finish_node();
        }
    }

    fn parse_conditional_term(&mut self) {
        let cp = self.checkpoint();
        self.parse_conditional_factor();
        while self.at(KwAnd) {
            self.start_node_at(cp, AndExpr);
            self.bump();
            self.parse_conditional_factor();
            self.finish_node();
        }
    }

    fn parse_conditional_factor(&mut self) {
        if self.at(KwNot) {
            self.start_node(NotExpr);
            self.bump();
            self.parse_conditional_primary();
            self.finish_node();
        } else {
            self.parse_conditional_primary();
        }
    }

    fn parse_conditional_primary(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        if self.at(ParenOpen) && self.nth(1) != KwSelect && self.paren_encloses_condition() {
            self.start_node(GroupedExpr);
            self.bump();
            self.parse_conditional_expression();
            self.expect(ParenClose, "')'");
            self.finish_node();
        } else {
            self.parse_simple_cond_expression();
        }
        self.exit_recursion();
    }

    /// Distinguishes `(a.x > 1 and …)` from `(a.x + 1) > 2`: scan to the
    /// matching close paren looking for a token that can only belong to a
    /// predicate. Tokens inside a nested subquery or a `CASE … END` region
    /// do not count - those may legitimately hold predicates of their own
    /// (`(u.total + (select … where o.x = 1)) > 5`).
    fn paren_encloses_condition(&self) -> bool {
        // one entry per nested open paren: does it start a subquery?
        let mut parens: Vec<bool> = Vec::new();
        let mut case_depth = 0u32;
        let mut n = 1;
        loop {
            let kind = self.nth(n);
            match kind {
                ParenOpen => parens.push(self.nth(n + 1) == KwSelect),
                ParenClose => {
                    if parens.pop().is_none() {
                        // matching close of the paren under decision
                        return false;
                    }
                }
                KwCase => case_depth += 1,
                KwEnd => case_depth = case_depth.saturating_sub(1),
                Eof => return false,
                _ => {
                    let shielded = case_depth > 0 || parens.iter().any(|&subquery| subquery);
                    if !shielded
                        && (matches!(
                            kind,
                            KwAnd
                                | KwOr
                                | KwNot
                                | KwBetween
                                | KwLike
                                | KwIs
                                | KwMember
                                | KwExists
                                | KwIn
                        ) || kind.is_comparison_op())
                    {
                        return true;
                    }
                }
            }
            n += 1;
        }
    }

    /// One predicate: a left scalar operand followed by a comparison, or one
    /// of the keyword-introduced forms.
    fn parse_simple_cond_expression(&mut self) {
        if self.at(KwExists) {
            self.parse_exists_expression();
            return;
        }
        let cp = self.checkpoint();
        self.parse_scalar_expression();
        match self.current() {
            kind if kind.is_comparison_op() => {
                self.start_node_at(cp, ComparisonExpr);
                self.bump();
                self.parse_comparison_rhs();
                self.finish_node();
            }
            KwBetween => self.parse_between(cp, false),
            KwLike => self.parse_like(cp, false),
            KwIn => self.parse_in(cp, false),
            KwMember => self.parse_member(cp, false),
            KwIs => self.parse_is(cp),
            KwNot => match self.nth(1) {
                KwBetween => self.parse_between(cp, true),
                KwLike => self.parse_like(cp, true),
                KwIn => self.parse_in(cp, true),
                KwMember => self.parse_member(cp, true),
                _ => self.unexpected("'between', 'like', 'in' or 'member' after 'not'"),
            },
            _ => self.unexpected("a comparison operator or predicate"),
        }
    }

    fn parse_comparison_rhs(&mut self) {
        if matches!(self.current(), KwAll | KwAny | KwSome) {
            self.start_node(AllAnyExpr);
            self.bump();
            self.expect(ParenOpen, "'('");
            self.parse_subquery();
            self.expect(ParenClose, "')'");
            self.finish_node();
        } else {
            self.parse_scalar_expression();
        }
    }

    fn parse_between(&mut self, cp: Checkpoint, not: bool) {
        self.start_node_at(cp, BetweenExpr);
        if not {
            self.bump();
        }
        self.bump();
        self.parse_scalar_expression();
        self.expect(KwAnd, "'and'");
        self.parse_scalar_expression();
        self.finish_node();
    }

    fn parse_like(&mut self, cp: Checkpoint, not: bool) {
        self.start_node_at(cp, LikeExpr);
        if not {
            self.bump();
        }
        self.bump();
        self.parse_scalar_expression();
        if self.at(KwEscape) {
            self.bump();
            if self.at(StringLit) {
                self.bump();
            } else if self.at(Question) || self.at(Colon) {
                self.parse_input_param();
            } else {
                self.unexpected("an escape character");
            }
        }
        self.finish_node();
    }

    fn parse_in(&mut self, cp: Checkpoint, not: bool) {
        self.start_node_at(cp, InExpr);
        if not {
            self.bump();
        }
        self.bump();
        if self.at(ParenOpen) {
            self.bump();
            if self.at(KwSelect) {
                self.parse_subquery();
            } else {
                self.parse_in_item();
                while self.at(Comma) {
                    self.bump();
                    self.parse_in_item();
                }
            }
            self.expect(ParenClose, "')'");
        } else if self.at(Question) || self.at(Colon) {
            // collection-valued input parameter
            self.parse_input_param();
        } else {
            self.unexpected("'(' or an input parameter");
        }
        self.finish_node();
    }

    /// `in_item = literal | single_valued_input_parameter` - enum literals
    /// arrive as dotted paths.
    fn parse_in_item(&mut self) {
        match self.current() {
            StringLit | IntLit | FloatLit | KwTrue | KwFalse => self.bump(),
            Question | Colon => self.parse_input_param(),
            kind if kind.is_identifier_like() => self.parse_path_expression(),
            _ => self.unexpected("a literal or input parameter"),
        }
    }

    fn parse_member(&mut self, cp: Checkpoint, not: bool) {
        self.start_node_at(cp, MemberExpr);
        if not {
            self.bump();
        }
        self.bump();
        if self.at(KwOf) {
            self.bump();
        }
        self.parse_path_expression();
        self.finish_node();
    }

    /// `IS [NOT] NULL` / `IS [NOT] EMPTY`, wrapped over the left operand.
    fn parse_is(&mut self, cp: Checkpoint) {
        let not = self.nth(1) == KwNot;
        let target = self.nth(if not { 2 } else { 1 });
        let kind = match target {
            KwNull => NullCheckExpr,
            KwEmpty => EmptyCheckExpr,
            _ => {
                self.unexpected("'null' or 'empty' after 'is'");
                return;
            }
        };
        self.start_node_at(cp, kind);
        self.bump();
        if not {
            self.bump();
        }
        self.bump();
        self.finish_node();
    }

    fn parse_exists_expression(&mut self) {
        self.start_node(ExistsExpr);
        self.bump();
        self.expect(ParenOpen, "'('");
        self.parse_subquery();
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    // =====================================================================
    // Scalars
    // =====================================================================

    /// Additive level; multiplicative binds tighter, unary tighter still.
    pub(crate) fn parse_scalar_expression(&mut self) {
        let cp = self.checkpoint();
        self.parse_arith_term();
        while self.at(Plus) || self.at(Minus) {
            self.start_node_at(cp, ArithExpr);
            self.bump();
            self.parse_arith_term();
            self.finish_node();
        }
    }

    fn parse_arith_term(&mut self) {
        let cp = self.checkpoint();
        self.parse_arith_factor();
        while self.at(Star) || self.at(Slash) {
            self.start_node_at(cp, ArithTerm);
            self.bump();
            self.parse_arith_factor();
            self.finish_node();
        }
    }

    fn parse_arith_factor(&mut self) {
        if self.at(Plus) || self.at(Minus) {
            self.start_node(ArithFactor);
            self.bump();
            self.parse_primary();
            self.finish_node();
        } else {
            self.parse_primary();
        }
    }

    fn parse_primary(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        match self.current() {
            ParenOpen => {
                self.start_node(GroupedExpr);
                self.bump();
                if self.at(KwSelect) {
                    self.parse_subquery();
                } else {
                    self.parse_scalar_expression();
                }
                self.expect(ParenClose, "')'");
                self.finish_node();
            }
            StringLit | IntLit | FloatLit | KwTrue | KwFalse => self.bump(),
            KwCurrentDate | KwCurrentTime | KwCurrentTimestamp => self.bump(),
            KwLocal => {
                self.bump();
                if matches!(self.current(), KwDate | KwTime | KwDatetime) {
                    self.bump();
                } else {
                    self.unexpected("'date', 'time' or 'datetime'");
                }
            }
            Question | Colon => self.parse_input_param(),
            KwCase => self.parse_case_expression(),
            KwAvg | KwMax | KwMin | KwSum => self.parse_aggregate(),
            KwCount if self.nth(1) == ParenOpen => self.parse_aggregate(),
            KwLength | KwLocate | KwAbs | KwCeiling | KwExp | KwFloor | KwLn | KwSign | KwSqrt
            | KwMod | KwPower | KwRound | KwSize | KwIndex | KwConcat | KwSubstring | KwLower
            | KwUpper | KwCoalesce | KwNullif => self.parse_function_call(),
            KwTrim => self.parse_trim(),
            KwExtract => self.parse_extract(),
            KwFunction => self.parse_function_invocation(),
            KwType => self.parse_type_expr(),
            KwTreat if self.nth(1) == ParenOpen => self.parse_path_expression(),
            KwValue | KwEntry if self.nth(1) == ParenOpen => self.parse_path_expression(),
            kind if kind.is_identifier_like() => self.parse_path_expression(),
            SpelFunctionOpen | SpelNameOpen | SpelIndexOpen => self.parse_path_expression(),
            _ => self.unexpected("an expression"),
        }
        self.exit_recursion();
    }

    /// The BNF gives aggregates a single operand; a comma-separated list is
    /// accepted because derived count queries emit
    /// `count(distinct a, b, …)` over multi-item distinct projections, and
    /// the engine's own output must re-parse.
    fn parse_aggregate(&mut self) {
        self.start_node(AggregateExpr);
        self.bump();
        self.expect(ParenOpen, "'('");
        if self.at(KwDistinct) {
            self.bump();
        }
        self.parse_scalar_expression();
        while self.at(Comma) {
            self.bump();
            self.parse_scalar_expression();
        }
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    /// Built-in functions with a plain comma-separated argument list. Arity
    /// is not checked here - that is the provider's concern.
    fn parse_function_call(&mut self) {
        self.start_node(FunctionCall);
        self.bump();
        self.expect(ParenOpen, "'('");
        self.parse_scalar_expression();
        while self.at(Comma) {
            self.bump();
            self.parse_scalar_expression();
        }
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    /// `TRIM ( [LEADING|TRAILING|BOTH] [char] [FROM] string )`. A leading
    /// literal or parameter is the trim character only when `FROM` follows,
    /// otherwise it is the operand itself.
    fn parse_trim(&mut self) {
        self.start_node(TrimExpr);
        self.bump();
        self.expect(ParenOpen, "'('");
        if matches!(self.current(), KwLeading | KwTrailing | KwBoth) {
            self.bump();
        }
        if self.at(StringLit) && self.nth(1) == KwFrom {
            self.bump();
        } else if self.at(Question) && self.nth(2) == KwFrom {
            self.parse_input_param();
        } else if self.at(Colon) && self.nth(2) == KwFrom {
            self.parse_input_param();
        }
        if self.at(KwFrom) {
            self.bump();
        }
        self.parse_scalar_expression();
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    /// `EXTRACT ( field FROM datetime )` - the field is an identifier
    /// (`year`, `quarter`, …); `date`/`time` lex as keywords and are
    /// accepted too.
    fn parse_extract(&mut self) {
        self.start_node(ExtractExpr);
        self.bump();
        self.expect(ParenOpen, "'('");
        if self.at_identifier() || matches!(self.current(), KwDate | KwTime | KwDatetime) {
            self.bump();
        } else {
            self.unexpected("a datetime field");
        }
        self.expect(KwFrom, "'from'");
        self.parse_scalar_expression();
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    /// `FUNCTION ( 'name', args… )`
    fn parse_function_invocation(&mut self) {
        self.start_node(FunctionInvocation);
        self.bump();
        self.expect(ParenOpen, "'('");
        self.expect(StringLit, "a function name");
        while self.at(Comma) {
            self.bump();
            self.parse_scalar_expression();
        }
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    fn parse_type_expr(&mut self) {
        self.start_node(TypeExpr);
        self.bump();
        self.expect(ParenOpen, "'('");
        if self.at(Question) || self.at(Colon) {
            self.parse_input_param();
        } else {
            self.parse_path_expression();
        }
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    /// Both case forms: `CASE WHEN cond THEN …` and
    /// `CASE operand WHEN scalar THEN …`, each closed by `ELSE … END`.
    fn parse_case_expression(&mut self) {
        self.start_node(CaseExpr);
        self.bump();
        let general = self.at(KwWhen);
        if !general {
            if self.at(KwType) {
                self.parse_type_expr();
            } else {
                self.parse_path_expression();
            }
        }
        while self.at(KwWhen) {
            self.parse_when_clause(general);
        }
        self.expect(KwElse, "'else'");
        self.parse_scalar_expression();
        self.expect(KwEnd, "'end'");
        self.finish_node();
    }

    fn parse_when_clause(&mut self, general: bool) {
        self.start_node(WhenClause);
        self.bump();
        if general {
            self.parse_conditional_expression();
        } else {
            self.parse_scalar_expression();
        }
        self.expect(KwThen, "'then'");
        self.parse_scalar_expression();
        self.finish_node();
    }

    // =====================================================================
    // Paths, parameters, SpEL
    // =====================================================================

    /// A dotted path: `u`, `u.address.city`, `KEY(m).name`,
    /// `TREAT(u.item AS Book).price`, `#{#entityName}.id`. Single
    /// identifiers take this route too - the emitter's path handling is a
    /// no-op for them.
    pub(crate) fn parse_path_expression(&mut self) {
        self.start_node(PathExpr);
        match self.current() {
            KwTreat if self.nth(1) == ParenOpen => self.parse_treated_path(),
            KwKey | KwValue | KwEntry if self.nth(1) == ParenOpen => self.parse_key_value(),
            SpelFunctionOpen | SpelNameOpen | SpelIndexOpen => self.parse_spel_expression(),
            kind if kind.is_identifier_like() => self.bump(),
            _ => self.unexpected("an identifier"),
        }
        while self.at(Dot) {
            self.bump();
            if self.at_spel_open() {
                self.parse_spel_expression();
            } else {
                self.expect_identifier("an attribute name");
            }
        }
        self.finish_node();
    }

    /// `TREAT ( path AS Subtype )`
    fn parse_treated_path(&mut self) {
        self.start_node(TreatedPath);
        self.bump();
        self.bump();
        self.parse_path_expression();
        self.expect(KwAs, "'as'");
        self.expect_identifier("a subtype name");
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    /// `KEY ( m )` / `VALUE ( m )` / `ENTRY ( m )`
    fn parse_key_value(&mut self) {
        self.start_node(KeyValueExpr);
        self.bump();
        self.bump();
        self.expect_identifier("an identification variable");
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    /// `?1` or `:name`
    pub(crate) fn parse_input_param(&mut self) {
        self.start_node(InputParam);
        if self.at(Question) {
            self.bump();
            self.expect(IntLit, "a parameter position");
        } else {
            self.bump();
            self.expect_identifier("a parameter name");
        }
        self.finish_node();
    }

    pub(crate) fn at_spel_open(&self) -> bool {
        matches!(
            self.current(),
            SpelFunctionOpen | SpelNameOpen | SpelIndexOpen
        )
    }

    /// The three `#{…}` escape forms of the enclosing framework, kept
    /// structural so they re-render exactly.
    pub(crate) fn parse_spel_expression(&mut self) {
        self.start_node(SpelExpr);
        match self.current() {
            SpelNameOpen => {
                self.bump();
                self.expect_identifier("a name");
                while self.at(Dot) {
                    self.bump();
                    self.expect_identifier("a name");
                }
                self.expect(BraceClose, "'}'");
            }
            SpelIndexOpen => {
                self.bump();
                self.expect(IntLit, "an argument index");
                self.expect(BracketBraceClose, "']}'");
            }
            _ => {
                self.bump();
                self.expect_identifier("a function name");
                self.expect(ParenOpen, "'('");
                if self.at(StringLit) {
                    self.bump();
                } else if self.at(BracketOpen) {
                    self.bump();
                    self.expect(IntLit, "an argument index");
                    self.expect(BracketClose, "']'");
                } else {
                    self.unexpected("a string literal or '[index]'");
                }
                self.expect(ParenBraceClose, "')}'");
            }
        }
        self.finish_node();
    }
}
