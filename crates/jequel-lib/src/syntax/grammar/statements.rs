//! Statement- and clause-level productions.

use crate::syntax::kind::SyntaxKind::{self, *};
use crate::syntax::parser::Parser;

impl Parser<'_> {
    /// `root = select_statement | update_statement | delete_statement`
    pub(crate) fn parse_root(&mut self) {
        self.start_node(Root);
        match self.current() {
            KwSelect => self.parse_select_statement(),
            KwUpdate => self.parse_update_statement(),
            KwDelete => self.parse_delete_statement(),
            _ => self.unexpected("'select', 'update' or 'delete'"),
        }
        self.wrap_trailing_input_in_error_node();
        self.finish_node();
    }

    fn parse_select_statement(&mut self) {
        self.start_node(SelectStatement);
        self.parse_select_clause(true);
        self.parse_from_clause(FromClause);
        if self.at(KwWhere) {
            self.parse_where_clause();
        }
        if self.at(KwGroup) {
            self.parse_groupby_clause();
        }
        if self.at(KwHaving) {
            self.parse_having_clause();
        }
        if self.at(KwOrder) {
            self.parse_orderby_clause();
        }
        self.finish_node();
    }

    fn parse_update_statement(&mut self) {
        self.start_node(UpdateStatement);
        self.parse_update_clause();
        if self.at(KwWhere) {
            self.parse_where_clause();
        }
        self.finish_node();
    }

    fn parse_delete_statement(&mut self) {
        self.start_node(DeleteStatement);
        self.parse_delete_clause();
        if self.at(KwWhere) {
            self.parse_where_clause();
        }
        self.finish_node();
    }

    // =====================================================================
    // SELECT
    // =====================================================================

    /// Top-level select clauses carry a comma-separated item list; subquery
    /// select clauses (`top == false`) hold exactly one expression and a
    /// different node kind so the rewrites never touch them.
    fn parse_select_clause(&mut self, top: bool) {
        self.start_node(if top { SelectClause } else { SimpleSelectClause });
        self.expect(KwSelect, "'select'");
        if self.at(KwDistinct) {
            self.bump();
        }
        if top {
            self.parse_select_item();
            while self.at(Comma) {
                self.bump();
                self.parse_select_item();
            }
        } else {
            self.parse_scalar_expression();
        }
        self.finish_node();
    }

    /// `select_item = select_expression [[AS] result_variable]`
    fn parse_select_item(&mut self) {
        self.start_node(SelectItem);
        self.parse_select_expression();
        if self.at(KwAs) {
            self.bump();
            self.expect_identifier("a result variable");
        } else if self.at(Ident) {
            // Bare result variable. Only a plain identifier is accepted here:
            // an unreserved keyword like `order` would be ambiguous with the
            // clause that may follow.
            self.bump();
        }
        self.finish_node();
    }

    fn parse_select_expression(&mut self) {
        match self.current() {
            KwObject if self.nth(1) == ParenOpen => {
                self.start_node(ObjectExpr);
                self.bump();
                self.bump();
                self.expect_identifier("an identification variable");
                self.expect(ParenClose, "')'");
                self.finish_node();
            }
            KwNew => self.parse_constructor_expression(),
            _ => self.parse_scalar_expression(),
        }
    }

    /// `constructor_expression = NEW constructor_name ( item (, item)* )`
    fn parse_constructor_expression(&mut self) {
        self.start_node(ConstructorExpr);
        self.bump();
        self.parse_path_expression();
        self.expect(ParenOpen, "'('");
        self.parse_scalar_expression();
        while self.at(Comma) {
            self.bump();
            self.parse_scalar_expression();
        }
        self.expect(ParenClose, "')'");
        self.finish_node();
    }

    // =====================================================================
    // FROM
    // =====================================================================

    /// Shared by the top-level `FROM` and the subquery variant; only the
    /// node kind differs.
    pub(crate) fn parse_from_clause(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.expect(KwFrom, "'from'");
        self.parse_from_item();
        while self.at(Comma) {
            self.bump();
            self.parse_from_item();
        }
        self.finish_node();
    }

    fn parse_from_item(&mut self) {
        if self.at(KwIn) && self.nth(1) == ParenOpen {
            self.parse_collection_member_decl();
        } else {
            self.start_node(FromRoot);
            self.parse_range_decl();
            while matches!(self.current(), KwLeft | KwInner | KwJoin) {
                self.parse_join();
            }
            self.finish_node();
        }
    }

    /// `range_variable_declaration = entity_name [AS] identification_variable`
    ///
    /// In subqueries the entity name position also admits derived paths
    /// (`FROM u.orders o`); the dotted entity-name parse covers both.
    fn parse_range_decl(&mut self) {
        self.start_node(RangeDecl);
        self.parse_entity_name();
        if self.at(KwAs) {
            self.bump();
        }
        self.expect_identifier("an identification variable");
        self.finish_node();
    }

    /// Dotted name, each segment an identifier or a SpEL escape
    /// (`FROM #{#entityName} e` is how the enclosing framework templates the
    /// entity).
    pub(crate) fn parse_entity_name(&mut self) {
        self.start_node(EntityName);
        if self.at_spel_open() {
            self.parse_spel_expression();
        } else {
            self.expect_identifier("an entity name");
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

    /// `join = join_spec [FETCH] join_association_path [[AS] alias] [ON cond]`
    ///
    /// The 3.1 BNF gives fetch joins neither alias nor `ON`; the alias is
    /// accepted anyway since providers do.
    fn parse_join(&mut self) {
        self.start_node(Join);
        if self.at(KwLeft) {
            self.bump();
            if self.at(KwOuter) {
                self.bump();
            }
        } else if self.at(KwInner) {
            self.bump();
        }
        self.expect(KwJoin, "'join'");
        let fetch = self.at(KwFetch);
        if fetch {
            self.bump();
        }
        self.parse_path_expression();
        if self.at(KwAs) {
            self.bump();
            self.expect_identifier("an identification variable");
        } else if fetch {
            if self.at(Ident) {
                self.bump();
            }
        } else {
            self.expect_identifier("an identification variable");
        }
        if !fetch && self.at(KwOn) {
            self.bump();
            self.parse_conditional_expression();
        }
        self.finish_node();
    }

    /// `collection_member_declaration = IN ( path ) [AS] alias`
    fn parse_collection_member_decl(&mut self) {
        self.start_node(CollectionMemberDecl);
        self.bump();
        self.expect(ParenOpen, "'('");
        self.parse_path_expression();
        self.expect(ParenClose, "')'");
        if self.at(KwAs) {
            self.bump();
        }
        self.expect_identifier("an identification variable");
        self.finish_node();
    }

    // =====================================================================
    // WHERE / GROUP BY / HAVING / ORDER BY
    // =====================================================================

    pub(crate) fn parse_where_clause(&mut self) {
        self.start_node(WhereClause);
        self.bump();
        self.parse_conditional_expression();
        self.finish_node();
    }

    pub(crate) fn parse_groupby_clause(&mut self) {
        self.start_node(GroupByClause);
        self.bump();
        self.expect(KwBy, "'by'");
        self.parse_path_expression();
        while self.at(Comma) {
            self.bump();
            self.parse_path_expression();
        }
        self.finish_node();
    }

    pub(crate) fn parse_having_clause(&mut self) {
        self.start_node(HavingClause);
        self.bump();
        self.parse_conditional_expression();
        self.finish_node();
    }

    fn parse_orderby_clause(&mut self) {
        self.start_node(OrderByClause);
        self.bump();
        self.expect(KwBy, "'by'");
        self.parse_orderby_item();
        while self.at(Comma) {
            self.bump();
            self.parse_orderby_item();
        }
        self.finish_node();
    }

    /// The BNF limits order-by items to paths and result variables, but
    /// sort injection with case folding emits `lower(path)` here and the
    /// engine's own output must re-parse; a scalar expression covers both.
    fn parse_orderby_item(&mut self) {
        self.start_node(OrderByItem);
        self.parse_scalar_expression();
        if self.at(KwAsc) || self.at(KwDesc) {
            self.bump();
        }
        self.finish_node();
    }

    // =====================================================================
    // UPDATE / DELETE
    // =====================================================================

    fn parse_update_clause(&mut self) {
        self.start_node(UpdateClause);
        self.bump();
        self.parse_entity_name();
        if self.at(KwAs) {
            self.bump();
            self.expect_identifier("an identification variable");
        } else if self.at(Ident) {
            self.bump();
        }
        self.expect(KwSet, "'set'");
        self.parse_update_item();
        while self.at(Comma) {
            self.bump();
            self.parse_update_item();
        }
        self.finish_node();
    }

    /// `update_item = path = new_value` where `new_value` is a scalar
    /// expression or `NULL`.
    fn parse_update_item(&mut self) {
        self.start_node(UpdateItem);
        self.parse_path_expression();
        self.expect(Equals, "'='");
        if self.at(KwNull) {
            self.bump();
        } else {
            self.parse_scalar_expression();
        }
        self.finish_node();
    }

    fn parse_delete_clause(&mut self) {
        self.start_node(DeleteClause);
        self.bump();
        self.expect(KwFrom, "'from'");
        self.parse_entity_name();
        if self.at(KwAs) {
            self.bump();
            self.expect_identifier("an identification variable");
        } else if self.at(Ident) {
            self.bump();
        }
        self.finish_node();
    }

    // =====================================================================
    // Subqueries
    // =====================================================================

    /// `subquery = simple_select_clause subquery_from_clause [where]
    /// [groupby] [having]` - the caller owns the surrounding parentheses.
    pub(crate) fn parse_subquery(&mut self) {
        self.start_node(Subquery);
        self.parse_select_clause(false);
        self.parse_from_clause(SubqueryFromClause);
        if self.at(KwWhere) {
            self.parse_where_clause();
        }
        if self.at(KwGroup) {
            self.parse_groupby_clause();
        }
        if self.at(KwHaving) {
            self.parse_having_clause();
        }
        self.finish_node();
    }
}
