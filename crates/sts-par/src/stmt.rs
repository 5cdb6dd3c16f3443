//! Statement parsing: control flow, blocks, and the declaration forms
//! that may also appear as ordinary statements.

use sts_lex::Token;
use sts_util::diagnostic::DiagnosticCode;

use crate::ast::{
    BlockStmt, BreakStmt, CatchClause, ContinueStmt, DoWhileStmt, ExprStmt, ForInit, ForStmt,
    IfStmt, ReturnStmt, Stmt, SwitchCase, SwitchStmt, ThrowStmt, TryStmt, VariableKind, WhileStmt,
};
use crate::FileParser;

impl<'a> FileParser<'a> {
    /// Parses one statement. `top_level` marks a context with no
    /// enclosing function (where `return` is illegal) and propagates
    /// unchanged into nested blocks and control-flow bodies; parsing a
    /// function or method body resets it to `false` at the call site.
    pub(crate) fn parse_statement(&mut self, top_level: bool) -> Stmt {
        match self.peek() {
            Token::LBrace => Stmt::Block(self.parse_block(top_level)),
            Token::Semicolon => {
                self.bump();
                Stmt::Empty(self.span())
            },
            Token::Break => self.parse_break_continue(true),
            Token::Continue => self.parse_break_continue(false),
            Token::Do => self.parse_do_while(top_level),
            Token::For => self.parse_for(top_level),
            Token::If => self.parse_if(top_level),
            Token::Return => self.parse_return(top_level),
            Token::Switch => self.parse_switch(top_level),
            Token::Throw => self.parse_throw(),
            Token::Try => self.parse_try(top_level),
            Token::While => self.parse_while(top_level),
            Token::Const => {
                self.bump();
                let start = self.span();
                if self.at(&Token::Enum) {
                    self.bump();
                    Stmt::Enum(self.parse_enum_decl(true, start, Vec::new()))
                } else {
                    Stmt::Variable(self.parse_variable_stmt(VariableKind::Const, start, Vec::new()))
                }
            },
            Token::Let => {
                self.bump();
                let start = self.span();
                Stmt::Variable(self.parse_variable_stmt(VariableKind::Let, start, Vec::new()))
            },
            Token::Var => {
                self.bump();
                let start = self.span();
                Stmt::Variable(self.parse_variable_stmt(VariableKind::Var, start, Vec::new()))
            },
            Token::Enum => {
                self.bump();
                let start = self.span();
                Stmt::Enum(self.parse_enum_decl(false, start, Vec::new()))
            },
            Token::Function => Stmt::Function(self.parse_function_decl(Vec::new(), Vec::new())),
            Token::Abstract => {
                self.bump();
                let start = self.span();
                self.expect(&Token::Class, DiagnosticCode::TOKEN_EXPECTED);
                Stmt::Class(self.parse_class_decl(start, true, Vec::new(), Vec::new()))
            },
            Token::Class => {
                self.bump();
                let start = self.span();
                Stmt::Class(self.parse_class_decl(start, false, Vec::new(), Vec::new()))
            },
            Token::Import => Stmt::Import(self.parse_import_stmt()),
            _ => self.parse_expr_stmt(),
        }
    }

    pub(crate) fn parse_block(&mut self, top_level: bool) -> BlockStmt {
        self.bump(); // {
        let start = self.span();
        let mut statements = Vec::new();
        while !self.at(&Token::RBrace) && !self.at(&Token::Eof) {
            statements.push(self.parse_statement(top_level));
        }
        self.expect(&Token::RBrace, DiagnosticCode::TOKEN_EXPECTED);
        let span = start.merge(self.span());
        BlockStmt { statements, span }
    }

    fn parse_break_continue(&mut self, is_break: bool) -> Stmt {
        self.bump(); // break | continue
        let start = self.span();
        let label = if matches!(self.peek(), Token::Ident(_)) && !self.lexer.next_token_on_new_line() {
            Some(self.parse_ident_expr())
        } else {
            None
        };
        self.eat_semicolon();
        let span = self.span_from(start);
        if is_break {
            Stmt::Break(BreakStmt { label, span })
        } else {
            Stmt::Continue(ContinueStmt { label, span })
        }
    }

    fn parse_do_while(&mut self, top_level: bool) -> Stmt {
        self.bump(); // do
        let start = self.span();
        let body = Box::new(self.parse_statement(top_level));
        self.expect(&Token::While, DiagnosticCode::TOKEN_EXPECTED);
        self.expect(&Token::LParen, DiagnosticCode::TOKEN_EXPECTED);
        let condition = self.parse_expression();
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
        self.eat_semicolon();
        let span = start.merge(self.span());
        Stmt::DoWhile(DoWhileStmt { body, condition, span })
    }

    fn parse_for(&mut self, top_level: bool) -> Stmt {
        self.bump(); // for
        let start = self.span();
        self.expect(&Token::LParen, DiagnosticCode::TOKEN_EXPECTED);

        let init = if self.at(&Token::Semicolon) {
            None
        } else if matches!(self.peek(), Token::Const | Token::Let | Token::Var) {
            let kind = match self.bump() {
                Token::Const => VariableKind::Const,
                Token::Let => VariableKind::Let,
                Token::Var => VariableKind::Var,
                _ => unreachable!("dispatch guarantees a variable-kind keyword"),
            };
            let vstart = self.span();
            Some(ForInit::Variable(self.parse_variable_declarators(kind, vstart, Vec::new())))
        } else {
            Some(ForInit::Expr(self.parse_expression()))
        };
        self.expect(&Token::Semicolon, DiagnosticCode::TOKEN_EXPECTED);

        let condition = if self.at(&Token::Semicolon) { None } else { Some(self.parse_expression()) };
        self.expect(&Token::Semicolon, DiagnosticCode::TOKEN_EXPECTED);

        let update = if self.at(&Token::RParen) { None } else { Some(self.parse_expression()) };
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);

        let body = Box::new(self.parse_statement(top_level));
        let span = start.merge(body.span());
        Stmt::For(ForStmt { init, condition, update, body, span })
    }

    fn parse_if(&mut self, top_level: bool) -> Stmt {
        self.bump(); // if
        let start = self.span();
        self.expect(&Token::LParen, DiagnosticCode::TOKEN_EXPECTED);
        let condition = self.parse_expression();
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
        let then_branch = Box::new(self.parse_statement(top_level));
        let else_branch = if self.eat(&Token::Else) {
            Some(Box::new(self.parse_statement(top_level)))
        } else {
            None
        };
        let tail = else_branch.as_ref().map_or_else(|| then_branch.span(), |e| e.span());
        let span = start.merge(tail);
        Stmt::If(IfStmt { condition, then_branch, else_branch, span })
    }

    fn parse_return(&mut self, top_level: bool) -> Stmt {
        self.bump(); // return
        let start = self.span();
        if top_level {
            self.warning(
                DiagnosticCode::RETURN_OUTSIDE_FUNCTION,
                start,
                "a 'return' statement can only be used within a function body",
            );
        }
        let omit_value = self.lexer.next_token_on_new_line()
            || self.at(&Token::Semicolon)
            || self.at(&Token::RBrace)
            || self.at(&Token::Eof);
        let value = if omit_value { None } else { Some(self.parse_expression()) };
        self.eat_semicolon();
        let span = self.span_from(start);
        Stmt::Return(ReturnStmt { value, span })
    }

    fn parse_switch(&mut self, top_level: bool) -> Stmt {
        self.bump(); // switch
        let start = self.span();
        self.expect(&Token::LParen, DiagnosticCode::TOKEN_EXPECTED);
        let discriminant = self.parse_expression();
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
        self.expect(&Token::LBrace, DiagnosticCode::TOKEN_EXPECTED);

        let mut cases = Vec::new();
        while !self.at(&Token::RBrace) && !self.at(&Token::Eof) {
            let case_start = self.span();
            let test = if self.eat(&Token::Case) {
                Some(self.parse_expression())
            } else if self.eat(&Token::Default) {
                None
            } else {
                let found = self.peek();
                self.error(
                    DiagnosticCode::CASE_OR_DEFAULT_EXPECTED,
                    self.span(),
                    format!("'case' or 'default' expected but got '{}'", found.describe()),
                );
                self.bump();
                continue;
            };
            self.expect(&Token::Colon, DiagnosticCode::TOKEN_EXPECTED);
            let mut body = Vec::new();
            while !matches!(self.peek(), Token::Case | Token::Default | Token::RBrace | Token::Eof) {
                body.push(self.parse_statement(top_level));
            }
            let span = case_start.merge(self.span());
            cases.push(SwitchCase { test, body, span });
        }
        self.expect(&Token::RBrace, DiagnosticCode::TOKEN_EXPECTED);
        let span = start.merge(self.span());
        Stmt::Switch(SwitchStmt { discriminant, cases, span })
    }

    fn parse_throw(&mut self) -> Stmt {
        self.bump(); // throw
        let start = self.span();
        let expr = self.parse_expression();
        self.eat_semicolon();
        let span = start.merge(expr.span());
        Stmt::Throw(ThrowStmt { expr, span })
    }

    fn parse_try(&mut self, top_level: bool) -> Stmt {
        self.bump(); // try
        let start = self.span();
        let block = self.parse_block(top_level);

        let catch = if self.eat(&Token::Catch) {
            self.expect(&Token::LParen, DiagnosticCode::TOKEN_EXPECTED);
            let binding = self.parse_ident_expr();
            self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
            let body = self.parse_block(top_level);
            Some(CatchClause { binding, body })
        } else {
            None
        };

        let finally = if self.eat(&Token::Finally) { Some(self.parse_block(top_level)) } else { None };

        if catch.is_none() && finally.is_none() {
            self.error(DiagnosticCode::TOKEN_EXPECTED, self.span(), "'catch' or 'finally' expected");
        }

        let span = start.merge(self.span());
        Stmt::Try(TryStmt { block, catch, finally, span })
    }

    fn parse_while(&mut self, top_level: bool) -> Stmt {
        self.bump(); // while
        let start = self.span();
        self.expect(&Token::LParen, DiagnosticCode::TOKEN_EXPECTED);
        let condition = self.parse_expression();
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
        let body = Box::new(self.parse_statement(top_level));
        let span = start.merge(body.span());
        Stmt::While(WhileStmt { condition, body, span })
    }

    /// The `otherwise` branch of the statement dispatch table: an
    /// expression statement, reparsed speculatively only in the sense
    /// that no other grammar production shares its leading token set in
    /// this subset, so no rollback is ever actually needed.
    fn parse_expr_stmt(&mut self) -> Stmt {
        let expr = self.parse_expression();
        self.eat_semicolon();
        let span = expr.span();
        Stmt::Expr(ExprStmt { expr, span })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Stmt;
    use crate::Parser;

    fn parse_one(src: &str) -> (Stmt, usize) {
        let mut parser = Parser::new();
        parser.parse_file(src, "stmt.ts", true).unwrap();
        while parser.next_file().is_some() {}
        let program = parser.finish();
        let errors = program.handler.error_count();
        (program.sources[0].statements[0].stmt.clone(), errors)
    }

    #[test]
    fn dangling_else_attaches_to_nearest_if() {
        let (stmt, errors) = parse_one("if (a) b; else if (c) d;");
        assert_eq!(errors, 0);
        let Stmt::If(outer) = stmt else { panic!("expected if statement") };
        let else_branch = outer.else_branch.expect("expected else branch");
        assert!(matches!(*else_branch, Stmt::If(_)));
    }

    #[test]
    fn top_level_return_is_a_warning_not_an_error() {
        let (stmt, errors) = parse_one("return;");
        assert_eq!(errors, 0);
        assert!(matches!(stmt, Stmt::Return(_)));
    }

    #[test]
    fn try_without_catch_or_finally_is_an_error() {
        let (_, errors) = parse_one("try { a; }");
        assert_eq!(errors, 1);
    }

    #[test]
    fn for_loop_with_variable_initializer() {
        let (stmt, errors) = parse_one("for (let i = 0; i; i) {}");
        assert_eq!(errors, 0);
        let Stmt::For(for_stmt) = stmt else { panic!("expected for statement") };
        assert!(matches!(for_stmt.init, Some(crate::ast::ForInit::Variable(_))));
    }
}
