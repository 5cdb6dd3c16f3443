//! Top-level item parsing: decorators, export/declare modifiers, and the
//! declaration forms that may only appear at file scope, plus the
//! shared declaration bodies (variables, enums, functions, classes,
//! imports/exports) that nested statement parsing in `stmt.rs` reuses
//! with empty decorator/modifier lists.

use sts_lex::Token;
use sts_util::diagnostic::DiagnosticCode;
use sts_util::{Span, Symbol};

use crate::ast::*;
use crate::FileParser;

impl<'a> FileParser<'a> {
    /// The file-level loop: decorators, then `export`/`declare`
    /// modifiers, then a keyword dispatch; stops early once a statement
    /// comes back as [`Stmt::Error`].
    pub(crate) fn parse_top_level(&mut self) -> Vec<TopLevelStmt> {
        let mut out = Vec::new();
        while !self.at(&Token::Eof) {
            let stmt = self.parse_top_level_statement();
            let stop = matches!(stmt, Stmt::Error(_));
            out.push(TopLevelStmt { stmt, source: self.source_id });
            if stop {
                break;
            }
        }
        if !self.decorators.is_empty() {
            let leftover = std::mem::take(&mut self.decorators);
            self.reject_decorators(&leftover);
        }
        out
    }

    fn parse_top_level_statement(&mut self) -> Stmt {
        self.parse_decorators();
        let decorators = std::mem::take(&mut self.decorators);

        if self.at(&Token::Export) {
            self.lexer.mark();
            self.bump();
            let start = self.span();
            if self.at(&Token::LBrace) {
                self.reject_decorators(&decorators);
                return self.parse_export_body(start);
            }
            if self.at(&Token::Import) {
                self.reject_decorators(&decorators);
                return self.parse_export_import_body(start);
            }
            self.lexer.reset();
        }

        let modifiers = self.parse_top_level_modifiers();

        match self.peek() {
            Token::Const => {
                self.bump();
                let start = self.span();
                self.reject_decorators(&decorators);
                if self.at(&Token::Enum) {
                    self.bump();
                    Stmt::Enum(self.parse_enum_decl(true, start, modifiers))
                } else {
                    Stmt::Variable(self.parse_variable_stmt(VariableKind::Const, start, modifiers))
                }
            },
            Token::Let => {
                self.bump();
                let start = self.span();
                self.reject_decorators(&decorators);
                Stmt::Variable(self.parse_variable_stmt(VariableKind::Let, start, modifiers))
            },
            Token::Var => {
                self.bump();
                let start = self.span();
                self.reject_decorators(&decorators);
                Stmt::Variable(self.parse_variable_stmt(VariableKind::Var, start, modifiers))
            },
            Token::Enum => {
                self.bump();
                let start = self.span();
                self.reject_decorators(&decorators);
                Stmt::Enum(self.parse_enum_decl(false, start, modifiers))
            },
            Token::Function => Stmt::Function(self.parse_function_decl(decorators, modifiers)),
            Token::Abstract => {
                self.bump();
                let start = self.span();
                self.expect(&Token::Class, DiagnosticCode::TOKEN_EXPECTED);
                Stmt::Class(self.parse_class_decl(start, true, decorators, modifiers))
            },
            Token::Class => {
                self.bump();
                let start = self.span();
                Stmt::Class(self.parse_class_decl(start, false, decorators, modifiers))
            },
            Token::Import => {
                self.reject_decorators(&decorators);
                self.reject_modifiers(modifiers);
                self.parse_import_stmt()
            },
            Token::Type => {
                self.reject_decorators(&decorators);
                self.reject_modifiers(modifiers);
                self.parse_type_alias_stub()
            },
            _ => {
                self.reject_decorators(&decorators);
                self.reject_modifiers(modifiers);
                self.parse_statement(true)
            },
        }
    }

    fn parse_decorators(&mut self) {
        while self.at(&Token::At) {
            self.bump();
            let start = self.span();
            let callee = self.parse_ident_expr();
            let arguments = if self.at(&Token::LParen) { self.parse_call_arguments() } else { Vec::new() };
            let span = self.span_from(start);
            self.decorators.push(Decorator { callee, arguments, span });
        }
    }

    fn reject_decorators(&self, decorators: &[Decorator]) {
        for d in decorators {
            self.error(DiagnosticCode::DECORATORS_NOT_VALID_HERE, d.span, "decorators are not valid here");
        }
    }

    fn parse_top_level_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = self.take_modifier_buf();
        loop {
            let kind = match self.peek() {
                Token::Export => ModifierKind::Export,
                Token::Declare => ModifierKind::Declare,
                _ => break,
            };
            self.bump();
            modifiers.push(Modifier { kind, span: self.span() });
        }
        modifiers
    }

    fn reject_modifiers(&mut self, mut modifiers: Vec<Modifier>) {
        for m in &modifiers {
            self.error(
                DiagnosticCode::MODIFIER_CANNOT_BE_USED_HERE,
                m.span,
                "a modifier cannot appear on this kind of declaration",
            );
        }
        modifiers.clear();
        self.recycle_modifier_buf(modifiers);
    }

    /// `type X = Y;` is accepted syntactically and then dropped: this
    /// parser subset carries no type-alias AST node. Recovery skips to
    /// the next statement terminator or top-level declaration keyword.
    fn parse_type_alias_stub(&mut self) -> Stmt {
        self.bump(); // type
        let start = self.span();
        self.info(
            DiagnosticCode::TYPE_ALIAS_NOT_SUPPORTED,
            start,
            "'type' aliases are not supported by this parser subset and are skipped",
        );
        while !matches!(self.peek(), Token::Semicolon | Token::Eof) && !self.starts_top_level_declaration() {
            self.bump();
        }
        self.eat_semicolon();
        let span = self.span_from(start);
        Stmt::Empty(span)
    }

    fn starts_top_level_declaration(&mut self) -> bool {
        matches!(
            self.peek(),
            Token::Export
                | Token::Declare
                | Token::Const
                | Token::Let
                | Token::Var
                | Token::Enum
                | Token::Function
                | Token::Abstract
                | Token::Class
                | Token::Import
                | Token::At
                | Token::Type
        )
    }

    pub(crate) fn parse_variable_stmt(&mut self, kind: VariableKind, start: Span, modifiers: Vec<Modifier>) -> VariableStmt {
        let mut stmt = self.parse_variable_declarators(kind, start, modifiers);
        self.eat_semicolon();
        stmt.span = self.span_from(start);
        stmt
    }

    /// Declarator-list parsing without a trailing semicolon, shared by
    /// [`Self::parse_variable_stmt`] and the `for (…;;)` init clause.
    pub(crate) fn parse_variable_declarators(
        &mut self,
        kind: VariableKind,
        start: Span,
        modifiers: Vec<Modifier>,
    ) -> VariableStmt {
        let mut declarators = Vec::new();
        loop {
            let name = self.parse_ident_expr();
            let decl_start = name.span;
            let ty = if self.eat(&Token::Colon) { Some(self.parse_type(true)) } else { None };
            let init = if self.eat(&Token::Eq) { Some(self.parse_assignment_expression()) } else { None };
            let span = self.span_from(decl_start);
            declarators.push(VariableDeclarator { name, ty, init, span });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        let span = self.span_from(start);
        VariableStmt { kind, declarators, modifiers, span }
    }

    pub(crate) fn parse_enum_decl(&mut self, is_const: bool, start: Span, modifiers: Vec<Modifier>) -> EnumDecl {
        let name = self.parse_ident_expr();
        self.expect(&Token::LBrace, DiagnosticCode::TOKEN_EXPECTED);
        let mut members = Vec::new();
        while !self.at(&Token::RBrace) && !self.at(&Token::Eof) {
            let member_name = self.parse_ident_expr();
            let member_start = member_name.span;
            let value = if self.eat(&Token::Eq) { Some(self.parse_assignment_expression()) } else { None };
            let span = self.span_from(member_start);
            members.push(EnumMember { name: member_name, value, span });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RBrace, DiagnosticCode::TOKEN_EXPECTED);
        let span = self.span_from(start);
        EnumDecl { name, is_const, members, modifiers, span }
    }

    pub(crate) fn parse_type_parameters(&mut self) -> Vec<TypeParameter> {
        if !self.eat(&Token::Lt) {
            return Vec::new();
        }
        let mut params = Vec::new();
        if self.at(&Token::Gt) {
            self.error(
                DiagnosticCode::TYPE_PARAMETER_LIST_CANNOT_BE_EMPTY,
                self.span(),
                "type parameter list cannot be empty",
            );
        } else {
            loop {
                let name = self.parse_ident_expr();
                let span = name.span;
                params.push(TypeParameter { name, span });
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::Gt, DiagnosticCode::TOKEN_EXPECTED);
        params
    }

    pub(crate) fn parse_parameters(&mut self) -> Vec<Parameter> {
        self.expect(&Token::LParen, DiagnosticCode::TOKEN_EXPECTED);
        let mut params = Vec::new();
        while !self.at(&Token::RParen) && !self.at(&Token::Eof) {
            let is_spread = self.eat(&Token::DotDotDot);
            let spread_span = if is_spread { Some(self.span()) } else { None };
            let name = self.parse_ident_expr();
            let start = spread_span.unwrap_or(name.span);
            let ty = if self.eat(&Token::Colon) { Some(self.parse_type(true)) } else { None };
            let default = if self.eat(&Token::Eq) { Some(self.parse_assignment_expression()) } else { None };
            let span = self.span_from(start);
            params.push(Parameter { name, ty, default, is_spread, span });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
        params
    }

    pub(crate) fn parse_function_decl(&mut self, decorators: Vec<Decorator>, modifiers: Vec<Modifier>) -> FunctionDecl {
        self.bump(); // function
        let start = self.span();
        let name = self.parse_ident_expr();
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let return_type = if self.eat(&Token::Colon) { Some(self.parse_type(true)) } else { None };

        let is_ambient = modifiers.iter().any(|m| m.kind == ModifierKind::Declare);
        let body = if self.at(&Token::LBrace) {
            if is_ambient {
                self.error(
                    DiagnosticCode::IMPLEMENTATION_NOT_ALLOWED_IN_AMBIENT,
                    self.span(),
                    "an implementation is not allowed in an ambient context",
                );
            }
            Some(self.parse_block(false))
        } else {
            if !is_ambient {
                self.error(
                    DiagnosticCode::FUNCTION_IMPLEMENTATION_MISSING,
                    self.span(),
                    "function implementation is missing or not immediately following the declaration",
                );
            }
            self.eat_semicolon();
            None
        };

        let span = self.span_from(start);
        FunctionDecl { name, type_parameters, parameters, return_type, body, decorators, modifiers, span }
    }

    pub(crate) fn parse_class_decl(
        &mut self,
        start: Span,
        is_abstract: bool,
        decorators: Vec<Decorator>,
        mut modifiers: Vec<Modifier>,
    ) -> ClassDecl {
        if is_abstract {
            modifiers.push(Modifier { kind: ModifierKind::Abstract, span: start });
        }
        let name = self.parse_ident_expr();
        let type_parameters = self.parse_type_parameters();
        let extends = if self.eat(&Token::Extends) { Some(self.parse_type(false)) } else { None };
        let mut implements = Vec::new();
        if self.eat(&Token::Implements) {
            loop {
                implements.push(self.parse_type(false));
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        let members = self.parse_class_members();
        let span = self.span_from(start);
        ClassDecl { name, type_parameters, extends, implements, members, decorators, modifiers, span }
    }

    fn parse_class_members(&mut self) -> Vec<ClassMember> {
        self.expect(&Token::LBrace, DiagnosticCode::TOKEN_EXPECTED);
        let mut members = Vec::new();
        while !self.at(&Token::RBrace) && !self.at(&Token::Eof) {
            members.push(self.parse_class_member());
        }
        self.expect(&Token::RBrace, DiagnosticCode::TOKEN_EXPECTED);
        members
    }

    fn parse_class_member_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = self.take_modifier_buf();
        loop {
            let kind = match self.peek() {
                Token::Public => ModifierKind::Public,
                Token::Private => ModifierKind::Private,
                Token::Protected => ModifierKind::Protected,
                Token::Static => ModifierKind::Static,
                Token::Abstract => ModifierKind::Abstract,
                Token::Get if self.get_or_set_is_modifier() => ModifierKind::Get,
                Token::Set if self.get_or_set_is_modifier() => ModifierKind::Set,
                _ => break,
            };
            self.bump();
            modifiers.push(Modifier { kind, span: self.span() });
        }
        modifiers
    }

    /// `get`/`set` are only accessor modifiers when another name follows
    /// before the member's `(` — a member literally named `get`/`set`
    /// (`get(): i32 {}`, `get: i32;`) must read as that name instead.
    /// Speculates past the keyword with the single lexer checkpoint and
    /// always resets: the caller re-peeks the keyword to decide whether
    /// to consume it as a modifier or leave it for the name parser.
    fn get_or_set_is_modifier(&mut self) -> bool {
        self.lexer.mark();
        self.bump();
        let followed_by_name = matches!(self.peek(), Token::Ident(_));
        self.lexer.reset();
        followed_by_name
    }

    /// A member's name is immediately followed by `(` for a method
    /// (optionally preceded by its own `<T>` type parameters) or by
    /// `:`/`=`/`;`/`}` for a field. No other disambiguation is needed in
    /// this subset, except that `get`/`set` used as the name itself
    /// (rather than an accessor modifier) never reaches `parse_ident_expr`
    /// since the lexer never classifies them as `Token::Ident`.
    fn parse_class_member_name(&mut self) -> IdentExpr {
        match self.peek() {
            Token::Get => {
                self.bump();
                IdentExpr { name: Symbol::intern("get"), span: self.span() }
            },
            Token::Set => {
                self.bump();
                IdentExpr { name: Symbol::intern("set"), span: self.span() }
            },
            _ => self.parse_ident_expr(),
        }
    }

    fn parse_class_member(&mut self) -> ClassMember {
        let modifiers = self.parse_class_member_modifiers();
        let name = self.parse_class_member_name();
        let start = modifiers.first().map_or(name.span, |m| m.span);

        let type_parameters = if self.at(&Token::Lt) { self.parse_type_parameters() } else { Vec::new() };

        if self.at(&Token::LParen) || !type_parameters.is_empty() {
            let parameters = self.parse_parameters();
            let return_type = if self.eat(&Token::Colon) { Some(self.parse_type(true)) } else { None };
            let is_abstract = modifiers.iter().any(|m| m.kind == ModifierKind::Abstract);
            let body = if self.at(&Token::LBrace) {
                Some(self.parse_block(false))
            } else {
                if !is_abstract {
                    self.error(
                        DiagnosticCode::FUNCTION_IMPLEMENTATION_MISSING,
                        self.span(),
                        "function implementation is missing or not immediately following the declaration",
                    );
                }
                self.eat_semicolon();
                None
            };
            let span = self.span_from(start);
            ClassMember::Method(MethodMember { name, type_parameters, parameters, return_type, body, modifiers, span })
        } else {
            for m in &modifiers {
                if matches!(m.kind, ModifierKind::Abstract | ModifierKind::Get | ModifierKind::Set) {
                    self.error(DiagnosticCode::FIELD_CANNOT_HAVE_MODIFIER, m.span, "a class field cannot have this modifier");
                }
            }
            let ty = if self.eat(&Token::Colon) { Some(self.parse_type(true)) } else { None };
            let is_ambient = modifiers.iter().any(|m| m.kind == ModifierKind::Declare);
            let init = if self.eat(&Token::Eq) {
                let expr = self.parse_assignment_expression();
                if is_ambient {
                    self.error(
                        DiagnosticCode::INITIALIZER_NOT_ALLOWED_IN_AMBIENT,
                        expr.span(),
                        "initializers are not allowed in ambient contexts",
                    );
                }
                Some(expr)
            } else {
                None
            };
            self.eat_semicolon();
            let span = self.span_from(start);
            ClassMember::Field(FieldMember { name, ty, init, modifiers, span })
        }
    }

    fn parse_string_lit(&mut self) -> StringLit {
        match self.bump() {
            Token::StringLit(value) => {
                let span = self.span();
                StringLit { value, span }
            },
            other => {
                let span = self.span();
                self.error(
                    DiagnosticCode::STRING_LITERAL_EXPECTED,
                    span,
                    format!("string literal expected but got '{}'", other.describe()),
                );
                StringLit { value: Symbol::intern(""), span }
            },
        }
    }

    /// Normalizes `raw` against this file's own normalized path and adds
    /// it to the work-list exactly once over the parser's lifetime.
    fn enqueue_import(&mut self, raw: &str) -> String {
        let resolved = crate::resolve_module_path(self.normalized_path, raw, &self.config.extensions);
        if self.seenlog.insert(resolved.clone()) {
            self.backlog.push_back(resolved.clone());
        }
        resolved
    }

    fn parse_import_specifiers(&mut self) -> Vec<ImportSpecifier> {
        self.expect(&Token::LBrace, DiagnosticCode::TOKEN_EXPECTED);
        let mut specifiers = Vec::new();
        while !self.at(&Token::RBrace) && !self.at(&Token::Eof) {
            let name = self.parse_ident_expr();
            let alias = if self.eat(&Token::As) { Some(self.parse_ident_expr()) } else { None };
            specifiers.push(ImportSpecifier { name, alias });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RBrace, DiagnosticCode::TOKEN_EXPECTED);
        specifiers
    }

    fn parse_export_specifiers(&mut self) -> Vec<ExportSpecifier> {
        self.expect(&Token::LBrace, DiagnosticCode::TOKEN_EXPECTED);
        let mut specifiers = Vec::new();
        while !self.at(&Token::RBrace) && !self.at(&Token::Eof) {
            let name = self.parse_ident_expr();
            let alias = if self.eat(&Token::As) { Some(self.parse_ident_expr()) } else { None };
            specifiers.push(ExportSpecifier { name, alias });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RBrace, DiagnosticCode::TOKEN_EXPECTED);
        specifiers
    }

    pub(crate) fn parse_import_stmt(&mut self) -> Stmt {
        self.bump(); // import
        let start = self.span();
        let specifiers = self.parse_import_specifiers();
        self.expect(&Token::From, DiagnosticCode::TOKEN_EXPECTED);
        let module_path = self.parse_string_lit();
        let resolved_path = self.enqueue_import(module_path.value.as_str());
        self.eat_semicolon();
        let span = self.span_from(start);
        Stmt::Import(ImportStmt { specifiers, module_path, resolved_path, span })
    }

    /// `export { … }` or `export { … } from "path"`; `start` covers the
    /// already-consumed `export` keyword.
    fn parse_export_body(&mut self, start: Span) -> Stmt {
        let specifiers = self.parse_export_specifiers();
        if self.eat(&Token::From) {
            let module_path = self.parse_string_lit();
            let resolved_path = self.enqueue_import(module_path.value.as_str());
            self.eat_semicolon();
            let span = self.span_from(start);
            Stmt::ExportFrom(ExportFromStmt { specifiers, module_path, resolved_path, span })
        } else {
            self.eat_semicolon();
            let span = self.span_from(start);
            Stmt::Export(ExportStmt { specifiers, span })
        }
    }

    /// `export import Alias = Target;`; `start` covers the
    /// already-consumed `export` keyword.
    fn parse_export_import_body(&mut self, start: Span) -> Stmt {
        self.bump(); // import
        let alias = self.parse_ident_expr();
        self.expect(&Token::Eq, DiagnosticCode::TOKEN_EXPECTED);
        let target = self.parse_ident_expr();
        self.eat_semicolon();
        let span = self.span_from(start);
        Stmt::ExportImport(ExportImportStmt { alias, target, span })
    }
}
