//! Expression parsing: operator-precedence climbing over the 20-level
//! ladder (comma through member-access), with speculative
//! type-argument-before-call disambiguation and a regexp/division
//! rescan at prefix position.

use sts_lex::Token;
use sts_util::diagnostic::DiagnosticCode;
use sts_util::Symbol;

use crate::ast::{
    ArrayLit, AssertExpr, BinaryExpr, BinaryOp, BoolLit, CallExpr, ElementAccessExpr, Expr,
    FloatLit, IdentExpr, IntegerLit, NewExpr, ParenExpr, PropertyAccessExpr, RegexpLit,
    SelectExpr, StringLit, TypeNode, UnaryExpr, UnaryOp,
};
use crate::FileParser;

const COMMA: u8 = 1;
const ASSIGNMENT: u8 = 4;
const CONDITIONAL: u8 = 5;
const LOGICAL_OR: u8 = 6;
const LOGICAL_AND: u8 = 7;
const BIT_OR: u8 = 8;
const BIT_XOR: u8 = 9;
const BIT_AND: u8 = 10;
const EQUALITY: u8 = 11;
const RELATIONAL: u8 = 12;
const SHIFT: u8 = 13;
const ADDITIVE: u8 = 14;
const MULTIPLICATIVE: u8 = 15;
const EXPONENT: u8 = 16;
const UNARY_PREFIX: u8 = 17;
const UNARY_POSTFIX: u8 = 18;
const MEMBER: u8 = 20;

/// The precedence of `token` read as a continuation (binary operator,
/// postfix, ternary, `as`, `.`/`[`), or `None` if it cannot continue an
/// expression. Levels with no infix/postfix reading (spread, yield,
/// unary-prefix, call, grouping) are absent.
fn infix_precedence(token: &Token) -> Option<u8> {
    Some(match token {
        Token::Comma => COMMA,
        Token::Eq
        | Token::PlusEq
        | Token::MinusEq
        | Token::StarEq
        | Token::SlashEq
        | Token::PercentEq
        | Token::StarStarEq
        | Token::AmpEq
        | Token::PipeEq
        | Token::CaretEq
        | Token::ShlEq
        | Token::ShrEq => ASSIGNMENT,
        Token::Question => CONDITIONAL,
        Token::PipePipe => LOGICAL_OR,
        Token::AmpAmp => LOGICAL_AND,
        Token::Pipe => BIT_OR,
        Token::Caret => BIT_XOR,
        Token::Amp => BIT_AND,
        Token::EqEq | Token::NotEq | Token::EqEqEq | Token::NotEqEq => EQUALITY,
        Token::Lt | Token::Gt | Token::LtEq | Token::GtEq | Token::In | Token::Instanceof | Token::As => RELATIONAL,
        Token::Shl | Token::Shr => SHIFT,
        Token::Plus | Token::Minus => ADDITIVE,
        Token::Star | Token::Slash | Token::Percent => MULTIPLICATIVE,
        Token::StarStar => EXPONENT,
        Token::PlusPlus | Token::MinusMinus => UNARY_POSTFIX,
        Token::Dot | Token::LBracket => MEMBER,
        _ => return None,
    })
}

fn is_right_associative(token: &Token) -> bool {
    matches!(
        token,
        Token::Eq
            | Token::PlusEq
            | Token::MinusEq
            | Token::StarEq
            | Token::SlashEq
            | Token::PercentEq
            | Token::StarStarEq
            | Token::AmpEq
            | Token::PipeEq
            | Token::CaretEq
            | Token::ShlEq
            | Token::ShrEq
            | Token::Question
            | Token::StarStar
    )
}

fn binary_op(token: &Token) -> Option<BinaryOp> {
    Some(match token {
        Token::Comma => BinaryOp::Comma,
        Token::Eq => BinaryOp::Assign,
        Token::PlusEq => BinaryOp::AddAssign,
        Token::MinusEq => BinaryOp::SubAssign,
        Token::StarEq => BinaryOp::MulAssign,
        Token::SlashEq => BinaryOp::DivAssign,
        Token::PercentEq => BinaryOp::ModAssign,
        Token::StarStarEq => BinaryOp::PowAssign,
        Token::AmpEq => BinaryOp::BitAndAssign,
        Token::PipeEq => BinaryOp::BitOrAssign,
        Token::CaretEq => BinaryOp::BitXorAssign,
        Token::ShlEq => BinaryOp::ShlAssign,
        Token::ShrEq => BinaryOp::ShrAssign,
        Token::PipePipe => BinaryOp::LogicalOr,
        Token::AmpAmp => BinaryOp::LogicalAnd,
        Token::Pipe => BinaryOp::BitOr,
        Token::Caret => BinaryOp::BitXor,
        Token::Amp => BinaryOp::BitAnd,
        Token::EqEq => BinaryOp::Eq,
        Token::NotEq => BinaryOp::NotEq,
        Token::EqEqEq => BinaryOp::StrictEq,
        Token::NotEqEq => BinaryOp::StrictNotEq,
        Token::Lt => BinaryOp::Lt,
        Token::Gt => BinaryOp::Gt,
        Token::LtEq => BinaryOp::LtEq,
        Token::GtEq => BinaryOp::GtEq,
        Token::In => BinaryOp::In,
        Token::Instanceof => BinaryOp::Instanceof,
        Token::Shl => BinaryOp::Shl,
        Token::Shr => BinaryOp::Shr,
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Star => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::Percent => BinaryOp::Mod,
        Token::StarStar => BinaryOp::Pow,
        _ => return None,
    })
}

impl<'a> FileParser<'a> {
    /// A full expression, including the low-precedence comma operator.
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_expr_bp(COMMA)
    }

    /// An expression at precedence greater than comma; used wherever a
    /// comma is a list separator rather than the sequence operator
    /// (call arguments, array elements, declarator/member initializers).
    pub(crate) fn parse_assignment_expression(&mut self) -> Expr {
        self.parse_expr_bp(COMMA + 1)
    }

    fn parse_expr_bp(&mut self, min_prec: u8) -> Expr {
        let mut left = self.parse_prefix();
        left = self.maybe_parse_call(left);
        loop {
            let tok = self.peek();
            let prec = match infix_precedence(&tok) {
                Some(p) if p >= min_prec => p,
                _ => break,
            };
            left = match tok {
                Token::As => self.parse_assert_postfix(left),
                Token::LBracket => self.parse_element_access(left),
                Token::PlusPlus | Token::MinusMinus => self.parse_unary_postfix(left, tok),
                Token::Question => self.parse_select(left),
                Token::Dot => self.parse_property_access(left),
                _ => self.parse_binary(left, tok, prec),
            };
        }
        left
    }

    fn parse_binary(&mut self, left: Expr, tok: Token, prec: u8) -> Expr {
        self.bump();
        let next_min = if is_right_associative(&tok) { prec } else { prec + 1 };
        let right = self.parse_expr_bp(next_min);
        let op = binary_op(&tok).expect("infix_precedence only admits tokens binary_op recognizes");
        let span = left.span().merge(right.span());
        Expr::Binary(BinaryExpr { op, left: Box::new(left), right: Box::new(right), span })
    }

    fn parse_assert_postfix(&mut self, left: Expr) -> Expr {
        self.bump(); // as
        let ty = self.parse_type(true);
        let span = left.span().merge(ty.span);
        Expr::AssertPostfix(AssertExpr { expr: Box::new(left), ty, is_prefix: false, span })
    }

    fn parse_element_access(&mut self, object: Expr) -> Expr {
        self.bump(); // [
        let index = self.parse_expr_bp(COMMA);
        self.expect(&Token::RBracket, DiagnosticCode::TOKEN_EXPECTED);
        let span = object.span().merge(self.span());
        Expr::Element(ElementAccessExpr { object: Box::new(object), index: Box::new(index), span })
    }

    fn parse_unary_postfix(&mut self, operand: Expr, tok: Token) -> Expr {
        self.bump();
        let op_span = self.span();
        if !matches!(operand, Expr::Ident(_) | Expr::Element(_) | Expr::Property(_)) {
            self.error(
                DiagnosticCode::INCREMENT_OPERAND_MUST_BE_VARIABLE,
                operand.span(),
                "the operand of an increment or decrement operator must be a variable, property access, or element access",
            );
        }
        let op = if tok == Token::PlusPlus { UnaryOp::PostIncrement } else { UnaryOp::PostDecrement };
        let span = operand.span().merge(op_span);
        Expr::UnaryPostfix(UnaryExpr { op, operand: Box::new(operand), span })
    }

    fn parse_select(&mut self, condition: Expr) -> Expr {
        self.bump(); // ?
        let then_branch = self.parse_expr_bp(ASSIGNMENT);
        self.expect(&Token::Colon, DiagnosticCode::TOKEN_EXPECTED);
        let else_branch = self.parse_expr_bp(CONDITIONAL);
        let span = condition.span().merge(else_branch.span());
        Expr::Select(SelectExpr {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            span,
        })
    }

    fn parse_property_access(&mut self, object: Expr) -> Expr {
        self.bump(); // .
        let name = self.parse_ident_expr();
        let span = object.span().merge(name.span);
        Expr::Property(PropertyAccessExpr { object: Box::new(object), property: name, span })
    }

    pub(crate) fn parse_ident_expr(&mut self) -> IdentExpr {
        match self.bump() {
            Token::Ident(sym) => {
                let span = self.span();
                IdentExpr { name: sym, span }
            },
            other => {
                let span = self.span();
                self.error(
                    DiagnosticCode::IDENTIFIER_EXPECTED,
                    span,
                    format!("identifier expected but got '{}'", other.describe()),
                );
                IdentExpr { name: Symbol::intern(""), span }
            },
        }
    }

    fn parse_prefix(&mut self) -> Expr {
        match self.peek() {
            Token::Null => {
                self.bump();
                Expr::Null(self.span())
            },
            Token::True => {
                self.bump();
                let span = self.span();
                Expr::Bool(BoolLit { value: true, span })
            },
            Token::False => {
                self.bump();
                let span = self.span();
                Expr::Bool(BoolLit { value: false, span })
            },
            Token::This => {
                self.bump();
                Expr::This(self.span())
            },
            Token::IntegerLit(value) => {
                self.bump();
                let span = self.span();
                Expr::Integer(IntegerLit { value, span })
            },
            Token::FloatLit(value) => {
                self.bump();
                let span = self.span();
                Expr::Float(FloatLit { value, span })
            },
            Token::StringLit(value) => {
                self.bump();
                let span = self.span();
                Expr::Str(StringLit { value, span })
            },
            Token::Ident(name) => {
                self.bump();
                let span = self.span();
                Expr::Ident(IdentExpr { name, span })
            },
            Token::Slash | Token::SlashEq => {
                self.bump();
                let tok = self.lexer.rescan_slash_as_regexp();
                let span = self.span();
                match tok {
                    Token::RegexpLit(value) => Expr::Regexp(RegexpLit { value, span }),
                    _ => {
                        self.error(DiagnosticCode::UNTERMINATED_REGEXP_LITERAL, span, "invalid regexp literal");
                        Expr::Error(span)
                    },
                }
            },
            Token::LParen => self.parse_paren_expr(),
            Token::LBracket => self.parse_array_lit(),
            Token::Lt => self.parse_assert_prefix(),
            Token::New => self.parse_new_expr(),
            Token::Plus
            | Token::Minus
            | Token::Bang
            | Token::Tilde
            | Token::Typeof
            | Token::Void
            | Token::PlusPlus
            | Token::MinusMinus => self.parse_unary_prefix(),
            other => {
                self.bump();
                let span = self.span();
                self.error(
                    DiagnosticCode::EXPRESSION_EXPECTED,
                    span,
                    format!("expression expected but got '{}'", other.describe()),
                );
                Expr::Error(span)
            },
        }
    }

    fn parse_unary_prefix(&mut self) -> Expr {
        let tok = self.bump();
        let start = self.span();
        let op = match tok {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Minus,
            Token::Bang => UnaryOp::Not,
            Token::Tilde => UnaryOp::BitNot,
            Token::Typeof => UnaryOp::Typeof,
            Token::Void => UnaryOp::Void,
            Token::PlusPlus => UnaryOp::PreIncrement,
            Token::MinusMinus => UnaryOp::PreDecrement,
            _ => unreachable!("parse_prefix only dispatches here for unary-prefix tokens"),
        };
        let operand = self.parse_expr_bp(UNARY_PREFIX);
        let span = start.merge(operand.span());
        Expr::UnaryPrefix(UnaryExpr { op, operand: Box::new(operand), span })
    }

    fn parse_paren_expr(&mut self) -> Expr {
        self.bump(); // (
        let start = self.span();
        let inner = self.parse_expr_bp(COMMA);
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
        let span = start.merge(self.span());
        Expr::Paren(ParenExpr { inner: Box::new(inner), span })
    }

    /// Array literal with elision support: adjacent commas (or a
    /// leading comma) produce `None` slots; a trailing comma before `]`
    /// does not add a final elided slot.
    fn parse_array_lit(&mut self) -> Expr {
        self.bump(); // [
        let start = self.span();
        let mut elements = Vec::new();
        loop {
            if self.at(&Token::RBracket) {
                break;
            }
            if self.at(&Token::Comma) {
                elements.push(None);
                self.bump();
                continue;
            }
            elements.push(Some(self.parse_assignment_expression()));
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RBracket, DiagnosticCode::TOKEN_EXPECTED);
        let span = start.merge(self.span());
        Expr::Array(ArrayLit { elements, span })
    }

    /// Prefix type assertion `<T>expr`, distinguished from a relational
    /// `<` by prefix position.
    fn parse_assert_prefix(&mut self) -> Expr {
        self.bump(); // <
        let start = self.span();
        let ty = self.parse_type(false);
        self.expect(&Token::Gt, DiagnosticCode::TOKEN_EXPECTED);
        let operand = self.parse_expr_bp(UNARY_PREFIX);
        let span = start.merge(operand.span());
        Expr::AssertPrefix(AssertExpr { expr: Box::new(operand), ty, is_prefix: true, span })
    }

    /// `new` parses a member-access-level callee (identifier or
    /// property-access chain) and an optional directly-following
    /// argument list. A `<T>(...)` immediately after the callee is left
    /// for `maybe_parse_call` to wrap as a `CallExpression` over this
    /// `NewExpression` rather than being retained on the `NewExpression`
    /// itself.
    fn parse_new_expr(&mut self) -> Expr {
        self.bump(); // new
        let start = self.span();
        let mut callee = self.parse_new_callee_primary();
        while self.at(&Token::Dot) {
            callee = self.parse_property_access(callee);
        }
        if !matches!(callee, Expr::Ident(_) | Expr::Property(_)) {
            self.error(
                DiagnosticCode::EXPRESSION_EXPECTED,
                callee.span(),
                "the target of a 'new' expression must be an identifier or property access",
            );
        }
        let arguments = if self.at(&Token::LParen) { self.parse_call_arguments() } else { Vec::new() };
        let span = start.merge(self.span());
        Expr::New(NewExpr { callee: Box::new(callee), arguments, span })
    }

    fn parse_new_callee_primary(&mut self) -> Expr {
        match self.bump() {
            Token::Ident(name) => {
                let span = self.span();
                Expr::Ident(IdentExpr { name, span })
            },
            other => {
                let span = self.span();
                self.error(
                    DiagnosticCode::IDENTIFIER_EXPECTED,
                    span,
                    format!("identifier expected but got '{}'", other.describe()),
                );
                Expr::Error(span)
            },
        }
    }

    /// Wraps `callee` in a `CallExpression` if a (possibly type-argument
    /// qualified) argument list directly follows.
    fn maybe_parse_call(&mut self, callee: Expr) -> Expr {
        let start = callee.span();
        let type_arguments = self.try_parse_type_args_before_call();
        if type_arguments.is_some() || self.at(&Token::LParen) {
            let arguments = self.parse_call_arguments();
            let span = start.merge(self.span());
            Expr::Call(CallExpr {
                callee: Box::new(callee),
                type_arguments: type_arguments.unwrap_or_default(),
                arguments,
                span,
            })
        } else {
            callee
        }
    }

    /// Speculatively reads `< Type (, Type)* >` immediately before `(`,
    /// disambiguating `f<T>(x)` from `a < b > c`. Resets the single
    /// lexer checkpoint on failure.
    ///
    /// Every type in the list is checked with [`Self::at_type_start`]
    /// before `parse_type` is called on it, so a token that can't begin a
    /// type (an operator, a number, `+`, ...) aborts the probe instead of
    /// letting `parse_type` emit a `TYPE_EXPECTED` diagnostic that the
    /// subsequent `reset()` would never retract — an ordinary comparison
    /// like `i < 10` must never report an error.
    fn try_parse_type_args_before_call(&mut self) -> Option<Vec<TypeNode>> {
        if !self.at(&Token::Lt) {
            return None;
        }
        self.lexer.mark();
        self.bump(); // <
        let mut args = Vec::new();
        if !self.at(&Token::Gt) {
            loop {
                if !self.at_type_start() {
                    self.lexer.reset();
                    return None;
                }
                args.push(self.parse_type(false));
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        if self.eat(&Token::Gt) && self.at(&Token::LParen) {
            Some(args)
        } else {
            self.lexer.reset();
            None
        }
    }

    /// True when the peeked token can begin a `parse_type(false)` call
    /// (mirrors the token kinds `types.rs::parse_type` accepts without
    /// `accept_parenthesized`).
    fn at_type_start(&mut self) -> bool {
        matches!(
            self.peek(),
            Token::Void | Token::This | Token::True | Token::False | Token::StringLit(_) | Token::Ident(_)
        )
    }

    pub(crate) fn parse_call_arguments(&mut self) -> Vec<Expr> {
        self.bump(); // (
        let mut args = Vec::new();
        if !self.at(&Token::RParen) {
            loop {
                args.push(self.parse_assignment_expression());
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
        args
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Expr};
    use crate::Parser;

    fn parse_expr_in(src: &str) -> (Expr, usize) {
        let mut parser = Parser::new();
        parser
            .parse_file(&format!("const __x = {src};"), "expr.ts", true)
            .unwrap();
        while parser.next_file().is_some() {}
        let program = parser.finish();
        let errors = program.handler.error_count();
        let crate::ast::Stmt::Variable(stmt) = &program.sources[0].statements[0].stmt else {
            panic!("expected variable statement");
        };
        (stmt.declarators[0].init.clone().unwrap(), errors)
    }

    fn as_binary(expr: &Expr) -> &crate::ast::BinaryExpr {
        match expr {
            Expr::Binary(b) => b,
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn additive_binds_looser_than_multiplicative() {
        let (expr, errors) = parse_expr_in("a + b * c");
        assert_eq!(errors, 0);
        let top = as_binary(&expr);
        assert_eq!(top.op, BinaryOp::Add);
        assert_eq!(as_binary(&top.right).op, BinaryOp::Mul);
    }

    #[test]
    fn assignment_is_right_associative() {
        let (expr, errors) = parse_expr_in("a = b = c");
        assert_eq!(errors, 0);
        let top = as_binary(&expr);
        assert_eq!(top.op, BinaryOp::Assign);
        assert_eq!(as_binary(&top.right).op, BinaryOp::Assign);
    }

    #[test]
    fn exponent_is_right_associative() {
        let (expr, errors) = parse_expr_in("a ** b ** c");
        assert_eq!(errors, 0);
        let top = as_binary(&expr);
        assert_eq!(top.op, BinaryOp::Pow);
        assert_eq!(as_binary(&top.right).op, BinaryOp::Pow);
    }

    #[test]
    fn less_than_greater_than_does_not_read_as_call() {
        let (expr, errors) = parse_expr_in("a < b > c");
        assert_eq!(errors, 0);
        let top = as_binary(&expr);
        assert_eq!(top.op, BinaryOp::Gt);
        assert_eq!(as_binary(&top.left).op, BinaryOp::Lt);
    }

    #[test]
    fn less_than_with_non_type_starting_rhs_reports_no_error() {
        let (expr, errors) = parse_expr_in("i < 10");
        assert_eq!(errors, 0);
        assert_eq!(as_binary(&expr).op, BinaryOp::Lt);
    }

    #[test]
    fn less_than_with_additive_rhs_reports_no_error() {
        let (expr, errors) = parse_expr_in("a < b + c");
        assert_eq!(errors, 0);
        assert_eq!(as_binary(&expr).op, BinaryOp::Lt);
    }

    #[test]
    fn for_loop_condition_with_numeric_rhs_reports_no_error() {
        let mut parser = Parser::new();
        parser
            .parse_file("for (let i = 0; i < 10; i++) {}", "for_cond.ts", true)
            .unwrap();
        while parser.next_file().is_some() {}
        let program = parser.finish();
        assert_eq!(program.handler.error_count(), 0);
    }

    #[test]
    fn generic_call_reads_one_type_argument() {
        let (expr, errors) = parse_expr_in("f<T>(x)");
        assert_eq!(errors, 0);
        match expr {
            Expr::Call(call) => assert_eq!(call.type_arguments.len(), 1),
            other => panic!("expected call expression, got {other:?}"),
        }
    }

    #[test]
    fn array_literal_elision_produces_null_slots() {
        let (expr, errors) = parse_expr_in("[1, , 3]");
        assert_eq!(errors, 0);
        match expr {
            Expr::Array(arr) => {
                assert_eq!(arr.elements.len(), 3);
                assert!(arr.elements[1].is_none());
            },
            other => panic!("expected array literal, got {other:?}"),
        }
    }
}
