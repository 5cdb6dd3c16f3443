//! Type-node parsing (`void`/`this`/boolean/string-literal/named types,
//! array suffixes, and the `| null` nullable marker).

use sts_lex::Token;
use sts_util::diagnostic::DiagnosticCode;
use sts_util::{Span, Symbol};

use crate::ast::{TypeNode, TypeNodeKind};
use crate::FileParser;

impl<'a> FileParser<'a> {
    /// Parses one `TypeNode`. `accept_parenthesized` gates whether a
    /// leading `(` is read as a parenthesized type; callers pass `false`
    /// when already inside a parenthesized or type-argument position, so
    /// only the outermost recursion may open with `(`.
    pub(crate) fn parse_type(&mut self, accept_parenthesized: bool) -> TypeNode {
        if accept_parenthesized && self.at(&Token::LParen) {
            self.bump();
            let start = self.span();
            let inner = self.parse_type(false);
            self.expect(&Token::RParen, DiagnosticCode::TOKEN_EXPECTED);
            return self.finish_type_suffixes(inner, start);
        }

        let start_tok = self.bump();
        let start = self.span();
        let (kind, allow_type_args) = match start_tok {
            Token::Void => (TypeNodeKind::Void, false),
            Token::This => (TypeNodeKind::This, false),
            Token::True | Token::False => (TypeNodeKind::Bool, false),
            Token::StringLit(_) => (TypeNodeKind::StringLiteral, false),
            Token::Ident(name) => (TypeNodeKind::Named(name), true),
            other => {
                self.error(
                    DiagnosticCode::TYPE_EXPECTED,
                    start,
                    format!("type expected but got '{}'", other.describe()),
                );
                (TypeNodeKind::Named(Symbol::intern("")), false)
            },
        };

        let mut type_arguments = Vec::new();
        if allow_type_args && self.at(&Token::Lt) {
            self.bump();
            if !self.at(&Token::Gt) {
                loop {
                    type_arguments.push(self.parse_type(false));
                    if !self.eat(&Token::Comma) {
                        break;
                    }
                }
            }
            self.expect(&Token::Gt, DiagnosticCode::TOKEN_EXPECTED);
        }

        let node = TypeNode {
            kind,
            type_arguments,
            array_depth: 0,
            nullable: false,
            span: self.span_from(start),
        };
        self.finish_type_suffixes(node, start)
    }

    /// Applies trailing `[]` array wrapping and a trailing `| null`
    /// nullable suffix to an already-parsed base type node.
    fn finish_type_suffixes(&mut self, mut node: TypeNode, start: Span) -> TypeNode {
        let mut array_depth = 0u32;
        while self.at(&Token::LBracket) {
            self.bump();
            self.expect(&Token::RBracket, DiagnosticCode::TOKEN_EXPECTED);
            array_depth += 1;
        }
        node.array_depth = array_depth;

        if self.at(&Token::Pipe) {
            self.lexer.mark();
            self.bump();
            if self.at(&Token::Null) {
                self.bump();
                node.nullable = true;
            } else {
                self.lexer.reset();
            }
        }

        node.span = self.span_from(start);
        node
    }
}

#[cfg(test)]
mod tests {
    use crate::Parser;

    #[test]
    fn named_type_with_array_and_nullable() {
        let mut parser = Parser::new();
        parser.parse_file("const x: i32[] | null = null;", "types.ts", true).unwrap();
        while parser.next_file().is_some() {}
        let program = parser.finish();
        assert_eq!(program.handler.error_count(), 0);
        let crate::ast::Stmt::Variable(stmt) = &program.sources[0].statements[0].stmt else {
            panic!("expected variable statement");
        };
        let ty = stmt.declarators[0].ty.as_ref().unwrap();
        assert_eq!(ty.array_depth, 1);
        assert!(ty.nullable);
    }

    #[test]
    fn generic_named_type() {
        let mut parser = Parser::new();
        parser.parse_file("const x: Array<i32> = y;", "types2.ts", true).unwrap();
        while parser.next_file().is_some() {}
        let program = parser.finish();
        assert_eq!(program.handler.error_count(), 0);
        let crate::ast::Stmt::Variable(stmt) = &program.sources[0].statements[0].stmt else {
            panic!("expected variable statement");
        };
        let ty = stmt.declarators[0].ty.as_ref().unwrap();
        assert_eq!(ty.type_arguments.len(), 1);
    }
}
