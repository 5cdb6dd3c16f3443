//! Edge-case coverage that doesn't belong to any single grammar module:
//! ASI quirks, error recovery, and cross-cutting scenarios from the
//! operator-precedence and modifier-ordering rules.

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Stmt};
    use crate::Parser;
    use sts_util::diagnostic::Handler;

    struct Parsed {
        statements: Vec<crate::ast::TopLevelStmt>,
        handler: Handler,
    }

    fn parse_source(source: &str) -> Parsed {
        let mut parser = Parser::new();
        parser.parse_file(source, "edge.ts", true).unwrap();
        while parser.next_file().is_some() {}
        let program = parser.finish();
        Parsed { statements: program.sources.into_iter().next().unwrap().statements, handler: program.handler }
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn empty_source_yields_no_statements() {
        let p = parse_source("");
        assert!(p.statements.is_empty());
        assert!(!p.handler.has_errors());
    }

    #[test]
    fn whitespace_and_comments_only_yields_no_statements() {
        let p = parse_source("   \n\t  // a comment\n  /* block */\n");
        assert!(p.statements.is_empty());
        assert!(!p.handler.has_errors());
    }

    #[test]
    fn deeply_nested_blocks_parse_without_errors() {
        let p = parse_source("{ { { { let x = 1; } } } }");
        assert!(!p.handler.has_errors());
        assert_eq!(p.statements.len(), 1);
    }

    #[test]
    fn asi_permits_a_missing_semicolon_before_a_new_statement_on_the_next_line() {
        let p = parse_source("let x = 1\nlet y = 2;");
        assert!(!p.handler.has_errors());
        assert_eq!(p.statements.len(), 2);
    }

    #[test]
    fn return_with_no_expression_on_the_same_line_as_the_brace_is_empty() {
        let p = parse_source("function f() { return }");
        assert!(!p.handler.has_errors());
        let Stmt::Function(f) = &p.statements[0].stmt else { panic!("expected function") };
        let body = f.body.as_ref().unwrap();
        let Stmt::Return(r) = &body.statements[0] else { panic!("expected return") };
        assert!(r.value.is_none());
    }

    #[test]
    fn a_break_label_on_the_next_line_is_not_consumed() {
        let p = parse_source("while (true) { break\nlabel: x; }");
        assert!(!p.handler.has_errors());
    }

    #[test]
    fn slash_after_a_value_is_division_not_a_regexp() {
        let p = parse_source("const x = 10 / 2;");
        assert!(!p.handler.has_errors());
        let Stmt::Variable(v) = &p.statements[0].stmt else { panic!("expected variable") };
        assert!(matches!(v.declarators[0].init, Some(Expr::Binary(_))));
    }

    #[test]
    fn slash_in_prefix_position_is_a_regexp_literal() {
        let p = parse_source("const x = /ab+c/;");
        assert!(!p.handler.has_errors());
        let Stmt::Variable(v) = &p.statements[0].stmt else { panic!("expected variable") };
        assert!(matches!(v.declarators[0].init, Some(Expr::Regexp(_))));
    }

    #[test]
    fn exponentiation_is_right_associative() {
        let p = parse_source("const x = 2 ** 3 ** 2;");
        assert!(!p.handler.has_errors());
        let Stmt::Variable(v) = &p.statements[0].stmt else { panic!("expected variable") };
        let Some(Expr::Binary(top)) = &v.declarators[0].init else { panic!("expected binary expr") };
        assert!(matches!(*top.right, Expr::Binary(_)));
    }

    #[test]
    fn conditional_expression_is_right_associative() {
        let p = parse_source("const x = a ? b : c ? d : e;");
        assert!(!p.handler.has_errors());
        let Stmt::Variable(v) = &p.statements[0].stmt else { panic!("expected variable") };
        let Some(Expr::Select(top)) = &v.declarators[0].init else { panic!("expected select expr") };
        assert!(matches!(*top.else_branch, Expr::Select(_)));
    }

    #[test]
    fn new_with_explicit_type_arguments_and_no_call_parens_attaches_them_to_the_wrapping_call() {
        let p = parse_source("const x = new Box<i32>(1);");
        assert!(!p.handler.has_errors());
        let Stmt::Variable(v) = &p.statements[0].stmt else { panic!("expected variable") };
        let Some(Expr::Call(call)) = &v.declarators[0].init else { panic!("expected call expr") };
        assert_eq!(call.type_arguments.len(), 1);
        assert!(matches!(*call.callee, Expr::New(_)));
    }

    #[test]
    fn array_literal_elision_produces_none_slots_for_adjacent_commas() {
        let p = parse_source("const x = [1, , 3];");
        assert!(!p.handler.has_errors());
        let Stmt::Variable(v) = &p.statements[0].stmt else { panic!("expected variable") };
        let Some(Expr::Array(arr)) = &v.declarators[0].init else { panic!("expected array literal") };
        assert_eq!(arr.elements.len(), 3);
        assert!(arr.elements[1].is_none());
    }

    #[test]
    fn nullable_array_type_binds_null_to_the_outermost_array_level() {
        let p = parse_source("const x: i32[] | null = null;");
        assert!(!p.handler.has_errors());
        let Stmt::Variable(v) = &p.statements[0].stmt else { panic!("expected variable") };
        let ty = v.declarators[0].ty.as_ref().unwrap();
        assert_eq!(ty.array_depth, 1);
        assert!(ty.nullable);
    }

    // ==================== ERROR CASES ====================

    #[test]
    fn missing_semicolon_between_statements_on_the_same_line_is_an_error() {
        let p = parse_source("let x = 1 let y = 2;");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn missing_closing_brace_is_reported() {
        let p = parse_source("function f() { let x = 1;");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn invalid_character_in_a_block_is_reported() {
        let p = parse_source("function f() { #; }");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn incomplete_if_without_a_body_is_reported() {
        let p = parse_source("function f() { if (true) }");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn unterminated_string_literal_is_reported() {
        let p = parse_source("const x = \"unterminated;");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn empty_type_parameter_list_is_reported() {
        let p = parse_source("function f<>(): void {}");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn get_set_modifiers_on_a_field_are_reported() {
        let p = parse_source("class C { abstract x: i32; }");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn class_initializer_in_an_ambient_context_is_reported() {
        let p = parse_source("declare class C { x: i32 = 1; }");
        assert!(p.handler.has_errors());
    }

    #[test]
    fn trailing_comma_in_an_enum_body_is_accepted() {
        let p = parse_source("enum Color { Red, Green, Blue, }");
        assert!(!p.handler.has_errors());
        let Stmt::Enum(decl) = &p.statements[0].stmt else { panic!("expected enum") };
        assert_eq!(decl.members.len(), 3);
    }

    #[test]
    fn multiple_independent_errors_are_all_recorded() {
        let p = parse_source("function f( { if (true) { let x = #; } }");
        assert!(p.handler.error_count() >= 2);
    }
}
