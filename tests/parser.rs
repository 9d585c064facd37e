#[cfg(test)]
mod parser_tests {
    use minic::ast::{Expression, Program, Statement};
    use minic::ast_printer::AstPrinter;
    use minic::error::{CompilerError, Result};
    use minic::parser::{parse, Parser};
    use minic::scanner::tokenize;
    use minic::token::{Token, TokenKind};

    fn parse_source(source: &str) -> Result<Program> {
        let tokens = tokenize(source.as_bytes(), "test.c")?;
        parse(&tokens)
    }

    fn parse_error(source: &str) -> CompilerError {
        match parse_source(source) {
            Ok(program) => panic!("expected a syntax error, got {:?}", program),
            Err(e) => e,
        }
    }

    fn returned_values(program: &Program) -> Vec<Option<i64>> {
        program
            .statements
            .iter()
            .map(|stmt| match stmt {
                Statement::Return(expr) => expr.value(),
            })
            .collect()
    }

    // ───────────────────────── valid programs ─────────────────────────

    #[test]
    fn test_basic_return_main() {
        let program = parse_source("int main() { return 4; }").unwrap();

        assert_eq!(program.statements.len(), 1);

        let Statement::Return(Expression::Number(token)) = &program.statements[0];
        assert_eq!(token.kind, TokenKind::NUMBER);
        assert_eq!(token.content, "4");
        assert_eq!(returned_values(&program), vec![Some(4)]);
    }

    #[test]
    fn test_multiple_return_main() {
        let program = parse_source("int main() { return 15; return 20; return 10; }").unwrap();

        assert_eq!(returned_values(&program), vec![Some(15), Some(20), Some(10)]);
    }

    #[test]
    fn test_empty_body() {
        let program = parse_source("int main() {}").unwrap();

        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_oversized_literal_still_parses() {
        let program = parse_source("int main() { return 99999999999999999999; }").unwrap();

        assert_eq!(returned_values(&program), vec![None]);
    }

    #[test]
    fn test_printer() {
        let program = parse_source("int main() { return 4; return 5; }").unwrap();
        assert_eq!(AstPrinter::print(&program), "(main (return 4) (return 5))");

        let empty = parse_source("int main() { }").unwrap();
        assert_eq!(AstPrinter::print(&empty), "(main)");
    }

    #[test]
    fn test_json_output() {
        let program = parse_source("int main() { return 7; }").unwrap();
        let value = serde_json::to_value(&program).unwrap();

        assert_eq!(value["statements"][0]["Return"]["Number"]["content"], "7");
        assert_eq!(value["statements"][0]["Return"]["Number"]["kind"], "NUMBER");
    }

    // ───────────────────────── error selection ────────────────────────

    #[test]
    fn test_missing_expression_reports_expression_error() {
        // The expression error (index 6) beats the later closing-brace
        // error (index 5); the return matcher must not add a second record.
        let err = parse_error("int main ( ) { return ; }");

        assert_eq!(err.message(), "expected number, got ';'");
        assert_eq!(err.to_string(), "test.c:1: error: expected number, got ';'");
    }

    #[test]
    fn test_truncated_after_return() {
        let err = parse_error("int main ( ) { return");

        assert_eq!(err.message(), "expected number after 'return'");
        assert_eq!(err.location().map(|l| l.file_name.as_str()), Some("test.c"));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_error("int main() {\n  return 4\n}");

        assert_eq!(err.message(), "expected semicolon after '4'");
        assert_eq!(err.location().map(|l| l.line), Some(2));
    }

    #[test]
    fn test_missing_semicolon_in_later_statement() {
        let err = parse_error("int main ( ) { return 4 ; return 5 }");

        assert_eq!(err.message(), "expected semicolon after '5'");
    }

    #[test]
    fn test_tie_reports_later_record() {
        // Statement and closing brace both fail at the `4`.
        let err = parse_error("int main ( ) { 4 }");

        assert_eq!(err.message(), "expected closing brace, got '4'");
    }

    #[test]
    fn test_unclosed_body() {
        let err = parse_error("int main ( ) { return 4 ;");

        assert_eq!(err.message(), "expected closing brace after ';'");
    }

    #[test]
    fn test_bad_prologue() {
        let err = parse_error("void main() { return 4; }");

        assert_eq!(err.message(), "expected main function starting at 'void'");
        assert_eq!(err.location().map(|l| l.line), Some(1));
    }

    #[test]
    fn test_error_line_numbers() {
        let err = parse_error("int main() {\n  return\n;\n}");

        assert_eq!(err.to_string(), "test.c:3: error: expected number, got ';'");
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse_error("int main ( ) { return 4 ; } extra");

        assert!(matches!(err, CompilerError::Syntax { .. }));
        assert_eq!(err.message(), "unexpected token at 'extra'");
    }

    #[test]
    fn test_empty_input() {
        let err = parse(&[]).unwrap_err();

        assert_eq!(
            err.message(),
            "expected main function starting at beginning of source"
        );
        assert!(err.location().is_none());
        assert_eq!(
            err.to_string(),
            "error: expected main function starting at beginning of source"
        );
    }

    #[test]
    fn test_hand_built_tokens_keep_file_name() {
        let tokens = vec![
            Token::new(TokenKind::INT, "int", "a.c", 3),
            Token::new(TokenKind::MAIN, "main", "a.c", 3),
            Token::new(TokenKind::LEFT_PAREN, "(", "a.c", 3),
        ];

        let err = parse(&tokens).unwrap_err();

        assert_eq!(err.message(), "expected main function starting at 'int'");
        assert_eq!(err.to_string(), "a.c:3: error: expected main function starting at 'int'");
    }

    // ───────────────────────── repeatability ──────────────────────────

    #[test]
    fn test_parse_is_repeatable() {
        for source in ["int main() { return 4; return 2; }", "int main() { return ; }"] {
            let tokens = tokenize(source.as_bytes(), "test.c").unwrap();

            let first = parse(&tokens).map_err(|e| e.to_string());
            let second = parse(&tokens).map_err(|e| e.to_string());
            assert_eq!(first, second);

            // Reusing one parser must not carry errors between calls.
            let parser = Parser::new(&tokens);
            let third = parser.parse().map_err(|e| e.to_string());
            let fourth = parser.parse().map_err(|e| e.to_string());
            assert_eq!(third, first);
            assert_eq!(fourth, first);
        }
    }
}
