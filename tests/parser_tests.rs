use tamarin::expr::Expr;
use tamarin::parser::Parser;
use tamarin::scanner::Scanner;
use tamarin::stmt::Program;
use tamarin::stmt::Stmt;

// parse code and fail the test on any accumulated parser error
fn parse(code: &str) -> Program {
    let mut parser = Parser::new(Scanner::new(code));
    let program = parser.parse_program();

    assert!(
        parser.errors().is_empty(),
        "unexpected parser errors: {:?}",
        parser.errors()
    );

    program
}

fn parse_errors(code: &str) -> Vec<String> {
    let mut parser = Parser::new(Scanner::new(code));
    parser.parse_program();
    parser.errors().to_vec()
}

fn first_expression(program: &Program) -> &Expr {
    match &program.statements[0] {
        Stmt::Expression { expression } => expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn let_statements() {
    let program = parse("let x = 5; let y = true; let foobar = y;");

    assert_eq!(3, program.statements.len());

    let names: Vec<&str> = program
        .statements
        .iter()
        .map(|statement| match statement {
            Stmt::Let { name, .. } => name.as_str(),
            other => panic!("expected let statement, got {other:?}"),
        })
        .collect();

    assert_eq!(vec!["x", "y", "foobar"], names);
    assert_eq!("let x = 5;let y = true;let foobar = y;", program.to_string());
}

#[test]
fn return_statements() {
    let program = parse("return 5; return 10; return 993322;");

    assert_eq!(3, program.statements.len());
    for statement in &program.statements {
        assert!(matches!(statement, Stmt::Return { .. }));
    }
    assert_eq!(
        "return 5;return 10;return 993322;",
        program.to_string()
    );
}

#[test]
fn identifier_expression() {
    let program = parse("foobar;");
    assert_eq!(
        &Expr::Identifier {
            name: "foobar".to_string()
        },
        first_expression(&program)
    );
}

#[test]
fn integer_literal_expression() {
    let program = parse("5;");
    assert_eq!(
        &Expr::IntegerLiteral { value: 5 },
        first_expression(&program)
    );
}

#[test]
fn string_literal_expression() {
    let program = parse("\"hello world\";");
    assert_eq!(
        &Expr::StringLiteral {
            value: "hello world".to_string()
        },
        first_expression(&program)
    );
}

#[test]
fn boolean_literal_expressions() {
    let program = parse("true; false;");
    assert_eq!(
        &Expr::BooleanLiteral { value: true },
        first_expression(&program)
    );
    assert_eq!("truefalse", program.to_string());
}

#[test]
fn prefix_expressions() {
    for (code, expected) in [("!5;", "(!5)"), ("-15;", "(-15)"), ("!true;", "(!true)")] {
        assert_eq!(expected, parse(code).to_string());
    }
}

#[test]
fn operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true", "true"),
        ("false", "false"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (code, expected) in cases {
        assert_eq!(expected, parse(code).to_string(), "input: {code}");
    }
}

// parsing the canonical form again must reproduce the canonical form
#[test]
fn pretty_print_round_trip() {
    let cases = [
        "let x = 5;",
        "return (a + b);",
        "((-a) * b)",
        "(!(true == true))",
        "((a + add((b * c))) + d)",
        "[1, 2, (3 * 4)]",
        "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        "{a:1, b:(2 * 2)}",
        "add(a, b)",
    ];

    for code in cases {
        let canonical = parse(code).to_string();
        let reparsed = parse(&canonical).to_string();
        assert_eq!(canonical, reparsed, "input: {code}");
    }
}

#[test]
fn if_expression() {
    let program = parse("if (x < y) { x }");

    match first_expression(&program) {
        Expr::If {
            condition,
            consequence,
            alternative,
        } => {
            assert_eq!("(x < y)", condition.to_string());
            assert_eq!("x", consequence.to_string());
            assert!(alternative.is_none());
        }
        other => panic!("expected if expression, got {other:?}"),
    }

    assert_eq!("if(x < y) x", program.to_string());
}

#[test]
fn if_else_expression() {
    let program = parse("if (x < y) { x } else { y }");

    match first_expression(&program) {
        Expr::If { alternative, .. } => {
            assert_eq!("y", alternative.as_ref().unwrap().to_string());
        }
        other => panic!("expected if expression, got {other:?}"),
    }

    assert_eq!("if(x < y) x else y", program.to_string());
}

#[test]
fn function_literal() {
    let program = parse("fn(x, y) { x + y; }");

    match first_expression(&program) {
        Expr::FunctionLiteral { parameters, body } => {
            assert_eq!(&vec!["x".to_string(), "y".to_string()], parameters.as_ref());
            assert_eq!("(x + y)", body.to_string());
        }
        other => panic!("expected function literal, got {other:?}"),
    }

    assert_eq!("fn(x, y) (x + y)", program.to_string());
}

#[test]
fn function_parameter_lists() {
    let cases: [(&str, Vec<&str>); 3] = [
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];

    for (code, expected) in cases {
        let program = parse(code);
        match first_expression(&program) {
            Expr::FunctionLiteral { parameters, .. } => {
                let names: Vec<&str> =
                    parameters.iter().map(String::as_str).collect();
                assert_eq!(expected, names, "input: {code}");
            }
            other => panic!("expected function literal, got {other:?}"),
        }
    }
}

#[test]
fn call_expression() {
    let program = parse("add(1, 2 * 3, 4 + 5);");

    match first_expression(&program) {
        Expr::Call {
            function,
            arguments,
        } => {
            assert_eq!("add", function.to_string());
            assert_eq!(3, arguments.len());
            assert_eq!("(2 * 3)", arguments[1].to_string());
        }
        other => panic!("expected call expression, got {other:?}"),
    }
}

#[test]
fn array_literal() {
    let program = parse("[1, 2 * 2, 3 + 3]");
    assert_eq!("[1, (2 * 2), (3 + 3)]", program.to_string());

    let empty = parse("[]");
    match first_expression(&empty) {
        Expr::ArrayLiteral { elements } => assert!(elements.is_empty()),
        other => panic!("expected array literal, got {other:?}"),
    }
}

#[test]
fn index_expression() {
    let program = parse("myArray[1 + 1]");
    assert_eq!("(myArray[(1 + 1)])", program.to_string());
}

#[test]
fn hash_literal_with_string_keys() {
    let program = parse("{\"one\": 1, \"two\": 2, \"three\": 3}");

    match first_expression(&program) {
        Expr::HashLiteral { pairs } => {
            let keys: Vec<String> = pairs.iter().map(|(key, _)| key.to_string()).collect();
            assert_eq!(vec!["one", "two", "three"], keys);
        }
        other => panic!("expected hash literal, got {other:?}"),
    }
}

#[test]
fn hash_literal_with_expression_values() {
    let program = parse("{\"one\": 0 + 1, \"two\": 10 - 8, \"three\": 15 / 5}");
    assert_eq!(
        "{one:(0 + 1), two:(10 - 8), three:(15 / 5)}",
        program.to_string()
    );
}

#[test]
fn hash_literal_with_mixed_keys() {
    let program = parse("{true: 1, 4: \"four\", \"x\": 2}");
    match first_expression(&program) {
        Expr::HashLiteral { pairs } => assert_eq!(3, pairs.len()),
        other => panic!("expected hash literal, got {other:?}"),
    }
}

#[test]
fn empty_hash_literal() {
    let program = parse("{}");
    match first_expression(&program) {
        Expr::HashLiteral { pairs } => assert!(pairs.is_empty()),
        other => panic!("expected hash literal, got {other:?}"),
    }
}

#[test]
fn expect_peek_errors_accumulate() {
    let errors = parse_errors("let x 5; let = 10; let 838383;");

    assert!(errors.len() >= 3, "errors: {errors:?}");
    assert!(errors.contains(&"expected next token to be =, got INT instead".to_string()));
    assert!(errors.contains(&"expected next token to be IDENT, got = instead".to_string()));
    assert!(errors.contains(&"expected next token to be IDENT, got INT instead".to_string()));
}

#[test]
fn missing_prefix_handler_is_reported() {
    let errors = parse_errors("+5;");
    assert!(
        errors.contains(&"no prefix parse function for token '+' found".to_string()),
        "errors: {errors:?}"
    );
}

#[test]
fn illegal_token_surfaces_as_parser_error() {
    let errors = parse_errors("let a = @;");
    assert!(
        errors.contains(&"no prefix parse function for token 'ILLEGAL' found".to_string()),
        "errors: {errors:?}"
    );
}

#[test]
fn unparseable_integer_is_reported() {
    let errors = parse_errors("92233720368547758080;");
    assert!(
        errors.contains(&"could not parse \"92233720368547758080\" as integer".to_string()),
        "errors: {errors:?}"
    );
}

#[test]
fn parsing_continues_after_errors() {
    let mut parser = Parser::new(Scanner::new("let x 5; 42;"));
    let program = parser.parse_program();

    assert!(!parser.errors().is_empty());
    // the statements that did parse are still present
    assert!(program
        .statements
        .iter()
        .any(|statement| statement.to_string() == "42"));
}
