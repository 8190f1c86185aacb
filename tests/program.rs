use lazyscript::{ErrorKind, Expr, InterpreterConfig, Program, Request, Value};
use pretty_assertions::assert_eq;

const SCENARIO: &str = "let a = 1; const b = 2; let c = 3; let d = a + b; c + d;";

#[test]
fn runs_statements_in_order() {
    let mut program = Program::from_source(SCENARIO).unwrap();
    let last = program.execute().unwrap();

    assert_eq!(last, Value::Int(6));
    for (name, expected) in [("a", 1), ("b", 2), ("c", 3), ("d", 3)] {
        assert_eq!(program.get_variable(name).unwrap(), Value::Int(expected), "{}", name);
    }
}

#[test]
fn empty_program_yields_void() {
    let mut program = Program::from_source("  \n ").unwrap();
    assert_eq!(program.execute().unwrap(), Value::Void);
    assert_eq!(program.info(), "No symbols declared");
}

#[test]
fn first_failure_stops_the_run() {
    let mut program = Program::from_source("let a = 1; let b = a / 0; let c = 3;").unwrap();
    let err = program.execute().unwrap_err();

    assert_eq!(err.kind, ErrorKind::DivisionByZero);
    assert!(program.environment().contains("a"));
    assert!(!program.environment().contains("c"));
}

#[test]
fn eval_line_reruns_a_statement() {
    let mut program = Program::from_source(SCENARIO).unwrap();
    program.execute().unwrap();

    program.assign_variable("c", &Expr::int(10)).unwrap();
    assert_eq!(program.eval_line(5).unwrap(), Value::Int(13));

    let err = program.eval_line(1).unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyDeclared);

    for line in [0, 6] {
        let err = program.eval_line(line).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LineOutOfRange);
    }
}

#[test]
fn requests_dispatch_to_the_facade() {
    let mut program = Program::from_source(SCENARIO).unwrap();
    program.execute().unwrap();

    let value = program
        .execute_request(Request::AssignVar {
            name: "a".into(),
            value: Expr::int(2),
        })
        .unwrap();
    assert_eq!(value, Value::Int(2));
    assert_eq!(program.get_variable("d").unwrap(), Value::Int(4));

    let err = program
        .execute_request(Request::AssignVar {
            name: "b".into(),
            value: Expr::int(10),
        })
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConstReassignment);

    assert_eq!(program.execute_request(Request::EvalLine(5)).unwrap(), Value::Int(7));

    match program.execute_request(Request::PrintHelp).unwrap() {
        Value::String(text) => assert!(text.contains("evalLine N")),
        other => panic!("help should be text, got {}", other.describe()),
    }
}

#[test]
fn invoke_parses_each_argument() {
    let mut program = Program::from_source("function add(a, b) { return a + b; } let x = 4;").unwrap();
    program.execute().unwrap();

    assert_eq!(program.invoke_function("add", &["x", "x * 2"]).unwrap(), Value::Int(12));

    let request = Request::InvokeFunction {
        name: "add".into(),
        args: vec!["\"a\"".into(), "1".into()],
    };
    assert_eq!(program.execute_request(request).unwrap(), Value::String("a1".into()));

    let err = program.invoke_function("add", &["1"]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ArityMismatch);

    let err = program.invoke_function("add", &["1 +", "2"]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
}

#[test]
fn command_lines_become_requests() {
    assert_eq!(Request::parse_command("evalLine 3").unwrap(), Some(Request::EvalLine(3)));
    assert_eq!(
        Request::parse_command("assign a   b + 1").unwrap(),
        Some(Request::AssignVar {
            name: "a".into(),
            value: Expr::binary(lazyscript::BinaryOp::Add, Expr::var("b"), Expr::int(1)),
        })
    );
    assert_eq!(
        Request::parse_command("invoke add 1, f(2, 3)").unwrap(),
        Some(Request::InvokeFunction {
            name: "add".into(),
            args: vec!["1".into(), "f(2, 3)".into()],
        })
    );
    assert_eq!(
        Request::parse_command("invoke now").unwrap(),
        Some(Request::InvokeFunction {
            name: "now".into(),
            args: vec![],
        })
    );
    assert_eq!(Request::parse_command("info").unwrap(), Some(Request::PrintInfo));
    assert_eq!(Request::parse_command("help").unwrap(), Some(Request::PrintHelp));

    assert_eq!(Request::parse_command("let x = 1;").unwrap(), None);
    assert_eq!(Request::parse_command("").unwrap(), None);
}

#[test]
fn malformed_commands_are_errors() {
    for line in ["evalLine", "evalLine two", "assign a", "invoke"] {
        let err = Request::parse_command(line).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse, "{}", line);
    }

    let err = Request::parse_command("assign a 1 +").unwrap_err();
    assert_eq!(err.message, "Expected expression after '+'");
    assert_eq!(err.span.unwrap().column, 12);
}

#[test]
fn info_lists_symbols_in_declaration_order() {
    let mut program =
        Program::from_source("let zeta = 1; const name = \"lazy\"; function add(a, b) { return a + b; } let q = zeta / 1;")
            .unwrap();
    program.execute().unwrap();
    program.assign_variable("zeta", &Expr::int(0)).unwrap();
    program.eval_source("q = 1 / zeta;").unwrap_err();
    program.eval_source("let bad = 5;").unwrap();
    program.assign_variable("bad", &Expr::binary(lazyscript::BinaryOp::Div, Expr::int(1), Expr::var("zeta"))).unwrap_err();

    let expected = "\
NAME | KIND           | VALUE
zeta | let            | 0
name | const          | \"lazy\"
add  | function(a, b) | -
q    | let            | 0
bad  | let            | 5";
    assert_eq!(program.info(), expected);
}

#[test]
fn info_shows_failing_reads() {
    let mut program = Program::from_source("let z = 1; let q = 10 / z;").unwrap();
    program.execute().unwrap();
    program.assign_variable("z", &Expr::int(0)).unwrap();

    let info = program.info();
    assert!(info.lines().any(|l| l.starts_with("q") && l.ends_with("<error: Division by zero>")), "{}", info);
}

#[test]
fn symbols_serialize_to_json() {
    let mut program = Program::from_source("const b = 2; function id(x) { return x; }").unwrap();
    program.execute().unwrap();

    let json: serde_json::Value = serde_json::from_str(&program.symbols_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "b", "kind": "variable", "modifier": "const", "value": 2 },
            { "name": "id", "kind": "function", "params": ["x"] }
        ])
    );
}

#[test]
fn eval_source_appends_successful_statements() {
    let mut program = Program::from_source(SCENARIO).unwrap();
    program.execute().unwrap();

    assert_eq!(program.eval_source("let e = d * 2; e;").unwrap(), Value::Int(6));
    assert_eq!(program.statements().len(), 7);

    program.eval_source("let e = 1;").unwrap_err();
    assert_eq!(program.statements().len(), 7);

    program.eval_source("a = 5;").unwrap();
    assert_eq!(program.eval_line(7).unwrap(), Value::Int(14));
}

#[test]
fn statements_format_for_diagnostics() {
    let program = Program::from_source("let d = a + b;\nfunction add(a, b) { return a + b; }").unwrap();

    assert_eq!(program.format_statement(1).unwrap(), "let d = a + b");
    assert_eq!(program.format_statement(2).unwrap(), "function add(a, b) { ... }");
    assert_eq!(program.format_statement(3).unwrap_err().kind, ErrorKind::LineOutOfRange);
}

#[test]
fn configuration_from_json() {
    let config = InterpreterConfig::from_json_str(r#"{ "max_depth": 2 }"#).unwrap();
    assert_eq!(config.max_parse_depth, InterpreterConfig::default().max_parse_depth);

    let mut program =
        Program::from_source_with_config("let a = 1; let b = a; let c = b; let d = c;", config).unwrap();
    assert_eq!(program.execute().unwrap_err().kind, ErrorKind::StackExhausted);

    let err = InterpreterConfig::from_json_str("{ max_depth: }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Config);
}
