use kripke_rs::error::{Error, FormatError, SyntaxError};
use kripke_rs::eval::{EvalConfig, Evaluator, UnboundPolicy};
use kripke_rs::format::parse_description;
use kripke_rs::parser::parse_formula;
use kripke_rs::pipeline::{evaluate_source, evaluate_source_with};
use ndarray::array;
use test_log::test;

const SCENARIO: &str = "
worlds {
    w0: P=1, Q=0, R=1   // world 0 values
    w1: P=0, Q=1, R=1   // world 1 values
    // w3: P=1, Q=1, R=0
    w2: P=1, Q=1, R=0
}

// frame
access {
    w0: w0, w1, w2
    w1: w1, w2
    w2: w2
}
expr: #(P && @Q) -> !(R || S)
";

fn assume_false() -> EvalConfig {
    EvalConfig {
        unbound: UnboundPolicy::AssumeFalse,
    }
}

#[test]
fn scenario_holds_everywhere() {
    let evaluation = evaluate_source_with(SCENARIO, &assume_false()).unwrap();
    assert_eq!(evaluation.result, array![1u8, 1, 1]);
    assert_eq!(evaluation.model.world_names(), ["w0", "w1", "w2"]);
    assert!(evaluation.is_valid());
}

#[test]
fn scenario_is_deterministic() {
    let desc = parse_description(SCENARIO).unwrap();
    let formula = parse_formula(&desc.expr).unwrap();
    let evaluator = Evaluator::with_config(&desc.model, assume_false());
    let first = evaluator.evaluate(&formula).unwrap();
    let second = evaluator.evaluate(&formula).unwrap();
    assert_eq!(first, second);
}

#[test]
fn scenario_strict_mode_rejects_unbound_variable() {
    match evaluate_source(SCENARIO) {
        Err(Error::UnboundVariable(e)) => assert_eq!(e.name, "S"),
        other => panic!("expected unbound variable error, got {:?}", other),
    }
}

#[test]
fn scenario_subformulas() {
    let desc = parse_description(SCENARIO).unwrap();
    let formula = parse_formula(&desc.expr).unwrap();
    let (_, sheet) = Evaluator::with_config(&desc.model, assume_false())
        .evaluate_traced(&formula)
        .unwrap();
    let column = |label: &str| {
        let j = sheet.labels().iter().position(|l| l == label).unwrap();
        sheet.to_matrix().column(j).to_vec()
    };
    // @Q, P && @Q, #(P && @Q), then S assumed false, R || S, !(R || S).
    assert_eq!(column("diamond(#1)"), vec![1, 1, 1]);
    assert_eq!(column("and(#0, #3)"), vec![1, 0, 1]);
    assert_eq!(column("square(#4)"), vec![0, 0, 1]);
    assert_eq!(column("S"), vec![0, 0, 0]);
    assert_eq!(column("not(#7)"), vec![0, 0, 1]);
    assert_eq!(column("implies(#5, #8)"), vec![1, 1, 1]);
}

#[test]
fn missing_access_block() {
    let text = "worlds {\n    w0: P=1\n}\nexpr: P\n";
    assert_eq!(
        evaluate_source(text).unwrap_err(),
        Error::Format(FormatError::MissingSection { section: "access" })
    );
}

#[test]
fn dangling_operator() {
    let text = "worlds {\n    w0: P=1\n}\naccess {\n}\nexpr: P &&\n";
    let err = evaluate_source(text).unwrap_err();
    assert!(matches!(err, Error::Syntax(SyntaxError::MissingOperand { .. })));
    assert_eq!(
        err.to_string(),
        "syntax error: missing operand for `&&`: found end of input"
    );
}

#[test]
fn lex_error_in_expression() {
    let text = "worlds {\n    w0: P=1\n}\naccess {\n}\nexpr: P & Q\n";
    assert!(matches!(evaluate_source(text).unwrap_err(), Error::Lex(_)));
}
