use dmncheck::expression::{
    subsumes, tolerant_equals, typecheck, typecheck_empty, Context, Expression, ExpressionType,
};
use dmncheck::syntax::parse;
use dmncheck::util::sequence;
use dmncheck::validation::{
    build_validators, load_enums, validate_table, DecisionTable, NoEnums, Severity,
    ValidatorConfig,
};
use std::io::Write;
use std::sync::Arc;
use std::thread;

fn cell(text: &str) -> Expression {
    parse(text).unwrap()
}

fn subsumes_text(outer: &str, inner: &str) -> Option<bool> {
    cell(outer).subsumes(&cell(inner))
}

#[test]
fn test_typecheck_cells() {
    let empty = Context::new();

    assert_eq!(typecheck(&empty, &cell("42")), Ok(ExpressionType::Integer));
    assert_eq!(typecheck(&empty, &cell("")), Ok(ExpressionType::Top));
    assert_eq!(typecheck(&empty, &cell("[1..9]")), Ok(ExpressionType::Integer));
    assert_eq!(typecheck(&empty, &cell("\"a\", \"b\"")), Ok(ExpressionType::String));

    let err = typecheck_empty(&cell("[1..true]")).unwrap_err();
    assert_eq!(err.to_string(), "Types of lower and upper bound do not match.");

    let err = typecheck(&empty, &cell("x")).unwrap_err();
    assert_eq!(err.to_string(), "Variable 'x' has no type.");

    let context = Context::single("x", ExpressionType::Integer);
    assert_eq!(typecheck(&context, &cell("x")), Ok(ExpressionType::Integer));
    assert_eq!(typecheck(&context, &cell("< x")), Ok(ExpressionType::Integer));
}

#[test]
fn test_parse_then_typecheck_short_circuits() {
    let context = Context::new();

    let result = parse("[1..")
        .map_err(|err| err.to_string())
        .and_then(|expr| typecheck(&context, &expr).map_err(|err| err.to_string()));
    assert!(result.unwrap_err().starts_with("Could not parse '[1..'"));

    let result = parse("\"Steak\"")
        .map_err(|err| err.to_string())
        .and_then(|expr| typecheck(&context, &expr).map_err(|err| err.to_string()));
    assert_eq!(result, Ok(ExpressionType::String));
}

#[test]
fn test_subsumption_laws() {
    for text in ["", "42", "\"a\"", "[1..5]", "<5", ">= 2"] {
        assert_eq!(subsumes_text("", text), Some(true), "empty subsumes {}", text);
        assert_eq!(subsumes_text(text, text), Some(true), "{} subsumes itself", text);
    }

    for text in ["42", "\"a\"", "[1..5]", "<5"] {
        assert_eq!(subsumes_text(text, ""), Some(false), "{} subsumes empty", text);
    }

    assert_eq!(subsumes_text("[1..9]", "[4..5]"), Some(true));
    assert_eq!(subsumes_text("[4..5]", "[1..9]"), Some(false));
    assert_eq!(subsumes_text("[1..5]", "(1..5)"), Some(true));
    assert_eq!(subsumes_text("(1..5)", "[1..5]"), Some(false));
    assert_eq!(subsumes_text("<=5", "<5"), Some(true));
    assert_eq!(subsumes_text("<5", "<=5"), Some(false));
    assert_eq!(subsumes_text(">1", ">5"), Some(true));
    assert_eq!(subsumes_text("true", "true"), Some(true));
    assert_eq!(subsumes_text("true", "false"), Some(false));
    assert_eq!(subsumes_text("42", "\"a\""), None);
}

#[test]
fn test_subsumption_with_tolerance() {
    let outer = cell("1.0");
    let inner = cell("1.05");

    assert_eq!(outer.subsumes(&inner), Some(false));
    assert_eq!(subsumes(&outer, &inner, tolerant_equals(0.1)), Some(true));
}

#[test]
fn test_print_then_parse_is_identity() {
    let cells = [
        "",
        "42",
        "-3",
        "4.2",
        "100000000000000000000.0",
        "0.0000001",
        "-0.0000001",
        "[0.0000001..1.0]",
        "true",
        "cellInput",
        "\"Steak\"",
        r#""say \"hi\"""#,
        "[1..5]",
        "(1..5]",
        "[1.5..cap)",
        "<5",
        ">= 2.5",
        "not(\"a\", \"b\")",
        "1 + 2 * 3",
        "(1 - 2) - 3",
        "2 ** 3 ** 2",
        "a and b or c",
        "\"a\", \"b\", \"c\"",
        "date and time(\"2015-11-30T12:00:00\")",
    ];

    for text in cells {
        let expr = cell(text);
        let printed = expr.to_string();
        assert_eq!(parse(&printed), Ok(expr), "{} printed as {}", text, printed);
    }
}

#[test]
fn test_sequence_over_cells() {
    let parsed = sequence(["<5", "[1..2]", "\"a\""].iter().map(|text| parse(text)));
    assert_eq!(parsed.unwrap().len(), 3);

    let failed = sequence(["<5", "[1..", "(("].iter().map(|text| parse(text)));
    assert_eq!(failed.unwrap_err().text, "[1..");
}

const TABLE: &str = r#"{
    "name": "Dish",
    "inputs": [
        { "label": "Season", "variable": "season", "type_ref": "Season" },
        { "label": "Guests", "type_ref": "integer" }
    ],
    "outputs": [
        { "name": "dish", "type_ref": "string" }
    ],
    "rules": [
        { "id": "r1", "input_entries": ["\"Fall\"", "<= 8"], "output_entries": ["\"Spareribs\""] },
        { "id": "r2", "input_entries": ["\"Winter\"", "<= 8"], "output_entries": ["\"Roastbeef\""] },
        { "id": "r3", "input_entries": ["\"Spring\"", "[5..8]"], "output_entries": ["42"] },
        { "id": "r4", "input_entries": ["\"Fall\"", "[1..4]"], "output_entries": ["\"Stew\""] },
        { "id": "r5", "input_entries": ["\"Monsoon\"", "\"many\""], "output_entries": [""] }
    ]
}"#;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_check_table_file() {
    let table_file = write_temp(TABLE);
    let enum_file = write_temp(r#"{ "Season": ["Fall", "Winter", "Spring", "Summer"] }"#);

    let table = DecisionTable::from_path(table_file.path()).unwrap();
    let enums = load_enums(enum_file.path()).unwrap();
    let validators = build_validators(&ValidatorConfig::default()).unwrap();

    let findings = validate_table(&table, &validators, &enums);
    let summary: Vec<_> = findings
        .iter()
        .map(|f| (f.severity, f.element.id.as_str(), f.message.as_str()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                Severity::Error,
                "r5",
                "Value \"Monsoon\" does not belong to Season"
            ),
            (
                Severity::Error,
                "r5",
                "Type of input entry does not match type of input expression"
            ),
            (
                Severity::Error,
                "r3",
                "Type of output entry does not match type of output expression"
            ),
            (Severity::Warning, "r4", "Rule is shadowed by rule r1"),
        ]
    );
}

#[test]
fn test_check_table_without_enumerations() {
    let table = DecisionTable::from_json(TABLE).unwrap();
    let config = ValidatorConfig {
        validators: vec!["input-entry-type".to_string()],
        ..Default::default()
    };
    let validators = build_validators(&config).unwrap();

    let findings = validate_table(&table, &validators, &NoEnums);
    let unknown = findings
        .iter()
        .filter(|f| f.message == "Enumeration Season is not known.")
        .count();
    assert_eq!(unknown, 5);
}

#[test]
fn test_missing_table_file() {
    let err = DecisionTable::from_path("/nonexistent/table.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_concurrent_checks() {
    let table = Arc::new(DecisionTable::from_json(TABLE).unwrap());
    let validators = Arc::new(build_validators(&ValidatorConfig::default()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            let validators = Arc::clone(&validators);
            thread::spawn(move || {
                let expr = parse("[1..9], >= 20").unwrap();
                let ty = typecheck(&Context::new(), &expr).unwrap();
                let findings = validate_table(&table, &validators, &NoEnums);
                (ty, findings.len())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(|result| *result == results[0]));
    assert_eq!(results[0].0, ExpressionType::Integer);
}
