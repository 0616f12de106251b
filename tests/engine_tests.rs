mod common;

use common::{arith, tokens, Arith, Node};
use precept::{ParseError, Parser};

fn parse(input: &str) -> Result<Node, ParseError> {
    arith().parse(tokens(input))
}

fn printed(input: &str) -> String {
    parse(input).expect("formula should parse").print()
}

#[test]
fn single_atom() {
    assert_eq!(printed("x"), "x");
}

#[test]
fn parse_builds_the_expected_tree() {
    assert_eq!(
        parse("a + b * c").unwrap(),
        Node::binary(
            "+",
            Node::atom("a"),
            Node::binary("*", Node::atom("b"), Node::atom("c")),
        )
    );
    assert_eq!(
        parse("- a !").unwrap(),
        Node::unary("!", Node::unary("-", Node::atom("a")))
    );
}

#[test]
fn tighter_operators_nest_deeper() {
    assert_eq!(printed("a + b * c"), "( a + ( b * c ) )");
    assert_eq!(printed("a * b + c"), "( ( a * b ) + c )");
}

#[test]
fn left_associative_chain_groups_leftwards() {
    assert_eq!(printed("a - b + c"), "( ( a - b ) + c )");
    assert_eq!(printed("a * b / c * d"), "( ( ( a * b ) / c ) * d )");
}

#[test]
fn right_associative_chain_groups_rightwards() {
    assert_eq!(printed("a ^ b ^ c"), "( a ^ ( b ^ c ) )");
}

#[test]
fn grouping_is_transparent_to_surrounding_precedence() {
    assert_eq!(printed("( a + b ) * c"), "( ( a + b ) * c )");
    assert_eq!(printed("a * ( b + c )"), "( a * ( b + c ) )");
    assert_eq!(printed("( ( a ) )"), "a");
}

#[test]
fn unary_minus_applies_to_the_next_term() {
    assert_eq!(printed("- a + b"), "( ( - a ) + b )");
    assert_eq!(printed("a ^ - b"), "( a ^ ( - b ) )");
    assert_eq!(printed("a * - b"), "( a * ( - b ) )");
}

#[test]
fn postfix_factorial_binds_its_left_operand() {
    assert_eq!(printed("a ! + b"), "( ( a ! ) + b )");
    assert_eq!(printed("a + b !"), "( a + ( b ! ) )");
}

#[test]
fn indexing_combines_with_a_deferred_reduction() {
    // `[ ]` binds tighter than `+`, so the index must attach to `a` alone.
    assert_eq!(printed("a [ i ] + b"), "( ( a [ i ] ) + b )");
    assert_eq!(printed("a + b [ i ]"), "( a + ( b [ i ] ) )");
    assert_eq!(printed("a [ i + j ]"), "( a [ ( i + j ) ] )");
    assert_eq!(printed("a [ i ] [ j ]"), "( ( a [ i ] ) [ j ] )");
    assert_eq!(printed("( a + b ) [ i ]"), "( ( a + b ) [ i ] )");
}

#[test]
fn equal_precedence_without_associativity_is_a_tie() {
    let err = parse("a = b = c").unwrap_err();
    match err {
        ParseError::NonAssociativeTie { position, operator } => {
            assert_eq!(position, 3);
            assert_eq!(operator, "=");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_input_is_rejected() {
    assert!(matches!(parse(""), Err(ParseError::EmptyInput)));
}

#[test]
fn dangling_operator_is_a_missing_operand() {
    assert!(matches!(
        parse("a +"),
        Err(ParseError::MissingOperand { position: 2 })
    ));
}

#[test]
fn unmatched_opener_is_an_unclosed_bracket() {
    assert!(matches!(
        parse("( a + b"),
        Err(ParseError::UnclosedBracket { position: 4 })
    ));
    assert!(matches!(
        parse("a [ i + j"),
        Err(ParseError::UnclosedBracket { position: 5 })
    ));
}

#[test]
fn adjacent_terms_need_a_juxtaposition_rule() {
    let err = parse("a b").unwrap_err();
    match err {
        ParseError::MissingOperator { position, found } => {
            assert_eq!(position, 1);
            assert!(found.contains('b'), "found should render the token: {found}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn implicit_product_joins_adjacent_terms() {
    let parser = Parser::new(Arith { implicit_product: true });
    let tree = parser.parse(tokens("a b + c")).unwrap();
    assert_eq!(tree.print(), "( ( a * b ) + c )");

    // The implicit operator sits at product precedence.
    let tree = parser.parse(tokens("a b ^ c")).unwrap();
    assert_eq!(tree.print(), "( a * ( b ^ c ) )");
}

#[test]
fn parse_is_reusable_and_reentrant_per_call() {
    let parser = arith();
    assert!(parser.parse(tokens("a + ")).is_err());
    // A failed parse leaves no state behind for the next call.
    assert_eq!(parser.parse(tokens("a + b")).unwrap().print(), "( a + b )");
}

#[test]
fn errors_carry_stable_diagnostic_codes() {
    use miette::Diagnostic;

    let err = parse("a = b = c").unwrap_err();
    assert_eq!(
        err.code().expect("tie should have a code").to_string(),
        "precept::parse::non_associative_tie"
    );
    assert!(err.help().is_some());
}

#[test]
fn round_trip_through_print_is_idempotent() {
    let formulas = [
        "a + b * c",
        "a ^ b ^ c",
        "- a * ( b + c )",
        "a [ i + j ] ! + b",
        "a / b / c - d",
    ];
    for formula in formulas {
        let first = parse(formula).expect("formula should parse");
        let second = parse(&first.print()).expect("printed form should parse");
        assert_eq!(first, second, "round trip changed `{formula}`");
    }
}
