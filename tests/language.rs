use notation::{
    ast::{ExpressionTree, Notation, Operand, Operator},
    convert_expression,
    draw_expression,
    error::{ErrorKind, ParseError, RuntimeError},
    evaluate_expression,
    interpreter::{
        converter::core::{convert, convert_traced},
        evaluator::{
            arithmetic,
            bitwise,
            core::{Bindings, EvalMode, evaluate, evaluate_traced},
        },
        lexer::{OperatorSet, to_text, tokenize},
        parser::core::{MAX_TREE_DEPTH, build},
        render::{MAX_RENDER_LEVELS, render},
        trace::{TraceAction, TraceEvent},
        value::core::Number,
    },
};

fn assert_converts(source: &str, from: Notation, to: Notation, expected: &str) {
    match convert_expression(source, from, to, OperatorSet::Arithmetic) {
        Ok(text) => assert_eq!(text, expected, "converting {source:?} from {from} to {to}"),
        Err(e) => panic!("Converting {source:?} failed: {e}"),
    }
}

fn assert_convert_error(source: &str, from: Notation, to: Notation, kind: ErrorKind) {
    match convert_expression(source, from, to, OperatorSet::Arithmetic) {
        Ok(text) => panic!("Converting {source:?} succeeded with {text:?} but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "converting {source:?}: {e}"),
    }
}

fn bindings(pairs: &[(char, i64)]) -> Bindings {
    Bindings::from_pairs(pairs.iter().copied()).expect("valid bindings")
}

fn assert_evaluates(source: &str, notation: Notation, pairs: &[(char, i64)], mode: EvalMode, expected: Number) {
    match evaluate_expression(source, notation, &bindings(pairs), mode) {
        Ok(value) => assert_eq!(value, expected, "evaluating {source:?}"),
        Err(e) => panic!("Evaluating {source:?} failed: {e}"),
    }
}

fn assert_eval_error(source: &str, notation: Notation, pairs: &[(char, i64)], mode: EvalMode, kind: ErrorKind) {
    match evaluate_expression(source, notation, &bindings(pairs), mode) {
        Ok(value) => panic!("Evaluating {source:?} gave {value} but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "evaluating {source:?}: {e}"),
    }
}

fn leaf(name: char) -> Box<ExpressionTree> {
    Box::new(ExpressionTree::Leaf(Operand::Variable(name)))
}

fn number(text: &str) -> Box<ExpressionTree> {
    Box::new(ExpressionTree::Leaf(Operand::Literal(text.to_string())))
}

#[test]
fn precedence_drives_infix_to_postfix() {
    assert_converts("a+b*c", Notation::Infix, Notation::Postfix, "abc*+");
    assert_evaluates("a+b*c",
                     Notation::Infix,
                     &[('a', 2), ('b', 3), ('c', 4)],
                     EvalMode::Integer,
                     Number::Integer(14));
}

#[test]
fn complement_binds_tighter_than_and() {
    let converted = convert_expression("~a & (b << c)",
                                       Notation::Infix,
                                       Notation::Postfix,
                                       OperatorSet::Bitwise).unwrap();
    assert_eq!(converted, "a~bc<<&");

    // ~6 is ...11111001, which has no bit in common with 4
    assert_evaluates("~a & (b << c)",
                     Notation::Infix,
                     &[('a', 6), ('b', 1), ('c', 2)],
                     EvalMode::Bitwise,
                     Number::Integer(0));
    assert_evaluates("~a & (b << c)",
                     Notation::Infix,
                     &[('a', 3), ('b', 1), ('c', 2)],
                     EvalMode::Bitwise,
                     Number::Integer(4));
}

#[test]
fn postfix_literals_build_and_evaluate() {
    let tokens = tokenize("3 4 + 5 *", OperatorSet::Arithmetic).unwrap();
    let tree = build(&tokens, Notation::Postfix).unwrap();

    let sum = ExpressionTree::Binary { operator: Operator::Add,
                                       left:     number("3"),
                                       right:    number("4"), };
    let expected = ExpressionTree::Binary { operator: Operator::Mul,
                                            left:     Box::new(sum),
                                            right:    number("5"), };
    assert_eq!(tree, expected);

    assert_evaluates("3 4 + 5 *", Notation::Postfix, &[], EvalMode::Integer, Number::Integer(35));
}

#[test]
fn unbalanced_parentheses_fail() {
    assert_convert_error("(a+b", Notation::Infix, Notation::Postfix, ErrorKind::MismatchedParentheses);
    assert_convert_error("(a+b", Notation::Infix, Notation::Prefix, ErrorKind::MismatchedParentheses);
    assert_convert_error("a+b)", Notation::Infix, Notation::Prefix, ErrorKind::MismatchedParentheses);
    assert_eval_error("(a+b",
                      Notation::Infix,
                      &[('a', 1), ('b', 2)],
                      EvalMode::Integer,
                      ErrorKind::MismatchedParentheses);
}

#[test]
fn parenthesis_errors_name_the_unmatched_side() {
    let tokens = tokenize("(a+b", OperatorSet::Arithmetic).unwrap();
    let err = convert(&tokens, Notation::Infix, Notation::Prefix).unwrap_err();
    assert_eq!(err, ParseError::MismatchedParentheses { found: '(' });

    let tokens = tokenize("a+b)", OperatorSet::Arithmetic).unwrap();
    let err = convert(&tokens, Notation::Infix, Notation::Prefix).unwrap_err();
    assert_eq!(err, ParseError::MismatchedParentheses { found: ')' });
}

#[test]
fn integer_division_by_zero_fails() {
    assert_eval_error("a/b",
                      Notation::Infix,
                      &[('a', 5), ('b', 0)],
                      EvalMode::Integer,
                      ErrorKind::DivisionByZero);
    assert_eval_error("ab/",
                      Notation::Postfix,
                      &[('a', 5), ('b', 0)],
                      EvalMode::Real,
                      ErrorKind::DivisionByZero);
}

#[test]
fn missing_operands_are_reported() {
    assert_convert_error("a+", Notation::Postfix, Notation::Infix, ErrorKind::InsufficientOperands);
    assert_convert_error("a+", Notation::Infix, Notation::Postfix, ErrorKind::InsufficientOperands);
    assert_convert_error("+a", Notation::Prefix, Notation::Postfix, ErrorKind::InsufficientOperands);
    assert_eval_error("a+", Notation::Postfix, &[('a', 1)], EvalMode::Integer, ErrorKind::InsufficientOperands);

    let tokens = tokenize("a+", OperatorSet::Arithmetic).unwrap();
    let err = convert(&tokens, Notation::Postfix, Notation::Infix).unwrap_err();
    assert_eq!(err,
               ParseError::InsufficientOperands { operator:  Operator::Add,
                                                  required:  2,
                                                  available: 1, });
}

#[test]
fn leftover_operands_are_rejected() {
    assert_convert_error("ab", Notation::Postfix, Notation::Infix, ErrorKind::InvalidExpression);
    assert_convert_error("ab+c", Notation::Postfix, Notation::Prefix, ErrorKind::InvalidExpression);
    assert_convert_error("a b", Notation::Infix, Notation::Postfix, ErrorKind::InvalidExpression);

    let tokens = tokenize("1 2 3 +", OperatorSet::Arithmetic).unwrap();
    let err = evaluate(&tokens, Notation::Postfix, &Bindings::new(), EvalMode::Integer).unwrap_err();
    assert_eq!(err, RuntimeError::Parse(ParseError::InvalidExpression { depth: 2 }));
}

#[test]
fn adjacent_operands_name_the_token_missing_an_operator() {
    let tokens = tokenize("a~b", OperatorSet::Bitwise).unwrap();
    let err = convert(&tokens, Notation::Infix, Notation::Postfix).unwrap_err();
    assert_eq!(err, ParseError::MissingOperator { token: "~".to_string() });
    assert_eq!(err.kind(), ErrorKind::InvalidExpression);
    assert_eq!(err.to_string(), "Missing operator before '~'.");

    let tokens = tokenize("a(b)", OperatorSet::Arithmetic).unwrap();
    let err = convert(&tokens, Notation::Infix, Notation::Prefix).unwrap_err();
    assert_eq!(err, ParseError::MissingOperator { token: "(".to_string() });

    let tokens = tokenize("2 3", OperatorSet::Arithmetic).unwrap();
    let err = evaluate(&tokens, Notation::Infix, &Bindings::new(), EvalMode::Integer).unwrap_err();
    assert_eq!(err, RuntimeError::Parse(ParseError::MissingOperator { token: "3".to_string() }));
}

#[test]
fn prefix_scan_takes_first_pop_as_left() {
    assert_converts("-ab", Notation::Prefix, Notation::Infix, "a-b");
    assert_converts("/-abc", Notation::Prefix, Notation::Infix, "(a-b)/c");
    assert_evaluates("- a b", Notation::Prefix, &[('a', 10), ('b', 4)], EvalMode::Integer, Number::Integer(6));

    let tokens = tokenize("-ab", OperatorSet::Arithmetic).unwrap();
    let tree = build(&tokens, Notation::Prefix).unwrap();
    assert_eq!(tree,
               ExpressionTree::Binary { operator: Operator::Sub,
                                        left:     leaf('a'),
                                        right:    leaf('b'), });
}

#[test]
fn subtraction_stays_left_associative_in_prefix() {
    assert_converts("a-b-c", Notation::Infix, Notation::Prefix, "--abc");
    assert_converts("a-(b-c)", Notation::Infix, Notation::Prefix, "-a-bc");
    assert_converts("--abc", Notation::Prefix, Notation::Infix, "(a-b)-c");
}

#[test]
fn postfix_and_prefix_convert_through_infix() {
    assert_converts("abc*+", Notation::Postfix, Notation::Prefix, "+a*bc");
    assert_converts("+a*bc", Notation::Prefix, Notation::Postfix, "abc*+");
    assert_converts("ab+cd-*", Notation::Postfix, Notation::Prefix, "*+ab-cd");
}

#[test]
fn undefined_variables_fail() {
    assert_eval_error("a+b", Notation::Infix, &[('a', 1)], EvalMode::Integer, ErrorKind::UndefinedVariable);

    let err = evaluate_expression("x", Notation::Infix, &Bindings::new(), EvalMode::Real).unwrap_err();
    assert_eq!(err, RuntimeError::UndefinedVariable { name: 'x' });
}

#[test]
fn bindings_are_case_sensitive_letters() {
    let mut table = Bindings::new();
    table.bind('a', 1).unwrap();
    table.bind('A', 2).unwrap();
    assert_eq!(table.get('a'), Some(Number::Integer(1)));
    assert_eq!(table.get('A'), Some(Number::Integer(2)));

    assert_eq!(table.bind('1', 3).unwrap_err(), RuntimeError::InvalidBinding { name: '1' });
    assert_eq!(table.bind('_', 3).unwrap_err().kind(), ErrorKind::InvalidBinding);
}

#[test]
fn integer_arithmetic_is_checked() {
    assert_eval_error("9223372036854775807 + 1",
                      Notation::Infix,
                      &[],
                      EvalMode::Integer,
                      ErrorKind::Overflow);
    assert_eval_error("a*a", Notation::Infix, &[('a', i64::MAX)], EvalMode::Integer, ErrorKind::Overflow);
    assert_eval_error("a+1", Notation::Infix, &[('a', i64::MAX)], EvalMode::Real, ErrorKind::LiteralTooLarge);
}

#[test]
fn real_mode_divides_exactly() {
    assert_evaluates("7/2", Notation::Infix, &[], EvalMode::Real, Number::from(3.5));
    assert_evaluates("7/2", Notation::Infix, &[], EvalMode::Integer, Number::Integer(3));
    assert_evaluates("2^3/16", Notation::Infix, &[], EvalMode::Real, Number::from(0.5));
}

#[test]
fn bitwise_operators_are_rejected_on_reals() {
    let tokens = tokenize("a&b", OperatorSet::Bitwise).unwrap();
    let err = evaluate(&tokens, Notation::Infix, &bindings(&[('a', 1), ('b', 2)]), EvalMode::Real).unwrap_err();
    assert_eq!(err,
               RuntimeError::UnsupportedOperator { operator:  Operator::And,
                                                   operators: OperatorSet::Arithmetic, });
    assert_eq!(err.kind(), ErrorKind::UnknownOperator);
}

#[test]
fn operators_outside_a_family_are_errors() {
    let err = arithmetic::apply(Operator::And, Number::Integer(1), Number::Integer(2)).unwrap_err();
    assert_eq!(err,
               RuntimeError::UnsupportedOperator { operator:  Operator::And,
                                                   operators: OperatorSet::Arithmetic, });

    let err = arithmetic::apply(Operator::Shl, Number::from(1.5), Number::from(2.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownOperator);

    let err = bitwise::apply(Operator::Add, Number::Integer(1), Number::Integer(2)).unwrap_err();
    assert_eq!(err,
               RuntimeError::UnsupportedOperator { operator:  Operator::Add,
                                                   operators: OperatorSet::Bitwise, });
}

#[test]
fn shifts_wrap_their_count() {
    assert_evaluates("1 << 65", Notation::Infix, &[], EvalMode::Bitwise, Number::Integer(2));
    assert_evaluates("a >> 1", Notation::Infix, &[('a', -1)], EvalMode::Bitwise, Number::Integer(-1));
    assert_evaluates("1 << 63", Notation::Infix, &[], EvalMode::Bitwise, Number::Integer(i64::MIN));
}

#[test]
fn tokenizer_rejects_foreign_input() {
    let err = tokenize("a + $", OperatorSet::Arithmetic).unwrap_err();
    assert_eq!(err,
               ParseError::InvalidCharacter { character: '$',
                                              position:  4, });

    let err = tokenize("a << b", OperatorSet::Arithmetic).unwrap_err();
    assert_eq!(err,
               ParseError::UnknownOperator { symbol:   "<<".to_string(),
                                             position: 2, });

    let err = tokenize("a < b", OperatorSet::Bitwise).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownOperator);
}

#[test]
fn tokenizer_splits_letters_and_keeps_numbers() {
    let tokens = tokenize("ab12 3.25", OperatorSet::Arithmetic).unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(to_text(&tokens, Notation::Postfix), "a b 12 3.25");
}

#[test]
fn conversion_trace_follows_the_stacks() {
    let tokens = tokenize("a+b*c", OperatorSet::Arithmetic).unwrap();
    let mut steps: Vec<TraceEvent> = Vec::new();
    let postfix = convert_traced(&tokens, Notation::Infix, Notation::Postfix, &mut steps).unwrap();
    assert_eq!(to_text(&postfix, Notation::Postfix), "abc*+");

    let lines: Vec<String> = steps.iter().map(ToString::to_string).collect();
    assert_eq!(lines,
               vec!["Output a -> Output: [a]",
                    "Push + -> Stack: [+]",
                    "Output b -> Output: [a, b]",
                    "Push * -> Stack: [+, *]",
                    "Output c -> Output: [a, b, c]",
                    "Output * -> Output: [a, b, c, *]",
                    "Output + -> Output: [a, b, c, *, +]",]);
}

#[test]
fn evaluation_trace_reports_pushes_and_applications() {
    let tokens = tokenize("+a*bc", OperatorSet::Arithmetic).unwrap();
    let mut steps = Vec::new();
    let value = evaluate_traced(&tokens,
                                Notation::Prefix,
                                &bindings(&[('a', 2), ('b', 3), ('c', 4)]),
                                EvalMode::Integer,
                                &mut steps).unwrap();
    assert_eq!(value, Number::Integer(14));
    assert_eq!(steps.len(), 5);

    assert_eq!(steps[0].action, TraceAction::Push { item: "4".to_string() });
    assert_eq!(steps[2].action,
               TraceAction::Apply { operator: Operator::Mul,
                                    operands: vec!["3".to_string(), "4".to_string()],
                                    result:   "12".to_string(), });
    assert_eq!(steps[2].stack, vec!["12"]);
    assert_eq!(steps[3].to_string(), "Push 2 -> Stack: [12, 2]");
    assert_eq!(steps[4].to_string(), "Apply + to 2, 12 -> Result: 14 -> Stack: [14]");
}

#[test]
fn infix_evaluation_trace_includes_operator_pushes() {
    let tokens = tokenize("(a+b)*c", OperatorSet::Arithmetic).unwrap();
    let mut steps = Vec::new();
    let value = evaluate_traced(&tokens,
                                Notation::Infix,
                                &bindings(&[('a', 2), ('b', 3), ('c', 4)]),
                                EvalMode::Integer,
                                &mut steps).unwrap();
    assert_eq!(value, Number::Integer(20));

    let lines: Vec<String> = steps.iter().map(ToString::to_string).collect();
    assert_eq!(lines,
               vec!["Push ( -> Stack: [(]",
                    "Push 2 -> Stack: [2]",
                    "Push + -> Stack: [(, +]",
                    "Push 3 -> Stack: [2, 3]",
                    "Apply + to 2, 3 -> Result: 5 -> Stack: [5]",
                    "Push * -> Stack: [*]",
                    "Push 4 -> Stack: [5, 4]",
                    "Apply * to 5, 4 -> Result: 20 -> Stack: [20]",]);
}

#[test]
fn failed_calls_leave_the_sink_empty() {
    let tokens = tokenize("ab+c", OperatorSet::Arithmetic).unwrap();
    let mut steps = Vec::new();
    assert!(convert_traced(&tokens, Notation::Postfix, Notation::Infix, &mut steps).is_err());
    assert!(steps.is_empty());

    let tokens = tokenize("a b /", OperatorSet::Arithmetic).unwrap();
    assert!(evaluate_traced(&tokens,
                            Notation::Postfix,
                            &bindings(&[('a', 1), ('b', 0)]),
                            EvalMode::Integer,
                            &mut steps).is_err());
    assert!(steps.is_empty());
}

#[test]
fn renders_the_tree_on_a_grid() {
    let lines = draw_expression("3 4 + 5 *", Notation::Postfix, OperatorSet::Arithmetic).unwrap();
    assert_eq!(lines,
               vec!["       *",
                    "    /__ __\\",
                    "   +       5",
                    "  / \\",
                    " 3   4",
                    "",]);
}

#[test]
fn renders_a_single_leaf() {
    let tree = ExpressionTree::Leaf(Operand::Literal("42".to_string()));
    assert_eq!(render(&tree).unwrap(), vec!["42", ""]);
}

#[test]
fn renders_the_complement_with_a_right_child() {
    let lines = draw_expression("~a", Notation::Infix, OperatorSet::Bitwise).unwrap();
    assert_eq!(lines, vec!["   ~", "    \\", "     a", ""]);
}

#[test]
fn rendering_is_repeatable() {
    let tokens = tokenize("(a+b)*(c-d)/e", OperatorSet::Arithmetic).unwrap();
    let tree = build(&tokens, Notation::Infix).unwrap();
    assert_eq!(render(&tree).unwrap(), render(&tree).unwrap());
}

#[test]
fn tall_trees_are_not_drawn() {
    let source = "a".to_string() + &"+a".repeat(MAX_RENDER_LEVELS);
    let err = draw_expression(&source, Notation::Infix, OperatorSet::Arithmetic).unwrap_err();
    assert_eq!(err,
               ParseError::TreeTooTall { height: MAX_RENDER_LEVELS + 1,
                                         limit:  MAX_RENDER_LEVELS, });
}

#[test]
fn deep_nesting_is_rejected() {
    let source = "(".repeat(MAX_TREE_DEPTH + 1) + "a" + &"+a)".repeat(MAX_TREE_DEPTH + 1);
    let tokens = tokenize(&source, OperatorSet::Arithmetic).unwrap();
    let err = build(&tokens, Notation::Infix).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
}

#[test]
fn traversals_rebuild_every_notation() {
    let tokens = tokenize("a*(b+c)-d", OperatorSet::Arithmetic).unwrap();
    let tree = build(&tokens, Notation::Infix).unwrap();

    assert_eq!(to_text(&tree.to_tokens(Notation::Prefix), Notation::Prefix), "-*a+bcd");
    assert_eq!(to_text(&tree.to_tokens(Notation::Postfix), Notation::Postfix), "abc+*d-");
    assert_eq!(tree.to_string(), "(a*(b+c))-d");
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.size(), 7);
}

#[test]
fn every_notation_builds_the_same_tree() {
    let infix = tokenize("(a-b)/(c+d)", OperatorSet::Arithmetic).unwrap();
    let tree = build(&infix, Notation::Infix).unwrap();

    for notation in [Notation::Prefix, Notation::Postfix] {
        let tokens = convert(&infix, Notation::Infix, notation).unwrap();
        assert_eq!(build(&tokens, notation).unwrap(), tree, "building from {notation}");
    }
}
