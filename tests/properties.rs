use notation::{
    ast::{ExpressionTree, Notation, Operand, Operator},
    interpreter::{
        converter::core::convert,
        evaluator::core::{Bindings, EvalMode, evaluate},
        lexer::{OperatorSet, to_text, tokenize},
        parser::core::build,
        render::render,
    },
};
use proptest::prelude::*;

const NAMES: [char; 5] = ['a', 'b', 'c', 'd', 'e'];

fn operand() -> impl Strategy<Value = ExpressionTree> {
    prop_oneof![prop::sample::select(NAMES.to_vec()).prop_map(Operand::Variable),
                (0u8..100).prop_map(|n| Operand::Literal(n.to_string())),].prop_map(ExpressionTree::Leaf)
}

fn binary(operators: Vec<Operator>,
          inner: impl Strategy<Value = ExpressionTree> + Clone)
          -> impl Strategy<Value = ExpressionTree> {
    (prop::sample::select(operators), inner.clone(), inner).prop_map(|(operator, left, right)| {
                                                               ExpressionTree::Binary { operator,
                                                                                        left: Box::new(left),
                                                                                        right: Box::new(right) }
                                                           })
}

/// Trees over `+ - *`, so evaluation can only fail by overflowing.
fn arithmetic_tree() -> impl Strategy<Value = ExpressionTree> {
    operand().prop_recursive(6, 48, 2, |inner| {
                 binary(vec![Operator::Add, Operator::Sub, Operator::Mul], inner)
             })
}

fn bitwise_tree() -> impl Strategy<Value = ExpressionTree> {
    operand().prop_recursive(6, 48, 2, |inner| {
                 let complement = inner.clone().prop_map(|operand| ExpressionTree::Unary {
                                                   operator: Operator::Not,
                                                   operand:  Box::new(operand),
                                               });
                 let operators = vec![Operator::And, Operator::Or, Operator::Xor, Operator::Shl, Operator::Shr];
                 prop_oneof![1 => complement, 3 => binary(operators, inner)]
             })
}

fn bindings() -> impl Strategy<Value = Bindings> {
    prop::collection::vec(-20i64..20, NAMES.len()).prop_map(|values| {
                                                      Bindings::from_pairs(NAMES.into_iter().zip(values))
                                                          .expect("letters are valid names")
                                                  })
}

proptest! {
    #[test]
    fn postfix_round_trips_to_parenthesised_infix(tree in arithmetic_tree()) {
        let infix = tree.to_tokens(Notation::Infix);
        let postfix = convert(&infix, Notation::Infix, Notation::Postfix).unwrap();
        prop_assert_eq!(&postfix, &tree.to_tokens(Notation::Postfix));

        let back = convert(&postfix, Notation::Postfix, Notation::Infix).unwrap();
        prop_assert_eq!(to_text(&back, Notation::Infix), tree.to_string());
    }

    #[test]
    fn bitwise_text_round_trips(tree in bitwise_tree()) {
        let text = tree.to_string();
        let tokens = tokenize(&text, OperatorSet::Bitwise).unwrap();

        let prefix = convert(&tokens, Notation::Infix, Notation::Prefix).unwrap();
        prop_assert_eq!(&prefix, &tree.to_tokens(Notation::Prefix));

        let back = convert(&prefix, Notation::Prefix, Notation::Infix).unwrap();
        prop_assert_eq!(to_text(&back, Notation::Infix), text);
    }

    #[test]
    fn postfix_to_prefix_goes_through_infix(tree in bitwise_tree()) {
        let postfix = tree.to_tokens(Notation::Postfix);

        let direct = convert(&postfix, Notation::Postfix, Notation::Prefix).unwrap();
        let infix = convert(&postfix, Notation::Postfix, Notation::Infix).unwrap();
        let composed = convert(&infix, Notation::Infix, Notation::Prefix).unwrap();

        prop_assert_eq!(direct, composed);
    }

    #[test]
    fn every_notation_evaluates_alike(tree in arithmetic_tree(), bindings in bindings()) {
        let results: Vec<_> = Notation::ALL.iter()
                                           .map(|&notation| {
                                               evaluate(&tree.to_tokens(notation), notation, &bindings, EvalMode::Integer)
                                                   .map_err(|e| e.kind())
                                           })
                                           .collect();

        prop_assert_eq!(&results[0], &results[1]);
        prop_assert_eq!(&results[1], &results[2]);
    }

    #[test]
    fn bitwise_notations_evaluate_alike(tree in bitwise_tree(), bindings in bindings()) {
        let infix = evaluate(&tree.to_tokens(Notation::Infix), Notation::Infix, &bindings, EvalMode::Bitwise);
        let prefix = evaluate(&tree.to_tokens(Notation::Prefix), Notation::Prefix, &bindings, EvalMode::Bitwise);
        let postfix = evaluate(&tree.to_tokens(Notation::Postfix), Notation::Postfix, &bindings, EvalMode::Bitwise);

        prop_assert!(infix.is_ok());
        prop_assert_eq!(&infix, &prefix);
        prop_assert_eq!(&infix, &postfix);
    }

    #[test]
    fn building_inverts_traversal(tree in bitwise_tree()) {
        for notation in Notation::ALL {
            prop_assert_eq!(&build(&tree.to_tokens(notation), notation).unwrap(), &tree);
        }
    }

    #[test]
    fn rendering_is_deterministic(tree in arithmetic_tree()) {
        let first = render(&tree).unwrap();
        prop_assert_eq!(first.len(), 2 * (tree.height() + 1));
        prop_assert_eq!(first, render(&tree).unwrap());
    }
}
