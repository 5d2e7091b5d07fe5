use booltable::{
    compile_formula,
    error::MalformedReason,
    evaluate,
    lexer::{Operator, Token},
    Assignment, Evaluate, EvaluationError,
};
use maplit::hashmap;
use strum::IntoEnumIterator;

fn assignment(values: &[(&str, bool)]) -> Assignment {
    values.iter().copied().collect()
}

#[test]
fn implication_under_single_assignment() {
    let formula = compile_formula("x1 -> x2").unwrap();
    let assignment = hashmap! {
        "x1" => true,
        "x2" => false,
    }
    .into_iter()
    .collect::<Assignment>();

    assert_eq!(evaluate(&formula, &assignment), Ok(false));
}

#[test]
fn operators_match_their_truth_functions() {
    for operator in Operator::iter().filter(|&operator| operator != Operator::Not) {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let expected = match operator {
                Operator::Not => unreachable!(),
                Operator::And => a && b,
                Operator::Or => a || b,
                Operator::Xor => a != b,
                Operator::Implies => !a || b,
                Operator::Equivalent => a == b,
            };

            let postfix = [
                Token::Constant(a),
                Token::Constant(b),
                Token::Operator(operator),
            ];

            assert_eq!(
                postfix.evaluate(&Assignment::new()),
                Ok(expected),
                "{a} {operator} {b}"
            );
        }
    }

    for a in [false, true] {
        let postfix = [Token::Constant(a), Token::Operator(Operator::Not)];
        assert_eq!(postfix.evaluate(&Assignment::new()), Ok(!a));
    }
}

#[test]
fn binary_operators_pop_the_right_operand_first() {
    let formula = compile_formula("a -> b").unwrap();

    assert_eq!(
        formula.evaluate(&assignment(&[("a", false), ("b", true)])),
        Ok(true)
    );
    assert_eq!(
        formula.evaluate(&assignment(&[("a", true), ("b", false)])),
        Ok(false)
    );
}

#[test]
fn assignment_names_are_case_insensitive() {
    let formula = compile_formula("X1 & x2").unwrap();
    let assignment = assignment(&[("x1", true), ("X2", true)]);

    assert_eq!(assignment.get("X1"), Some(true));
    assert_eq!(assignment.to_string(), "{x1, x2}");
    assert_eq!(formula.evaluate(&assignment), Ok(true));
}

#[test]
fn evaluation_errors() {
    let test_cases: [(&str, &[(&str, bool)], Result<bool, EvaluationError>); 5] = [
        (
            "x1 & x2",
            &[("x1", true)],
            Err(EvaluationError::UnboundVariable {
                name: "x2".to_owned(),
            }),
        ),
        (
            "x1 & ",
            &[("x1", true)],
            Err(EvaluationError::MalformedExpression {
                reason: MalformedReason::MissingOperand { operator: "AND" },
            }),
        ),
        (
            "!",
            &[],
            Err(EvaluationError::MalformedExpression {
                reason: MalformedReason::MissingOperand { operator: "NOT" },
            }),
        ),
        (
            "",
            &[],
            Err(EvaluationError::MalformedExpression {
                reason: MalformedReason::LeftoverStack { depth: 0 },
            }),
        ),
        ("1 & !0", &[], Ok(true)),
    ];

    for (i, (input, values, expected_result)) in test_cases.into_iter().enumerate() {
        let formula = compile_formula(input).unwrap();

        assert_eq!(
            formula.evaluate(&assignment(values)),
            expected_result,
            "Test case {}; Input: {}",
            i + 1,
            input
        );
    }
}

#[test]
fn surplus_operands_are_left_on_the_stack() {
    let postfix = [Token::Variable("x1".to_owned()), Token::Variable("x2".to_owned())];

    assert_eq!(
        postfix.evaluate(&assignment(&[("x1", true), ("x2", false)])),
        Err(EvaluationError::MalformedExpression {
            reason: MalformedReason::LeftoverStack { depth: 2 },
        })
    );
}

#[test]
fn parentheses_in_postfix_are_malformed() {
    let postfix = [Token::LeftParen, Token::Constant(true)];

    assert_eq!(
        postfix.evaluate(&Assignment::new()),
        Err(EvaluationError::MalformedExpression {
            reason: MalformedReason::Parenthesis,
        })
    );
}

#[test]
fn row_assignment_uses_first_variable_as_high_bit() {
    let variables = ["a".to_owned(), "b".to_owned(), "c".to_owned()];
    let assignment = Assignment::for_row(&variables, 0b110);

    assert_eq!(
        assignment.iter().collect::<Vec<_>>(),
        vec![("a", true), ("b", true), ("c", false)]
    );
}
