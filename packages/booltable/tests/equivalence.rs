use booltable::{
    compare_tables, table_from_formula, table_from_number, Equivalence, IncomparableError,
    TableGenerator, TruthTable,
};

#[test]
fn function_index_matches_exclusive_or() {
    let left = table_from_number(2, 6).unwrap();
    let right = table_from_formula("x1 xor x2").unwrap();

    assert_eq!(compare_tables(&left, &right), Ok(Equivalence::Equal));

    let closure = TruthTable::from_fn(2, |inputs| inputs[0] != inputs[1]).unwrap();
    assert_eq!(compare_tables(&left, &closure), Ok(Equivalence::Equal));
}

#[test]
fn first_differing_row_is_reported() {
    let left = table_from_number(2, 6).unwrap();
    let right = table_from_formula("x1 | x2").unwrap();

    let result = compare_tables(&left, &right).unwrap();

    let Equivalence::NotEqual {
        index,
        left: left_row,
        right: right_row,
    } = &result
    else {
        panic!("expected a counterexample, got {result}");
    };

    assert_eq!(*index, 3);
    assert_eq!(left_row.inputs(), &[true, true]);
    assert!(!left_row.output());
    assert!(right_row.output());
    assert_eq!(result.counterexample(), Some(&[true, true][..]));
    assert_eq!(
        result.to_string(),
        "not equal at row 3: left 1 1 | 0, right 1 1 | 1"
    );
}

#[test]
fn verdict_is_symmetric() {
    let pairs = [
        ("a -> b", "!a | b"),
        ("a = b", "(a & b) | (!a & !b)"),
        ("a ^ b", "a = b"),
        ("!(a & b)", "!a & !b"),
    ];

    for (left, right) in pairs {
        let left = table_from_formula(left).unwrap();
        let right = table_from_formula(right).unwrap();

        let forward = compare_tables(&left, &right).unwrap();
        let backward = compare_tables(&right, &left).unwrap();

        assert_eq!(forward.is_equal(), backward.is_equal());
        assert_eq!(forward.counterexample(), backward.counterexample());
    }
}

#[test]
fn tables_of_different_width_are_incomparable() {
    let left = table_from_number(2, 6).unwrap();
    let right = table_from_number(3, 6).unwrap();

    assert_eq!(
        compare_tables(&left, &right),
        Err(IncomparableError { left: 2, right: 3 })
    );
}

#[test]
fn relabeled_formula_compares_against_function_index() {
    // x2 alone has three columns once evaluated over x1..x3.
    let number = table_from_number(3, 0b1100_1100).unwrap();
    let formula = TableGenerator::default()
        .from_formula_over("x2", number.variables())
        .unwrap();

    assert_eq!(compare_tables(&number, &formula), Ok(Equivalence::Equal));
}
