use booltable::{
    compare_formulas, compare_number_to_formula, report_from_formula, report_from_number,
    Equivalence, NormalFormCost, Preset, PresetOutcome, TableGenerator,
};
use strum::IntoEnumIterator;

fn cost(literals: usize, conjunctions: usize, disjunctions: usize) -> NormalFormCost {
    NormalFormCost {
        literals,
        conjunctions,
        disjunctions,
    }
}

#[test]
fn number_report_bundles_forms_and_costs() {
    let report = report_from_number(3, 11).unwrap();

    assert_eq!(report.table.bits(), "11010000");
    assert_eq!(
        report.dnf,
        "(!x1 & !x2 & !x3) | (!x1 & !x2 & x3) | (!x1 & x2 & x3)"
    );
    assert_eq!(report.dnf_cost, cost(9, 3, 1));
    assert_eq!(report.knf_cost, cost(15, 1, 5));
}

#[test]
fn report_rendering() {
    let report = report_from_number(1, 2).unwrap();

    assert_eq!(
        report.to_string(),
        "x1 | f\n0 | 0\n1 | 1\n\n\
         DNF: (x1)\n\
         DNF cost: literals: 1, conjunctions: 1, disjunctions: 1\n\
         KNF: (x1)\n\
         KNF cost: literals: 1, conjunctions: 1, disjunctions: 1"
    );
}

#[test]
fn formula_is_equivalent_to_its_own_dnf() {
    let generator = TableGenerator::default();
    let outcome = Preset::Equivalence.run(&generator).unwrap();

    let PresetOutcome::Comparison {
        formula,
        report,
        result,
    } = &outcome
    else {
        panic!("expected a comparison, got {outcome:?}");
    };

    assert_eq!(formula, "(x1 & !x2) | x3");
    assert_eq!(
        report.dnf,
        "(!x1 & !x2 & x3) | (!x1 & x2 & x3) | (x1 & !x2 & !x3) | (x1 & !x2 & x3) | (x1 & x2 & x3)"
    );
    assert_eq!(report.knf, "(x1 | x2 | x3) & (x1 | !x2 | x3) & (!x1 | !x2 | x3)");
    assert_eq!(report.dnf_cost, cost(15, 5, 1));
    assert_eq!(report.knf_cost, cost(9, 1, 3));
    assert_eq!(*result, Equivalence::Equal);

    assert_eq!(
        compare_formulas(&generator, &report.knf, formula),
        Ok(Equivalence::Equal)
    );
}

#[test]
fn table_presets() {
    let generator = TableGenerator::default();
    let test_cases: [(Preset, &str); 2] = [
        (Preset::Number, "11010000"),
        (Preset::Implication, "11011010"),
    ];

    for (i, (preset, expected_bits)) in test_cases.into_iter().enumerate() {
        let outcome = preset.run(&generator).unwrap();

        assert!(
            matches!(outcome, PresetOutcome::Table(_)),
            "Test case {}; Preset: {}",
            i + 1,
            preset
        );
        assert_eq!(
            outcome.report().table.bits(),
            expected_bits,
            "Test case {}; Preset: {}",
            i + 1,
            preset
        );
    }
}

#[test]
fn preset_names() {
    let names = Preset::iter().map(|preset| preset.to_string()).collect::<Vec<_>>();

    assert_eq!(names, vec!["number", "implication", "equivalence"]);
    assert_eq!("implication".parse::<Preset>(), Ok(Preset::Implication));
    assert!("tautology".parse::<Preset>().is_err());

    for preset in Preset::iter() {
        assert!(!preset.description().is_empty());
    }
}

#[test]
fn formula_comparisons() {
    let generator = TableGenerator::default();

    assert_eq!(
        compare_formulas(&generator, "a", "a & (b | !b)"),
        Ok(Equivalence::Equal)
    );
    assert_eq!(
        compare_number_to_formula(&generator, 2, 6, "x1 xor x2"),
        Ok(Equivalence::Equal)
    );
    assert_eq!(
        compare_number_to_formula(&generator, 3, 0b1100_1100, "x2"),
        Ok(Equivalence::Equal)
    );

    let result = compare_formulas(&generator, "x1 -> x2", "x2 -> x1").unwrap();
    assert_eq!(result.counterexample(), Some(&[false, true][..]));
    assert!(matches!(result, Equivalence::NotEqual { index: 1, .. }));
}

#[test]
fn formula_report_propagates_errors() {
    assert!(report_from_formula("x1 &").is_err());
    assert!(report_from_formula("x1 x2").is_err());
    assert_eq!(report_from_formula("x1 | !x1").unwrap().knf, "1");
}
