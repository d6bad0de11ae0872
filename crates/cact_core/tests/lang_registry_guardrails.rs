use std::collections::HashMap;

use cact_core::lang::builtins;
use cact_core::lang::keywords::{self, KeywordCategory, KeywordUsage};
use cact_core::lang::operators::{self, Fixity, OperatorId};
use cact_core::lang::punctuation;
use cact_core::lang::types;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(keywords::as_str(info.id), info.canonical);
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn every_type_keyword_maps_to_a_scalar_type() {
    for info in keywords::KEYWORDS {
        let scalar = keywords::scalar_type(info.id);
        if info.category == KeywordCategory::Type {
            let scalar = scalar.unwrap_or_else(|| panic!("type keyword {:?} has no scalar type", info.id));
            assert_eq!(types::as_str(scalar), info.canonical);
        } else {
            assert!(scalar.is_none(), "non-type keyword {:?} maps to a scalar", info.id);
        }
    }
}

#[test]
fn declaration_keywords_are_types_or_const() {
    for info in keywords::KEYWORDS {
        let starts_decl = keywords::usage(info.id)
            .iter()
            .any(|u| matches!(u, KeywordUsage::Declaration | KeywordUsage::Modifier));
        let expected = matches!(info.category, KeywordCategory::Type | KeywordCategory::Binding);
        assert_eq!(starts_decl, expected, "usage of {:?}", info.id);
    }
}

#[test]
fn operators_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, OperatorId> = HashMap::new();
    for info in operators::OPERATORS {
        assert_eq!(operators::from_str(info.spelling), Some(info.id));
        if let Some(prev) = seen.insert(info.spelling, info.id) {
            panic!("duplicate operator spelling {:?}: {:?} and {:?}", info.spelling, prev, info.id);
        }
    }
    assert_eq!(operators::from_str("&"), None);
    assert_eq!(operators::from_str("|"), None);
}

#[test]
fn binary_precedence_table_is_ordered() {
    use OperatorId::*;

    // Tighter binding first.
    let levels: &[&[OperatorId]] = &[
        &[Star, Slash, Percent],
        &[Plus, Minus],
        &[Lt, LtEq, Gt, GtEq],
        &[EqEq, NotEq],
        &[AndAnd],
        &[OrOr],
    ];
    for pair in levels.windows(2) {
        for &hi in pair[0] {
            for &lo in pair[1] {
                assert!(
                    operators::precedence(hi) > operators::precedence(lo),
                    "{:?} should bind tighter than {:?}",
                    hi,
                    lo
                );
            }
        }
    }
    for level in levels {
        let p = operators::precedence(level[0]);
        assert!(p > 0);
        for &id in level.iter() {
            assert_eq!(operators::precedence(id), p);
            assert_eq!(operators::info_for(id).fixity, Fixity::Infix);
        }
    }
    assert_eq!(operators::precedence(Assign), 0);
    assert_eq!(operators::precedence(Not), 0);
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen = HashMap::new();
    for info in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(info.canonical), Some(info.id));
        let c = info.canonical.chars().next().unwrap_or_default();
        assert_eq!(punctuation::from_char(c), Some(info.id));
        assert!(seen.insert(info.canonical, info.id).is_none());
    }
}

#[test]
fn builtins_spellings_unique_and_well_typed() {
    let mut seen = HashMap::new();
    for info in builtins::BUILTIN_FUNCTIONS {
        assert_eq!(builtins::from_str(info.canonical), Some(info.id));
        assert!(seen.insert(info.canonical, info.id).is_none());
        assert!(
            keywords::from_str(info.canonical).is_none(),
            "builtin {} collides with a keyword",
            info.canonical
        );
        if info.canonical.starts_with("print_") {
            assert_eq!(info.params.len(), 1);
            assert_eq!(info.ret, types::ScalarTypeId::Void);
        } else {
            assert!(info.params.is_empty());
            assert_ne!(info.ret, types::ScalarTypeId::Void);
        }
    }
    assert_eq!(builtins::BUILTIN_FUNCTIONS.len(), 7);
}

#[test]
fn scalar_layouts_match_target() {
    use types::ScalarTypeId::*;

    let expected = [(Void, 0, 0), (Bool, 1, 1), (Int, 4, 4), (Float, 4, 4), (Double, 8, 8)];
    for (id, size, align) in expected {
        let info = types::info_for(id);
        assert_eq!((info.size, info.align), (size, align), "layout of {:?}", id);
    }
}
