//! End-to-end translation tests
//!
//! Source text → dialect rewriting → tree-sitter → Node Model → q text.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use pretty_assertions::assert_eq;
use qython_codegen::{TranslateError, Translator, TranslatorConfig};

fn translator() -> Translator {
    Translator::new(TranslatorConfig::default()).unwrap()
}

#[test]
fn test_nmsq_while_translates_exactly() {
    let q = translator()
        .translate_source(NMSQ_WHILE)
        .unwrap()
        .render()
        .unwrap();

    assert_eq!(q, NMSQ_WHILE_Q);
    assert_balanced(&q);
    assert_terminators_well_placed(&q);
}

#[test]
fn test_translation_is_deterministic() {
    let t = translator();
    let first = t.translate_source(NMSQ_WHILE).unwrap().render().unwrap();
    let second = t.translate_source(NMSQ_WHILE).unwrap().render().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_for_loop_degrades_to_placeholder() {
    let translation = translator().translate_source(NMSQ_FOR).unwrap();
    let q = translation.render().unwrap();

    assert!(q.starts_with("nmsq:{[x;precision;max_iterations]\n"));
    assert!(q.contains("\n    // Unsupported: for_statement\n    ;\n"));
    assert!(q.ends_with("\n    :guess\n    }"));
    assert!(!q.contains("Compute square root"));
}

#[test]
fn test_dialect_program() {
    let translation = translator().translate_source(DIALECT_PROGRAM).unwrap();

    assert_eq!(
        translation.get("halve").unwrap().output.as_deref().unwrap(),
        HALVE_Q
    );
    assert_eq!(
        translation.get("newton").unwrap().output.as_deref().unwrap(),
        NEWTON_Q
    );
    assert_eq!(
        translation.get("fixed").unwrap().output.as_deref().unwrap(),
        FIXED_Q
    );

    let q = translation.render().unwrap();
    assert_eq!(q, [HALVE_Q, NEWTON_Q, FIXED_Q].join("\n\n"));
    assert_balanced(&q);
    assert_terminators_well_placed(&q);
}

#[test]
fn test_function_selection() {
    let source = format!("{}\n{}", NMSQ_FOR, NMSQ_WHILE);
    let q = translator()
        .translate_source(&source)
        .unwrap()
        .select("nmsq_while")
        .render()
        .unwrap();
    assert_eq!(q, NMSQ_WHILE_Q);
}

#[test]
fn test_custom_layout_config() {
    let config = TranslatorConfig::default()
        .indent_width(2)
        .inline_single_statement(false)
        .function_separator("\n");
    let t = Translator::new(config).unwrap();

    let q = t
        .translate_source("def f(x):\n    return x + 1\n\ndef g():\n    return 2\n")
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(q, "f:{[x]\n  :x+1\n  }\ng:{[]\n  :2\n  }");
}

#[test]
fn test_missing_repeat_count_fails_only_its_function() {
    let source = "def broken(x):\n    do times:\n        x = x + 1\n    return x\n\ndef ok(x):\n    return x\n";
    let translation = translator().translate_source(source).unwrap();

    let err = translation
        .get("broken")
        .unwrap()
        .output
        .as_ref()
        .unwrap_err();
    assert!(matches!(err, TranslateError::MalformedNode { kind, .. } if kind == "CountedRepeat"));
    assert_eq!(translation.render_partial(), "ok:{[x] :x}");
}

#[test]
fn test_many_functions_in_parallel() {
    let source = fixture_n_functions(50);
    let translation = translator().translate_source(&source).unwrap();

    assert_eq!(translation.functions.len(), 50);
    assert_eq!(translation.failures().count(), 0);
    assert_eq!(
        translation.get("func_7").unwrap().output.as_deref().unwrap(),
        "func_7:{[x] :(x*7)+1}"
    );
}

#[test]
fn test_hand_built_tree_matches_parsed_tree() {
    let tree = module(vec![function(
        "f",
        &["x"],
        vec![
            assign("y", binary(name("x"), "*", num("2"))),
            ret(name("y")),
        ],
    )]);
    let from_tree = translator().translate_module(&tree).render().unwrap();
    let from_source = translator()
        .translate_source("def f(x):\n    y = x * 2\n    return y\n")
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(from_tree, from_source);
}

#[test]
fn test_placeholder_never_hides_closing_bracket() {
    let q = translator()
        .translate_source("def f(o):\n    return o.x + 1\n")
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(q, "f:{[o]\n    :// Unsupported: attribute\n        +1\n    }");
    assert_balanced(&q);
    for line in q.lines() {
        if let Some(at) = line.find("// Unsupported:") {
            assert!(!line[at..].contains('}') && !line[at..].contains(';'));
        }
    }
}

#[test]
fn test_builtins_are_not_bound_in_fixpoint_lambda() {
    let source = "def damp(g, x):\n    converge g:\n        g = abs(g - x) / 2\n    return g\n";
    let q = translator().translate_source(source).unwrap().render().unwrap();
    assert_eq!(
        q,
        "damp:{[g;x]\n    g:{[g;x]\n        g:abs[g-x]%2;\n        g\n        }[;x]/[g];\n    :g\n    }"
    );
    assert_balanced(&q);
    assert_terminators_well_placed(&q);
}

#[test]
fn test_splat_parameters_keep_their_names() {
    let q = translator()
        .translate_source("def f(x, *rest, **options):\n    return x\n")
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(q, "f:{[x;rest;options] :x}");
}

#[test]
fn test_word_comparison_is_named_in_placeholder() {
    let t = translator();
    assert_eq!(
        t.translate_expression("a is not b").unwrap(),
        "// Unsupported: Comparison 'is not'"
    );
    assert_eq!(
        t.translate_expression("x not in xs").unwrap(),
        "// Unsupported: Comparison 'not in'"
    );
}

#[test]
fn test_dialect_headers_inside_strings_are_untouched() {
    let source = "def f(n):\n    s = \"\"\"\n    do 3 times:\n    \"\"\"\n    do n times:\n        s = s + s\n    return s\n";
    let translation = translator().translate_source(source).unwrap();
    let q = translation.render().unwrap();
    assert!(q.contains("    do 3 times:\n"));
    assert!(q.contains("do[n; s:s+s]"));
}
