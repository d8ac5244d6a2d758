//! Assertions over generated q text

/// Every `[`, `{` and `(` is closed exactly once and in order
pub fn assert_balanced(q: &str) {
    let mut stack = Vec::new();
    for ch in q.chars() {
        match ch {
            '[' | '{' | '(' => stack.push(ch),
            ']' | '}' | ')' => {
                let open = stack.pop();
                let expected = match ch {
                    ']' => '[',
                    '}' => '{',
                    _ => '(',
                };
                assert_eq!(open, Some(expected), "unbalanced '{ch}' in:\n{q}");
            }
            _ => {}
        }
    }
    assert!(stack.is_empty(), "unclosed {stack:?} in:\n{q}");
}

/// No doubled terminators and no terminator before a closing bracket
pub fn assert_terminators_well_placed(q: &str) {
    assert!(!q.contains(";;"), "doubled terminator in:\n{q}");
    let lines: Vec<&str> = q.lines().collect();
    for pair in lines.windows(2) {
        let next = pair[1].trim_start();
        if next.starts_with('}') || next.starts_with(']') {
            assert!(
                !pair[0].trim_end().ends_with(';'),
                "terminator after last statement before '{next}' in:\n{q}"
            );
        }
    }
}
