//! Dialect Preprocessor
//!
//! Qython adds two statement headers the Python grammar rejects:
//!
//! ```text
//! do <count> times:   →  while __repeat__(<count>):
//! do times:           →  while __repeat__():
//! converge <name>:    →  with __converge__(<name>):
//! ```
//!
//! The rewritten forms are valid Python and are recognized again by the
//! tree-sitter adapter. Rewriting is line-based and keeps line numbers, so
//! parse errors still point at the original line. Lines that start inside a
//! triple-quoted string are left alone.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Reserved callee marking a counted repeat
pub const REPEAT_MARKER: &str = "__repeat__";

/// Reserved callee marking a fixpoint block
pub const CONVERGE_MARKER: &str = "__converge__";

const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

static DO_TIMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)do(?:\s+(?P<count>.+?))?\s+times\s*:(?P<rest>.*)$")
        .expect("do-times pattern is valid")
});

static CONVERGE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>\s*)converge\s+(?P<var>[A-Za-z_][A-Za-z0-9_]*)\s*:(?P<rest>.*)$")
        .expect("converge pattern is valid")
});

/// Rewrites Qython-only statement headers into reserved Python forms
#[derive(Debug, Default, Clone, Copy)]
pub struct DialectPreprocessor;

impl DialectPreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite a whole source file
    pub fn rewrite(&self, source: &str) -> String {
        let mut rewritten = 0usize;
        let mut open_string = None;
        let lines: Vec<String> = source
            .split('\n')
            .map(|line| {
                let new_line = match open_string {
                    Some(_) => None,
                    None => self.rewrite_line(line),
                };
                open_string = string_state_after(line, open_string);
                match new_line {
                    Some(new_line) => {
                        rewritten += 1;
                        new_line
                    }
                    None => line.to_string(),
                }
            })
            .collect();

        if rewritten > 0 {
            debug!(rewritten, "rewrote dialect statement headers");
        }
        lines.join("\n")
    }

    /// Rewrite one line, or `None` when it is plain Python
    pub fn rewrite_line(&self, line: &str) -> Option<String> {
        if let Some(caps) = DO_TIMES.captures(line) {
            let count = caps.name("count").map_or("", |m| m.as_str().trim());
            return Some(format!(
                "{}while {}({}):{}",
                &caps["indent"], REPEAT_MARKER, count, &caps["rest"]
            ));
        }

        if let Some(caps) = CONVERGE_BLOCK.captures(line) {
            return Some(format!(
                "{}with {}({}):{}",
                &caps["indent"], CONVERGE_MARKER, &caps["var"], &caps["rest"]
            ));
        }

        None
    }
}

/// Triple-quote delimiter still open at the end of `line`
///
/// Single-line strings and comments are not tracked; a `"""` inside either
/// is taken as a delimiter.
fn string_state_after(line: &str, mut open: Option<&'static str>) -> Option<&'static str> {
    let mut rest = line;
    loop {
        match open {
            Some(delimiter) => match rest.find(delimiter) {
                Some(index) => {
                    rest = &rest[index + delimiter.len()..];
                    open = None;
                }
                None => return open,
            },
            None => {
                let next = TRIPLE_QUOTES
                    .iter()
                    .filter_map(|d| rest.find(d).map(|index| (index, *d)))
                    .min_by_key(|(index, _)| *index);
                match next {
                    Some((index, delimiter)) => {
                        rest = &rest[index + delimiter.len()..];
                        open = Some(delimiter);
                    }
                    None => return None,
                }
            }
        }
    }
}
