//! Fixpoint Closure Analyzer
//!
//! Names a fixpoint body reads from its enclosing scope: referenced names
//! minus names bound inside the body minus the convergence variable.

use std::collections::BTreeSet;

use crate::errors::{Result, TranslateError};
use crate::shared::models::NodeKind;
use crate::shared::ports::SyntaxView;

#[derive(Debug, Default)]
struct NameUsage {
    referenced: BTreeSet<String>,
    assigned: BTreeSet<String>,
}

impl NameUsage {
    fn visit<N: SyntaxView>(&mut self, node: &N, location: &str) -> Result<()> {
        match node.kind() {
            NodeKind::Name => {
                self.referenced.insert(node.text().to_string());
            }
            NodeKind::KeywordArgument => {
                // the keyword itself is not a variable
                for value in node.children().iter().skip(1) {
                    self.visit(value, location)?;
                }
            }
            NodeKind::Assignment => {
                let (target, rest) = node.children().split_first().ok_or_else(|| {
                    TranslateError::malformed(node.kind(), location, "assignment without target")
                })?;
                if !target.is_name() {
                    return Err(TranslateError::malformed(
                        node.kind(),
                        location,
                        format!(
                            "only simple names can be assigned in a fixpoint block, found {}",
                            target.kind()
                        ),
                    ));
                }
                self.assigned.insert(target.text().to_string());
                for value in rest {
                    self.visit(value, location)?;
                }
            }
            NodeKind::FunctionDef | NodeKind::FixpointIterate => {
                // function name, parameters and convergence variable are all
                // bindings local to the body
                for child in node.children() {
                    if child.is_name() {
                        self.assigned.insert(child.text().to_string());
                    } else {
                        self.visit(child, location)?;
                    }
                }
            }
            _ => {
                for child in node.children() {
                    self.visit(child, location)?;
                }
            }
        }
        Ok(())
    }
}

/// Free variables of a fixpoint body, sorted
///
/// `body` is the block of a `FixpointIterate`; the result never contains
/// `convergence_var`. A non-name assignment target inside the body fails
/// the analysis.
pub fn analyze_closure_variables<N: SyntaxView>(
    body: &N,
    convergence_var: &str,
) -> Result<BTreeSet<String>> {
    let location = format!("converge {}", convergence_var);
    let mut usage = NameUsage::default();
    usage.visit(body, &location)?;

    let mut free: BTreeSet<String> = usage
        .referenced
        .difference(&usage.assigned)
        .cloned()
        .collect();
    free.remove(convergence_var);
    Ok(free)
}
