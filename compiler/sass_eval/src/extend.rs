//! The selector extender (§4.6 item 4): after Expand, every `@extend`
//! must match at least one selector elsewhere in the (expanded) tree,
//! unless marked `!optional`.
//!
//! Matching here is textual-equality on the rendered selector string,
//! not full CSS selector-combinator matching — selector algebra is
//! explicitly out of scope (§1); this module only audits that extends
//! resolve to *something*.

use sass_parse::ast::Stmt;

/// Collects the set of selectors every extend must be checked against,
/// then walks the tree again reporting the first unsatisfied,
/// non-optional `@extend`.
pub fn check_extends(stmts: &[Stmt]) -> Result<(), String> {
    let mut selectors = Vec::new();
    collect_selectors(stmts, &mut selectors);
    audit_extends(stmts, &selectors)
}

fn collect_selectors(stmts: &[Stmt], out: &mut Vec<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Rule(rule) => {
                out.push(rule.selector.clone());
                collect_selectors(&rule.body, out);
            }
            Stmt::AtMedia(media) => collect_selectors(&media.body, out),
            _ => {}
        }
    }
}

fn audit_extends(stmts: &[Stmt], selectors: &[String]) -> Result<(), String> {
    for stmt in stmts {
        match stmt {
            Stmt::AtExtend(extend) => {
                let satisfied = selectors.iter().any(|s| selector_matches(s, &extend.selector));
                if !satisfied && !extend.optional {
                    return Err(format!(
                        "unsatisfied @extend \"{}\": no matching selector found",
                        extend.selector
                    ));
                }
            }
            Stmt::Rule(rule) => audit_extends(&rule.body, selectors)?,
            Stmt::AtMedia(media) => audit_extends(&media.body, selectors)?,
            _ => {}
        }
    }
    Ok(())
}

/// A rule selector "matches" an extend target when the target appears
/// as one of its comma-separated components, ignoring surrounding
/// whitespace.
fn selector_matches(rule_selector: &str, target: &str) -> bool {
    rule_selector
        .split(',')
        .map(str::trim)
        .any(|part| part == target.trim())
}

#[cfg(test)]
mod tests {
    use sass_ir::ByteSpan;
    use sass_parse::ast::{AtExtend, Rule};

    use super::*;

    fn rule(selector: &str) -> Stmt {
        Stmt::Rule(Rule {
            selector: selector.to_string(),
            body: Vec::new(),
            span: ByteSpan::DUMMY,
        })
    }

    fn extend(selector: &str, optional: bool) -> Stmt {
        Stmt::AtExtend(AtExtend {
            selector: selector.to_string(),
            optional,
            span: ByteSpan::DUMMY,
        })
    }

    #[test]
    fn matching_extend_is_satisfied() {
        let stmts = vec![rule(".btn, .link"), extend(".btn", false)];
        assert!(check_extends(&stmts).is_ok());
    }

    #[test]
    fn unmatched_required_extend_is_an_error() {
        let stmts = vec![rule(".btn"), extend(".missing", false)];
        assert!(check_extends(&stmts).is_err());
    }

    #[test]
    fn unmatched_optional_extend_is_fine() {
        let stmts = vec![rule(".btn"), extend(".missing", true)];
        assert!(check_extends(&stmts).is_ok());
    }
}
