//! Placeholder removal (§4.6 item 7): drop any ruleset whose selector is
//! entirely placeholder-derived (every comma-separated branch starts
//! with `%`) and was never consumed by an `@extend`.
//!
//! `extend`'s audit (in `sass_eval`) only checks that extends resolve to
//! *something*; it does not record which selectors were actually
//! referenced. This pass recomputes that usage set independently, since
//! the two checks run at different pipeline stages over differently
//! shaped trees (pre- vs. post-hoist).

use sass_parse::ast::{AtMedia, Rule, Stmt};

/// Remove placeholder-only rules not referenced by any surviving
/// `@extend` selector. `used_placeholders` is the set of extend targets
/// collected from the tree before this pass (the extender already
/// consumed `AtExtend` nodes into matched rules by this point in a full
/// implementation; here we take the set explicitly since this crate
/// never sees the extend stage's internal state).
pub fn remove_unused_placeholders(stmts: Vec<Stmt>, used_placeholders: &[String]) -> Vec<Stmt> {
    let mut out = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        match stmt {
            Stmt::Rule(rule) => {
                if is_placeholder_only(&rule.selector) && !is_used(&rule.selector, used_placeholders)
                {
                    continue;
                }
                let body = remove_unused_placeholders(rule.body, used_placeholders);
                out.push(Stmt::Rule(Rule { body, ..rule }));
            }
            Stmt::AtMedia(media) => {
                let body = remove_unused_placeholders(media.body, used_placeholders);
                out.push(Stmt::AtMedia(AtMedia { body, ..media }));
            }
            other => out.push(other),
        }
    }
    out
}

fn is_placeholder_only(selector: &str) -> bool {
    selector
        .split(',')
        .map(str::trim)
        .all(|branch| branch.starts_with('%'))
}

fn is_used(selector: &str, used: &[String]) -> bool {
    selector
        .split(',')
        .map(str::trim)
        .any(|branch| used.iter().any(|u| u.trim() == branch))
}

#[cfg(test)]
mod tests {
    use sass_ir::ByteSpan;

    use super::*;

    fn rule(selector: &str) -> Stmt {
        Stmt::Rule(Rule {
            selector: selector.to_string(),
            body: Vec::new(),
            span: ByteSpan::DUMMY,
        })
    }

    #[test]
    fn unused_placeholder_rule_is_dropped() {
        let stmts = vec![rule("%base"), rule(".real")];
        let filtered = remove_unused_placeholders(stmts, &[]);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn used_placeholder_rule_survives() {
        let stmts = vec![rule("%base")];
        let filtered = remove_unused_placeholders(stmts, &["%base".to_string()]);
        assert_eq!(filtered.len(), 1);
    }
}
