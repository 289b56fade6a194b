//! Rule hoisting (§4.6 item 6): flatten nested rulesets into flat CSS
//! rules by joining parent and child selectors with a descendant
//! combinator, and promote any `@media` nested inside a rule to a
//! sibling of that rule (CSS has no native rule-inside-rule nesting).

use sass_parse::ast::{AtMedia, Rule, Stmt};

/// Flatten `stmts` at the top level. Declarations remain attached to the
/// rule they were written in; nested rules become new top-level
/// siblings with combined selectors.
pub fn hoist(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let mut out = Vec::new();
    for stmt in stmts {
        hoist_stmt(stmt, None, &mut out);
    }
    out
}

fn hoist_stmt(stmt: Stmt, parent_selector: Option<&str>, out: &mut Vec<Stmt>) {
    match stmt {
        Stmt::Rule(rule) => hoist_rule(rule, parent_selector, out),
        Stmt::AtMedia(media) => {
            let body = hoist(media.body);
            out.push(Stmt::AtMedia(AtMedia { body, ..media }));
        }
        other => out.push(other),
    }
}

fn hoist_rule(rule: Rule, parent_selector: Option<&str>, out: &mut Vec<Stmt>) {
    let selector = match parent_selector {
        Some(parent) => join_selectors(parent, &rule.selector),
        None => rule.selector.clone(),
    };

    let mut own_body = Vec::new();
    let mut nested = Vec::new();

    for child in rule.body {
        match child {
            Stmt::Rule(_) | Stmt::AtMedia(_) => nested.push(child),
            other => own_body.push(other),
        }
    }

    out.push(Stmt::Rule(Rule {
        selector: selector.clone(),
        body: own_body,
        span: rule.span,
    }));

    for child in nested {
        hoist_stmt(child, Some(&selector), out);
    }
}

/// Join a parent and child selector with a descendant combinator,
/// expanding each comma-separated branch of both sides (the selector
/// cross-product). Full `&`-parent-reference rewriting is part of
/// selector algebra, out of scope (§1); this only handles the plain
/// nesting case.
fn join_selectors(parent: &str, child: &str) -> String {
    let parents: Vec<&str> = parent.split(',').map(str::trim).collect();
    let children: Vec<&str> = child.split(',').map(str::trim).collect();
    let mut combined = Vec::with_capacity(parents.len() * children.len());
    for p in &parents {
        for c in &children {
            combined.push(format!("{p} {c}"));
        }
    }
    combined.join(", ")
}
