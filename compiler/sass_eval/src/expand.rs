//! Expand (§4.6 item 3): replace each `ImportStub` with the (already
//! expanded) statements of the sheet it points to, recursively.
//!
//! A stub whose target isn't in the registry signals a driver bug, not a
//! user error — the Loader Pipeline is responsible for ensuring every
//! stub it emits has a corresponding registry entry before Expand runs —
//! so it is reported as a plain `String` error rather than a `SassError`
//! kind of its own.

use sass_parse::ast::{AtMedia, Rule, Stmt};

use crate::registry::SheetRegistry;
use crate::stack::ensure_sufficient_stack;

/// Expand all `ImportStub` nodes in `stmts`, recursing into rule and
/// media bodies. Each recursive descent is wrapped in
/// `ensure_sufficient_stack` since both import depth and block nesting
/// depth are attacker/author controlled.
pub fn expand(stmts: Vec<Stmt>, registry: &SheetRegistry) -> Result<Vec<Stmt>, String> {
    ensure_sufficient_stack(|| expand_inner(stmts, registry))
}

fn expand_inner(stmts: Vec<Stmt>, registry: &SheetRegistry) -> Result<Vec<Stmt>, String> {
    let mut out = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        match stmt {
            Stmt::ImportStub(stub) => {
                let sheet = registry.get(&stub.abs_path).ok_or_else(|| {
                    format!(
                        "expand: no sheet registered for {}",
                        stub.abs_path.display()
                    )
                })?;
                let expanded = expand_inner(sheet.root.clone(), registry)?;
                out.extend(expanded);
            }
            Stmt::Rule(rule) => {
                let body = expand_inner(rule.body, registry)?;
                out.push(Stmt::Rule(Rule { body, ..rule }));
            }
            Stmt::AtMedia(media) => {
                let body = expand_inner(media.body, registry)?;
                out.push(Stmt::AtMedia(AtMedia { body, ..media }));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sass_ir::{ByteSpan, ResourceIndex};
    use sass_parse::ast::{Declaration, ImportStub, StyleSheet, Value};

    use super::*;

    fn decl(prop: &str) -> Stmt {
        Stmt::Declaration(Declaration {
            property: prop.to_string(),
            value: Value::Plain("red".to_string()),
            span: ByteSpan::DUMMY,
        })
    }

    #[test]
    fn splices_imported_statements_in_place() {
        let mut registry = SheetRegistry::new();
        let target_path = PathBuf::from("/_partial.scss");
        registry.insert(
            target_path.clone(),
            StyleSheet {
                resource: ResourceIndex::new(0),
                root: vec![decl("color")],
            },
        );

        let stmts = vec![
            Stmt::ImportStub(ImportStub {
                abs_path: target_path,
                resource: ResourceIndex::new(1),
                span: ByteSpan::DUMMY,
            }),
            decl("margin"),
        ];

        let expanded = expand(stmts, &registry).expect("expand succeeds");
        assert_eq!(expanded.len(), 2);
        assert!(matches!(&expanded[0], Stmt::Declaration(d) if d.property == "color"));
        assert!(matches!(&expanded[1], Stmt::Declaration(d) if d.property == "margin"));
    }

    #[test]
    fn unregistered_stub_is_an_error() {
        let registry = SheetRegistry::new();
        let stmts = vec![Stmt::ImportStub(ImportStub {
            abs_path: PathBuf::from("/missing.scss"),
            resource: ResourceIndex::new(0),
            span: ByteSpan::DUMMY,
        })];
        assert!(expand(stmts, &registry).is_err());
    }

    #[test]
    fn recurses_into_nested_rule_bodies() {
        let mut registry = SheetRegistry::new();
        let target_path = PathBuf::from("/_nested.scss");
        registry.insert(
            target_path.clone(),
            StyleSheet {
                resource: ResourceIndex::new(0),
                root: vec![decl("color")],
            },
        );

        let stmts = vec![Stmt::Rule(Rule {
            selector: ".a".to_string(),
            body: vec![Stmt::ImportStub(ImportStub {
                abs_path: target_path,
                resource: ResourceIndex::new(1),
                span: ByteSpan::DUMMY,
            })],
            span: ByteSpan::DUMMY,
        })];

        let expanded = expand(stmts, &registry).expect("expand succeeds");
        let Stmt::Rule(rule) = &expanded[0] else {
            panic!("expected rule")
        };
        assert_eq!(rule.body.len(), 1);
    }
}
