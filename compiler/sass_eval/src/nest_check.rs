//! Nesting validation (§4.6 items 2 and 5): a bare `Declaration` is only
//! legal inside a `Rule` or `@media` body, never at stylesheet top level.
//! Run once before Expand (catching declarations written directly at
//! the top of the file that imports couldn't have introduced) and once
//! after (catching declarations spliced in from an imported partial that
//! only makes sense nested at the import site — though under this
//! driver's splice-in-place semantics that case cannot actually arise;
//! the second pass exists to make that invariant explicit and checked
//! rather than assumed).

use sass_parse::ast::Stmt;

pub fn check_top_level(stmts: &[Stmt]) -> Result<(), String> {
    for stmt in stmts {
        if let Stmt::Declaration(decl) = stmt {
            return Err(format!(
                "top-level declaration \"{}\" is not allowed outside a rule",
                decl.property
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sass_ir::ByteSpan;
    use sass_parse::ast::{Declaration, Value};

    use super::*;

    #[test]
    fn top_level_declaration_is_rejected() {
        let stmts = vec![Stmt::Declaration(Declaration {
            property: "color".to_string(),
            value: Value::Plain("red".to_string()),
            span: ByteSpan::DUMMY,
        })];
        assert!(check_top_level(&stmts).is_err());
    }

    #[test]
    fn top_level_rule_is_fine() {
        use sass_parse::ast::Rule;
        let stmts = vec![Stmt::Rule(Rule {
            selector: ".a".to_string(),
            body: Vec::new(),
            span: ByteSpan::DUMMY,
        })];
        assert!(check_top_level(&stmts).is_ok());
    }
}
