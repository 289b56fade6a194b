//! Media-query merging (§4.6 item 6): adjacent `@media` blocks carrying
//! an identical query string are merged into one, preserving statement
//! order. Non-adjacent blocks with the same query are left distinct —
//! merging across intervening rules would change cascade order.

use sass_parse::ast::Stmt;

pub fn merge_adjacent_media(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let mut out: Vec<Stmt> = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        if let Stmt::AtMedia(media) = &stmt {
            if let Some(Stmt::AtMedia(prev)) = out.last_mut() {
                if prev.query == media.query {
                    prev.body.extend(media.body.clone());
                    continue;
                }
            }
        }
        out.push(stmt);
    }
    out
}

#[cfg(test)]
mod tests {
    use sass_ir::ByteSpan;
    use sass_parse::ast::{AtMedia, Declaration, Value};

    use super::*;

    fn decl(prop: &str) -> Stmt {
        Stmt::Declaration(Declaration {
            property: prop.to_string(),
            value: Value::Plain("x".to_string()),
            span: ByteSpan::DUMMY,
        })
    }

    fn media(query: &str, body: Vec<Stmt>) -> Stmt {
        Stmt::AtMedia(AtMedia {
            query: query.to_string(),
            body,
            span: ByteSpan::DUMMY,
        })
    }

    #[test]
    fn adjacent_same_query_blocks_merge() {
        let stmts = vec![
            media("screen", vec![decl("color")]),
            media("screen", vec![decl("margin")]),
        ];
        let merged = merge_adjacent_media(stmts);
        assert_eq!(merged.len(), 1);
        let Stmt::AtMedia(m) = &merged[0] else {
            panic!("expected media")
        };
        assert_eq!(m.body.len(), 2);
    }

    #[test]
    fn non_adjacent_blocks_stay_separate() {
        let stmts = vec![
            media("screen", vec![decl("color")]),
            decl("unrelated"),
            media("screen", vec![decl("margin")]),
        ];
        let merged = merge_adjacent_media(stmts);
        assert_eq!(merged.len(), 3);
    }
}
