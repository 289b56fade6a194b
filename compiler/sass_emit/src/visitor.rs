//! Double dispatch over the AST (§9 "Double dispatch over the AST"): a
//! tagged variant per node kind (`sass_parse::ast::Stmt`) plus a visitor
//! trait whose methods take each variant. [`crate::Emitter`] is the
//! trait's sole implementor; the indirection exists so the emission
//! contract is expressed independently of `Emitter`'s internal state.

use sass_parse::ast::{AtExtend, AtImport, AtMedia, CommentNode, Declaration, Rule};

pub trait Visitor {
    fn visit_rule(&mut self, rule: &Rule);
    fn visit_declaration(&mut self, decl: &Declaration);
    fn visit_at_import(&mut self, import: &AtImport);
    fn visit_css_import(&mut self, text: &str);
    fn visit_at_media(&mut self, media: &AtMedia);
    fn visit_at_extend(&mut self, extend: &AtExtend);
    fn visit_comment(&mut self, comment: &CommentNode);
    fn visit_raw(&mut self, text: &str);
}
