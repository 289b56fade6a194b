//! Cssize and placeholder removal — pipeline stages 6 and 7 (§4.6).

mod hoist;
mod media_merge;
mod placeholder;

pub use hoist::hoist;
pub use media_merge::merge_adjacent_media;
pub use placeholder::remove_unused_placeholders;

/// Runs hoisting followed by media-query merging — the two cssize
/// sub-passes that together implement "promote at-rules, merge media
/// queries, hoist declarations out of parent rules" (§4.6 item 6).
pub fn cssize(stmts: Vec<sass_parse::ast::Stmt>) -> Vec<sass_parse::ast::Stmt> {
    merge_adjacent_media(hoist(stmts))
}
