//! The Function Environment Builder (§4.6 item 1, §4.8).
//!
//! Functions are keyed by name *and* arity so that a host or built-in
//! function can register a generic fallback alongside arity-specific
//! overloads — `rgba($color, $alpha)` and `rgba($r, $g, $b, $a)` are two
//! distinct registrations of the same name. Lookup tries the
//! arity-specific key first and falls back to the generic one.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::functions::{BuiltinFn, HostFn};

/// A registered callable: either a built-in implemented in this crate,
/// or a host callback supplied through `Context` (§6).
#[derive(Clone)]
pub enum FunctionEntry {
    Builtin(BuiltinFn),
    Host(Arc<HostFn>),
}

/// Builds the key for an arity-specific registration: `"name[f]{arity}"`.
fn specific_key(name: &str, arity: usize) -> String {
    format!("{name}[f]{arity}")
}

/// Builds the key for the generic (arity-agnostic) registration:
/// `"name[f]"`.
fn generic_key(name: &str) -> String {
    format!("{name}[f]")
}

/// The function environment: a flat namespace shared read-mostly across
/// the compilation (wrapped in `parking_lot::RwLock` by callers that need
/// to mutate it after construction, e.g. to add per-compile host
/// functions before the driver runs).
#[derive(Clone, Default)]
pub struct Environment {
    entries: FxHashMap<String, FunctionEntry>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in with no fixed arity: always the fallback for
    /// calls to `name` that don't match a more specific registration.
    pub fn register_builtin(&mut self, name: &str, f: BuiltinFn) {
        self.entries.insert(generic_key(name), FunctionEntry::Builtin(f));
    }

    /// Register a built-in overload for a specific argument count.
    pub fn register_builtin_arity(&mut self, name: &str, arity: usize, f: BuiltinFn) {
        self.entries
            .insert(specific_key(name, arity), FunctionEntry::Builtin(f));
    }

    /// Register a host-supplied function (§6 `HostFunction`).
    pub fn register_host(&mut self, name: &str, f: Arc<HostFn>) {
        self.entries.insert(generic_key(name), FunctionEntry::Host(f));
    }

    /// Look up a callable for `name` called with `argc` arguments. An
    /// arity-specific registration, if present, wins over the generic
    /// one — this is the whole of the overload mechanism; there is no
    /// signature matching beyond argument count.
    pub fn lookup(&self, name: &str, argc: usize) -> Option<&FunctionEntry> {
        self.entries
            .get(&specific_key(name, argc))
            .or_else(|| self.entries.get(&generic_key(name)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn ok_fn(_args: &[Value]) -> Result<Value, String> {
        Ok(Value::Bool(true))
    }

    fn other_fn(_args: &[Value]) -> Result<Value, String> {
        Ok(Value::Bool(false))
    }

    #[test]
    fn arity_specific_registration_wins_over_generic() {
        let mut env = Environment::new();
        env.register_builtin("rgba", ok_fn);
        env.register_builtin_arity("rgba", 4, other_fn);

        let two_arg = env.lookup("rgba", 2).expect("generic fallback");
        let four_arg = env.lookup("rgba", 4).expect("specific overload");

        match (two_arg, four_arg) {
            (FunctionEntry::Builtin(a), FunctionEntry::Builtin(b)) => {
                assert_eq!(a(&[]).unwrap(), Value::Bool(true));
                assert_eq!(b(&[]).unwrap(), Value::Bool(false));
            }
            _ => panic!("expected builtin entries"),
        }
    }

    #[test]
    fn unknown_function_is_none() {
        let env = Environment::new();
        assert!(env.lookup("nope", 1).is_none());
    }
}
