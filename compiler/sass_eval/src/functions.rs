//! Built-in function catalogue.
//!
//! One representative function per category named in §4.8 — color,
//! string, number, list, map (via list-of-pairs), selector,
//! introspection, boolean, misc — plus the `rgba` 2-/4-argument overload
//! pair that demonstrates the arity-specific registration mechanism.
//! Implementing the full Sass function library is explicitly out of
//! scope; these stand in for it.

use crate::environment::Environment;
use crate::value::{NumberValue, Unit, Value};

/// Signature for a built-in function: arguments in, a value or an error
/// message out. Errors are strings here and wrapped into a `SassError`
/// by the caller, which has the span/trace context a bare function body
/// doesn't.
pub type BuiltinFn = fn(&[Value]) -> Result<Value, String>;

/// Signature for a host-supplied function (§6 `HostFunction`): the same
/// shape, but boxed so the driver can hold an arbitrary closure supplied
/// through `Context`.
pub type HostFn = dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync;

/// Populate `env` with the built-in catalogue.
pub fn install_builtins(env: &mut Environment) {
    env.register_builtin("rgba", rgba_two_arg);
    env.register_builtin_arity("rgba", 2, rgba_two_arg);
    env.register_builtin_arity("rgba", 4, rgba_four_arg);
    env.register_builtin("to-upper-case", to_upper_case);
    env.register_builtin("percentage", percentage);
    env.register_builtin("length", length);
    env.register_builtin("map-get", map_get);
    env.register_builtin("selector-nest", selector_nest);
    env.register_builtin("type-of", type_of);
    env.register_builtin("not", not_fn);
    env.register_builtin("if", if_fn);
}

/// `rgba($color, $alpha)` — adjusts the alpha channel of an existing
/// color. The generic registration also serves this arity since no
/// 2-specific overload differs from it.
fn rgba_two_arg(args: &[Value]) -> Result<Value, String> {
    let [color, alpha] = args else {
        return Err("rgba() with 2 arguments expects (color, alpha)".to_string());
    };
    let Value::Color { r, g, b, .. } = *color else {
        return Err("rgba(): first argument must be a color".to_string());
    };
    let Value::Number(NumberValue { value: a, .. }) = *alpha else {
        return Err("rgba(): second argument must be a number".to_string());
    };
    Ok(Value::Color { r, g, b, alpha: a })
}

/// `rgba($r, $g, $b, $a)` — constructs a color from four channels. A
/// distinct, arity-4-specific overload of the same name.
fn rgba_four_arg(args: &[Value]) -> Result<Value, String> {
    let [r, g, b, a] = args else {
        return Err("rgba() with 4 arguments expects (r, g, b, a)".to_string());
    };
    let channel = |v: &Value| -> Result<u8, String> {
        match v {
            Value::Number(NumberValue { value, .. }) => Ok(*value as u8),
            _ => Err("rgba(): color channels must be numbers".to_string()),
        }
    };
    let alpha = match a {
        Value::Number(NumberValue { value, .. }) => *value,
        _ => return Err("rgba(): alpha must be a number".to_string()),
    };
    Ok(Value::Color {
        r: channel(r)?,
        g: channel(g)?,
        b: channel(b)?,
        alpha,
    })
}

fn to_upper_case(args: &[Value]) -> Result<Value, String> {
    let [Value::Str { content, quoted }] = args else {
        return Err("to-upper-case() expects a single string argument".to_string());
    };
    Ok(Value::Str {
        content: content.to_uppercase(),
        quoted: *quoted,
    })
}

fn percentage(args: &[Value]) -> Result<Value, String> {
    let [Value::Number(NumberValue { value, unit: Unit::None })] = args else {
        return Err("percentage() expects a single unitless number".to_string());
    };
    Ok(Value::Number(NumberValue {
        value: value * 100.0,
        unit: Unit::Percent,
    }))
}

fn length(args: &[Value]) -> Result<Value, String> {
    let [value] = args else {
        return Err("length() expects exactly one argument".to_string());
    };
    let n = match value {
        Value::List(items) => items.len(),
        Value::Null => 0,
        _ => 1,
    };
    Ok(Value::number(n as f64))
}

/// A map is represented as a flat `List` of two-element `List` pairs —
/// there is no dedicated map value in this reduced catalogue.
fn map_get(args: &[Value]) -> Result<Value, String> {
    let [Value::List(pairs), key] = args else {
        return Err("map-get() expects (map, key)".to_string());
    };
    for pair in pairs {
        if let Value::List(kv) = pair {
            if kv.len() == 2 && &kv[0] == key {
                return Ok(kv[1].clone());
            }
        }
    }
    Ok(Value::Null)
}

fn selector_nest(args: &[Value]) -> Result<Value, String> {
    if args.is_empty() {
        return Err("selector-nest() expects at least one argument".to_string());
    }
    let joined = args
        .iter()
        .map(|v| v.render())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Value::Str {
        content: joined,
        quoted: false,
    })
}

fn type_of(args: &[Value]) -> Result<Value, String> {
    let [value] = args else {
        return Err("type-of() expects exactly one argument".to_string());
    };
    Ok(Value::Str {
        content: value.type_name().to_string(),
        quoted: false,
    })
}

fn not_fn(args: &[Value]) -> Result<Value, String> {
    let [value] = args else {
        return Err("not() expects exactly one argument".to_string());
    };
    Ok(Value::Bool(!is_truthy(value)))
}

fn if_fn(args: &[Value]) -> Result<Value, String> {
    let [cond, then_val, else_val] = args else {
        return Err("if() expects (condition, if-true, if-false)".to_string());
    };
    Ok(if is_truthy(cond) {
        then_val.clone()
    } else {
        else_val.clone()
    })
}

/// Sass truthiness: everything except `false` and `null` is truthy.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Bool(false) | Value::Null)
}
