//! The evaluation-time value type passed to built-in and host functions.
//!
//! A deliberately small subset of Sass's runtime values — enough to
//! demonstrate the function catalogue and the overload-stub mechanism
//! (§4.8); full numeric-unit arithmetic and color-space conversions are
//! built-in-function *semantics*, out of scope per §1.

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(NumberValue),
    Str { content: String, quoted: bool },
    Color { r: u8, g: u8, b: u8, alpha: f64 },
    Bool(bool),
    List(Vec<Value>),
    Null,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberValue {
    pub value: f64,
    pub unit: Unit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    None,
    Percent,
    Px,
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number(NumberValue {
            value,
            unit: Unit::None,
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str { .. } => "string",
            Value::Color { .. } => "color",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Null => "null",
        }
    }

    pub fn render(&self) -> String {
        match self {
            Value::Number(n) => match n.unit {
                Unit::None => format!("{}", n.value),
                Unit::Percent => format!("{}%", n.value),
                Unit::Px => format!("{}px", n.value),
            },
            Value::Str { content, quoted } => {
                if *quoted {
                    format!("\"{content}\"")
                } else {
                    content.clone()
                }
            }
            Value::Color { r, g, b, alpha } if (*alpha - 1.0).abs() < f64::EPSILON => {
                format!("#{r:02x}{g:02x}{b:02x}")
            }
            Value::Color { r, g, b, alpha } => format!("rgba({r}, {g}, {b}, {alpha})"),
            Value::Bool(b) => b.to_string(),
            Value::List(items) => items
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Null => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_color_renders_as_hex() {
        let c = Value::Color {
            r: 255,
            g: 0,
            b: 0,
            alpha: 1.0,
        };
        assert_eq!(c.render(), "#ff0000");
    }

    #[test]
    fn translucent_color_renders_as_rgba() {
        let c = Value::Color {
            r: 255,
            g: 0,
            b: 0,
            alpha: 0.5,
        };
        assert_eq!(c.render(), "rgba(255, 0, 0, 0.5)");
    }
}
