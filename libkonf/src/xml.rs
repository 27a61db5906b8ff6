//! XML serialization of the constant environment.
//!
//! The output mirrors a classic DOM pretty-printer: an XML declaration, a
//! `configuration` root, and one two-space-indented `constant` element per
//! entry with its text content inline on the same line. Dictionary and
//! array values carry their content as compact JSON with non-ASCII
//! characters left literal.

use crate::parser::Environment;
use crate::value::Value;

/// Serialize `constants` as a pretty-printed XML document.
///
/// Entries appear in environment order. Each element carries a `name` and a
/// `type` attribute; the type is the value's [`type_name`](Value::type_name).
/// An empty environment produces a self-closing root, as does an element
/// whose text content is empty (the empty-string constant). The document
/// ends with a newline.
pub fn to_xml(constants: &Environment) -> String {
    let mut out = String::from("<?xml version=\"1.0\" ?>\n");

    if constants.is_empty() {
        out.push_str("<configuration/>\n");
        return out;
    }

    out.push_str("<configuration>\n");
    for (name, value) in constants {
        let text = content_text(value);
        if text.is_empty() {
            out.push_str(&format!(
                "  <constant name=\"{}\" type=\"{}\"/>\n",
                escape_xml(name),
                value.type_name()
            ));
        } else {
            out.push_str(&format!(
                "  <constant name=\"{}\" type=\"{}\">{}</constant>\n",
                escape_xml(name),
                value.type_name(),
                escape_xml(&text)
            ));
        }
    }
    out.push_str("</configuration>\n");
    out
}

/// The text content for one constant element, before XML escaping.
fn content_text(value: &Value) -> String {
    match value {
        Value::Dict(_) | Value::Array(_) => encode_json(value),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => s.clone(),
    }
}

/// Compact JSON with `", "` element and `": "` key separators.
fn encode_json(value: &Value) -> String {
    match value {
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => encode_json_string(s),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(encode_json).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Dict(dict) => {
            let items: Vec<String> = dict
                .iter()
                .map(|(k, v)| format!("{}: {}", encode_json_string(k), encode_json(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

/// JSON string escaping. Non-ASCII characters stay literal.
fn encode_json_string(s: &str) -> String {
    let mut result = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0c' => result.push_str("\\f"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Float text: shortest round-trip form, with `.0` appended when the form
/// has neither `.` nor `e`, so a float never prints as a bare integer.
fn format_float(f: f64) -> String {
    let s = format!("{}", f);
    if s.contains('.') || s.contains('e') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Escape character data the way a DOM writer does, for both element text
/// and attribute values: `&`, `<`, `"`, `>`.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use num_bigint::BigInt;

    fn env(entries: Vec<(&str, Value)>) -> Environment {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn test_empty_environment_self_closes() {
        assert_eq!(
            to_xml(&Environment::new()),
            "<?xml version=\"1.0\" ?>\n<configuration/>\n"
        );
    }

    #[test]
    fn test_scalar_constants() {
        let env = env(vec![
            ("T", Value::Bool(true)),
            ("N", Value::from(8080i64)),
            ("F", Value::Float(1.0)),
            ("S", Value::from("hello")),
        ]);
        assert_eq!(
            to_xml(&env),
            "<?xml version=\"1.0\" ?>\n\
             <configuration>\n\
             \x20 <constant name=\"T\" type=\"boolean\">true</constant>\n\
             \x20 <constant name=\"N\" type=\"number\">8080</constant>\n\
             \x20 <constant name=\"F\" type=\"number\">1.0</constant>\n\
             \x20 <constant name=\"S\" type=\"string\">hello</constant>\n\
             </configuration>\n"
        );
    }

    #[test]
    fn test_empty_string_self_closes() {
        let env = env(vec![("E", Value::from(""))]);
        assert_eq!(
            to_xml(&env),
            "<?xml version=\"1.0\" ?>\n\
             <configuration>\n\
             \x20 <constant name=\"E\" type=\"string\"/>\n\
             </configuration>\n"
        );
    }

    #[test]
    fn test_dict_content_is_quote_escaped_json() {
        let mut dict = IndexMap::new();
        dict.insert("A".to_string(), Value::from(1i64));
        dict.insert(
            "B".to_string(),
            Value::Array(vec![Value::from(1i64), Value::from(2i64), Value::from("s")]),
        );
        let env = env(vec![("X", Value::Dict(dict))]);
        assert_eq!(
            to_xml(&env),
            "<?xml version=\"1.0\" ?>\n\
             <configuration>\n\
             \x20 <constant name=\"X\" type=\"dict\">\
             {&quot;A&quot;: 1, &quot;B&quot;: [1, 2, &quot;s&quot;]}\
             </constant>\n\
             </configuration>\n"
        );
    }

    #[test]
    fn test_empty_containers() {
        let env = env(vec![
            ("G", Value::Array(vec![])),
            ("D", Value::Dict(IndexMap::new())),
        ]);
        assert_eq!(
            to_xml(&env),
            "<?xml version=\"1.0\" ?>\n\
             <configuration>\n\
             \x20 <constant name=\"G\" type=\"array\">[]</constant>\n\
             \x20 <constant name=\"D\" type=\"dict\">{}</constant>\n\
             </configuration>\n"
        );
    }

    #[test]
    fn test_text_markup_escaped() {
        let env = env(vec![("S", Value::from("a<b>&c"))]);
        assert!(to_xml(&env).contains(">a&lt;b&gt;&amp;c</constant>"));
    }

    #[test]
    fn test_non_ascii_stays_literal() {
        let env = env(vec![("R", Value::from("причал"))]);
        assert!(to_xml(&env).contains(">причал</constant>"));
    }

    #[test]
    fn test_big_integer_exact() {
        let n: BigInt = "123456789012345678901234567890".parse().unwrap();
        let env = env(vec![("BIG", Value::Integer(n))]);
        assert!(to_xml(&env)
            .contains(">123456789012345678901234567890</constant>"));
    }

    #[test]
    fn test_float_never_prints_bare_integer() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(-0.0), "-0.0");
    }

    #[test]
    fn test_nested_json_shapes() {
        let mut inner = IndexMap::new();
        inner.insert("C".to_string(), Value::Float(2.5));
        let mut outer = IndexMap::new();
        outer.insert(
            "B".to_string(),
            Value::Array(vec![Value::Dict(inner), Value::from("привет")]),
        );
        let env = env(vec![("NEST", Value::Dict(outer))]);
        assert!(to_xml(&env).contains(
            "{&quot;B&quot;: [{&quot;C&quot;: 2.5}, &quot;привет&quot;]}"
        ));
    }

    #[test]
    fn test_json_escapes_in_nested_strings() {
        let env = env(vec![(
            "L",
            Value::Array(vec![Value::from("tab\there"), Value::from("back\\slash")]),
        )]);
        assert!(to_xml(&env).contains(r#"[&quot;tab\there&quot;, &quot;back\\slash&quot;]"#));
    }
}
