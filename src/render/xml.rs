//! XML rendering of a JSON value tree.
//!
//! Mappings become elements, sequences repeat the enclosing tag, scalars
//! become text nodes. Two conventions carry over from the data this crate
//! is used with:
//!
//! - a mapping whose only key is `"value"` collapses to its text content;
//! - a nested `"attrs"` mapping turns into XML attributes on the element.
//!
//! The input must have exactly one root key.

use serde_json::Value;

use crate::error::{RenderError, RenderResult};

use super::{escape_text, scalar_text};

/// Render a value as an XML document with a UTF-8 declaration.
pub fn to_xml(value: &Value) -> RenderResult<String> {
    to_xml_with_encoding(value, "UTF-8")
}

/// Render a value as an XML document with an explicit encoding label.
pub fn to_xml_with_encoding(value: &Value, encoding: &str) -> RenderResult<String> {
    let map = value.as_object().ok_or(RenderError::NonMappingRoot)?;
    if map.len() != 1 {
        return Err(RenderError::MultipleRoots(map.len()));
    }

    let mut out = format!("<?xml version=\"1.0\" encoding=\"{}\"?>", encoding);
    for (tag, nested) in map {
        write_element(&mut out, tag, nested);
    }
    Ok(out)
}

/// Append the element(s) for one tag/value pair.
///
/// Sequences emit one sibling element per item under the same tag.
fn write_element(out: &mut String, tag: &str, value: &Value) {
    // {"value": x} collapses to its content.
    let value = match value.as_object() {
        Some(map) if map.len() == 1 && map.contains_key("value") => &map["value"],
        _ => value,
    };

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, tag, item);
            }
        }
        Value::Object(map) => {
            out.push('<');
            out.push_str(tag);
            if let Some(attrs) = map.get("attrs").and_then(|a| a.as_object()) {
                for (name, attr_value) in attrs {
                    let text = match attr_value.as_object() {
                        Some(nested) => scalar_text(nested.get("value").unwrap_or(&Value::Null)),
                        None => scalar_text(attr_value),
                    };
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_text(&text));
                    out.push('"');
                }
            }
            out.push('>');
            for (child_tag, child) in map {
                if child_tag != "attrs" {
                    write_element(out, child_tag, child);
                }
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        scalar => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            out.push_str(&escape_text(&scalar_text(scalar)));
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
