//! JSON serialization, compact and pretty.
//!
//! Output is canonical: object members print in byte-wise key order,
//! numbers keep the narrowest type observed at construction (longs as
//! base-10 integers, floats and doubles in shortest round-trippable
//! form), and strings escape through the same classification table the
//! parser's inverse uses. Pretty mode keeps arrays on one line with
//! spaced separators and breaks objects onto two-space-indented lines
//! only when they have more than one member.

use crate::number;
use crate::tables::ESCAPE_LITERAL;
use crate::utf8;
use crate::value::{JsonType, JsonValue};

/// Serialize `value` as compact JSON.
pub fn to_string(value: &JsonValue) -> String {
    let mut out = String::new();
    marshal(value, &mut out, false, 0);
    out
}

/// Serialize `value` with two-space indentation.
pub fn to_string_pretty(value: &JsonValue) -> String {
    let mut out = String::new();
    marshal(value, &mut out, true, 0);
    out
}

fn marshal(value: &JsonValue, out: &mut String, pretty: bool, indent: usize) {
    match value.json_type() {
        JsonType::Null => out.push_str("null"),
        JsonType::Bool => out.push_str(if value.get_bool() { "true" } else { "false" }),
        JsonType::Long => number::write_long(out, value.get_long()),
        JsonType::Float => number::write_float(out, value.get_float()),
        JsonType::Double => number::write_double(out, value.get_double()),
        JsonType::String => write_string(out, value.get_str()),
        JsonType::Array => {
            out.push('[');
            let mut first = true;
            for item in value.get_array() {
                if !first {
                    out.push(',');
                    if pretty {
                        out.push(' ');
                    }
                }
                first = false;
                marshal(item, out, pretty, indent);
            }
            out.push(']');
        }
        JsonType::Object => {
            let members = value.get_object();
            let breaks = pretty && members.len() > 1;
            out.push('{');
            let mut first = true;
            for (key, item) in members {
                if !first {
                    out.push(',');
                }
                first = false;
                if breaks {
                    out.push('\n');
                    push_indent(out, indent + 1);
                }
                write_string(out, key);
                out.push(':');
                if pretty {
                    out.push(' ');
                }
                marshal(item, out, pretty, if breaks { indent + 1 } else { indent });
            }
            if breaks {
                out.push('\n');
                push_indent(out, indent);
            }
            out.push('}');
        }
    }
}

fn push_indent(out: &mut String, levels: usize) {
    for _ in 0..levels {
        out.push_str("  ");
    }
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    escape_into(out, text);
    out.push('"');
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        let cp = ch as u32;
        if cp < 0x80 {
            match ESCAPE_LITERAL[cp as usize] {
                0 => out.push(ch),
                1 => out.push_str("\\t"),
                2 => out.push_str("\\n"),
                3 => out.push_str("\\r"),
                4 => out.push_str("\\f"),
                5 => out.push_str("\\\\"),
                6 => out.push_str("\\/"),
                7 => out.push_str("\\\""),
                _ => write_unicode_escape(out, cp),
            }
        } else {
            write_unicode_escape(out, cp);
        }
    }
}

// Code points above the BMP emit a surrogate pair, high unit first.
fn write_unicode_escape(out: &mut String, cp: u32) {
    let (high, low) = utf8::split_utf16(cp);
    push_hex_unit(out, high);
    if let Some(low) = low {
        push_hex_unit(out, low);
    }
}

fn push_hex_unit(out: &mut String, unit: u16) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out.push('\\');
    out.push('u');
    out.push(HEX[(unit >> 12 & 0xF) as usize] as char);
    out.push(HEX[(unit >> 8 & 0xF) as usize] as char);
    out.push(HEX[(unit >> 4 & 0xF) as usize] as char);
    out.push(HEX[(unit & 0xF) as usize] as char);
}
