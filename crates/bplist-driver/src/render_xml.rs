use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::tree::Node;

const XML_PROLOG: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);

/// Apple XML property list renderer.
///
/// The root node sits directly inside `<plist>`; every nesting level
/// adds one tab.
///
/// ```text
/// <?xml version="1.0" encoding="UTF-8"?>
/// <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "...">
/// <plist version="1.0">
/// <dict>
///     <key>name</key>
///     <string>value</string>
/// </dict>
/// </plist>
/// ```
///
/// Element mapping:
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────┐
/// │ Node             │ XML                                          │
/// ├──────────────────┼──────────────────────────────────────────────┤
/// │ Null             │ <null/>                                      │
/// │ Bool             │ <true/> / <false/>                           │
/// │ Int              │ <integer>n</integer>                         │
/// │ Float32/Float64  │ <real>x</real> (nan, +infinity, -infinity)   │
/// │ Date             │ <date>YYYY-MM-DDTHH:MM:SSZ</date>            │
/// │ Data             │ <data>base64</data>                          │
/// │ String           │ <string>escaped</string>                     │
/// │ Uid              │ <dict><key>CF$UID</key><integer>n</integer>  │
/// │ Array            │ <array>..</array>, empty as <array/>         │
/// │ Dict             │ <dict><key>k</key>value..</dict>, or <dict/> │
/// └──────────────────┴──────────────────────────────────────────────┘
/// ```
pub struct XmlRenderer;

impl XmlRenderer {
    /// Render a complete document, prolog included, ending in a newline.
    pub fn render(root: &Node<'_>) -> String {
        let mut out = String::from(XML_PROLOG);
        write_node(&mut out, root, 0);
        out.push_str("</plist>\n");
        out
    }
}

fn write_node(out: &mut String, node: &Node<'_>, depth: usize) {
    let indent = "\t".repeat(depth);
    match node {
        Node::Null => {
            let _ = writeln!(out, "{indent}<null/>");
        }
        Node::Bool(true) => {
            let _ = writeln!(out, "{indent}<true/>");
        }
        Node::Bool(false) => {
            let _ = writeln!(out, "{indent}<false/>");
        }
        Node::Int(i) => {
            let _ = writeln!(out, "{indent}<integer>{i}</integer>");
        }
        Node::Float32(f) => {
            let _ = writeln!(out, "{indent}<real>{}</real>", real_text(f64::from(*f), f.to_string()));
        }
        Node::Float64(f) => {
            let _ = writeln!(out, "{indent}<real>{}</real>", real_text(*f, f.to_string()));
        }
        Node::Date(date) => {
            let _ = writeln!(out, "{indent}<date>{date}</date>");
        }
        Node::Data(bytes) => {
            let _ = writeln!(out, "{indent}<data>{}</data>", STANDARD.encode(bytes));
        }
        Node::String(s) => {
            let _ = writeln!(out, "{indent}<string>{}</string>", xml_escape(s));
        }
        Node::Uid(uid) => {
            let _ = writeln!(out, "{indent}<dict>");
            let _ = writeln!(out, "{indent}\t<key>CF$UID</key>");
            let _ = writeln!(out, "{indent}\t<integer>{uid}</integer>");
            let _ = writeln!(out, "{indent}</dict>");
        }
        Node::Array(items) if items.is_empty() => {
            let _ = writeln!(out, "{indent}<array/>");
        }
        Node::Array(items) => {
            let _ = writeln!(out, "{indent}<array>");
            for item in items {
                write_node(out, item, depth + 1);
            }
            let _ = writeln!(out, "{indent}</array>");
        }
        Node::Dict(map) if map.is_empty() => {
            let _ = writeln!(out, "{indent}<dict/>");
        }
        Node::Dict(map) => {
            let _ = writeln!(out, "{indent}<dict>");
            for (key, value) in map {
                let _ = writeln!(out, "{indent}\t<key>{}</key>", xml_escape(key));
                write_node(out, value, depth + 1);
            }
            let _ = writeln!(out, "{indent}</dict>");
        }
    }
}

/// Text of a `<real>`; finite values use Rust's shortest round-trip
/// form passed in `finite`.
fn real_text(value: f64, finite: String) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "+infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-infinity".to_string()
    } else {
        finite
    }
}

/// Escape XML special characters in element text. C0 controls other
/// than tab, LF and CR cannot appear in XML 1.0 at all, so they become
/// U+FFFD.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use bplist_types::PlistDate;
    use indexmap::IndexMap;

    use super::*;

    fn body(rendered: &str) -> &str {
        rendered
            .strip_prefix(XML_PROLOG)
            .and_then(|rest| rest.strip_suffix("</plist>\n"))
            .unwrap()
    }

    #[test]
    fn prolog_and_scalar_root() {
        let rendered = XmlRenderer::render(&Node::String("Hi"));
        assert!(rendered.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist"));
        assert_eq!(body(&rendered), "<string>Hi</string>\n");
    }

    #[test]
    fn nested_containers_use_tabs() {
        let mut map = IndexMap::new();
        map.insert("list".to_string(), Node::Array(vec![Node::Bool(true), Node::Int(42)]));
        map.insert("empty".to_string(), Node::Dict(IndexMap::new()));
        let rendered = XmlRenderer::render(&Node::Dict(map));
        assert_eq!(
            body(&rendered),
            "<dict>\n\t<key>list</key>\n\t<array>\n\t\t<true/>\n\t\t<integer>42</integer>\n\t</array>\n\t<key>empty</key>\n\t<dict/>\n</dict>\n"
        );
    }

    #[test]
    fn escapes_text_and_keys() {
        let mut map = IndexMap::new();
        map.insert("a<b".to_string(), Node::String("Tom & \"Jerry\""));
        let rendered = XmlRenderer::render(&Node::Dict(map));
        assert!(rendered.contains("<key>a&lt;b</key>"));
        assert!(rendered.contains("<string>Tom &amp; &quot;Jerry&quot;</string>"));
    }

    #[test]
    fn data_date_and_uid() {
        let rendered = XmlRenderer::render(&Node::Array(vec![
            Node::Data(b"hello"),
            Node::Date(PlistDate::from_seconds(0.0)),
            Node::Uid(7),
        ]));
        assert_eq!(
            body(&rendered),
            "<array>\n\t<data>aGVsbG8=</data>\n\t<date>2001-01-01T00:00:00Z</date>\n\t<dict>\n\t\t<key>CF$UID</key>\n\t\t<integer>7</integer>\n\t</dict>\n</array>\n"
        );
    }

    #[test]
    fn reals_and_specials() {
        assert!(XmlRenderer::render(&Node::Float32(0.1)).contains("<real>0.1</real>"));
        assert!(XmlRenderer::render(&Node::Float64(-2.5)).contains("<real>-2.5</real>"));
        assert!(XmlRenderer::render(&Node::Float64(f64::NAN)).contains("<real>nan</real>"));
        assert!(XmlRenderer::render(&Node::Float64(f64::INFINITY)).contains("<real>+infinity</real>"));
        assert!(XmlRenderer::render(&Node::Float32(f32::NEG_INFINITY)).contains("<real>-infinity</real>"));
    }

    #[test]
    fn null_and_empty_array() {
        let rendered = XmlRenderer::render(&Node::Array(vec![Node::Null, Node::Array(vec![])]));
        assert_eq!(body(&rendered), "<array>\n\t<null/>\n\t<array/>\n</array>\n");
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(xml_escape("a\u{1}b\u{1F}c"), "a\u{FFFD}b\u{FFFD}c");
        assert_eq!(xml_escape("tab\tlf\ncr\r"), "tab\tlf\ncr\r");
        assert_eq!(xml_escape("del\u{7F}"), "del\u{7F}");
        let rendered = XmlRenderer::render(&Node::String("\u{0}<"));
        assert!(rendered.contains("<string>\u{FFFD}&lt;</string>"));
    }
}
