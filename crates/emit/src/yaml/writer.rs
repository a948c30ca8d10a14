use super::Node;
use super::scalar::{self, Context, Scalar};

/// Render a document. The root mapping's `on` key is written bare, as
/// GitHub expects, even though YAML 1.1 reads it as a boolean.
pub(crate) fn write_document(root: &Node, header: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(header) = header {
        for line in header.lines() {
            if line.is_empty() {
                out.push_str("#\n");
            } else {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    match root {
        Node::Map(entries) if !entries.is_empty() => write_entries(&mut out, entries, 0, true),
        Node::Seq(items) if !items.is_empty() => write_items(&mut out, items, 0),
        other => {
            let mut value = String::new();
            write_value(&mut value, other, 0);
            out.push_str(value.trim_start_matches(' '));
        }
    }

    out
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

fn write_key(out: &mut String, key: &str, root: bool) {
    if (root && key == "on") || !scalar::needs_quotes(key, Context::Block) {
        out.push_str(key);
    } else {
        out.push_str(&scalar::quote(key));
    }
    out.push(':');
}

fn write_entries(out: &mut String, entries: &[(String, Node)], indent: usize, root: bool) {
    for (key, value) in entries {
        pad(out, indent);
        write_key(out, key, root);
        write_value(out, value, indent);
    }
}

fn write_items(out: &mut String, items: &[Node], indent: usize) {
    for item in items {
        pad(out, indent);
        out.push('-');
        match item {
            Node::Map(entries) if !entries.is_empty() => {
                out.push(' ');
                let (first_key, first_value) = &entries[0];
                write_key(out, first_key, false);
                write_value(out, first_value, indent + 2);
                write_entries(out, &entries[1..], indent + 2, false);
            }
            other => write_value(out, other, indent),
        }
    }
}

/// Writes whatever follows `key:` or `-` on the current line, through the
/// end of the value. `indent` is the column of the key or dash.
fn write_value(out: &mut String, value: &Node, indent: usize) {
    match value {
        Node::Map(entries) if entries.is_empty() => out.push_str(" {}\n"),
        Node::Map(entries) => {
            out.push('\n');
            write_entries(out, entries, indent + 2, false);
        }
        Node::Seq(items) if items.is_empty() => out.push_str(" []\n"),
        Node::Seq(items) => {
            out.push('\n');
            write_items(out, items, indent + 2);
        }
        Node::FlowSeq(items) => {
            out.push_str(" [");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if scalar::needs_quotes(item, Context::Flow) {
                    out.push_str(&scalar::quote(item));
                } else {
                    out.push_str(item);
                }
            }
            out.push_str("]\n");
        }
        Node::Null => out.push_str(" null\n"),
        Node::Bool(b) => {
            out.push_str(if *b { " true\n" } else { " false\n" });
        }
        Node::Int(i) => {
            out.push(' ');
            out.push_str(&i.to_string());
            out.push('\n');
        }
        Node::Float(f) => {
            out.push(' ');
            out.push_str(&scalar::float(*f));
            out.push('\n');
        }
        Node::Str(s) => match scalar::string(s, Context::Block) {
            Scalar::Inline(text) => {
                out.push(' ');
                out.push_str(&text);
                out.push('\n');
            }
            Scalar::Block { header, lines } => {
                out.push(' ');
                out.push_str(header);
                out.push('\n');
                for line in lines {
                    if !line.is_empty() {
                        pad(out, indent + 2);
                        out.push_str(&line);
                    }
                    out.push('\n');
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&str, Node)>) -> Node {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_nested_layout() {
        let doc = map(vec![
            ("name", Node::str("CI")),
            ("on", map(vec![("push", Node::empty_map())])),
            (
                "jobs",
                map(vec![(
                    "test",
                    map(vec![
                        ("runs-on", Node::str("ubuntu-latest")),
                        (
                            "steps",
                            Node::Seq(vec![
                                map(vec![("uses", Node::str("actions/checkout@v4"))]),
                                map(vec![
                                    ("name", Node::str("Test")),
                                    ("run", Node::str("cargo test")),
                                ]),
                            ]),
                        ),
                    ]),
                )]),
            ),
        ]);

        assert_eq!(
            write_document(&doc, None),
            "name: CI\n\
             on:\n  push: {}\n\
             jobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      \
             - uses: actions/checkout@v4\n      \
             - name: Test\n        run: cargo test\n"
        );
    }

    #[test]
    fn test_on_is_bare_only_at_root() {
        let doc = map(vec![
            ("on", Node::empty_map()),
            ("env", map(vec![("on", Node::str("x"))])),
        ]);
        assert_eq!(
            write_document(&doc, None),
            "on: {}\nenv:\n  \"on\": x\n"
        );
    }

    #[test]
    fn test_block_literal_indentation() {
        let doc = map(vec![(
            "steps",
            Node::Seq(vec![map(vec![(
                "run",
                Node::str("echo one\n\necho two\n"),
            )])]),
        )]);
        assert_eq!(
            write_document(&doc, None),
            "steps:\n  - run: |\n      echo one\n\n      echo two\n"
        );
    }

    #[test]
    fn test_flow_sequence() {
        let doc = map(vec![(
            "needs",
            Node::FlowSeq(vec!["build".into(), "lint,fmt".into()]),
        )]);
        assert_eq!(
            write_document(&doc, None),
            "needs: [build, \"lint,fmt\"]\n"
        );
    }

    #[test]
    fn test_scalars_and_empty_collections() {
        let doc = map(vec![
            ("a", Node::Null),
            ("b", Node::Bool(false)),
            ("c", Node::Int(-3)),
            ("d", Node::Float(2.0)),
            ("e", Node::Seq(Vec::new())),
            ("f", Node::Seq(vec![Node::Seq(vec![Node::Int(1)])])),
        ]);
        assert_eq!(
            write_document(&doc, None),
            "a: null\nb: false\nc: -3\nd: 2.0\ne: []\nf:\n  -\n    - 1\n"
        );
    }

    #[test]
    fn test_header_comment() {
        let doc = map(vec![("version", Node::Int(2))]);
        assert_eq!(
            write_document(&doc, Some("Generated\n\nby hand")),
            "# Generated\n#\n# by hand\nversion: 2\n"
        );
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(write_document(&Node::empty_map(), None), "{}\n");
    }
}
