use crate::{Document, Id, NodeKind};

/// Indented one-line-per-node dump, capped at `cap` nodes.
pub fn outline(doc: &Document, cap: usize) -> Vec<String> {
    fn walk(doc: &Document, id: Id, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match doc.kind(id) {
            Some(NodeKind::Document) => out.push(format!("{indent}#document")),
            Some(NodeKind::Element { name, attributes }) => {
                let mut line = format!("{indent}<{name}");
                for (k, v) in attributes {
                    match v {
                        Some(v) => line.push_str(&format!(r#" {k}="{v}""#)),
                        None => line.push_str(&format!(" {k}")),
                    }
                }
                line.push('>');
                out.push(line);
            }
            Some(NodeKind::Text { text }) => {
                let t = text.replace('\n', " ").trim().to_string();
                if !t.is_empty() {
                    let show = if t.chars().count() > 40 {
                        format!("{}…", t.chars().take(40).collect::<String>())
                    } else {
                        t
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
            None => return,
        }
        for &child in doc.children(id) {
            walk(doc, child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(doc, doc.root(), 0, &mut out, &mut left);
    out
}

/// Short human label: `#id` when present, else the tag name with its node id.
pub fn label(doc: &Document, id: Id) -> String {
    match doc.attr(id, "id").filter(|v| !v.is_empty()) {
        Some(v) => format!("#{v}"),
        None => match doc.tag_name(id) {
            Some(name) => format!("{name}@{}", id.0),
            None => format!("node@{}", id.0),
        },
    }
}
