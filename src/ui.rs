use crate::dom::Document;
use crate::models::PageNode;

pub fn render_page(document: &Document) -> String {
    let snapshot = document.to_snapshot();
    let mut body = String::new();
    if snapshot.tag == "body" {
        if !snapshot.text.is_empty() {
            body.push_str("  ");
            body.push_str(&escape_text(&snapshot.text));
            body.push('\n');
        }
        for child in &snapshot.children {
            render_node(child, 1, &mut body);
        }
    } else {
        render_node(&snapshot, 1, &mut body);
    }
    PAGE_HTML.replace("{{BODY}}", body.trim_end())
}

fn render_node(node: &PageNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&node.tag);
    if let Some(id) = &node.id {
        push_attribute(out, "id", id);
    }
    if !node.classes.is_empty() {
        push_attribute(out, "class", &node.classes.join(" "));
    }
    for (name, value) in &node.attributes {
        push_attribute(out, name, value);
    }
    out.push('>');

    if node.children.is_empty() {
        out.push_str(&escape_text(&node.text));
    } else {
        out.push('\n');
        if !node.text.is_empty() {
            out.push_str(&"  ".repeat(depth + 1));
            out.push_str(&escape_text(&node.text));
            out.push('\n');
        }
        for child in &node.children {
            render_node(child, depth + 1, out);
        }
        out.push_str(&indent);
    }

    out.push_str("</");
    out.push_str(&node.tag);
    out.push_str(">\n");
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
</head>
<body>
{{BODY}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_markup_with_escaping() {
        let doc = Document::from_snapshot(
            &PageNode::new("body").child(
                PageNode::new("article")
                    .id("post-1")
                    .child(PageNode::new("h2").text("Tom & <Jerry>"))
                    .child(
                        PageNode::new("button")
                            .class("like-button")
                            .class("text-gray-500")
                            .attr("data-note", "say \"hi\"")
                            .child(PageNode::new("span").class("likes-count").text("3")),
                    ),
            ),
        );

        let html = render_page(&doc);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<article id="post-1">"#));
        assert!(html.contains("<h2>Tom &amp; &lt;Jerry&gt;</h2>"));
        assert!(html.contains(r#"<button class="like-button text-gray-500" data-note="say &quot;hi&quot;">"#));
        assert!(html.contains(r#"<span class="likes-count">3</span>"#));
        assert!(!html.contains("{{BODY}}"));
    }
}
