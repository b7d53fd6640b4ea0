use serde::Serialize;

use crate::fields::SelectField;

/// The element that owns the rendered field pairs.
///
/// Children are only ever replaced wholesale: cleared, then appended in order.
pub trait Container: Send {
    fn clear(&mut self);
    fn append(&mut self, field: SelectField);
    fn children(&self) -> &[SelectField];
}

/// In-memory container, renderable as an HTML fragment or JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldContainer {
    children: Vec<SelectField>,
}

impl FieldContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Render every child `<select>`, one per line.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        for field in &self.children {
            out.push_str(&render_select(field));
            out.push('\n');
        }
        out
    }
}

impl Container for FieldContainer {
    fn clear(&mut self) {
        self.children.clear();
    }

    fn append(&mut self, field: SelectField) {
        self.children.push(field);
    }

    fn children(&self) -> &[SelectField] {
        &self.children
    }
}

pub fn render_select(field: &SelectField) -> String {
    let mut out = format!(
        r#"<select name="{}" class="{}">"#,
        html_escape(&field.name),
        field.classes.join(" ")
    );
    for option in &field.options {
        out.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            html_escape(&option.value),
            html_escape(&option.text)
        ));
    }
    out.push_str("</select>");
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn clear_drops_all_children() {
        let mut container = FieldContainer::new();
        container.append(SelectField::relationship(1));
        container.append(SelectField::relationship(2));
        assert_eq!(container.len(), 2);
        container.clear();
        assert!(container.is_empty());
        assert_eq!(container.render_html(), "");
    }

    #[test]
    fn renders_escaped_options() {
        let names: BTreeSet<String> = ["Acme & Co".to_string(), "\"Q\" <Ltd>".to_string()]
            .into_iter()
            .collect();
        let mut container = FieldContainer::new();
        container.append(SelectField::company(1, &names));

        let html = container.render_html();
        assert_eq!(
            html,
            concat!(
                r#"<select name="company-1" class="form-select form-control mb-2">"#,
                r#"<option value="&quot;Q&quot; &lt;Ltd&gt;">&quot;Q&quot; &lt;Ltd&gt;</option>"#,
                r#"<option value="Acme &amp; Co">Acme &amp; Co</option>"#,
                "</select>\n"
            )
        );
    }

    #[test]
    fn renders_relationship_select() {
        let html = render_select(&SelectField::relationship(2));
        assert!(html.starts_with(r#"<select name="type-2""#));
        assert!(html.contains(r#"<option value="customer">customer</option><option value="partnership">"#));
        assert!(html.ends_with(r#"<option value="competitor">competitor</option></select>"#));
    }

    #[test]
    fn serializes_to_json() {
        let mut container = FieldContainer::new();
        container.append(SelectField::relationship(1));
        let json = serde_json::to_value(&container).unwrap();
        assert_eq!(json["children"][0]["name"], "type-1");
        assert_eq!(json["children"][0]["kind"], "type");
        assert_eq!(json["children"][0]["options"][3]["value"], "competitor");
    }
}
