use crate::binder::{BindContext, Binder, DomEvent};
use crate::config::FieldMapping;
use form_state::{option_value, selected_option};
use html::Id;

#[derive(Clone, Debug)]
pub struct PlaceholderBinding {
    pub template_field: String,
    pub select: String,
    pub target: String,
    /// `{token}` → option attribute.
    pub tokens: Vec<FieldMapping>,
}

/// Renders a template field with `{token}`s filled from the selected option's attributes.
pub struct PlaceholderTextBinder {
    target_dom_id: String,
    template: Id,
    select: Id,
    target: Id,
    tokens: Vec<(String, String)>,
}

impl PlaceholderTextBinder {
    pub fn bind(cx: &mut BindContext<'_>, spec: &PlaceholderBinding) -> Option<Self> {
        let template = cx.resolve(&spec.template_field)?;
        let select = cx.resolve(&spec.select)?;
        let target = cx.resolve(&spec.target)?;
        let binder = Self {
            target_dom_id: spec.target.clone(),
            template,
            select,
            target,
            tokens: spec.tokens.iter().map(|m| (m.token(), m.attribute.clone())).collect(),
        };
        binder.render(cx);
        Some(binder)
    }

    fn render(&self, cx: &mut BindContext<'_>) {
        let template = cx.form.get(self.template).unwrap_or_default();
        let option = selected_option(cx.doc, cx.form, self.select)
            .filter(|&opt| !option_value(cx.doc, opt).is_empty());
        let text = match option {
            Some(opt) => {
                let values: Vec<(&str, Option<&str>)> = self
                    .tokens
                    .iter()
                    .map(|(token, attr)| (token.as_str(), cx.doc.attribute(opt, attr)))
                    .collect();
                substitute(template, &values)
            }
            None => template.to_string(),
        };
        cx.doc.set_text_content(self.target, &text);
    }
}

impl Binder for PlaceholderTextBinder {
    fn target_id(&self) -> &str {
        &self.target_dom_id
    }

    fn handle_event(&mut self, cx: &mut BindContext<'_>, event: &DomEvent) -> bool {
        let ours = match event {
            DomEvent::Input(id) | DomEvent::Change(id) => *id == self.template || *id == self.select,
            _ => false,
        };
        if ours {
            self.render(cx);
        }
        ours
    }
}

/// Replace every occurrence of each token that has a value, in one left-to-right pass so
/// substituted text is never rescanned. Tokens without a value stay literal.
pub fn substitute(template: &str, values: &[(&str, Option<&str>)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'scan: while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        for (token, value) in values {
            if let (Some(value), true) = (value, rest.starts_with(token)) {
                out.push_str(value);
                rest = &rest[token.len()..];
                continue 'scan;
            }
        }
        out.push('{');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::substitute;

    const TOKENS: [&str; 3] = ["{mom_name}", "{dad_name}", "{birth_date}"];

    fn fill(template: &str, mom: Option<&str>, dad: Option<&str>, born: Option<&str>) -> String {
        let values = [(TOKENS[0], mom), (TOKENS[1], dad), (TOKENS[2], born)];
        substitute(template, &values)
    }

    #[test]
    fn fills_all_occurrences() {
        assert_eq!(
            fill("Born on {birth_date} to {mom_name} and {dad_name}", Some("Bella"), Some("Rex"), Some("2024-01-01")),
            "Born on 2024-01-01 to Bella and Rex"
        );
        assert_eq!(fill("{mom_name}/{mom_name}", Some("Bella"), None, None), "Bella/Bella");
    }

    #[test]
    fn missing_values_leave_tokens() {
        assert_eq!(
            fill("{mom_name} x {dad_name}", Some("Bella"), None, None),
            "Bella x {dad_name}"
        );
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        assert_eq!(fill("{mom_name}", Some("{dad_name}"), Some("Rex"), None), "{dad_name}");
    }

    #[test]
    fn stray_braces_pass_through() {
        assert_eq!(fill("{ {unknown} {", Some("A"), Some("B"), None), "{ {unknown} {");
    }
}
