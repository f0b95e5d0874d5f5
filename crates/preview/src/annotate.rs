//! Copies per-record data from a JSON payload embedded in the page onto the matching
//! `<option>`s of a select, as `data-*` attributes placeholder binders can read.

use crate::config::AnnotatorConfig;
use crate::error::{PreviewError, PreviewResult};
use form_state::{option_value, options_of};
use html::Document;
use serde_json::Value;

pub struct DataAnnotator<'c> {
    config: &'c AnnotatorConfig,
}

impl<'c> DataAnnotator<'c> {
    pub fn new(config: &'c AnnotatorConfig) -> Self {
        Self { config }
    }

    /// Annotate the configured select. Returns how many options were annotated; `Ok(0)`
    /// when the payload element or the select is missing. A malformed payload annotates
    /// nothing.
    pub fn annotate(&self, doc: &mut Document) -> PreviewResult<usize> {
        let cfg = self.config;
        let Some(payload) = doc.get_element_by_id(&cfg.payload_element) else {
            log::debug!(target: "preview", "no #{} payload, skipping annotation", cfg.payload_element);
            return Ok(0);
        };
        let Some(select) = doc.get_element_by_id(&cfg.select) else {
            log::debug!(target: "preview", "no #{} select, skipping annotation", cfg.select);
            return Ok(0);
        };

        let text = doc.text_content(payload).unwrap_or_default();
        let records = parse_records(&text, &cfg.payload_element)?;

        let options: Vec<_> = options_of(doc, select)
            .into_iter()
            .map(|opt| (opt, option_value(doc, opt)))
            .collect();

        let mut annotated = 0;
        for record in &records {
            let Some(key) = record.get(&cfg.key_field).and_then(scalar_text) else {
                log::debug!(target: "preview", "record without usable {:?}, skipped", cfg.key_field);
                continue;
            };
            let Some(&(option, _)) = options.iter().find(|(_, value)| *value == key) else {
                log::trace!(target: "preview", "no option for record {key}");
                continue;
            };
            for mapping in &cfg.fields {
                if let Some(value) = record.get(&mapping.field).and_then(scalar_text) {
                    doc.set_attribute(option, &mapping.attribute, &value);
                }
            }
            annotated += 1;
        }
        log::debug!(target: "preview", "annotated {annotated} option(s) of #{}", cfg.select);
        Ok(annotated)
    }
}

fn parse_records(text: &str, element: &str) -> PreviewResult<Vec<serde_json::Map<String, Value>>> {
    let value: Value = serde_json::from_str(text).map_err(|source| PreviewError::MalformedPayload {
        element: element.to_string(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(PreviewError::PayloadNotArray {
            element: element.to_string(),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(PreviewError::RecordNotObject {
                element: element.to_string(),
                index,
            }),
        })
        .collect()
}

/// Text form of a scalar field; `null`, arrays and objects carry nothing to attach.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
