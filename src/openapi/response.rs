use crate::example::{Example, Header, MergedResponse, ScalarType};
use crate::openapi::{is_json, ANY_MEDIA_TYPE};
use indexmap::IndexMap;
use openapiv3 as oa;
use openapiv3::ReferenceOr;
use serde_json::Value;

fn scalar_schema(typ: ScalarType) -> oa::Schema {
    match typ {
        ScalarType::String => oa::Schema::new_string(),
    }
}

pub fn create_header(header: &Header) -> oa::Header {
    oa::Header {
        description: Some(header.description.clone()).filter(|d| !d.is_empty()),
        style: oa::HeaderStyle::Simple,
        required: false,
        deprecated: None,
        format: oa::ParameterSchemaOrContent::Schema(ReferenceOr::Item(scalar_schema(header.typ))),
        example: None,
        examples: Default::default(),
        extensions: Default::default(),
    }
}

/// JSON bodies become structured examples; everything else stays a string.
pub fn example_value(example: &Example) -> Option<Value> {
    let text = example.value.as_ref()?;
    let json = example.media_type.as_deref().is_some_and(is_json);
    if json {
        if let Ok(value) = serde_json::from_str(text) {
            return Some(value);
        }
    }
    Some(Value::String(text.clone()))
}

pub fn create_response(merged: &MergedResponse) -> oa::Response {
    let headers = merged
        .headers
        .iter()
        .map(|h| (h.name.clone(), ReferenceOr::Item(create_header(h))))
        .collect();
    let mut content: IndexMap<String, oa::MediaType> = IndexMap::new();
    for example in &merged.examples {
        if example.media_type.is_none() && example.value.is_none() {
            continue;
        }
        let media_type = example
            .media_type
            .clone()
            .unwrap_or_else(|| ANY_MEDIA_TYPE.to_string());
        let entry = content.entry(media_type).or_default();
        if entry.example.is_none() {
            entry.example = example_value(example);
        }
    }
    oa::Response {
        headers,
        content,
        ..oa::Response::default()
    }
}
