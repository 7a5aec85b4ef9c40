use crate::example::{ExampleReader, MergedResponse};
use crate::openapi::{create_response, status_code};
use crate::resource::ResourceResolver;
use indexmap::map::Entry;
use openapiv3 as oa;
use openapiv3::ReferenceOr;
use tracing::{debug, info, warn};

/// Attach merged example responses to an operation.
///
/// An inline response that already exists for the status code keeps its description;
/// headers and content entries of the same name are replaced. Returns how many
/// responses were attached.
pub fn apply_examples(operation: &mut oa::Operation, responses: &[MergedResponse]) -> usize {
    let mut applied = 0;
    for merged in responses {
        let Some(code) = status_code(&merged.status_code) else {
            warn!(code = %merged.status_code, "Skipping example with non-numeric status code");
            continue;
        };
        let created = create_response(merged);
        match operation.responses.responses.entry(code) {
            Entry::Occupied(e) => match e.into_mut() {
                ReferenceOr::Item(existing) => {
                    existing.headers.extend(created.headers);
                    existing.content.extend(created.content);
                }
                slot => {
                    debug!(code = %merged.status_code, "Replacing response reference with examples");
                    *slot = ReferenceOr::Item(created);
                }
            },
            Entry::Vacant(e) => {
                e.insert(ReferenceOr::Item(created));
            }
        }
        applied += 1;
    }
    applied
}

fn operations_mut(item: &mut oa::PathItem) -> impl Iterator<Item = &mut oa::Operation> {
    [
        &mut item.get,
        &mut item.put,
        &mut item.post,
        &mut item.delete,
        &mut item.options,
        &mut item.head,
        &mut item.patch,
        &mut item.trace,
    ]
    .into_iter()
    .flatten()
}

/// Read examples for every operation that has an `operationId` and attach them.
/// Returns the number of operations that received at least one response.
pub fn apply_to_spec<R: ResourceResolver>(spec: &mut oa::OpenAPI, reader: &ExampleReader<R>) -> usize {
    let mut operations = 0;
    for (path, item) in spec.paths.iter_mut() {
        let ReferenceOr::Item(item) = item else {
            debug!(path = %path, "Skipping path reference");
            continue;
        };
        for operation in operations_mut(item) {
            let Some(name) = operation.operation_id.clone() else {
                debug!(path = %path, "Skipping operation without operationId");
                continue;
            };
            let responses = reader.read(&name);
            if responses.is_empty() {
                continue;
            }
            let n = apply_examples(operation, &responses);
            info!(operation = %name, path = %path, n, "Attached example responses");
            operations += 1;
        }
    }
    operations
}
