//! Queryable field paths of an index mapping.
//!
//! Flattens an Elasticsearch mapping document (as returned by the
//! get-mapping API or used at index creation) into dotted field paths, so
//! callers can offer or check field names before building conditions.

use serde_json::Value;

/// A typed leaf field of a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    /// Dotted path, e.g. `address.city`.
    pub path: String,
    /// Mapping type, e.g. `text`, `keyword`, `date`.
    pub field_type: String,
}

/// Extracts every typed field path from a mapping document, sorted by path.
///
/// A document covering several indices yields the union of their fields;
/// a path mapped identically in more than one index is listed once.
///
/// Wrapper levels (index name, `mappings`) are skipped until the first
/// `properties` object. Object fields contribute their name to the path of
/// their children. A leaf with a `fields.keyword` sub-field also yields
/// `<path>.keyword` of type `keyword`.
pub fn field_paths(mapping: &Value) -> Vec<FieldPath> {
    let mut paths = Vec::new();
    collect(mapping, &mut paths);
    paths.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.field_type.cmp(&b.field_type))
    });
    paths.dedup();
    paths
}

/// Like [`field_paths`], starting at a dotted sub-path such as
/// `"my-index.mappings"`. A missing start yields an empty list.
pub fn field_paths_from(mapping: &Value, start: &str) -> Vec<FieldPath> {
    let node = start
        .split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(mapping, |node, segment| node.get(segment));

    match node {
        Some(node) => field_paths(node),
        None => Vec::new(),
    }
}

fn collect(node: &Value, paths: &mut Vec<FieldPath>) {
    if let Some(properties) = node.get("properties") {
        collect_fields(properties, "", paths);
        return;
    }

    if let Some(children) = node.as_object() {
        for child in children.values() {
            collect(child, paths);
        }
    }
}

fn collect_fields(properties: &Value, prefix: &str, paths: &mut Vec<FieldPath>) {
    let Some(fields) = properties.as_object() else {
        return;
    };

    for (name, definition) in fields {
        let path = join(prefix, name);

        if let Some(nested) = definition.get("properties") {
            collect_fields(nested, &path, paths);
            continue;
        }

        let Some(field_type) = definition.get("type").and_then(Value::as_str) else {
            continue;
        };
        if definition.pointer("/fields/keyword").is_some() {
            paths.push(FieldPath {
                path: format!("{}.keyword", path),
                field_type: "keyword".to_string(),
            });
        }
        paths.push(FieldPath {
            path,
            field_type: field_type.to_string(),
        });
    }
}

fn join(current: &str, key: &str) -> String {
    if current.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", current, key)
    }
}
