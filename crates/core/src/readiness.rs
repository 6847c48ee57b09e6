// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ready annotation

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Set `key` to `value`, keeping every other annotation.
///
/// Returns false when the annotation already had that value.
pub fn mark_ready(meta: &mut ObjectMeta, key: &str, value: &str) -> bool {
    let annotations = meta.annotations.get_or_insert_with(Default::default);
    if annotations.get(key).map(String::as_str) == Some(value) {
        return false;
    }
    annotations.insert(key.to_string(), value.to_string());
    true
}

pub fn is_ready(meta: &ObjectMeta, key: &str, value: &str) -> bool {
    meta.annotations
        .as_ref()
        .and_then(|a| a.get(key))
        .is_some_and(|v| v == value)
}
