// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

/// Rename keys written by older builds.
///
/// `chat.system_prompt` became `chat.preamble`; an explicit `preamble` wins.
pub(super) fn migrate_on_load(mut value: Value) -> Value {
    if let Some(chat) = value.get_mut("chat").and_then(Value::as_object_mut) {
        if let Some(old) = chat.remove("system_prompt") {
            chat.entry("preamble").or_insert(old);
        }
    }
    value
}

/// Deep-merge two JSON values.
/// `base` is existing file content, `overlay` is serialized current struct.
/// Overlay values take priority.
pub(super) fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = if let Some(base_val) = base_map.remove(&key) {
                    deep_merge(base_val, overlay_val)
                } else {
                    overlay_val
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}
