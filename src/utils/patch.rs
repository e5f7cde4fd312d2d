//! Ordered field-level patch documents.
//!
//! A PATCH body is a JSON array in the shape of RFC 6902:
//!
//! ```json
//! [
//!   { "op": "replace", "path": "/name", "value": "Kirkstall Abbey" },
//!   { "op": "remove", "path": "/description" }
//! ]
//! ```
//!
//! Only `add`, `replace` and `remove` are understood, and only on the paths
//! named by [`PatchPath`]. Anything else fails to deserialize, including an
//! `add` or `replace` without a `value` member. `"value": null` clears the
//! field.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PatchPath {
    #[serde(rename = "/name", alias = "/Name")]
    Name,
    #[serde(rename = "/description", alias = "/Description")]
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add {
        path: PatchPath,
        #[serde(deserialize_with = "nullable")]
        value: Option<String>,
    },
    Replace {
        path: PatchPath,
        #[serde(deserialize_with = "nullable")]
        value: Option<String>,
    },
    Remove { path: PatchPath },
}

// An `Option` field deserialized through a function is required, but may be null.
fn nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl PatchOperation {
    /// The field this operation targets and the value it leaves behind.
    /// `None` clears the field.
    pub fn into_change(self) -> (PatchPath, Option<String>) {
        match self {
            PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
                (path, value)
            }
            PatchOperation::Remove { path } => (path, None),
        }
    }
}

/// Something a patch document can be applied to.
pub trait Patchable {
    fn set_field(&mut self, path: PatchPath, value: Option<String>);

    /// Apply `operations` in order.
    fn apply_patch(&mut self, operations: Vec<PatchOperation>) {
        for operation in operations {
            let (path, value) = operation.into_change();
            self.set_field(path, value);
        }
    }
}
