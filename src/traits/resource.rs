//! Per-resource field tables.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::opt::Opt;
use crate::traits::Requester;

/// What a mapping routine needs to build nested objects.
///
/// Nested objects share the parent's requester and inherit its laziness
/// preference.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub requester: &'a Arc<dyn Requester>,
    pub lazy: Opt<bool>,
}

/// The typed field table of one resource type.
///
/// `Default` must produce a table whose fields are all
/// [`Attribute::NotFetched`].
pub trait Resource: Default + Send + Sync + 'static {
    /// Resource type name, used in diagnostics and errors.
    const NAME: &'static str;

    /// Map a JSON attribute map onto the fields.
    ///
    /// Must only touch fields whose key is present, must be idempotent, and
    /// must never fail: values of the wrong shape are stored as
    /// [`Attribute::Bad`].
    fn use_attributes(&mut self, ctx: &Context<'_>, attributes: &Map<String, Value>);

    /// Identity fields shown by `repr()`. Must not require any fetch.
    fn repr_fields(&self) -> Vec<(&'static str, Value)>;
}

/// A resource that can fetch its own full representation.
pub trait CompletableResource: Resource {
    /// The canonical URL of the resource.
    fn url(&self) -> &Attribute<String>;
}

/// Render a peeked attribute for `repr()`.
pub(crate) fn repr_value<T: Clone + Into<Value>>(attr: &Attribute<T>) -> Value {
    attr.as_value().cloned().map(Into::into).unwrap_or(Value::Null)
}
