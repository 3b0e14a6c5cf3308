//! The resource object base.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::opt::Opt;
use crate::traits::{Context, Headers, Requester, Resource};

/// A resource object: a typed field table plus what is needed to build
/// more objects from it.
///
/// Objects of resources that have no URL of their own (search results,
/// summaries) are used as-is; everything else is wrapped in
/// [`Completable`](super::Completable).
pub struct Object<R> {
    pub(super) requester: Arc<dyn Requester>,
    pub(super) lazy: Opt<bool>,
    pub(super) headers: Headers,
    pub(super) raw: Map<String, Value>,
    pub(super) data: R,
}

impl<R: Resource> Object<R> {
    /// Construct from seed attributes. Never performs I/O.
    pub fn new(
        requester: Arc<dyn Requester>,
        headers: Headers,
        attributes: &Map<String, Value>,
        lazy: Opt<bool>,
    ) -> Self {
        let mut object = Self {
            requester,
            lazy,
            headers,
            raw: Map::new(),
            data: R::default(),
        };
        object.apply_attributes(attributes);
        object
    }

    /// Map a nested JSON object into a child sharing the parent's requester
    /// and laziness. `null` maps to `None`.
    pub fn embedded_opt(ctx: &Context<'_>, value: &Value) -> Attribute<Option<Self>> {
        match value {
            Value::Null => Attribute::Value(None),
            Value::Object(attributes) => Attribute::Value(Some(Self::new(
                Arc::clone(ctx.requester),
                Headers::new(),
                attributes,
                ctx.lazy,
            ))),
            other => Attribute::Bad {
                value: other.clone(),
                expected: R::NAME,
            },
        }
    }

    /// Merge `attributes` into the object.
    ///
    /// Only fields present in the map are overwritten, so this may be called
    /// again whenever more data becomes available.
    pub fn apply_attributes(&mut self, attributes: &Map<String, Value>) {
        let ctx = Context {
            requester: &self.requester,
            lazy: self.lazy,
        };
        self.data.use_attributes(&ctx, attributes);
        for (key, value) in attributes {
            self.raw.insert(key.clone(), value.clone());
        }
    }

    /// Diagnostic representation built from identity fields only.
    pub fn repr(&self) -> String {
        let mut fields = self.data.repr_fields();
        fields.sort_by_key(|(key, _)| *key);
        let params = fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", R::NAME, params)
    }

    /// The laziness preference handed to objects built from this one.
    pub fn lazy_preference(&self) -> Opt<bool> {
        self.lazy
    }

    /// The requester shared with objects built from this one.
    pub fn requester(&self) -> &Arc<dyn Requester> {
        &self.requester
    }

    /// Headers of the last response applied to this object.
    pub fn raw_headers(&self) -> &Headers {
        &self.headers
    }

    /// All attributes received so far, merged.
    pub fn raw_data(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub(crate) fn store_headers(&mut self, headers: Headers) {
        self.headers = headers;
    }

    pub(crate) fn field<T>(
        &self,
        name: &'static str,
        field: fn(&R) -> &Attribute<T>,
    ) -> Result<&T> {
        field(&self.data).get(R::NAME, name)
    }
}

impl<R: Resource> fmt::Debug for Object<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}
