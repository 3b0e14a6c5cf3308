//! Lazily completed resource objects.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{into_attributes, Object};
use crate::attribute::Attribute;
use crate::error::Result;
use crate::opt::Opt;
use crate::traits::{CompletableResource, Context, Headers, Requester};

/// A resource object that can complete itself.
///
/// An incomplete object holds only the attributes it was seeded with. The
/// first read of a field that has not been fetched issues one GET on the
/// object's own URL and applies the response; from then on the object is
/// complete and never fetches implicitly again.
///
/// The laziness preference is fixed at construction and is handed to every
/// object built from this one, unless the call that builds it overrides it.
pub struct Completable<R> {
    object: Object<R>,
    completed: bool,
}

impl<R: CompletableResource> Completable<R> {
    /// An incomplete object holding `attributes`. Never performs I/O.
    pub fn seeded(
        requester: Arc<dyn Requester>,
        attributes: &Map<String, Value>,
        lazy: Opt<bool>,
    ) -> Self {
        Self {
            object: Object::new(requester, Headers::new(), attributes, lazy),
            completed: false,
        }
    }

    /// A complete object built from a full representation of the resource,
    /// as returned by list endpoints and write operations.
    pub fn from_full(
        requester: Arc<dyn Requester>,
        headers: Headers,
        attributes: &Map<String, Value>,
        lazy: Opt<bool>,
    ) -> Self {
        Self {
            object: Object::new(requester, headers, attributes, lazy),
            completed: true,
        }
    }

    /// Build the child of an accessor call.
    ///
    /// The child's preference is `call` if present, otherwise `inherited`.
    /// Unless that preference is `Present(true)`, the child is fetched before
    /// it is returned.
    pub(crate) async fn spawn(
        requester: &Arc<dyn Requester>,
        inherited: Opt<bool>,
        call: Opt<bool>,
        seed: Map<String, Value>,
    ) -> Result<Self> {
        let lazy = call.or(inherited);
        let mut child = Self::seeded(Arc::clone(requester), &seed, lazy);
        if lazy.is_true() {
            tracing::debug!(resource = R::NAME, "built lazy object");
        } else {
            child.fetch().await?;
        }
        Ok(child)
    }

    /// Map a nested JSON object into an incomplete child sharing the
    /// parent's requester and preference.
    pub fn embedded(ctx: &Context<'_>, value: &Value) -> Attribute<Self> {
        match value {
            Value::Object(attributes) => {
                Attribute::Value(Self::seeded(Arc::clone(ctx.requester), attributes, ctx.lazy))
            }
            other => Attribute::Bad {
                value: other.clone(),
                expected: R::NAME,
            },
        }
    }

    /// Like [`Completable::embedded`], mapping `null` to `None`.
    pub fn embedded_opt(ctx: &Context<'_>, value: &Value) -> Attribute<Option<Self>> {
        match value {
            Value::Null => Attribute::Value(None),
            other => match Self::embedded(ctx, other) {
                Attribute::Value(child) => Attribute::Value(Some(child)),
                Attribute::Bad { value, expected } => Attribute::Bad { value, expected },
                Attribute::NotFetched => Attribute::NotFetched,
            },
        }
    }

    /// Map a JSON array of objects into incomplete children.
    pub fn embedded_list(ctx: &Context<'_>, value: &Value) -> Attribute<Vec<Self>> {
        let Value::Array(items) = value else {
            return Attribute::Bad {
                value: value.clone(),
                expected: "array",
            };
        };
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(attributes) => children.push(Self::seeded(
                    Arc::clone(ctx.requester),
                    attributes,
                    ctx.lazy,
                )),
                _ => {
                    return Attribute::Bad {
                        value: value.clone(),
                        expected: R::NAME,
                    }
                }
            }
        }
        Attribute::Value(children)
    }

    /// Whether the full representation has been applied.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The laziness preference fixed at construction.
    pub fn lazy_preference(&self) -> Opt<bool> {
        self.object.lazy_preference()
    }

    /// The requester shared with objects built from this one.
    pub fn requester(&self) -> &Arc<dyn Requester> {
        self.object.requester()
    }

    /// The canonical URL of the resource. Never fetches.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::NotPopulated`](crate::GithubError::NotPopulated)
    /// if the object was built without a URL.
    pub fn url(&self) -> Result<&str> {
        self.object
            .data
            .url()
            .get(R::NAME, "url")
            .map(String::as_str)
    }

    /// Diagnostic representation. Never fetches.
    pub fn repr(&self) -> String {
        self.object.repr()
    }

    /// Merge `attributes` into the object, e.g. from the response of a
    /// write operation. Does not change the completion state.
    pub fn apply_attributes(&mut self, attributes: &Map<String, Value>) {
        self.object.apply_attributes(attributes);
    }

    /// Headers of the last response applied to this object.
    pub fn raw_headers(&self) -> &Headers {
        self.object.raw_headers()
    }

    /// The `ETag` of the last response, if any.
    pub fn etag(&self) -> Option<&str> {
        self.object.raw_headers().get("etag").map(String::as_str)
    }

    /// The `Last-Modified` of the last response, if any.
    pub fn last_modified(&self) -> Option<&str> {
        self.object
            .raw_headers()
            .get("last-modified")
            .map(String::as_str)
    }

    /// All attributes received so far, completing the object first.
    ///
    /// # Errors
    ///
    /// Returns an error if completion is needed and fails.
    pub async fn raw_data(&mut self) -> Result<&Map<String, Value>> {
        self.complete_if_needed().await?;
        Ok(self.object.raw_data())
    }

    /// Fetch the full representation unless the object is already complete.
    ///
    /// # Errors
    ///
    /// Returns the requester's error; the object then stays incomplete and
    /// the next call retries.
    pub async fn complete_if_needed(&mut self) -> Result<()> {
        if !self.completed {
            self.fetch().await?;
        }
        Ok(())
    }

    /// Refresh the object with a conditional GET.
    ///
    /// Returns `false` if the server reports the resource unchanged since
    /// the last response, `true` if new attributes were applied.
    ///
    /// # Errors
    ///
    /// Returns the requester's error.
    pub async fn update(&mut self) -> Result<bool> {
        let url = self.url()?.to_string();
        let etag = self.etag().map(str::to_owned);
        let last_modified = self.last_modified().map(str::to_owned);

        let response = self
            .object
            .requester
            .get_json_if_modified(&url, etag.as_deref(), last_modified.as_deref())
            .await?;

        match response {
            None => Ok(false),
            Some((headers, body)) => {
                let attributes = into_attributes(body)?;
                self.object.store_headers(headers);
                self.object.apply_attributes(&attributes);
                self.completed = true;
                Ok(true)
            }
        }
    }

    async fn fetch(&mut self) -> Result<()> {
        let url = self.url()?.to_string();
        tracing::debug!(resource = R::NAME, %url, "completing object");

        let (headers, body) = self.object.requester.get_json(&url).await?;
        let attributes = into_attributes(body)?;

        self.object.store_headers(headers);
        self.object.apply_attributes(&attributes);
        self.completed = true;
        Ok(())
    }

    /// Read a field, completing the object first if the field is unset.
    pub(crate) async fn attr<'a, T: 'a>(
        &'a mut self,
        name: &'static str,
        field: fn(&R) -> &Attribute<T>,
    ) -> Result<&'a T> {
        if !self.completed && field(&self.object.data).is_not_fetched() {
            self.fetch().await?;
        }
        field(&self.object.data).get(R::NAME, name)
    }

    /// Mutable variant of `attr`, for nested objects that may need to
    /// complete themselves.
    pub(crate) async fn attr_mut<'a, T: 'a>(
        &'a mut self,
        name: &'static str,
        field: fn(&mut R) -> &mut Attribute<T>,
    ) -> Result<&'a mut T> {
        if !self.completed && field(&mut self.object.data).is_not_fetched() {
            self.fetch().await?;
        }
        field(&mut self.object.data).get_mut(R::NAME, name)
    }

    /// Read a field from seed data only. Never fetches.
    pub(crate) fn identity<T>(
        &self,
        name: &'static str,
        field: fn(&R) -> &Attribute<T>,
    ) -> Result<&T> {
        self.object.field(name, field)
    }

    pub(crate) fn store_headers(&mut self, headers: Headers) {
        self.object.store_headers(headers);
    }
}

impl<R: CompletableResource> fmt::Debug for Completable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}
