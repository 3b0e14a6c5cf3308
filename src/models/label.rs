//! Repository labels.

use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::object::Completable;
use crate::traits::{repr_value, CompletableResource, Context, Resource};

/// A label defined on a repository.
pub type Label = Completable<LabelData>;

/// Field table of a [`Label`].
#[derive(Debug, Default)]
pub struct LabelData {
    id: Attribute<u64>,
    name: Attribute<String>,
    color: Attribute<String>,
    description: Attribute<Option<String>>,
    default: Attribute<bool>,
    url: Attribute<String>,
}

impl Resource for LabelData {
    const NAME: &'static str = "Label";

    fn use_attributes(&mut self, _ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.id.assign(attributes, "id");
        self.name.assign(attributes, "name");
        self.color.assign(attributes, "color");
        self.description.assign(attributes, "description");
        self.default.assign(attributes, "default");
        self.url.assign(attributes, "url");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![("name", repr_value(&self.name))]
    }
}

impl CompletableResource for LabelData {
    fn url(&self) -> &Attribute<String> {
        &self.url
    }
}

impl Label {
    pub async fn id(&mut self) -> Result<u64> {
        self.attr("id", |d| &d.id).await.copied()
    }

    pub async fn name(&mut self) -> Result<&str> {
        self.attr("name", |d| &d.name).await.map(String::as_str)
    }

    /// Hex color without the leading `#`.
    pub async fn color(&mut self) -> Result<&str> {
        self.attr("color", |d| &d.color).await.map(String::as_str)
    }

    pub async fn description(&mut self) -> Result<Option<&str>> {
        self.attr("description", |d| &d.description)
            .await
            .map(Option::as_deref)
    }

    /// Whether this is one of the labels GitHub creates for new repositories.
    pub async fn default(&mut self) -> Result<bool> {
        self.attr("default", |d| &d.default).await.copied()
    }
}
