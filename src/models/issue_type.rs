//! Organization-defined issue types.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::object::Completable;
use crate::traits::{repr_value, CompletableResource, Context, Resource};

/// The type of an issue (`Bug`, `Feature`, ...), as embedded in issue
/// payloads.
pub type IssueType = Completable<IssueTypeData>;

/// Field table of an [`IssueType`].
#[derive(Debug, Default)]
pub struct IssueTypeData {
    id: Attribute<u64>,
    node_id: Attribute<String>,
    name: Attribute<String>,
    description: Attribute<Option<String>>,
    color: Attribute<Option<String>>,
    created_at: Attribute<DateTime<Utc>>,
    updated_at: Attribute<DateTime<Utc>>,
    is_enabled: Attribute<bool>,
    url: Attribute<String>,
}

impl Resource for IssueTypeData {
    const NAME: &'static str = "IssueType";

    fn use_attributes(&mut self, _ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.id.assign(attributes, "id");
        self.node_id.assign(attributes, "node_id");
        self.name.assign(attributes, "name");
        self.description.assign(attributes, "description");
        self.color.assign(attributes, "color");
        self.created_at.assign(attributes, "created_at");
        self.updated_at.assign(attributes, "updated_at");
        self.is_enabled.assign(attributes, "is_enabled");
        self.url.assign(attributes, "url");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![("name", repr_value(&self.name))]
    }
}

impl CompletableResource for IssueTypeData {
    fn url(&self) -> &Attribute<String> {
        &self.url
    }
}

impl IssueType {
    pub async fn id(&mut self) -> Result<u64> {
        self.attr("id", |d| &d.id).await.copied()
    }

    pub async fn node_id(&mut self) -> Result<&str> {
        self.attr("node_id", |d| &d.node_id).await.map(String::as_str)
    }

    pub async fn name(&mut self) -> Result<&str> {
        self.attr("name", |d| &d.name).await.map(String::as_str)
    }

    pub async fn description(&mut self) -> Result<Option<&str>> {
        self.attr("description", |d| &d.description)
            .await
            .map(Option::as_deref)
    }

    pub async fn color(&mut self) -> Result<Option<&str>> {
        self.attr("color", |d| &d.color).await.map(Option::as_deref)
    }

    pub async fn created_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("created_at", |d| &d.created_at).await.copied()
    }

    pub async fn updated_at(&mut self) -> Result<DateTime<Utc>> {
        self.attr("updated_at", |d| &d.updated_at).await.copied()
    }

    pub async fn is_enabled(&mut self) -> Result<bool> {
        self.attr("is_enabled", |d| &d.is_enabled).await.copied()
    }
}
