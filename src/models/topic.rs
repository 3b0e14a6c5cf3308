//! Topics, as returned by topic search.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::object::Object;
use crate::traits::{repr_value, Context, Resource};

/// A topic from <https://github.com/topics>.
///
/// Topics have no URL of their own in the API, so they never complete:
/// reading a field the search result did not include is an error.
pub type Topic = Object<TopicData>;

/// Field table of a [`Topic`].
#[derive(Debug, Default)]
pub struct TopicData {
    name: Attribute<String>,
    display_name: Attribute<Option<String>>,
    short_description: Attribute<Option<String>>,
    description: Attribute<Option<String>>,
    created_by: Attribute<Option<String>>,
    released: Attribute<Option<String>>,
    created_at: Attribute<DateTime<Utc>>,
    updated_at: Attribute<DateTime<Utc>>,
    featured: Attribute<bool>,
    curated: Attribute<bool>,
    score: Attribute<f64>,
}

impl Resource for TopicData {
    const NAME: &'static str = "Topic";

    fn use_attributes(&mut self, _ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.name.assign(attributes, "name");
        self.display_name.assign(attributes, "display_name");
        self.short_description.assign(attributes, "short_description");
        self.description.assign(attributes, "description");
        self.created_by.assign(attributes, "created_by");
        self.released.assign(attributes, "released");
        self.created_at.assign(attributes, "created_at");
        self.updated_at.assign(attributes, "updated_at");
        self.featured.assign(attributes, "featured");
        self.curated.assign(attributes, "curated");
        self.score.assign(attributes, "score");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![("name", repr_value(&self.name))]
    }
}

impl Topic {
    pub fn name(&self) -> Result<&str> {
        self.field("name", |d| &d.name).map(String::as_str)
    }

    pub fn display_name(&self) -> Result<Option<&str>> {
        self.field("display_name", |d| &d.display_name)
            .map(Option::as_deref)
    }

    pub fn short_description(&self) -> Result<Option<&str>> {
        self.field("short_description", |d| &d.short_description)
            .map(Option::as_deref)
    }

    pub fn description(&self) -> Result<Option<&str>> {
        self.field("description", |d| &d.description)
            .map(Option::as_deref)
    }

    pub fn created_by(&self) -> Result<Option<&str>> {
        self.field("created_by", |d| &d.created_by)
            .map(Option::as_deref)
    }

    pub fn released(&self) -> Result<Option<&str>> {
        self.field("released", |d| &d.released).map(Option::as_deref)
    }

    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        self.field("created_at", |d| &d.created_at).copied()
    }

    pub fn updated_at(&self) -> Result<DateTime<Utc>> {
        self.field("updated_at", |d| &d.updated_at).copied()
    }

    pub fn featured(&self) -> Result<bool> {
        self.field("featured", |d| &d.featured).copied()
    }

    pub fn curated(&self) -> Result<bool> {
        self.field("curated", |d| &d.curated).copied()
    }

    /// Search relevance score.
    pub fn score(&self) -> Result<f64> {
        self.field("score", |d| &d.score).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::seed;
    use crate::object::tests_support::FakeRequester;
    use crate::opt::Opt;
    use crate::traits::Requester;
    use crate::GithubError;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_topic_fields() {
        let requester: Arc<dyn Requester> = Arc::new(FakeRequester::new());
        let topic = Topic::new(
            requester,
            Default::default(),
            &seed(json!({
                "name": "rust",
                "display_name": "Rust",
                "short_description": "A systems programming language.",
                "created_by": "Graydon Hoare",
                "released": "2010",
                "created_at": "2016-11-28T22:03:59Z",
                "featured": true,
                "curated": true,
                "score": 1.0
            })),
            Opt::Unset,
        );

        assert_eq!(topic.name().unwrap(), "rust");
        assert_eq!(topic.display_name().unwrap(), Some("Rust"));
        assert!(topic.featured().unwrap());
        assert_eq!(topic.score().unwrap(), 1.0);
        assert_eq!(topic.repr(), "Topic(name=\"rust\")");
    }

    #[test]
    fn test_missing_field_is_not_populated() {
        let requester: Arc<dyn Requester> = Arc::new(FakeRequester::new());
        let topic = Topic::new(
            requester,
            Default::default(),
            &seed(json!({"name": "rust"})),
            Opt::Unset,
        );

        assert!(matches!(
            topic.description(),
            Err(GithubError::NotPopulated {
                resource: "Topic",
                field: "description"
            })
        ));
    }
}
