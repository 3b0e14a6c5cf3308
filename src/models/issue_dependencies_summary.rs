//! Blocking relationships embedded in an issue.

use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::object::Object;
use crate::traits::{repr_value, Context, Resource};

/// Counts of issues blocking, and blocked by, an issue.
pub type IssueDependenciesSummary = Object<IssueDependenciesSummaryData>;

/// Field table of an [`IssueDependenciesSummary`].
#[derive(Debug, Default)]
pub struct IssueDependenciesSummaryData {
    blocked_by: Attribute<u64>,
    blocking: Attribute<u64>,
    total_blocked_by: Attribute<u64>,
    total_blocking: Attribute<u64>,
}

impl Resource for IssueDependenciesSummaryData {
    const NAME: &'static str = "IssueDependenciesSummary";

    fn use_attributes(&mut self, _ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.blocked_by.assign(attributes, "blocked_by");
        self.blocking.assign(attributes, "blocking");
        self.total_blocked_by.assign(attributes, "total_blocked_by");
        self.total_blocking.assign(attributes, "total_blocking");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("blocked_by", repr_value(&self.blocked_by)),
            ("blocking", repr_value(&self.blocking)),
        ]
    }
}

impl IssueDependenciesSummary {
    /// Open issues blocking this one.
    pub fn blocked_by(&self) -> Result<u64> {
        self.field("blocked_by", |d| &d.blocked_by).copied()
    }

    /// Open issues this one blocks.
    pub fn blocking(&self) -> Result<u64> {
        self.field("blocking", |d| &d.blocking).copied()
    }

    pub fn total_blocked_by(&self) -> Result<u64> {
        self.field("total_blocked_by", |d| &d.total_blocked_by)
            .copied()
    }

    pub fn total_blocking(&self) -> Result<u64> {
        self.field("total_blocking", |d| &d.total_blocking).copied()
    }
}
