//! Sub-issue progress embedded in an issue.

use serde_json::{Map, Value};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::object::Object;
use crate::traits::{repr_value, Context, Resource};

/// Progress of an issue's sub-issues.
///
/// Only ever seen embedded in an [`Issue`](crate::Issue), so it never
/// completes.
pub type SubIssuesSummary = Object<SubIssuesSummaryData>;

/// Field table of a [`SubIssuesSummary`].
#[derive(Debug, Default)]
pub struct SubIssuesSummaryData {
    total: Attribute<u64>,
    completed: Attribute<u64>,
    percent_completed: Attribute<u64>,
}

impl Resource for SubIssuesSummaryData {
    const NAME: &'static str = "SubIssueSummary";

    fn use_attributes(&mut self, _ctx: &Context<'_>, attributes: &Map<String, Value>) {
        self.total.assign(attributes, "total");
        self.completed.assign(attributes, "completed");
        self.percent_completed.assign(attributes, "percent_completed");
    }

    fn repr_fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("completed", repr_value(&self.completed)),
            ("total", repr_value(&self.total)),
        ]
    }
}

impl SubIssuesSummary {
    pub fn total(&self) -> Result<u64> {
        self.field("total", |d| &d.total).copied()
    }

    pub fn completed(&self) -> Result<u64> {
        self.field("completed", |d| &d.completed).copied()
    }

    /// Whole percent, rounded down by the API.
    pub fn percent_completed(&self) -> Result<u64> {
        self.field("percent_completed", |d| &d.percent_completed)
            .copied()
    }
}
