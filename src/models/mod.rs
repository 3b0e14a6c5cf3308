//! GitHub resource types.
//!
//! Each resource is a field table (`XxxData`) plugged into
//! [`Completable`](crate::Completable) or, for resources without a URL of
//! their own, [`Object`](crate::Object).

mod commit;
mod issue;
mod issue_comment;
mod issue_dependencies_summary;
mod issue_type;
mod label;
mod named_user;
mod repository;
mod sub_issues_summary;
mod topic;

pub use commit::*;
pub use issue::*;
pub use issue_comment::*;
pub use issue_dependencies_summary::*;
pub use issue_type::*;
pub use label::*;
pub use named_user::*;
pub use repository::*;
pub use sub_issues_summary::*;
pub use topic::*;
