//! Trait definitions for the collaborators of resource objects.
//!
//! [`Requester`] is the transport seam; [`Resource`] and
//! [`CompletableResource`] are implemented by each resource's field table.

mod requester;
mod resource;

pub use requester::{Headers, Requester};
pub use resource::{CompletableResource, Context, Resource};

pub(crate) use resource::repr_value;
