//! Resource lifecycle interface
//!
//! The host decides when to create, read, update or delete a resource by
//! diffing desired against observed state; resources only implement the
//! callbacks. Each callback works on a [`ResourceData`] container and keeps
//! no memory between invocations.

mod id;
mod plan;
mod project_variable;

pub use id::{VariableId, ID_SEPARATOR};
pub use plan::{plan, AttributeChange, Plan, PlanAction};
pub use project_variable::{ProjectVariableResource, PROJECT_VARIABLE};

use crate::error::Result;
use crate::schema::ResourceSchema;
use crate::state::ResourceData;
use async_trait::async_trait;

/// Lifecycle callbacks a resource type registers with the host
#[async_trait]
pub trait Resource: Send + Sync {
    /// Registered type name, e.g. `gitlab_project_variable`
    fn type_name(&self) -> &'static str;

    /// Attribute declarations driving defaults, validation and diffing
    fn schema(&self) -> &ResourceSchema;

    /// Create the remote object from desired state and assign the ID
    async fn create(&self, data: &mut ResourceData) -> Result<()>;

    /// Refresh every attribute from the remote object addressed by the ID
    async fn read(&self, data: &mut ResourceData) -> Result<()>;

    /// Apply changed mutable attributes to the remote object
    async fn update(&self, data: &mut ResourceData) -> Result<()>;

    /// Remove the remote object. Dropping local state is the host's job.
    async fn delete(&self, data: &ResourceData) -> Result<()>;

    /// Adopt existing remote objects by ID.
    ///
    /// The default is passthrough: the ID becomes the state's ID and the
    /// host follows with [`Resource::read`].
    async fn import(&self, id: &str) -> Result<Vec<ResourceData>> {
        Ok(vec![ResourceData::with_id(id)])
    }
}
