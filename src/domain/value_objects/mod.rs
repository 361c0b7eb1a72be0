//! Value objects - immutable, validated on construction

mod deployment_id;

pub use deployment_id::{DeploymentId, MAX_DEPLOYMENT_ID_LEN};
