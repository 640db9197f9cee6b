use pogo_core::SurfaceId;

/// Errors returned by physics world construction helpers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("rigid body {0:?} does not exist")]
    UnknownBody(SurfaceId),

    #[error("rigid body {0:?} is not kinematic")]
    NotKinematic(SurfaceId),
}
