use async_trait::async_trait;
use auto_impl::auto_impl;
use nalgebra::Isometry3;

use crate::error::Result;

#[async_trait]
#[auto_impl(Box, Arc)]
pub trait TransformResolver: Send + Sync {
    /// Resolves the pose of `to` expressed in `from` at `time`.
    ///
    /// Implementations may wait for the transform to become available;
    /// callers bound that wait themselves.
    async fn resolve_transformation(
        &self,
        from: &str,
        to: &str,
        time: std::time::SystemTime,
    ) -> Result<Isometry3<f64>>;
}
