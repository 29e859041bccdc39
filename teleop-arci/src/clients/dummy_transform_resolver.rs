use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use nalgebra::Isometry3;

use crate::{error::Error, traits::TransformResolver};

/// Dummy TransformResolver for debug or tests.
///
/// Resolves every lookup to `transformation`, or fails with [`Error::Lookup`]
/// when it is `None`.
#[derive(Debug)]
pub struct DummyTransformResolver {
    transformation: Mutex<Option<Isometry3<f64>>>,
    delay: Mutex<Duration>,
}

impl DummyTransformResolver {
    /// Creates a new `DummyTransformResolver` resolving to the identity.
    pub fn new() -> Self {
        Self::with_transformation(Some(Isometry3::identity()))
    }

    pub fn with_transformation(transformation: Option<Isometry3<f64>>) -> Self {
        Self {
            transformation: Mutex::new(transformation),
            delay: Mutex::new(Duration::ZERO),
        }
    }

    pub fn set_transformation(&self, transformation: Option<Isometry3<f64>>) {
        *self.transformation.lock().unwrap() = transformation;
    }

    /// Delays every lookup by `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }
}

impl Default for DummyTransformResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransformResolver for DummyTransformResolver {
    async fn resolve_transformation(
        &self,
        from: &str,
        to: &str,
        _time: std::time::SystemTime,
    ) -> Result<Isometry3<f64>, Error> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let transformation = *self.transformation.lock().unwrap();
        transformation.ok_or_else(|| Error::Lookup {
            from: from.to_owned(),
            to: to.to_owned(),
            message: "no transform is available".to_owned(),
        })
    }
}
