use async_trait::async_trait;
use auto_impl::auto_impl;

use crate::error::Result;

#[async_trait]
#[auto_impl(Box, Arc)]
pub trait KeySource: Send + Sync {
    /// Waits for the next keystroke.
    ///
    /// Returns [`Error::InputClosed`](crate::Error::InputClosed) once no more keys can arrive.
    async fn next_key(&self) -> Result<char>;
}
