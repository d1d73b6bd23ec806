use async_trait::async_trait;

use crate::domain::DomainError;

/// A single application operation with typed input and output
#[async_trait]
pub trait UseCase: Send + Sync {
    type Input: Send + 'static;
    type Output;

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, DomainError>;
}
