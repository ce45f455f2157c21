//! Transition provider port
//!
//! Defines the interface for the authoritative per-zone UTC transition
//! history. The provider owns rule data; the application layer only
//! searches it.

use async_trait::async_trait;
use domain::entities::ZoneTransition;
use domain::value_objects::ZoneId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for per-zone transition history
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitionProvider: Send + Sync {
    /// The zone's full transition sequence, strictly ascending by instant
    ///
    /// Never empty for a zone the provider knows. An unknown zone is
    /// `ApplicationError::NotFound`; anything else wrong with the provider
    /// is `ApplicationError::TransitionProvider`.
    async fn transitions_for(
        &self,
        zone_id: &ZoneId,
    ) -> Result<Vec<ZoneTransition>, ApplicationError>;
}
