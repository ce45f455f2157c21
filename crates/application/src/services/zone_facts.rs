//! Zone facts service
//!
//! Derives UTC offset, DST flag, and abbreviation for a zone at an instant
//! by searching the zone's ordered transition history. The rule in effect
//! is always the last transition at or before the instant; an instant
//! before the first recorded transition has no rule at all.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::entities::ZoneTransition;
use domain::value_objects::{UtcOffset, ZoneId};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::TransitionProvider;

/// Service answering offset, DST, and abbreviation queries for a zone
pub struct ZoneFactsService<P: TransitionProvider> {
    provider: Arc<P>,
}

impl<P: TransitionProvider> Clone for ZoneFactsService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: TransitionProvider> std::fmt::Debug for ZoneFactsService<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneFactsService")
            .field("provider", &"<TransitionProvider>")
            .finish()
    }
}

impl<P: TransitionProvider> ZoneFactsService<P> {
    /// Create a new facts service over the given provider
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// The rule in effect for the zone at the instant
    ///
    /// Binary-searches the ascending transition sequence for the last
    /// transition whose instant is at or before `instant`. The last rule
    /// extends indefinitely forward.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::NotFound`] when `instant` precedes the first
    /// recorded transition; provider failures propagate unchanged.
    #[instrument(skip(self))]
    pub async fn rule_at(
        &self,
        zone_id: &ZoneId,
        instant: DateTime<Utc>,
    ) -> Result<ZoneTransition, ApplicationError> {
        let transitions = self.provider.transitions_for(zone_id).await?;
        Self::rule_in(&transitions, instant).cloned().ok_or_else(|| {
            ApplicationError::NotFound(format!("no rule in effect for {zone_id} at {instant}"))
        })
    }

    /// The DST-aware UTC offset in effect at the instant
    ///
    /// Authoritative, unlike the catalog's display-only nominal offset.
    #[instrument(skip(self))]
    pub async fn offset_at(
        &self,
        zone_id: &ZoneId,
        instant: DateTime<Utc>,
    ) -> Result<UtcOffset, ApplicationError> {
        Ok(self.rule_at(zone_id, instant).await?.offset())
    }

    /// The abbreviation in effect at the instant
    ///
    /// With `prevent_empty`, an instant carrying no rule yields the
    /// `±HHMM` rendering of the zone's offset as of now instead of an
    /// empty string; without it, the empty string is returned in that
    /// case. Provider failures propagate either way.
    #[instrument(skip(self))]
    pub async fn abbreviation_at(
        &self,
        zone_id: &ZoneId,
        instant: DateTime<Utc>,
        prevent_empty: bool,
    ) -> Result<String, ApplicationError> {
        let transitions = self.provider.transitions_for(zone_id).await?;
        match Self::rule_in(&transitions, instant) {
            Some(rule) => Ok(rule.abbreviation().to_string()),
            None if prevent_empty => {
                let now = Utc::now();
                let current = Self::rule_in(&transitions, now).ok_or_else(|| {
                    ApplicationError::NotFound(format!("no rule in effect for {zone_id} at {now}"))
                })?;
                let label = current.offset().to_string();
                debug!(zone = %zone_id, %label, "No abbreviation on record, using offset label");
                Ok(label)
            }
            None => Ok(String::new()),
        }
    }

    /// Whether daylight saving is in effect at the instant
    ///
    /// # Errors
    ///
    /// [`ApplicationError::NotFound`] when no rule applies; a boolean has
    /// no safe default.
    #[instrument(skip(self))]
    pub async fn is_dst_at(
        &self,
        zone_id: &ZoneId,
        instant: DateTime<Utc>,
    ) -> Result<bool, ApplicationError> {
        Ok(self.rule_at(zone_id, instant).await?.is_dst())
    }

    /// The offset in effect now
    pub async fn current_offset(&self, zone_id: &ZoneId) -> Result<UtcOffset, ApplicationError> {
        self.offset_at(zone_id, Utc::now()).await
    }

    /// The abbreviation in effect now, never empty
    pub async fn current_abbreviation(
        &self,
        zone_id: &ZoneId,
    ) -> Result<String, ApplicationError> {
        self.abbreviation_at(zone_id, Utc::now(), true).await
    }

    /// Whether daylight saving is in effect now
    pub async fn current_dst(&self, zone_id: &ZoneId) -> Result<bool, ApplicationError> {
        self.is_dst_at(zone_id, Utc::now()).await
    }

    /// Last transition at or before `instant`, if any
    fn rule_in(
        transitions: &[ZoneTransition],
        instant: DateTime<Utc>,
    ) -> Option<&ZoneTransition> {
        let idx = transitions.partition_point(|t| t.at() <= instant);
        idx.checked_sub(1).map(|i| &transitions[i])
    }
}
