//! Tzdata adapter - Implements TransitionProvider using integration_tzdata

use application::error::ApplicationError;
use application::ports::TransitionProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::ZoneTransition;
use domain::value_objects::{UtcOffset, ZoneId};
use integration_tzdata::{RawTransition, TzdataConfig, TzdataError, TzdataSource, ZoneinfoClient};
use tracing::{debug, instrument};

/// Adapter exposing compiled zoneinfo data as domain transition sequences
pub struct TzdataTransitionProvider<S: TzdataSource> {
    source: S,
}

impl<S: TzdataSource> std::fmt::Debug for TzdataTransitionProvider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TzdataTransitionProvider")
            .field("source", &"TzdataSource")
            .finish()
    }
}

impl TzdataTransitionProvider<ZoneinfoClient> {
    /// Create a new provider over the standard zoneinfo roots
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: ZoneinfoClient::with_default_roots(),
        }
    }

    /// Create with custom configuration
    #[must_use]
    pub const fn with_config(config: TzdataConfig) -> Self {
        Self {
            source: ZoneinfoClient::new(config),
        }
    }
}

impl Default for TzdataTransitionProvider<ZoneinfoClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TzdataSource> TzdataTransitionProvider<S> {
    /// Create a provider over any transition source
    pub const fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Map integration tzdata error to application error
    fn map_error(zone_id: &ZoneId, err: TzdataError) -> ApplicationError {
        match err {
            TzdataError::ZoneNotFound(_) => ApplicationError::NotFound(err.to_string()),
            other => ApplicationError::TransitionProvider(format!("{zone_id}: {other}")),
        }
    }

    /// Clamp epoch seconds into chrono's representable range
    fn clamp_timestamp(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap_or(if secs < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
    }

    /// Convert a raw sequence into domain transitions
    ///
    /// Instants outside chrono's range land on `MIN_UTC`/`MAX_UTC`. At the
    /// floor only the latest colliding record survives (it carries the rule
    /// in effect entering representable time); at the ceiling only the
    /// earliest. Any other order violation is upstream corruption.
    fn map_transitions(
        zone_id: &ZoneId,
        raw: Vec<RawTransition>,
    ) -> Result<Vec<ZoneTransition>, ApplicationError> {
        if raw.is_empty() {
            return Err(ApplicationError::TransitionProvider(format!(
                "{zone_id}: empty transition sequence"
            )));
        }

        let mut transitions: Vec<ZoneTransition> = Vec::with_capacity(raw.len());
        for record in raw {
            let offset = UtcOffset::new(record.offset_secs)
                .map_err(|e| ApplicationError::TransitionProvider(format!("{zone_id}: {e}")))?;
            let at = Self::clamp_timestamp(record.timestamp);
            let transition = ZoneTransition::new(at, offset, record.dst, record.abbreviation);

            let collides = transitions.last().is_some_and(|last| last.at() == at);
            if collides && at == DateTime::<Utc>::MIN_UTC {
                if let Some(last) = transitions.last_mut() {
                    *last = transition;
                }
            } else if collides && at == DateTime::<Utc>::MAX_UTC {
                // first colliding record already holds the ceiling slot
            } else {
                transitions.push(transition);
            }
        }

        if !transitions.is_sorted_by(|a, b| a.at() < b.at()) {
            return Err(ApplicationError::TransitionProvider(format!(
                "{zone_id}: transition sequence out of order"
            )));
        }

        Ok(transitions)
    }
}

#[async_trait]
impl<S: TzdataSource> TransitionProvider for TzdataTransitionProvider<S> {
    #[instrument(skip(self), fields(zone = %zone_id))]
    async fn transitions_for(
        &self,
        zone_id: &ZoneId,
    ) -> Result<Vec<ZoneTransition>, ApplicationError> {
        let result = self
            .source
            .load_transitions(zone_id.as_str())
            .await
            .map_err(|e| Self::map_error(zone_id, e))
            .and_then(|raw| Self::map_transitions(zone_id, raw));

        match &result {
            Ok(transitions) => {
                debug!(count = transitions.len(), "Loaded zone transitions");
            },
            Err(e) => {
                debug!(error = %e, "Failed to load zone transitions");
            },
        }

        result
    }
}
