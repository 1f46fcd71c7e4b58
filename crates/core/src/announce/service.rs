//! One announcement invocation, end to end.
//!
//! Every job refreshes credentials first so the rotated refresh token is
//! persisted even when the job ends up skipping. Query, compose and post
//! follow; suppression is reported as `AnnouncementOutcome::Skipped`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use launchbot_domain::{AnnouncementOutcome, Result, SkipReason};
use tracing::{info, instrument};

use super::AnnouncementSettings;
use crate::auth::OAuthFlowController;
use crate::compose::alert::recent_activity;
use crate::compose::{AlertComposer, AlertPlan, Countdown, DigestComposer};
use crate::events::ports::EventRepository;
use crate::events::{next_local_midnight, EventWindowQuery};
use crate::posting::PostDispatcher;

/// Runs the digest and alert jobs.
pub struct AnnouncementService {
    flow: Arc<OAuthFlowController>,
    events: EventWindowQuery,
    digest: DigestComposer,
    alert: AlertComposer,
    dispatcher: PostDispatcher,
    settings: AnnouncementSettings,
}

impl AnnouncementService {
    pub fn new(
        flow: Arc<OAuthFlowController>,
        repository: Arc<dyn EventRepository>,
        settings: AnnouncementSettings,
    ) -> Self {
        Self {
            flow,
            events: EventWindowQuery::new(repository),
            digest: DigestComposer::new(settings.timezone, settings.digest_revision),
            alert: AlertComposer::new(),
            dispatcher: PostDispatcher::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &AnnouncementSettings {
        &self.settings
    }

    /// Post the daily reminder of today's and upcoming launches.
    #[instrument(skip(self))]
    pub async fn daily_digest(&self, now: DateTime<Utc>) -> Result<AnnouncementOutcome> {
        let client = self.flow.refresh_and_get_client().await?;
        let tomorrow = next_local_midnight(now, self.settings.timezone);

        let upcoming = self.events.upcoming(now).await?;
        if upcoming.is_empty() {
            return Ok(skipped(SkipReason::NoUpcomingEvents));
        }
        let today = self.events.today(now, tomorrow).await?;

        let Some(text) = self.digest.compose(now, &upcoming, &today) else {
            return Ok(skipped(SkipReason::NoUpcomingEvents));
        };

        let receipt = self.dispatcher.dispatch(&client, &text).await?;
        info!(upcoming = upcoming.len(), today = today.len(), "daily digest posted");
        Ok(AnnouncementOutcome::Posted(receipt))
    }

    /// Post a countdown alert for the next launch today, if one is due.
    #[instrument(skip(self))]
    pub async fn imminent_alert(&self, now: DateTime<Utc>) -> Result<AnnouncementOutcome> {
        let client = self.flow.refresh_and_get_client().await?;
        let tomorrow = next_local_midnight(now, self.settings.timezone);

        let Some(event) = self.events.imminent(now, tomorrow).await? else {
            return Ok(skipped(SkipReason::NoEventToday));
        };

        let headline = match AlertPlan::for_countdown(Countdown::between(now, event.date)) {
            AlertPlan::Announce(headline) => headline,
            AlertPlan::AnnounceIfQuiet(headline) => {
                let posts = client.recent_original_posts(self.settings.recent_post_count).await?;
                if let Some(reason) = recent_activity(now, &posts) {
                    return Ok(skipped(reason));
                }
                headline
            }
            AlertPlan::Skip(reason) => return Ok(skipped(reason)),
        };

        let text = self.alert.compose(&event, headline);
        let receipt = self.dispatcher.dispatch(&client, &text).await?;
        info!(team = %event.team, %headline, "launch alert posted");
        Ok(AnnouncementOutcome::Posted(receipt))
    }
}

fn skipped(reason: SkipReason) -> AnnouncementOutcome {
    info!(%reason, "announcement skipped");
    AnnouncementOutcome::Skipped(reason)
}
