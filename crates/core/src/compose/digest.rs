//! Daily digest text.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use launchbot_domain::{DigestRevision, EventRecord, DIGEST_FOOTER, DIGEST_HEADER};

use crate::events::days_until;

/// Renders the daily reminder listing today's and upcoming launches.
#[derive(Debug, Clone, Copy)]
pub struct DigestComposer {
    tz: Tz,
    revision: DigestRevision,
}

impl DigestComposer {
    pub fn new(tz: Tz, revision: DigestRevision) -> Self {
        Self { tz, revision }
    }

    /// Compose the digest, `None` when nothing is upcoming.
    ///
    /// `upcoming` is the capped list of next events and `today` the events
    /// before the next local midnight; both sorted ascending. When launches
    /// happen today each one consumes upcoming slots, and the remaining slots
    /// are listed under "Upcoming:" after it.
    pub fn compose(
        &self,
        now: DateTime<Utc>,
        upcoming: &[EventRecord],
        today: &[EventRecord],
    ) -> Option<String> {
        let (next, following) = upcoming.split_first()?;
        let mut msg = format!("{DIGEST_HEADER}\n\n");

        if today.is_empty() {
            msg.push_str("Next launch:\n\n");
            msg.push_str(&self.dated_line(next, now));
            msg.push_str("\n\n");

            if !following.is_empty() {
                msg.push_str("Following launches:\n");
                for event in following {
                    msg.push('\n');
                    msg.push_str(&self.dated_line(event, now));
                }
            }
        } else {
            msg.push_str("Launching today:\n");
            let len = upcoming.len();

            for (i, event) in today.iter().enumerate() {
                msg.push_str(&format!("\n{} - {}", event.team, self.time_of_day(event)));
                if let Some(link) = event.link() {
                    msg.push('\n');
                    msg.push_str(link);
                }

                let consumed = (2 * i + 1).min(len);
                if consumed < len {
                    msg.push_str("\n\nUpcoming:\n");
                    for later in &upcoming[consumed + 1..] {
                        msg.push('\n');
                        msg.push_str(&self.dated_line(later, now));
                    }
                }
            }
        }

        Some(match self.revision {
            DigestRevision::Original => msg,
            DigestRevision::Tagged => format!("{}\n\n{DIGEST_FOOTER}", msg.trim_end()),
        })
    }

    /// `Ferrari - Tue Feb 11 (1 days)`
    fn dated_line(&self, event: &EventRecord, now: DateTime<Utc>) -> String {
        format!(
            "{} - {} ({} days)",
            event.team,
            event.date.with_timezone(&self.tz).format("%a %b %d"),
            days_until(event, now, self.tz)
        )
    }

    /// `2:00:00 PM GMT`
    fn time_of_day(&self, event: &EventRecord) -> String {
        event.date.with_timezone(&self.tz).format("%-I:%M:%S %p %Z").to_string()
    }
}
