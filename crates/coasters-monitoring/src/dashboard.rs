//! Latest-status dashboard.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use coasters_analysis::domain::reports::StatusSnapshot;

/// Latest status per coaster. Each snapshot replaces the previous one for the
/// same coaster; no history is kept.
#[derive(Debug, Default)]
pub struct Dashboard {
    statuses: BTreeMap<String, StatusSnapshot>,
}

impl Dashboard {
    /// Creates an empty dashboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot` as the current status of its coaster.
    pub fn update(&mut self, snapshot: StatusSnapshot) {
        self.statuses.insert(snapshot.id.clone(), snapshot);
    }

    /// Returns the tracked snapshot of `coaster_id`.
    #[must_use]
    pub fn status_of(&self, coaster_id: &str) -> Option<&StatusSnapshot> {
        self.statuses.get(coaster_id)
    }

    /// Number of coasters tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns `true` until the first snapshot arrives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Renders every tracked coaster, sorted by identity.
    #[must_use]
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut out = format!(
            "-- Real-Time Coaster Status [Last Update: {}] --\n\n",
            now.format("%H:%M:%S")
        );

        if self.statuses.is_empty() {
            out.push_str("No coasters available. Waiting for data...\n");
            return out;
        }

        for (id, s) in &self.statuses {
            // Writing to a String cannot fail.
            let _ = write!(
                out,
                "[Coaster {id}]\n  Operating Hours: {} - {}\n  Wagons: {}/{}\n  \
                 Available Personnel: {}/{}\n  Daily Clients: {}\n  Status: {}\n\n",
                s.operating_hours.start,
                s.operating_hours.end,
                s.wagons.count,
                s.wagons.total,
                s.personnel.available,
                s.personnel.required,
                s.daily_clients,
                s.status,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use coasters_analysis::domain::reports::{
        OperatingHours, PersonnelSummary, WagonSummary,
    };
    use coasters_analysis::domain::status::OperationalStatus;

    use super::*;

    fn snapshot(id: &str, status: OperationalStatus) -> StatusSnapshot {
        StatusSnapshot {
            id: id.to_owned(),
            operating_hours: OperatingHours {
                start: "08:00".to_owned(),
                end: "16:00".to_owned(),
            },
            wagons: WagonSummary { count: 2, total: 4 },
            personnel: PersonnelSummary {
                available: 3,
                required: 5,
            },
            daily_clients: 3000,
            status,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 5).unwrap()
    }

    #[test]
    fn test_empty_dashboard_says_waiting() {
        let rendered = Dashboard::new().render(noon());

        assert!(rendered.starts_with("-- Real-Time Coaster Status [Last Update: 12:30:05] --"));
        assert!(rendered.contains("No coasters available. Waiting for data..."));
    }

    #[test]
    fn test_render_lists_every_field() {
        let mut dashboard = Dashboard::new();
        dashboard.update(snapshot("coaster_a", OperationalStatus::ResourceShortage));

        let rendered = dashboard.render(noon());

        assert!(rendered.contains("[Coaster coaster_a]"));
        assert!(rendered.contains("  Operating Hours: 08:00 - 16:00"));
        assert!(rendered.contains("  Wagons: 2/4"));
        assert!(rendered.contains("  Available Personnel: 3/5"));
        assert!(rendered.contains("  Daily Clients: 3000"));
        assert!(rendered.contains("  Status: PROBLEM! Resource shortage"));
    }

    #[test]
    fn test_update_overwrites_previous_status() {
        let mut dashboard = Dashboard::new();
        dashboard.update(snapshot("coaster_a", OperationalStatus::ResourceShortage));
        dashboard.update(snapshot("coaster_a", OperationalStatus::Ok));

        assert_eq!(dashboard.len(), 1);
        assert_eq!(
            dashboard.status_of("coaster_a").map(|s| s.status),
            Some(OperationalStatus::Ok)
        );
    }
}
