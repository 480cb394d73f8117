//! Scheduling engine.

use super::{
    court_queue::CourtQueue,
    errors::{ConflictReason, SchedulingConflict},
    models::{PlayerRestState, ScheduleResult, ScheduledMatch, SchedulingConstraints},
};
use crate::{
    entities::{CompetitorId, Court, Fixture, MatchStatus},
    errors::EngineResult,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::collections::{BTreeMap, HashMap};

/// Days searched for a free slot before a fixture is reported as a conflict
const HORIZON_DAYS: i64 = 365;

/// Places fixtures onto courts and time slots.
///
/// Rest and daily-count state is reset at the start of every
/// [`schedule`](Self::schedule) call and kept afterwards for availability
/// queries. Calls take `&mut self`, so a shared engine needs a lock.
#[derive(Debug, Clone, Default)]
pub struct SchedulingEngine {
    constraints: SchedulingConstraints,
    rest: HashMap<CompetitorId, PlayerRestState>,
    daily: HashMap<(CompetitorId, NaiveDate), u32>,
}

impl SchedulingEngine {
    pub fn new(constraints: SchedulingConstraints) -> Self {
        Self {
            constraints,
            rest: HashMap::new(),
            daily: HashMap::new(),
        }
    }

    pub fn constraints(&self) -> &SchedulingConstraints {
        &self.constraints
    }

    /// Schedule fixtures onto courts starting at `start`
    ///
    /// Fixtures are processed by ascending penalty, then by the competitors'
    /// names. Each takes the earliest-free active court and starts once the
    /// court and both competitors are ready, inside working hours.
    ///
    /// # Arguments
    ///
    /// * `fixtures` - Matches to place
    /// * `courts` - Candidate courts; inactive ones are ignored
    /// * `start` - Time at which every court becomes free
    ///
    /// # Returns
    ///
    /// Placed matches, span, per-court utilization and per-match conflicts
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - invalid constraints
    pub fn schedule(
        &mut self,
        fixtures: &[Fixture],
        courts: &[Court],
        start: NaiveDateTime,
    ) -> EngineResult<ScheduleResult> {
        self.constraints.validate()?;
        self.rest.clear();
        self.daily.clear();

        let mut queue = CourtQueue::new(courts, start);
        let horizon = start + TimeDelta::days(HORIZON_DAYS);

        let mut ordered: Vec<&Fixture> = fixtures.iter().collect();
        ordered.sort_by(|a, b| {
            a.penalty
                .cmp(&b.penalty)
                .then_with(|| a.home.name.cmp(&b.home.name))
                .then_with(|| a.away.name.cmp(&b.away.name))
                .then_with(|| a.home.id.cmp(&b.home.id))
                .then_with(|| a.away.id.cmp(&b.away.id))
        });

        let mut scheduled_matches = Vec::with_capacity(ordered.len());
        let mut conflicts = Vec::new();

        for (index, fixture) in ordered.into_iter().enumerate() {
            match self.place(fixture, &mut queue, horizon) {
                Ok((court, start, end)) => {
                    let mut fixture = fixture.clone();
                    fixture.status = MatchStatus::Scheduled;
                    scheduled_matches.push(ScheduledMatch {
                        id: format!("match-{}", index + 1),
                        fixture,
                        court: queue.court(court).clone(),
                        start,
                        end,
                    });
                }
                Err(reason) => {
                    let conflict = SchedulingConflict {
                        match_index: index,
                        home_id: fixture.home.id.clone(),
                        away_id: fixture.away.id.clone(),
                        reason,
                    };
                    log::warn!("{conflict}");
                    conflicts.push(conflict);
                }
            }
        }

        let (total_schedule_minutes, court_utilization) =
            utilization(&scheduled_matches, queue.courts());

        log::debug!(
            "Scheduled {}/{} matches on {} courts over {} min",
            scheduled_matches.len(),
            fixtures.len(),
            queue.courts().len(),
            total_schedule_minutes
        );

        Ok(ScheduleResult {
            scheduled_matches,
            total_schedule_minutes,
            court_utilization,
            conflicts,
        })
    }

    /// Place one fixture, returning `(court index, start, end)`
    fn place(
        &mut self,
        fixture: &Fixture,
        queue: &mut CourtQueue,
        horizon: NaiveDateTime,
    ) -> Result<(usize, NaiveDateTime, NaiveDateTime), ConflictReason> {
        if fixture.home.id == fixture.away.id {
            return Err(ConflictReason::SameCompetitor(fixture.home.id.clone()));
        }

        let (court_free, court) = queue.pop().ok_or(ConflictReason::NoActiveCourts)?;

        let ready = [&fixture.home.id, &fixture.away.id]
            .into_iter()
            .filter_map(|id| self.rest.get(id.as_str()))
            .map(|state| state.next_available)
            .fold(court_free, std::cmp::max);

        let Some(start) = self.fit(ready, fixture, horizon) else {
            queue.push(court, court_free);
            return Err(ConflictReason::BeyondHorizon(HORIZON_DAYS));
        };

        let end = start + minutes(self.constraints.match_duration_minutes);
        queue.push(court, end + minutes(self.constraints.buffer_minutes));

        for id in [&fixture.home.id, &fixture.away.id] {
            self.record_placement(id, end);
        }

        Ok((court, start, end))
    }

    /// First start at or after `earliest` that keeps the whole match inside
    /// working hours and under both competitors' daily cap.
    fn fit(
        &self,
        earliest: NaiveDateTime,
        fixture: &Fixture,
        horizon: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        let duration = minutes(self.constraints.match_duration_minutes);
        let mut start = self.adjust_to_working_hours(earliest);

        while start <= horizon {
            let date = start.date();
            let closing = at_hour(date, self.constraints.working_hours_end);
            let capped = [&fixture.home.id, &fixture.away.id]
                .into_iter()
                .any(|id| self.at_daily_cap(id, date));

            if start + duration > closing || capped {
                start = at_hour(date, 24 + self.constraints.working_hours_start);
                continue;
            }
            return Some(start);
        }

        None
    }

    fn at_daily_cap(&self, competitor_id: &str, date: NaiveDate) -> bool {
        let Some(cap) = self.constraints.max_matches_per_day else {
            return false;
        };
        self.daily
            .get(&(competitor_id.to_string(), date))
            .is_some_and(|&count| count >= cap)
    }

    fn record_placement(&mut self, competitor_id: &CompetitorId, end: NaiveDateTime) {
        self.rest.insert(
            competitor_id.clone(),
            PlayerRestState {
                competitor_id: competitor_id.clone(),
                last_match_end: end,
                next_available: end + minutes(self.constraints.minimum_rest_minutes),
            },
        );
        // a match ending exactly at midnight still counts for the day it started
        let day = (end - TimeDelta::minutes(1)).date();
        *self.daily.entry((competitor_id.clone(), day)).or_insert(0) += 1;
    }

    /// Move a time into the working window: before opening goes to that day's
    /// opening, at or after closing goes to the next day's opening.
    pub fn adjust_to_working_hours(&self, time: NaiveDateTime) -> NaiveDateTime {
        let hour = time.hour();
        if hour < self.constraints.working_hours_start {
            at_hour(time.date(), self.constraints.working_hours_start)
        } else if hour >= self.constraints.working_hours_end {
            at_hour(time.date(), 24 + self.constraints.working_hours_start)
        } else {
            time
        }
    }

    /// Whether `time` falls in `[start, end)` of the working window
    pub fn is_within_working_hours(&self, time: NaiveDateTime) -> bool {
        (self.constraints.working_hours_start..self.constraints.working_hours_end)
            .contains(&time.hour())
    }

    /// Whether a competitor has finished resting by `time`
    pub fn is_player_available(&self, competitor_id: &str, time: NaiveDateTime) -> bool {
        self.rest
            .get(competitor_id)
            .is_none_or(|state| time >= state.next_available)
    }

    /// Rest state from the most recent `schedule` call
    pub fn rest_state(&self, competitor_id: &str) -> Option<&PlayerRestState> {
        self.rest.get(competitor_id)
    }
}

fn minutes(value: u32) -> TimeDelta {
    TimeDelta::minutes(i64::from(value))
}

/// `date` at the given hour; hours past 23 spill into following days
fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(hour))
}

/// Schedule span in minutes and booked percentage of that span per court
fn utilization(matches: &[ScheduledMatch], courts: &[Court]) -> (i64, BTreeMap<String, f64>) {
    let span = matches
        .iter()
        .map(|m| m.start)
        .min()
        .zip(matches.iter().map(|m| m.end).max())
        .map_or(0, |(first, last)| (last - first).num_minutes());

    let mut booked: HashMap<&str, i64> = HashMap::new();
    for scheduled in matches {
        *booked.entry(scheduled.court.id.as_str()).or_insert(0) += scheduled.duration_minutes();
    }

    let per_court = courts
        .iter()
        .map(|court| {
            let minutes = booked.get(court.id.as_str()).copied().unwrap_or(0);
            let percent = if span > 0 {
                minutes as f64 / span as f64 * 100.0
            } else {
                0.0
            };
            (court.id.clone(), percent)
        })
        .collect();

    (span, per_court)
}
