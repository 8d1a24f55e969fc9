use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::Moment;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum SortOrder {
    /// Newest first
    #[default]
    #[serde(rename = "desc")]
    #[strum(serialize = "desc")]
    Descending,
    #[serde(rename = "asc")]
    #[strum(serialize = "asc")]
    Ascending,
}

impl SortOrder {
    pub fn toggled(self) -> SortOrder {
        match self {
            SortOrder::Descending => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineOptions {
    pub sort: SortOrder,
    /// Only keep moments taken on this calendar day in `time_zone`
    pub date: Option<NaiveDate>,
    pub time_zone: Tz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineMoment<'a> {
    pub moment: &'a Moment,
    /// `None` for moments with a timestamp that couldn't be parsed
    pub taken_at: Option<DateTime<Utc>>,
}

/// Consecutive moments from the same local day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineDay<'a> {
    pub date: Option<NaiveDate>,
    pub moments: Vec<TimelineMoment<'a>>,
}

pub fn local_date(instant: &DateTime<Utc>, zone: Tz) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

/// Distinct local days that have at least one moment, newest first
pub fn available_dates(moments: &[Moment], zone: Tz) -> Vec<NaiveDate> {
    moments
        .iter()
        .filter_map(|moment| moment.taken_at(zone))
        .map(|taken_at| local_date(&taken_at, zone))
        .unique()
        .sorted_by(|a, b| b.cmp(a))
        .collect()
}

/// Filters and sorts moments for display.
///
/// Sorting is stable, moments with equal timestamps keep the order the backend sent them in.
/// Moments without a usable timestamp come last in either order and never match a date filter.
pub fn arrange<'a>(moments: &'a [Moment], options: &TimelineOptions) -> Vec<TimelineMoment<'a>> {
    let mut arranged: Vec<TimelineMoment<'a>> = moments
        .iter()
        .map(|moment| TimelineMoment {
            moment,
            taken_at: moment.taken_at(options.time_zone),
        })
        .filter(|tm| match options.date {
            None => true,
            Some(date) => tm
                .taken_at
                .is_some_and(|taken_at| local_date(&taken_at, options.time_zone) == date),
        })
        .collect();
    arranged.sort_by(|a, b| match (a.taken_at, b.taken_at) {
        (Some(a), Some(b)) => match options.sort {
            SortOrder::Descending => b.cmp(&a),
            SortOrder::Ascending => a.cmp(&b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    arranged
}

pub fn group_by_day<'a>(arranged: Vec<TimelineMoment<'a>>, zone: Tz) -> Vec<TimelineDay<'a>> {
    let mut days: Vec<TimelineDay<'a>> = Vec::new();
    for tm in arranged {
        let date = tm.taken_at.map(|taken_at| local_date(&taken_at, zone));
        match days.last_mut() {
            Some(day) if day.date == date => day.moments.push(tm),
            _ => days.push(TimelineDay {
                date,
                moments: vec![tm],
            }),
        }
    }
    days
}
