use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date::{parse_calendar_instant, start_of_day, to_date_string};
use super::exercise::{Exercise, Minutes};
use super::validation::{non_empty, ValidationError};

/// A user's exercise history.
///
/// `count` is a running counter bumped on every append. It is never derived
/// from `log.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub count: i64,
    pub log: Vec<Exercise>,
}

impl ExerciseLog {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            count: 0,
            log: Vec::new(),
        }
    }

    pub fn append(&mut self, exercise: Exercise) -> i64 {
        self.log.push(exercise);
        self.count += 1;
        self.count
    }

    /// Filtered, reshaped view of this log. The log itself is left untouched.
    pub fn view(&self, filter: &LogFilter) -> LogResponse {
        LogResponse {
            id: self.id,
            user_id: self.user_id,
            count: self.count,
            log: filter.apply(&self.log),
        }
    }
}

/// Raw `GET /api/users/:_id/logs` query string.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Bounds are UTC instants. An entry sits at midnight UTC of its date, so
/// `from=2023-02-01T12:00:00Z` excludes an entry dated 2023-02-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub limit: Option<usize>,
}

impl TryFrom<LogQuery> for LogFilter {
    type Error = ValidationError;

    fn try_from(query: LogQuery) -> Result<Self, Self::Error> {
        let date =
            |raw: String| parse_calendar_instant(&raw).ok_or(ValidationError::InvalidDate(raw));

        let from = non_empty(query.from).map(date).transpose()?;
        let to = non_empty(query.to).map(date).transpose()?;
        let limit = non_empty(query.limit)
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| ValidationError::InvalidLimit(raw))
            })
            .transpose()?;

        Ok(Self { from, to, limit })
    }
}

impl LogFilter {
    /// Date bounds first, then `limit`, preserving insertion order.
    pub fn apply(&self, entries: &[Exercise]) -> Vec<LogEntry> {
        entries
            .iter()
            .filter(|e| self.from.map_or(true, |from| start_of_day(e.date) >= from))
            .filter(|e| self.to.map_or(true, |to| start_of_day(e.date) <= to))
            .take(self.limit.unwrap_or(usize::MAX))
            .map(LogEntry::from)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: Minutes,
    pub date: String,
}

impl From<&Exercise> for LogEntry {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: to_date_string(exercise.date),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub count: i64,
    pub log: Vec<LogEntry>,
}
