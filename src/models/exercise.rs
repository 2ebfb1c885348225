use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::date::{parse_calendar_date, to_date_string};
use super::validation::{non_empty, ValidationError};
use super::User;

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Exercise duration in minutes.
///
/// Whole values serialize as JSON integers so `30` round-trips as `30`
/// rather than `30.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

impl Serialize for Minutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl std::str::FromStr for Minutes {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidDuration(s.to_string()))?;

        if !value.is_finite() {
            return Err(ValidationError::InvalidDuration(s.to_string()));
        }

        Ok(Minutes(value))
    }
}

/// One logged activity, always stored inside a user's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub description: String,
    pub duration: Minutes,
    pub date: NaiveDate,
}

/// Raw `POST /api/users/:_id/exercises` form body.
#[derive(Debug, Default, Deserialize)]
pub struct ExerciseForm {
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

impl ExerciseForm {
    /// Validate the form. A missing or blank `date` becomes `today`.
    pub fn into_exercise(self, today: NaiveDate) -> Result<Exercise, ValidationError> {
        let description = self
            .description
            .ok_or(ValidationError::MissingField("description"))?;

        let duration = non_empty(self.duration)
            .ok_or(ValidationError::MissingField("duration"))?
            .parse::<Minutes>()?;

        let date = match non_empty(self.date) {
            Some(raw) => {
                parse_calendar_date(&raw).ok_or(ValidationError::InvalidDate(raw))?
            }
            None => today,
        };

        Ok(Exercise {
            description,
            duration,
            date,
        })
    }
}

/// Response for a freshly appended exercise.
#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub date: String,
    pub duration: Minutes,
    pub description: String,
}

impl ExerciseResponse {
    pub fn new(user: User, exercise: Exercise) -> Self {
        Self {
            id: user.id,
            username: user.username,
            date: to_date_string(exercise.date),
            duration: exercise.duration,
            description: exercise.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn form(description: Option<&str>, duration: Option<&str>, date: Option<&str>) -> ExerciseForm {
        ExerciseForm {
            description: description.map(str::to_string),
            duration: duration.map(str::to_string),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_minutes_serialization() {
        assert_eq!(serde_json::to_value(Minutes(30.0)).unwrap(), json!(30));
        assert_eq!(serde_json::to_value(Minutes(12.5)).unwrap(), json!(12.5));
        assert_eq!(serde_json::to_value(Minutes(-5.0)).unwrap(), json!(-5));
    }

    #[test]
    fn test_minutes_parsing() {
        assert_eq!("45".parse::<Minutes>().unwrap(), Minutes(45.0));
        assert_eq!(" 7.25 ".parse::<Minutes>().unwrap(), Minutes(7.25));
        assert!("thirty".parse::<Minutes>().is_err());
        assert!("NaN".parse::<Minutes>().is_err());
        assert!("inf".parse::<Minutes>().is_err());
    }

    #[test]
    fn test_form_with_date() {
        let exercise = form(Some("run"), Some("30"), Some("2023-01-15"))
            .into_exercise(today())
            .unwrap();

        assert_eq!(exercise.description, "run");
        assert_eq!(exercise.duration, Minutes(30.0));
        assert_eq!(exercise.date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn test_missing_or_blank_date_defaults_to_today() {
        let missing = form(Some("swim"), Some("20"), None).into_exercise(today()).unwrap();
        let blank = form(Some("swim"), Some("20"), Some("")).into_exercise(today()).unwrap();

        assert_eq!(missing.date, today());
        assert_eq!(blank.date, today());
    }

    #[test]
    fn test_form_rejections() {
        assert_eq!(
            form(None, Some("30"), None).into_exercise(today()),
            Err(ValidationError::MissingField("description"))
        );
        assert_eq!(
            form(Some("run"), None, None).into_exercise(today()),
            Err(ValidationError::MissingField("duration"))
        );
        assert_eq!(
            form(Some("run"), Some("long"), None).into_exercise(today()),
            Err(ValidationError::InvalidDuration("long".to_string()))
        );
        assert_eq!(
            form(Some("run"), Some("30"), Some("yesterday")).into_exercise(today()),
            Err(ValidationError::InvalidDate("yesterday".to_string()))
        );
    }

    #[test]
    fn test_blank_description_is_accepted() {
        let exercise = form(Some(""), Some("10"), None).into_exercise(today()).unwrap();
        assert_eq!(exercise.description, "");
    }
}
