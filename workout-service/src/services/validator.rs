//! Request validation for `POST /workout`.
//!
//! Works on the raw JSON object so that type mismatches (a numeric goal, a
//! float duration) surface as the same field errors as bad values.

use crate::models::{Goal, Injury, InjuryAction, WorkDay, WorkoutRequest};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Shortest session the planner accepts, in minutes.
pub const MIN_DURATION_MINUTES: u64 = 20;

/// First rule a request broke. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid goal. Must be 'gain' or 'lose'.")]
    InvalidGoal,

    #[error("Duration must be an integer of at least 20 minutes.")]
    InvalidDuration,

    #[error("Invalid work_day. Must be 'leg', 'push', or 'pull'.")]
    InvalidWorkDay,

    #[error("Invalid injury_action. Must be 'avoid' or 'address' if an injury area is provided.")]
    InvalidInjuryAction,
}

impl ValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidGoal => "goal",
            ValidationError::InvalidDuration => "duration",
            ValidationError::InvalidWorkDay => "work_day",
            ValidationError::InvalidInjuryAction => "injury_action",
        }
    }
}

/// Validate a raw request body into a [`WorkoutRequest`].
pub fn validate_request(input: &Map<String, Value>) -> Result<WorkoutRequest, ValidationError> {
    let goal = Goal::parse(&normalized(input, "goal", None)).ok_or(ValidationError::InvalidGoal)?;

    let duration = match input.get("duration") {
        Some(Value::Number(minutes)) if is_whole_minutes(minutes) => minutes.clone(),
        _ => return Err(ValidationError::InvalidDuration),
    };

    let work_day =
        WorkDay::parse(&normalized(input, "work_day", None)).ok_or(ValidationError::InvalidWorkDay)?;

    // The bundled web client posts pain_area/pain_preference.
    let area = normalized(input, "injury_area", Some("pain_area"));
    let injury = if area.is_empty() {
        None
    } else {
        let action = InjuryAction::parse(&normalized(input, "injury_action", Some("pain_preference")))
            .ok_or(ValidationError::InvalidInjuryAction)?;
        Some(Injury { area, action })
    };

    Ok(WorkoutRequest {
        goal,
        work_day,
        duration,
        injury,
    })
}

/// Integer literal of at least [`MIN_DURATION_MINUTES`]. Integers beyond
/// `u64` are accepted as long as they are positive.
fn is_whole_minutes(minutes: &Number) -> bool {
    let literal = minutes.to_string();
    if literal.contains(['.', 'e', 'E']) {
        return false;
    }

    match minutes.as_u64() {
        Some(value) => value >= MIN_DURATION_MINUTES,
        None => !literal.starts_with('-'),
    }
}

/// Trimmed, lowercased string value of `key` (falling back to `alias`).
/// Missing, null and non-string values normalize to "".
fn normalized(input: &Map<String, Value>, key: &str, alias: Option<&str>) -> String {
    let value = match input.get(key) {
        Some(Value::Null) | None => alias.and_then(|a| input.get(a)),
        present => present,
    };

    value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test body must be an object"),
        }
    }

    #[test]
    fn test_valid_minimal_request() {
        let request =
            validate_request(&body(json!({ "goal": "lose", "duration": 30, "work_day": "leg" })))
                .unwrap();

        assert_eq!(request.goal, Goal::Lose);
        assert_eq!(request.work_day, WorkDay::Leg);
        assert_eq!(request.duration, Number::from(30));
        assert!(request.injury.is_none());
    }

    #[test]
    fn test_values_are_trimmed_and_lowercased() {
        let request = validate_request(&body(json!({
            "goal": "  GAIN ",
            "duration": 20,
            "work_day": "Push",
            "injury_area": " Knee, Lower Back ",
            "injury_action": "AVOID"
        })))
        .unwrap();

        assert_eq!(request.goal, Goal::Gain);
        assert_eq!(request.work_day, WorkDay::Push);
        assert_eq!(
            request.injury,
            Some(Injury {
                area: "knee, lower back".to_string(),
                action: InjuryAction::Avoid,
            })
        );
    }

    #[test]
    fn test_invalid_goal() {
        for goal in [json!("bulk"), json!(""), json!(7), Value::Null] {
            let err = validate_request(&body(json!({
                "goal": goal, "duration": 30, "work_day": "leg"
            })))
            .unwrap_err();
            assert_eq!(err, ValidationError::InvalidGoal);
        }
    }

    #[test]
    fn test_missing_goal() {
        let err = validate_request(&body(json!({ "duration": 30, "work_day": "leg" }))).unwrap_err();
        assert_eq!(err, ValidationError::InvalidGoal);
        assert_eq!(err.field(), "goal");
    }

    #[test]
    fn test_invalid_duration() {
        for duration in [json!(19), json!(-5), json!(30.0), json!(25.5), json!("30"), json!(true), Value::Null] {
            let err = validate_request(&body(json!({
                "goal": "gain", "duration": duration, "work_day": "leg"
            })))
            .unwrap_err();
            assert_eq!(err, ValidationError::InvalidDuration, "duration {}", duration);
        }
    }

    #[test]
    fn test_duration_lower_bound_is_inclusive() {
        let request = validate_request(&body(json!({
            "goal": "gain", "duration": 20, "work_day": "pull"
        })))
        .unwrap();
        assert_eq!(request.duration, Number::from(20));
    }

    #[test]
    fn test_duration_beyond_u64_is_accepted() {
        let input: Map<String, Value> = serde_json::from_str(
            r#"{"goal": "gain", "duration": 100000000000000000000, "work_day": "leg"}"#,
        )
        .unwrap();

        let request = validate_request(&input).unwrap();
        assert_eq!(request.duration.to_string(), "100000000000000000000");
    }

    #[test]
    fn test_large_negative_and_exponent_durations_are_rejected() {
        for raw in ["-100000000000000000000", "1e2", "30.0", "-5"] {
            let input: Map<String, Value> = serde_json::from_str(&format!(
                r#"{{"goal": "gain", "duration": {}, "work_day": "leg"}}"#,
                raw
            ))
            .unwrap();
            assert_eq!(
                validate_request(&input).unwrap_err(),
                ValidationError::InvalidDuration,
                "duration {}",
                raw
            );
        }
    }

    #[test]
    fn test_invalid_work_day() {
        let err = validate_request(&body(json!({
            "goal": "gain", "duration": 45, "work_day": "arms"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidWorkDay);
        assert_eq!(
            err.to_string(),
            "Invalid work_day. Must be 'leg', 'push', or 'pull'."
        );
    }

    #[test]
    fn test_injury_area_requires_valid_action() {
        for action in [json!("ignore"), json!(""), Value::Null] {
            let err = validate_request(&body(json!({
                "goal": "gain",
                "duration": 45,
                "work_day": "leg",
                "injury_area": "knee",
                "injury_action": action
            })))
            .unwrap_err();
            assert_eq!(err, ValidationError::InvalidInjuryAction);
        }
    }

    #[test]
    fn test_action_ignored_without_injury_area() {
        let request = validate_request(&body(json!({
            "goal": "gain",
            "duration": 45,
            "work_day": "leg",
            "injury_area": "   ",
            "injury_action": "nonsense"
        })))
        .unwrap();
        assert!(request.injury.is_none());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let err = validate_request(&body(json!({
            "goal": "bulk", "duration": 5, "work_day": "arms",
            "injury_area": "knee", "injury_action": "x"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidGoal);

        let err = validate_request(&body(json!({
            "goal": "lose", "duration": 5, "work_day": "arms"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidDuration);

        let err = validate_request(&body(json!({
            "goal": "lose", "duration": 30, "work_day": "arms",
            "injury_area": "knee", "injury_action": "x"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidWorkDay);
    }

    #[test]
    fn test_web_client_aliases() {
        let request = validate_request(&body(json!({
            "goal": "lose",
            "duration": 60,
            "work_day": "push",
            "pain_area": "shoulder",
            "pain_preference": "address"
        })))
        .unwrap();

        assert_eq!(
            request.injury,
            Some(Injury {
                area: "shoulder".to_string(),
                action: InjuryAction::Address,
            })
        );
    }

    #[test]
    fn test_canonical_keys_take_precedence_over_aliases() {
        let request = validate_request(&body(json!({
            "goal": "lose",
            "duration": 60,
            "work_day": "push",
            "injury_area": "knee",
            "injury_action": "avoid",
            "pain_area": "shoulder",
            "pain_preference": "address"
        })))
        .unwrap();

        let injury = request.injury.unwrap();
        assert_eq!(injury.area, "knee");
        assert_eq!(injury.action, InjuryAction::Avoid);
    }
}
