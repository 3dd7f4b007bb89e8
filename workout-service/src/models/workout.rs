//! Workout request and plan models.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Training goal of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Gain,
    Lose,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Gain => "gain",
            Goal::Lose => "lose",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gain" => Some(Goal::Gain),
            "lose" => Some(Goal::Lose),
            _ => None,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Muscle-group split for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkDay {
    Leg,
    Push,
    Pull,
}

impl WorkDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkDay::Leg => "leg",
            WorkDay::Push => "push",
            WorkDay::Pull => "pull",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "leg" => Some(WorkDay::Leg),
            "push" => Some(WorkDay::Push),
            "pull" => Some(WorkDay::Pull),
            _ => None,
        }
    }
}

impl fmt::Display for WorkDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the plan should treat a reported injury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjuryAction {
    /// Steer clear of exercises that load the area.
    Avoid,
    /// Add rehabilitation work for the area.
    Address,
}

impl InjuryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InjuryAction::Avoid => "avoid",
            InjuryAction::Address => "address",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "avoid" => Some(InjuryAction::Avoid),
            "address" => Some(InjuryAction::Address),
            _ => None,
        }
    }
}

/// A reported injury. Only exists with a non-empty area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injury {
    /// Lowercased free text, possibly a comma-separated list ("knee, lower back").
    pub area: String,
    pub action: InjuryAction,
}

/// A validated plan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRequest {
    pub goal: Goal,
    pub work_day: WorkDay,
    /// Session length in minutes, at least 20, kept as the literal the client sent.
    pub duration: Number,
    pub injury: Option<Injury>,
}

/// Kind of movement an exercise is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Compound,
    Isolation,
    Cardio,
}

/// One exercise of a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    /// Free-form, e.g. "15-20 minutes".
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
}

/// The documented shape of a generated plan.
///
/// The service returns whatever JSON the model produced; this type is only
/// used to check that output against the shape the prompt asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub warmup: String,
    pub exercises: Vec<Exercise>,
    pub cooldown: String,
}

impl WorkoutPlan {
    /// True when no compound movement follows an isolation movement.
    pub fn compound_before_isolation(&self) -> bool {
        let mut seen_isolation = false;
        for exercise in &self.exercises {
            match exercise.exercise_type {
                ExerciseType::Isolation => seen_isolation = true,
                ExerciseType::Compound if seen_isolation => return false,
                _ => {}
            }
        }
        true
    }

    pub fn includes_cardio(&self) -> bool {
        self.exercises
            .iter()
            .any(|e| e.exercise_type == ExerciseType::Cardio)
    }

    /// Ordering and content rules the prompt imposes for the given goal.
    pub fn follows_rules_for(&self, goal: Goal) -> bool {
        self.compound_before_isolation() && (goal != Goal::Lose || self.includes_cardio())
    }
}
