//! Domain models for the workout service.

pub mod workout;

pub use workout::{
    Exercise, ExerciseType, Goal, Injury, InjuryAction, WorkDay, WorkoutPlan, WorkoutRequest,
};
