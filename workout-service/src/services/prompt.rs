//! Prompt construction for workout plan generation.

use crate::models::{InjuryAction, WorkoutRequest};
use crate::services::providers::ChatMessage;

/// System instruction sent ahead of every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a workout plan generator. Output only the JSON object as specified, with no additional commentary.";

/// One-shot example embedded in the prompt. The model is asked to mirror it.
pub const EXAMPLE_PLAN_JSON: &str = r#"{
  "cooldown": "5 minutes of stretching and cool down.",
  "exercises": [
    {
      "description": "A compound exercise that works the shoulders and triceps.",
      "duration": "15-20 minutes",
      "name": "Overhead Press",
      "reps": "12-15",
      "sets": 3,
      "type": "compound"
    },
    {
      "description": "A compound exercise targeting the chest and triceps.",
      "duration": "15-20 minutes",
      "name": "Bench Press",
      "reps": "12-15",
      "sets": 3,
      "type": "compound"
    },
    {
      "description": "Cardio exercise that targets upper body endurance.",
      "duration": "15 minutes",
      "name": "Rowing Machine",
      "type": "cardio"
    }
  ],
  "warmup": "10 minutes of dynamic warm-up (e.g., jogging, jumping jacks)."
}"#;

const PREAMBLE: &str = "Output only a valid JSON object with no additional text, explanation, or markdown formatting. \
The JSON object must start with a '{' and end with a '}'. I need a valid JSON so I can scrape data from it; do not add comments or any extra text!!!\n\n\
I am giving you a REAL example JSON, and your output needs to be exactly like this with the respective exercises.\n\
Below is an example of the expected JSON format:\n";

const CLOSING: &str = "The plan must include three keys: 'warmup', 'exercises', and 'cooldown'. \
The 'exercises' should list compound movements first, then isolation exercises, and include a cardio exercise if the goal is 'lose'.\n\n\
Output only a valid JSON object exactly in the above format.";

/// Render the user prompt for a validated request.
pub fn build_prompt(request: &WorkoutRequest) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + EXAMPLE_PLAN_JSON.len() + 1024);

    prompt.push_str(PREAMBLE);
    prompt.push_str(EXAMPLE_PLAN_JSON);
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Now, generate a detailed workout plan for a {} day session for a user whose goal is to {} weight \
         and who has {} minutes to workout. ",
        request.work_day, request.goal, request.duration
    ));

    if let Some(injury) = &request.injury {
        prompt.push_str(&format!(
            "\nThe user reports pain or injury in the following area(s): {}. ",
            injury.area
        ));
        prompt.push_str(match injury.action {
            InjuryAction::Avoid => "Avoid exercises that stress these areas. ",
            InjuryAction::Address => "Include rehabilitation exercises to help address these issues. ",
        });
    }

    prompt.push_str(CLOSING);
    prompt
}

/// The fixed two-message exchange: system instruction, then the prompt.
pub fn build_messages(request: &WorkoutRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(build_prompt(request)),
    ]
}
