//! Prompt templates for the round flow

use crate::core::string::clip_for_prompt;
use crate::leaderboard::entry::RankPosition;
use crate::round::judgment::JudgmentContext;

/// Longest submission excerpt embedded in a follow-up prompt
const SUBMISSION_EXCERPT_BYTES: usize = 6_000;

/// What the leader is told about its previous round
#[derive(Debug, Clone, Copy)]
pub struct PreviousRound<'a> {
    pub round_number: u32,
    pub score: f64,
    pub best_score: f64,
    pub submission: &'a str,
    pub feedback: &'a str,
    pub rank: Option<RankPosition>,
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the team leader
    pub fn leader_system() -> &'static str {
        r#"You lead a team competing to produce the best possible answer to a user's task.
Each round you submit one complete answer. An independent evaluator scores every
submission from 0 to 100 and explains its score.
Always submit a full, self-contained answer - never a diff or a partial draft."#
    }

    /// Task for round 1
    pub fn leader_initial_task(user_prompt: &str, instructions: Option<&str>) -> String {
        let mut prompt = format!(
            r#"Task:

{}

Produce your best complete answer."#,
            user_prompt
        );
        Self::push_instructions(&mut prompt, instructions);
        prompt
    }

    /// Task for round 2 onwards
    pub fn leader_improvement_task(
        user_prompt: &str,
        round: u32,
        previous: &PreviousRound<'_>,
        instructions: Option<&str>,
    ) -> String {
        let mut prompt = format!(
            r#"Task:

{}

This is round {}. Your submission in round {} scored {:.1}/100 (your best so far: {:.1})."#,
            user_prompt, round, previous.round_number, previous.score, previous.best_score
        );

        if let Some(rank) = previous.rank {
            prompt.push_str(&format!(
                "\nYou are currently ranked {} of {} teams.",
                rank.rank, rank.total_teams
            ));
        }

        prompt.push_str(&format!(
            "\n\nYour previous submission:\n---\n{}\n---\n",
            clip_for_prompt(previous.submission, SUBMISSION_EXCERPT_BYTES)
        ));

        if !previous.feedback.trim().is_empty() {
            prompt.push_str(&format!("\nEvaluator feedback:\n{}\n", previous.feedback));
        }

        prompt.push_str(
            "\nAddress the feedback and submit an improved, complete answer.",
        );
        Self::push_instructions(&mut prompt, instructions);
        prompt
    }

    /// System prompt for the evaluator
    pub fn evaluator_system() -> &'static str {
        r#"You are a strict, impartial evaluator. You score answers to a user's task on a
scale from 0 to 100 and justify every score with concrete observations.
Respond with JSON only."#
    }

    /// User prompt asking the evaluator to score one submission
    pub fn evaluation_prompt(user_query: &str, submission: &str) -> String {
        format!(
            r#"Task given to the team:

{}

Submission:
---
{}
---

Score the submission. Respond with a JSON object of this shape:
{{"overall_score": <0-100>, "metrics": [{{"name": "<criterion>", "score": <0-100>, "comment": "<one or two sentences>"}}]}}
Use 3 to 5 criteria relevant to the task (for example correctness, completeness, clarity)."#,
            user_query, submission
        )
    }

    /// System prompt for the improvement judge
    pub fn judgment_system() -> &'static str {
        r#"You decide whether running another improvement round for a team is worthwhile.
Continue only if the evaluator's feedback points at concrete, fixable issues and the
score trend suggests another attempt will likely score higher.
Respond with JSON only."#
    }

    /// User prompt for the improvement judge
    pub fn judgment_prompt(context: &JudgmentContext) -> String {
        let mut prompt = format!(
            r#"Task given to the team "{}":

{}

Rounds completed: {} (minimum {}, maximum {}; {} remaining)
"#,
            context.team_name,
            context.user_prompt,
            context.current_round(),
            context.min_rounds,
            context.max_rounds,
            context.remaining_rounds()
        );

        for round in &context.rounds {
            prompt.push_str(&format!(
                "\n--- Round {} (score {:.1}) ---\n",
                round.round_number, round.score
            ));
            if !round.feedback.is_empty() {
                prompt.push_str(&format!("Feedback:\n{}\n", round.feedback));
            }
            if !round.submission_excerpt.is_empty() {
                prompt.push_str(&format!("Submission excerpt:\n{}\n", round.submission_excerpt));
            }
        }

        prompt.push_str(
            r#"
Should the team run another round? Respond with a JSON object:
{"should_continue": <true|false>, "reasoning": "<short explanation>", "confidence": <0.0-1.0>}"#,
        );
        prompt
    }

    /// Excerpt of a submission for the judge prompt
    pub fn submission_excerpt(submission: &str) -> String {
        clip_for_prompt(submission, SUBMISSION_EXCERPT_BYTES / 4)
    }

    fn push_instructions(prompt: &mut String, instructions: Option<&str>) {
        if let Some(extra) = instructions.filter(|s| !s.trim().is_empty()) {
            prompt.push_str(&format!("\n\nAdditional instructions for your team:\n{}", extra));
        }
    }
}
