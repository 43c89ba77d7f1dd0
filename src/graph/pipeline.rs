//! @acp:module "Answer Pipeline"
//! @acp:summary "Transformation and fail-fast validation over an answer set"
//! @acp:domain engine
//! @acp:layer service

use super::QuestionGraph;
use crate::answers::{Answers, ResolvedAnswers};
use crate::error::{Result, ScaffoldError};

impl QuestionGraph {
    /// Normalize answers in declaration order.
    ///
    /// Each question's condition is checked against the set as left by the
    /// transforms before it, so later conditions see transformed values.
    pub async fn apply_transforms(&self, mut answers: Answers) -> Result<Answers> {
        for q in self.iter() {
            let Some(transform) = q.transform else {
                continue;
            };
            if !q.is_active(&answers) {
                continue;
            }
            let Some(current) = answers.get(q.name) else {
                continue;
            };

            let transformed = transform(current).await?;
            tracing::debug!("Transformed \"{}\" to {}", q.name, transformed);
            answers.insert(q.name, transformed);
        }
        Ok(answers)
    }

    /// Run validators of active questions in declaration order.
    ///
    /// The first rejection aborts with the validator's own message. Questions
    /// named in `skip` are not validated; unanswered optional questions are
    /// never validated.
    pub async fn validate(&self, answers: &Answers, skip: &[&str]) -> Result<()> {
        for q in self.iter() {
            let Some(validate) = q.validate else {
                continue;
            };
            if skip.contains(&q.name) {
                tracing::debug!("Skipping validation of \"{}\"", q.name);
                continue;
            }
            if !q.is_active(answers) {
                continue;
            }
            let Some(value) = answers.get(q.name) else {
                continue;
            };

            if let Err(message) = validate(value).await {
                return Err(ScaffoldError::Validation(message));
            }
        }
        Ok(())
    }

    /// Completeness, then transforms, then validation
    pub async fn finalize(&self, answers: Answers, skip: &[&str]) -> Result<ResolvedAnswers> {
        self.check_completeness(&answers)?;
        let answers = self.apply_transforms(answers).await?;
        self.validate(&answers, skip).await?;
        tracing::info!("Resolved {} answers", answers.len());
        Ok(ResolvedAnswers::new(answers))
    }
}
