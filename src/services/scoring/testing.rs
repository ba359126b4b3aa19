//! 测试用的内存存储实现
//!
//! 行为与 SeaORM 实现保持一致的语义：submission_id 唯一、
//! 平均分只统计 COMPLETED、成绩与明细同批写入。

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    grading_results::{entities::GradingResult, requests::CreateGradingResultRequest},
    scores::{
        entities::{Score, ScoringStatus},
        requests::{CreateScoreRequest, ScoreUpdate},
    },
};
use crate::storage::Storage;
use crate::utils::percentage_of;

#[derive(Default)]
struct Inner {
    scores: HashMap<i64, Score>,
    results: Vec<GradingResult>,
    next_score_id: i64,
    next_result_id: i64,
}

#[derive(Default)]
pub(crate) struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    /// 直接写入一条成绩（测试夹具）
    pub(crate) fn seed_score(
        &self,
        submission_id: i64,
        exam_id: i64,
        student_id: i64,
        total_score: Option<f64>,
        status: ScoringStatus,
    ) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_score_id += 1;
        let id = inner.next_score_id;
        let now = chrono::Utc::now();
        inner.scores.insert(
            id,
            Score {
                id,
                submission_id,
                exam_id,
                student_id,
                total_score,
                max_score: 20.0,
                percentage_score: total_score.map(|t| percentage_of(t, 20.0)),
                status,
                grading_details: None,
                corrector_id: None,
                scoring_algorithm: None,
                created_at: now,
                updated_at: now,
            },
        );
    }

    fn upsert(inner: &mut Inner, score: CreateScoreRequest) -> Score {
        let now = chrono::Utc::now();
        let existing_id = inner
            .scores
            .values()
            .find(|s| s.submission_id == score.submission_id)
            .map(|s| s.id);

        let id = match existing_id {
            Some(id) => id,
            None => {
                inner.next_score_id += 1;
                inner.next_score_id
            }
        };

        let created_at = inner
            .scores
            .get(&id)
            .map(|s| s.created_at)
            .unwrap_or(now);

        let stored = Score {
            id,
            submission_id: score.submission_id,
            exam_id: score.exam_id,
            student_id: score.student_id,
            total_score: score.total_score,
            max_score: score.max_score,
            percentage_score: score.percentage_score,
            status: score.status,
            grading_details: score.grading_details,
            corrector_id: score.corrector_id,
            scoring_algorithm: score.scoring_algorithm,
            created_at,
            updated_at: now,
        };
        inner.scores.insert(id, stored.clone());
        stored
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_score_by_id(&self, id: i64) -> Result<Option<Score>> {
        Ok(self.inner.lock().unwrap().scores.get(&id).cloned())
    }

    async fn get_score_by_submission_id(&self, submission_id: i64) -> Result<Option<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .find(|s| s.submission_id == submission_id)
            .cloned())
    }

    async fn list_scores_by_exam_id(&self, exam_id: i64) -> Result<Vec<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .filter(|s| s.exam_id == exam_id)
            .cloned()
            .collect())
    }

    async fn list_scores_by_student_id(&self, student_id: i64) -> Result<Vec<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_scores_by_exam_and_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Vec<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .filter(|s| s.exam_id == exam_id && s.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_scores_by_status(&self, status: ScoringStatus) -> Result<Vec<Score>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .filter(|s| s.status == status)
            .cloned()
            .collect())
    }

    async fn count_scores_by_exam_id(&self, exam_id: i64) -> Result<i64> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .scores
            .values()
            .filter(|s| s.exam_id == exam_id)
            .count() as i64)
    }

    async fn average_score_by_exam_id(&self, exam_id: i64) -> Result<Option<f64>> {
        let inner = self.inner.lock().unwrap();
        let completed: Vec<f64> = inner
            .scores
            .values()
            .filter(|s| s.exam_id == exam_id && s.status == ScoringStatus::Completed)
            .filter_map(|s| s.total_score)
            .collect();

        if completed.is_empty() {
            return Ok(None);
        }
        Ok(Some(completed.iter().sum::<f64>() / completed.len() as f64))
    }

    async fn save_score_with_result(
        &self,
        score: CreateScoreRequest,
        result: CreateGradingResultRequest,
    ) -> Result<Score> {
        let mut inner = self.inner.lock().unwrap();
        let stored = Self::upsert(&mut inner, score);

        inner.next_result_id += 1;
        let result_id = inner.next_result_id;
        inner.results.push(GradingResult {
            id: result_id,
            score_id: stored.id,
            question_id: result.question_id,
            points_earned: result.points_earned,
            points_possible: result.points_possible,
            feedback: result.feedback,
            corrections: result.corrections,
            auto_graded: result.auto_graded,
            graded_at: chrono::Utc::now(),
            grading_metadata: result.grading_metadata,
        });

        Ok(stored)
    }

    async fn mark_score_failed(&self, score: CreateScoreRequest) -> Result<Score> {
        let mut inner = self.inner.lock().unwrap();
        Ok(Self::upsert(&mut inner, score))
    }

    async fn update_score(&self, id: i64, update: ScoreUpdate) -> Result<Option<Score>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(score) = inner.scores.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(total_score) = update.total_score {
            score.total_score = Some(total_score);
        }
        if let Some(percentage_score) = update.percentage_score {
            score.percentage_score = Some(percentage_score);
        }
        if let Some(status) = update.status {
            score.status = status;
        }
        if let Some(grading_details) = update.grading_details {
            score.grading_details = Some(grading_details);
        }
        score.updated_at = chrono::Utc::now();

        Ok(Some(score.clone()))
    }

    async fn list_grading_results_by_score_id(&self, score_id: i64) -> Result<Vec<GradingResult>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .results
            .iter()
            .filter(|r| r.score_id == score_id)
            .cloned()
            .collect())
    }

    async fn list_grading_results_by_question_id(
        &self,
        question_id: i64,
    ) -> Result<Vec<GradingResult>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .results
            .iter()
            .filter(|r| r.question_id == Some(question_id))
            .cloned()
            .collect())
    }

    async fn list_grading_results_by_score_and_question(
        &self,
        score_id: i64,
        question_id: i64,
    ) -> Result<Vec<GradingResult>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .results
            .iter()
            .filter(|r| r.score_id == score_id && r.question_id == Some(question_id))
            .cloned()
            .collect())
    }
}
