mod common;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use uuid::Uuid;

use common::{seed_pipeline, Backend};
use interview_conduct::error::Result;
use interview_conduct::models::interview::{Interview, InterviewStatus, InterviewType};
use interview_conduct::models::pipeline::{JobApplication, PipelineStage};
use interview_conduct::services::advancement_service::{
    AdvancementOutcome, AdvancementRules, SkipReason, StageAdvancementPolicy,
};
use interview_conduct::services::collaborators::PipelineGateway;

mock! {
    pub Pipeline {}

    #[async_trait]
    impl PipelineGateway for Pipeline {
        async fn get_application(&self, application_id: Uuid) -> Result<JobApplication>;
        async fn list_stages(&self, job_id: Uuid) -> Result<Vec<PipelineStage>>;
        async fn move_application_stage(
            &self,
            application_id: Uuid,
            next_stage_id: Uuid,
            rating: Option<i32>,
            note: &str,
        ) -> Result<()>;
    }
}

fn completed(kind: InterviewType, rating: Option<i32>, application_id: Uuid) -> Interview {
    let mut interview = common::interview(kind, Uuid::new_v4());
    interview.status = InterviewStatus::Completed;
    interview.overall_rating = rating;
    interview.job_application_id = Some(application_id);
    interview
}

#[tokio::test]
async fn technical_rated_four_moves_technical_to_final() {
    let backend = Backend::new();
    let (application_id, _) = seed_pipeline(&backend, "Technical");
    let policy = StageAdvancementPolicy::new(backend.clone(), AdvancementRules::default());

    let outcome = policy
        .apply(&completed(InterviewType::Technical, Some(4), application_id))
        .await;

    assert_eq!(
        outcome,
        AdvancementOutcome::Advanced {
            application_id,
            from_stage: "Technical".into(),
            to_stage: "Final".into(),
        }
    );
    assert_eq!(backend.moves.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn culture_fit_interview_leaves_application_alone() {
    let backend = Backend::new();
    let (application_id, _) = seed_pipeline(&backend, "Technical");
    let policy = StageAdvancementPolicy::new(backend.clone(), AdvancementRules::default());

    let outcome = policy
        .apply(&completed(InterviewType::CultureFit, Some(5), application_id))
        .await;

    assert_eq!(
        outcome,
        AdvancementOutcome::Skipped(SkipReason::IneligibleType(InterviewType::CultureFit))
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn rating_below_threshold_leaves_application_alone() {
    let backend = Backend::new();
    let (application_id, _) = seed_pipeline(&backend, "Technical");
    let policy = StageAdvancementPolicy::new(backend.clone(), AdvancementRules::default());

    let outcome = policy
        .apply(&completed(InterviewType::Technical, Some(2), application_id))
        .await;

    assert_eq!(
        outcome,
        AdvancementOutcome::Skipped(SkipReason::RatingBelowThreshold(2))
    );
    assert!(backend.moves.lock().unwrap().is_empty());
}

#[tokio::test]
async fn application_in_last_stage_stays_put() {
    let backend = Backend::new();
    let (application_id, _) = seed_pipeline(&backend, "final round");
    let policy = StageAdvancementPolicy::new(backend.clone(), AdvancementRules::default());

    let outcome = policy
        .apply(&completed(InterviewType::Final, Some(5), application_id))
        .await;

    assert_eq!(
        outcome,
        AdvancementOutcome::Skipped(SkipReason::AlreadyFinalStage("Final".into()))
    );
}

#[tokio::test]
async fn custom_rules_are_honoured() {
    let backend = Backend::new();
    let (application_id, _) = seed_pipeline(&backend, "Screening");
    let rules = AdvancementRules {
        enabled: true,
        min_rating: 5,
        eligible_types: vec![InterviewType::Behavioral],
    };
    let policy = StageAdvancementPolicy::new(backend.clone(), rules);

    let four = policy
        .apply(&completed(InterviewType::Behavioral, Some(4), application_id))
        .await;
    assert_eq!(four, AdvancementOutcome::Skipped(SkipReason::RatingBelowThreshold(4)));

    let five = policy
        .apply(&completed(InterviewType::Behavioral, Some(5), application_id))
        .await;
    assert!(matches!(five, AdvancementOutcome::Advanced { ref to_stage, .. } if to_stage == "Technical"));
}

#[tokio::test]
async fn disabled_rules_never_touch_the_pipeline() {
    let policy = StageAdvancementPolicy::new(
        Arc::new(MockPipeline::new()),
        AdvancementRules {
            enabled: false,
            ..AdvancementRules::default()
        },
    );

    let outcome = policy
        .apply(&completed(InterviewType::Technical, Some(5), Uuid::new_v4()))
        .await;
    assert_eq!(outcome, AdvancementOutcome::Skipped(SkipReason::Disabled));
}

#[tokio::test]
async fn move_carries_rating_and_note() {
    let job_id = Uuid::new_v4();
    let application_id = Uuid::new_v4();
    let screening = PipelineStage {
        id: Uuid::new_v4(),
        job_id,
        name: "Phone Screen".into(),
        order: 1,
    };
    let onsite = PipelineStage {
        id: Uuid::new_v4(),
        job_id,
        name: "Onsite".into(),
        order: 2,
    };
    let onsite_id = onsite.id;

    let mut pipeline = MockPipeline::new();
    pipeline
        .expect_get_application()
        .with(eq(application_id))
        .times(1)
        .returning(move |id| {
            Ok(JobApplication {
                id,
                job_id,
                current_stage: "phone screen".into(),
                current_stage_id: None,
            })
        });
    let stages = vec![onsite, screening];
    pipeline
        .expect_list_stages()
        .with(eq(job_id))
        .times(1)
        .returning(move |_| Ok(stages.clone()));
    pipeline
        .expect_move_application_stage()
        .withf(move |app, next, rating, note| {
            *app == application_id
                && *next == onsite_id
                && *rating == Some(3)
                && note.contains("Phone Screen interview (rating: 3/5)")
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let policy = StageAdvancementPolicy::new(Arc::new(pipeline), AdvancementRules::default());
    let outcome = policy
        .apply(&completed(InterviewType::PhoneScreen, Some(3), application_id))
        .await;

    assert!(matches!(outcome, AdvancementOutcome::Advanced { ref to_stage, .. } if to_stage == "Onsite"));
}
