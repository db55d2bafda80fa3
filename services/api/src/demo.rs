use crate::infra::{load_case, parse_category, sample_case, LoggingTransport};
use case_review::config::AppConfig;
use case_review::error::AppError;
use case_review::review::draft::decode;
use case_review::review::{
    cqc_questions, CaseInput, Category, InMemoryDraftStore, ReviewAction, ReviewService,
    ScoringConfig, ScoringEngine, SessionSnapshot, SubmissionPayload, UqcQuestion, Verdict,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Draft-shaped JSON file holding the reviewer's answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Case description to attach to the payload. Defaults to REVIEW_CASE_PATH or the sample case.
    #[arg(long)]
    pub(crate) case: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Primary category to review the sample highlight under
    #[arg(long, value_parser = parse_category, default_value = "Gaming")]
    pub(crate) category: Category,
    /// Mark the highlight as containing ANSA / excessive profanity
    #[arg(long)]
    pub(crate) ansa: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { answers, case } = args;

    let case = match case {
        Some(path) => CaseInput::from_path(path)?,
        None => load_case(&AppConfig::load()?.review)?,
    };
    let raw = std::fs::read_to_string(&answers)?;
    let session = decode(&raw)?;

    let engine = ScoringEngine::default();
    let snapshot = SessionSnapshot::capture(&session, &engine);
    let card = engine.evaluate(&session);
    let payload = SubmissionPayload::build(&case, &session, &card);

    println!("Scored {} for room {}", answers.display(), case.room_id);
    render_snapshot(&snapshot);
    render_payload(&payload);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { category, ansa } = args;

    println!("Highlight review demo ({category})");
    let service = ReviewService::new(
        sample_case(),
        Arc::new(InMemoryDraftStore::default()),
        Arc::new(LoggingTransport),
        ScoringConfig::default(),
    );
    println!("- Case {}", service.case().room_id);

    println!("\nUQC");
    for question in UqcQuestion::ordered() {
        let snapshot = service.apply(ReviewAction::SetUqcAnswer {
            question,
            verdict: Verdict::Good,
        })?;
        println!("  {} -> good ({})", question.id(), snapshot.stage_label);
    }
    if ansa {
        service.apply(ReviewAction::SetAnsa { value: true })?;
        println!("  ANSA flagged");
    }

    println!("\nCQC");
    let snapshot = service.apply(ReviewAction::SelectPrimaryCategory {
        category: Some(category),
    })?;
    println!(
        "  {} selected, {} of {} answers unlock submission ({})",
        category,
        snapshot.cqc_required,
        snapshot.cqc_questions.len(),
        snapshot.stage_label
    );

    // Every question but the last is satisfied.
    let questions = cqc_questions(category);
    for (index, question) in questions.iter().enumerate() {
        let value = index + 1 < questions.len();
        let snapshot = service.apply(ReviewAction::SetCqcAnswer {
            question_id: question.id.to_string(),
            value,
        })?;
        println!(
            "  {} -> {} ({})",
            question.label,
            if value { "yes" } else { "no" },
            snapshot.stage_label
        );
    }
    if category == Category::Others {
        service.apply(ReviewAction::SetCategoryFreeText {
            text: "DEMO".to_string(),
        })?;
    }

    println!();
    render_snapshot(&service.snapshot());

    let submitted = service.submit()?;
    println!("\nSubmitted at {}", submitted.receipt.accepted_at.to_rfc3339());
    render_payload(&submitted.payload);
    println!("Session after submit: {}", service.snapshot().stage_label);
    Ok(())
}

fn render_snapshot(snapshot: &SessionSnapshot) {
    println!("Stage: {}", snapshot.stage_label);
    match &snapshot.uqc_rating {
        Some(rating) => println!("UQC: {} ({}/4)", rating.rating, rating.score),
        None => println!("UQC: incomplete"),
    }
    match &snapshot.cqc_rating {
        Some(rating) => println!(
            "CQC: {} ({}/{} = {:.0}%, {} answered)",
            rating.rating,
            rating.score,
            rating.possible,
            rating.pct * 100.0,
            snapshot.cqc_answered
        ),
        None => println!("CQC: no category selected"),
    }
    match (snapshot.overall_rating, snapshot.overall_pct) {
        (Some(rating), Some(pct)) => println!("Overall: {} ({:.0}%)", rating, pct * 100.0),
        _ => println!("Overall: undefined"),
    }
    if snapshot.flagged {
        println!("Flagged for discussion");
    }
}

fn render_payload(payload: &SubmissionPayload) {
    match serde_json::to_string_pretty(payload) {
        Ok(json) => println!("Submission payload:\n{}", json),
        Err(err) => println!("Submission payload unavailable: {}", err),
    }
}
