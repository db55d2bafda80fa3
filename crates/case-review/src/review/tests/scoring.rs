use super::common::{all_good, gaming_session, session_with_uqc};
use crate::review::scoring::{required_answers, uqc_raw_score};
use crate::review::{
    cqc_questions, Category, CqcAnswers, Rating, ScoringConfig, ScoringEngine, UqcAnswers,
    Verdict,
};

fn rating_for(verdicts: [Verdict; 4], ansa: bool) -> (u8, Rating) {
    let session = session_with_uqc(verdicts, ansa);
    let rating = ScoringEngine::default()
        .uqc(session.uqc())
        .expect("complete sheet has a rating");
    (rating.score, rating.rating)
}

#[test]
fn uqc_rating_follows_good_count() {
    use Verdict::{Bad, Good};

    assert_eq!(rating_for([Good, Good, Good, Good], false), (4, Rating::Good));
    assert_eq!(rating_for([Good, Good, Good, Bad], false), (3, Rating::Ok));
    assert_eq!(rating_for([Good, Bad, Good, Bad], false), (2, Rating::Ok));
    assert_eq!(rating_for([Bad, Bad, Good, Bad], false), (1, Rating::Bad));
    assert_eq!(rating_for([Bad, Bad, Bad, Bad], false), (0, Rating::Bad));
}

#[test]
fn ansa_deducts_one_point_and_forces_bad() {
    use Verdict::{Bad, Good};

    assert_eq!(rating_for(all_good(), true), (3, Rating::Bad));
    assert_eq!(rating_for([Good, Good, Good, Bad], true), (2, Rating::Bad));
    assert_eq!(rating_for([Good, Bad, Good, Bad], true), (1, Rating::Bad));
    assert_eq!(rating_for([Bad, Bad, Good, Bad], true), (0, Rating::Bad));
    assert_eq!(rating_for([Bad; 4], true), (0, Rating::Bad));
}

#[test]
fn incomplete_uqc_sheet_has_no_rating() {
    let mut answers = UqcAnswers::default();
    answers.visual_clarity = Some(Verdict::Good);
    answers.audio_clarity = Some(Verdict::Good);
    answers.video_completeness = Some(Verdict::Good);

    let engine = ScoringEngine::default();
    assert!(engine.uqc(&answers).is_none());
    assert_eq!(uqc_raw_score(&answers), 3);

    answers.ansa = true;
    assert!(engine.uqc(&answers).is_none());
}

#[test]
fn every_category_has_a_checklist() {
    for category in Category::ordered() {
        let questions = cqc_questions(category);
        let expected = if category == Category::Others { 3 } else { 4 };
        assert_eq!(questions.len(), expected, "{category}");

        let mut ids: Vec<_> = questions.iter().map(|question| question.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), questions.len(), "duplicate ids in {category}");
    }
}

#[test]
fn gaming_checklist_keeps_its_order() {
    let ids: Vec<_> = cqc_questions(Category::Gaming)
        .iter()
        .map(|question| question.id)
        .collect();
    assert_eq!(
        ids,
        ["game_moment", "highlight_action", "no_loading", "host_interacts"]
    );
}

#[test]
fn required_answers_rounds_half_up() {
    assert_eq!(required_answers(4), 2);
    assert_eq!(required_answers(3), 2);
    assert_eq!(required_answers(1), 1);
    assert_eq!(required_answers(0), 0);
}

#[test]
fn rate_pct_thresholds_are_inclusive() {
    let config = ScoringConfig::default();
    let expectations = [
        (1.0, Rating::Good),
        (0.75, Rating::Good),
        (0.7499, Rating::Ok),
        (0.40, Rating::Ok),
        (0.39999, Rating::Bad),
        (0.0, Rating::Bad),
    ];

    for (pct, expected) in expectations {
        assert_eq!(config.rate_pct(pct), expected, "pct {pct}");
    }
}

#[test]
fn cqc_pct_landing_on_a_threshold_reaches_it() {
    let engine = ScoringEngine::new(ScoringConfig {
        ok_threshold: 0.5,
        ..ScoringConfig::default()
    });
    let questions = cqc_questions(Category::Gaming);
    let mut answers = CqcAnswers::blank(questions.iter().map(|question| question.id));
    answers.set("game_moment", Some(true));

    let rating = engine.cqc(Some(Category::Gaming), &answers).expect("rated");
    assert_eq!(rating.rating, Rating::Bad);

    answers.set("no_loading", Some(true));
    let rating = engine.cqc(Some(Category::Gaming), &answers).expect("rated");
    assert_eq!(rating.pct, 0.5);
    assert_eq!(rating.rating, Rating::Ok);
}

#[test]
fn cqc_rating_uses_inclusive_thresholds() {
    let engine = ScoringEngine::default();
    let questions = cqc_questions(Category::Dancing);
    let ids: Vec<_> = questions.iter().map(|question| question.id).collect();

    let expectations = [
        (0, Rating::Bad),
        (1, Rating::Bad),
        (2, Rating::Ok),
        (3, Rating::Good),
        (4, Rating::Good),
    ];
    for (yes, expected) in expectations {
        let mut answers = CqcAnswers::blank(ids.iter().copied());
        for id in ids.iter().take(yes) {
            answers.set(id, Some(true));
        }

        let rating = engine
            .cqc(Some(Category::Dancing), &answers)
            .expect("category selected");
        assert_eq!(rating.score, yes as u32);
        assert_eq!(rating.possible, 4);
        assert_eq!(rating.rating, expected, "{yes} of 4");
    }
}

#[test]
fn unanswered_cqc_questions_count_as_no() {
    let engine = ScoringEngine::default();
    let mut answers = CqcAnswers::blank(["key_action", "host_visible", "understandable"]);
    answers.set("key_action", Some(true));
    answers.set("host_visible", Some(false));

    let rating = engine
        .cqc(Some(Category::Others), &answers)
        .expect("category selected");
    assert_eq!((rating.score, rating.possible), (1, 3));
    assert_eq!(rating.rating, Rating::Bad);
}

#[test]
fn cqc_without_category_is_undefined() {
    let engine = ScoringEngine::default();
    assert!(engine.cqc(None, &CqcAnswers::default()).is_none());
}

#[test]
fn gaming_review_rates_good_overall() {
    let engine = ScoringEngine::default();
    let card = engine.evaluate(&gaming_session(false));

    let uqc = card.uqc.expect("uqc rated");
    let cqc = card.cqc.expect("cqc rated");
    assert_eq!((uqc.score, uqc.rating), (4, Rating::Good));
    assert_eq!((cqc.score, cqc.possible), (3, 4));
    assert_eq!(cqc.rating, Rating::Good);
    assert!((engine.overall_pct(&uqc, &cqc) - 0.9).abs() < 1e-9);
    assert_eq!(card.overall, Some(Rating::Good));
    assert_eq!(card.answered, 4);
}

#[test]
fn ansa_forces_bad_overall_regardless_of_cqc() {
    let card = ScoringEngine::default().evaluate(&gaming_session(true));

    assert_eq!(card.uqc.map(|uqc| uqc.rating), Some(Rating::Bad));
    assert_eq!(card.cqc.map(|cqc| cqc.rating), Some(Rating::Good));
    assert_eq!(card.overall, Some(Rating::Bad));
}

#[test]
fn overall_is_undefined_until_both_stages_rate() {
    let engine = ScoringEngine::default();
    let session = session_with_uqc(all_good(), false);

    let card = engine.evaluate(&session);
    assert!(card.uqc.is_some());
    assert!(card.cqc.is_none());
    assert!(card.overall.is_none());
}

#[test]
fn overall_boundary_at_ok_threshold_counts_as_ok() {
    // 2 of 4 UQC and 1 of 4 CQC lands exactly on 0.40.
    let engine = ScoringEngine::default();
    let mut session = session_with_uqc(
        [Verdict::Good, Verdict::Good, Verdict::Bad, Verdict::Bad],
        false,
    );
    session
        .select_primary_category(Some(Category::Singing))
        .expect("uqc complete");
    session.set_cqc_answer("singing_present", true).expect("known id");

    let card = engine.evaluate(&session);
    assert_eq!(card.overall, Some(Rating::Ok));
}

#[test]
fn custom_weights_change_the_overall_rating() {
    let engine = ScoringEngine::new(ScoringConfig {
        uqc_weight: 0.0,
        cqc_weight: 1.0,
        ..ScoringConfig::default()
    });
    let mut session = session_with_uqc(all_good(), false);
    session
        .select_primary_category(Some(Category::Gifting))
        .expect("uqc complete");
    session.set_cqc_answer("gift_present", false).expect("known id");
    session.set_cqc_answer("host_thanked", false).expect("known id");

    let card = engine.evaluate(&session);
    assert_eq!(card.overall, Some(Rating::Bad));
}
