use std::time::Duration;

use assert_matches::assert_matches;
use farmquest::catch_game::{CatchOutcome, GameSession, Phase, SESSION_SECS};
use farmquest::clock::TimeStep;
use farmquest::course::{AdvanceOutcome, CourseSession};
use farmquest::error::SessionError;
use farmquest::progress::Progress;
use farmquest::quiz::{Question, QuizSession, SubmitOutcome};
use farmquest::random::ScriptedRandom;
use farmquest::rewards::Wallet;

fn questions(n: usize) -> Vec<Question<String>> {
    (0..n)
        .map(|i| Question::new(format!("question {i}"), i % 4))
        .collect()
}

#[test]
fn quiz_with_one_wrong_answer_earns_two_stars() {
    let wallet = Wallet::new(0);
    let mut quiz = QuizSession::new(questions(3), &wallet).unwrap();

    for answer in [0, 3, 2] {
        quiz.submit(answer);
        quiz.advance(Duration::from_millis(1500));
    }

    assert_eq!(quiz.progress(), Progress::Completed);
    assert_eq!(quiz.score(), 20);
    let result = quiz.result().unwrap();
    assert_eq!(result.tier, 2);
    assert!(result.celebrate);
    assert_eq!(wallet.credits(), vec![20]);
}

#[test]
fn perfect_quiz_credits_once() {
    for n in 1..=6 {
        let wallet = Wallet::new(0);
        let mut quiz = QuizSession::new(questions(n), &wallet).unwrap();
        for i in 0..n {
            assert_eq!(quiz.submit(i % 4), SubmitOutcome::Correct);
            quiz.skip_delay();
        }
        assert_eq!(quiz.submit(0), SubmitOutcome::Finished);
        quiz.skip_delay();
        quiz.advance(Duration::from_secs(5));

        assert!(quiz.is_completed());
        assert_eq!(quiz.score(), 10 * n as u32);
        assert_eq!(quiz.result().unwrap().tier, (n as u32).min(3));
        assert_eq!(wallet.credits().len(), 1);
    }
}

#[test]
fn quiz_score_is_applied_before_the_delay() {
    let wallet = Wallet::new(0);
    let mut quiz = QuizSession::new(questions(2), &wallet).unwrap();

    quiz.submit(0);
    assert_eq!(quiz.score(), 10);
    assert_eq!(quiz.current_index(), 0);
    assert_eq!(quiz.submit(1), SubmitOutcome::Locked);

    quiz.advance(Duration::from_millis(1499));
    assert_eq!(quiz.current_index(), 0);
    quiz.advance(Duration::from_millis(1));
    assert_eq!(quiz.current_index(), 1);
}

#[test]
fn restart_drops_a_pending_advance() {
    let wallet = Wallet::new(0);
    let mut quiz = QuizSession::new(questions(3), &wallet).unwrap();

    quiz.submit(0);
    quiz.restart();
    quiz.advance(Duration::from_secs(2));

    assert_eq!(quiz.current_index(), 0);
    assert_eq!(quiz.score(), 0);
    assert!(!quiz.is_completed());
    assert_eq!(quiz.current_feedback(), None);
}

#[test]
fn two_chapter_course_credits_fifty() {
    let wallet = Wallet::new(350);
    let mut course = CourseSession::new(vec!["intro", "practice"], &wallet).unwrap();

    assert_eq!(course.advance(), AdvanceOutcome::Moved(1));
    assert!(!course.is_completed());
    assert_eq!(course.advance(), AdvanceOutcome::Completed);
    assert!(course.is_completed());
    assert_eq!(course.advance(), AdvanceOutcome::AlreadyCompleted);

    assert_eq!(course.score(), 50);
    assert_eq!(wallet.credits(), vec![50]);
    assert_eq!(wallet.balance(), 400);
}

#[test]
fn empty_sessions_are_rejected() {
    let wallet = Wallet::new(0);
    assert_matches!(
        QuizSession::<String, _>::new(Vec::new(), &wallet),
        Err(SessionError::EmptySteps { .. })
    );
    assert_matches!(
        CourseSession::<String, _>::new(Vec::new(), &wallet),
        Err(SessionError::EmptySteps { .. })
    );
}

#[test]
fn caught_drop_below_threshold_earns_nothing() {
    let wallet = Wallet::new(0);
    let mut game = GameSession::new(ScriptedRandom::new([0.5, 0.9]), &wallet);
    game.start();

    game.advance(Duration::from_millis(800));
    let object = game.objects()[0].clone();
    assert_eq!(object.x, 50.0);

    assert_eq!(game.catch(object.id), CatchOutcome::Rewarded);
    assert_eq!(game.score(), 10);

    game.advance(Duration::from_secs(SESSION_SECS as u64));
    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.remaining_secs(), 0);
    assert_eq!(game.score(), 10);
    assert!(wallet.credits().is_empty());
}

#[test]
fn penalty_never_goes_below_zero() {
    let wallet = Wallet::new(0);
    let mut game = GameSession::new(ScriptedRandom::new([0.5, 0.1]), &wallet);
    game.start();
    game.advance(Duration::from_millis(800));

    let id = game.objects()[0].id;
    assert_eq!(game.catch(id), CatchOutcome::Penalized);
    assert_eq!(game.score(), 0);
}

#[test]
fn expired_object_cannot_be_caught() {
    let wallet = Wallet::new(0);
    let mut game = GameSession::new(ScriptedRandom::new([0.5, 0.9]), &wallet);
    game.start();
    game.advance(Duration::from_millis(800));
    let id = game.objects()[0].id;

    // 60 moves take it from -10 to 110
    game.advance(Duration::from_millis(60 * 50));
    assert!(game.objects().iter().all(|o| o.id != id));
    assert_eq!(game.catch(id), CatchOutcome::Missed);
    assert_eq!(game.score(), 0);
}

#[test]
fn high_score_pays_half_once() {
    let wallet = Wallet::new(0);
    let mut game = GameSession::new(ScriptedRandom::new(Vec::<f64>::new()).with_fallback(0.9), &wallet);
    game.start();

    while game.score() <= 50 {
        game.advance(Duration::from_millis(800));
        let id = game.objects()[0].id;
        game.catch(id);
    }
    let score = game.score();
    game.advance(Duration::from_secs(SESSION_SECS as u64));
    game.advance(Duration::from_secs(10));

    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(wallet.credits(), vec![score / 2]);
    assert_eq!(game.catch(0), CatchOutcome::Inactive);
}

#[test]
fn restart_after_end_is_a_clean_slate() {
    let wallet = Wallet::new(0);
    let mut game = GameSession::new(ScriptedRandom::new(Vec::<f64>::new()), &wallet);
    game.start();
    game.advance(Duration::from_secs(SESSION_SECS as u64 + 1));
    assert_eq!(game.phase(), Phase::Ended);

    assert!(game.start());
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.score(), 0);
    assert_eq!(game.remaining_secs(), SESSION_SECS);
    assert!(game.objects().is_empty());
}
