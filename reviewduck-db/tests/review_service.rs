mod common;

use common::{setup, TestContext};
use reviewduck_core::{AnswerPair, QuestionId, ReviewForm, ReviewId};

const INVALID_CODE: &str = "aaaaaaaa";

async fn saved_form(ctx: &TestContext) -> (ReviewForm, QuestionId, QuestionId) {
    let form = ctx
        .forms
        .save("title", ["question1", "question2"])
        .await
        .unwrap();
    let q1 = form.questions()[0].id().unwrap();
    let q2 = form.questions()[1].id().unwrap();
    (form, q1, q2)
}

fn answers(q1: QuestionId, a1: &str, q2: QuestionId, a2: &str) -> Vec<AnswerPair> {
    vec![AnswerPair::new(q1, a1), AnswerPair::new(q2, a2)]
}

#[tokio::test]
async fn saves_review() {
    let ctx = setup().await;
    let (form, q1, q2) = saved_form(&ctx).await;

    let review = ctx
        .reviews
        .save(form.code(), "제이슨", answers(q1, "answer1", q2, "answer2"))
        .await
        .unwrap();

    assert!(review.id().is_some());
    assert_eq!(review.nickname(), "제이슨");
    assert_eq!(review.question_answers().len(), 2);
    assert_eq!(review.question_answers()[0].answer().value(), "answer1");
    assert_eq!(review.question_answers()[0].position(), 0);
    assert_eq!(review.question_answers()[1].question_id(), Some(q2));
}

#[tokio::test]
async fn rejects_unknown_code() {
    let ctx = setup().await;

    let err = ctx
        .reviews
        .save(
            INVALID_CODE,
            "제이슨",
            answers(QuestionId(1), "answer1", QuestionId(2), "answer2"),
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("review form does not exist"));
}

#[tokio::test]
async fn rejects_question_that_does_not_exist() {
    let ctx = setup().await;
    let (form, q1, _) = saved_form(&ctx).await;

    let err = ctx
        .reviews
        .save(
            form.code(),
            "제이슨",
            answers(QuestionId(123_445), "answer1", q1, "answer2"),
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("question does not exist"));
}

#[tokio::test]
async fn rejects_question_from_another_form() {
    let ctx = setup().await;
    let (form, q1, _) = saved_form(&ctx).await;
    let other = ctx.forms.save("dummy title", ["dummy question"]).await.unwrap();
    let foreign = other.questions()[0].id().unwrap();

    let err = ctx
        .reviews
        .save(form.code(), "제이슨", answers(q1, "answer1", foreign, "dummy answer"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains("question not included in review form"));
}

#[tokio::test]
async fn rejects_blank_nickname_and_missing_answers() {
    let ctx = setup().await;
    let (form, q1, q2) = saved_form(&ctx).await;

    let blank = ctx
        .reviews
        .save(form.code(), " ", answers(q1, "a", q2, "b"))
        .await
        .unwrap_err();
    assert!(blank.is_validation());

    let short = ctx
        .reviews
        .save(form.code(), "nick", vec![AnswerPair::new(q1, "a")])
        .await
        .unwrap_err();
    assert!(short.to_string().contains("question and answer counts must match"));

    assert!(ctx.reviews.find_all_by_code(form.code()).await.unwrap().reviews.is_empty());
}

#[tokio::test]
async fn finds_all_reviews_of_a_form() {
    let ctx = setup().await;
    let (form, q1, q2) = saved_form(&ctx).await;
    let saved = ctx
        .reviews
        .save(form.code(), "제이슨", answers(q1, "answer1", q2, "answer2"))
        .await
        .unwrap();

    let found = ctx.reviews.find_all_by_code(form.code()).await.unwrap();

    assert_eq!(found.form.title(), "title");
    assert_eq!(found.reviews.len(), 1);
    assert_eq!(found.reviews[0].nickname(), saved.nickname());
    assert_eq!(found.reviews[0].question_answers().len(), 2);
}

#[tokio::test]
async fn lists_nothing_for_a_fresh_form_but_fails_for_unknown_code() {
    let ctx = setup().await;
    let (form, _, _) = saved_form(&ctx).await;

    assert!(ctx.reviews.find_all_by_code(form.code()).await.unwrap().reviews.is_empty());
    assert!(ctx
        .reviews
        .find_all_by_code(INVALID_CODE)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn edits_review() {
    let ctx = setup().await;
    let (form, q1, q2) = saved_form(&ctx).await;
    let saved = ctx
        .reviews
        .save(form.code(), "제이슨", answers(q1, "answer1", q2, "answer2"))
        .await
        .unwrap();
    let id = saved.id().unwrap();

    let edit = answers(q1, "editedAnswer1", q2, "editedAnswer2");
    ctx.reviews.update(id, "제이슨", edit.clone()).await.unwrap();
    let updated = ctx.reviews.update(id, "제이슨", edit).await.unwrap();

    assert_eq!(updated.id(), Some(id));
    assert_eq!(updated.nickname(), "제이슨");
    assert_eq!(updated.question_answers().len(), 2);
    assert_eq!(updated.question_answers()[0].answer().value(), "editedAnswer1");
    assert_eq!(
        ctx.reviews.find_by_id(id).await.unwrap().question_answers()[1]
            .answer()
            .value(),
        "editedAnswer2"
    );
}

#[tokio::test]
async fn rejected_edit_leaves_review_untouched() {
    let ctx = setup().await;
    let (form, q1, q2) = saved_form(&ctx).await;
    let other = ctx.forms.save("other", ["x", "y"]).await.unwrap();
    let foreign = other.questions()[1].id().unwrap();
    let id = ctx
        .reviews
        .save(form.code(), "nick", answers(q1, "a", q2, "b"))
        .await
        .unwrap()
        .id()
        .unwrap();

    let err = ctx
        .reviews
        .update(id, "changed", answers(q1, "new a", foreign, "new b"))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let review = ctx.reviews.find_by_id(id).await.unwrap();
    assert_eq!(review.nickname(), "nick");
    assert_eq!(review.question_answers()[0].answer().value(), "a");
}

#[tokio::test]
async fn edit_and_delete_of_unknown_review_fail() {
    let ctx = setup().await;
    let (_, q1, q2) = saved_form(&ctx).await;

    let edit = ctx
        .reviews
        .update(ReviewId(99), "제이슨", answers(q1, "a", q2, "b"))
        .await
        .unwrap_err();
    assert!(edit.is_not_found());

    assert!(ctx.reviews.delete(ReviewId(99)).await.unwrap_err().is_not_found());
    assert!(ctx.reviews.find_by_id(ReviewId(99)).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn deletes_review() {
    let ctx = setup().await;
    let (form, q1, q2) = saved_form(&ctx).await;
    let saved = ctx
        .reviews
        .save(form.code(), "제이슨", answers(q1, "answer1", q2, "answer2"))
        .await
        .unwrap();

    ctx.reviews.delete(saved.id().unwrap()).await.unwrap();

    assert!(ctx.reviews.find_all_by_code(form.code()).await.unwrap().reviews.is_empty());
}
