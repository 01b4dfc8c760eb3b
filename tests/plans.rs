mod common;

use common::{seed_meal, seed_member, test_pool};
use dinnerplan::error::ApiError;
use dinnerplan::plans::repo::{self, PlanStatus};

#[tokio::test]
async fn create_plan_makes_seven_empty_days() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();

    let days = repo::plan_days(&pool, plan_id).await.unwrap();
    assert_eq!(days.len(), 7);
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.day_of_week, i as i64);
        assert!(day.meal_id.is_none());
        assert!(day.diners.is_empty());
    }

    let plan = repo::get_plan(&pool, plan_id).await.unwrap().unwrap();
    assert_eq!(plan.status, PlanStatus::Planning);
    assert_eq!(plan.week_start, "2024-01-01");
}

#[tokio::test]
async fn duplicate_week_returns_existing_plan_id() {
    let pool = test_pool().await;
    let first = repo::create_plan(&pool, "2024-01-01").await.unwrap();

    let err = repo::create_plan(&pool, "2024-01-01").await.unwrap_err();
    match err {
        ApiError::WeekTaken { plan_id } => assert_eq!(plan_id, first),
        other => panic!("expected WeekTaken, got {other:?}"),
    }

    // No second plan row was written.
    let plan = repo::plan_by_week(&pool, "2024-01-01").await.unwrap().unwrap();
    assert_eq!(plan.id, first);
}

#[tokio::test]
async fn status_moves_freely_between_the_three_states() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();

    for status in [PlanStatus::Voting, PlanStatus::Locked, PlanStatus::Planning] {
        repo::set_status(&pool, plan_id, status).await.unwrap();
        let plan = repo::get_plan(&pool, plan_id).await.unwrap().unwrap();
        assert_eq!(plan.status, status);
    }
}

#[tokio::test]
async fn deleting_a_plan_cascades_days_and_picks() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    let member = seed_member(&pool, "Ana").await;
    let meal = seed_meal(&pool, "Curry", "rice").await;
    repo::set_status(&pool, plan_id, PlanStatus::Voting)
        .await
        .unwrap();
    repo::record_pick(&pool, plan_id, member, meal).await.unwrap();

    repo::delete_plan(&pool, plan_id).await.unwrap();

    assert!(repo::get_plan(&pool, plan_id).await.unwrap().is_none());
    let day_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM weekly_days WHERE plan_id = ?")
            .bind(plan_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(day_count.0, 0);
    let pick_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM weekly_picks WHERE plan_id = ?")
            .bind(plan_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(pick_count.0, 0);
}

#[tokio::test]
async fn deleting_an_assigned_meal_unassigns_the_day() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    let meal = seed_meal(&pool, "Curry", "rice").await;
    repo::assign_meal(&pool, plan_id, 2, Some(meal)).await.unwrap();

    dinnerplan::meals::repo::delete(&pool, meal).await.unwrap();

    let days = repo::plan_days(&pool, plan_id).await.unwrap();
    assert_eq!(days.len(), 7);
    assert!(days[2].meal_id.is_none());
    assert!(days[2].meal_name.is_none());
}

#[tokio::test]
async fn deleting_a_member_scrubs_diner_lists() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    let ana = seed_member(&pool, "Ana").await;
    let ben = seed_member(&pool, "Ben").await;
    repo::set_diners(&pool, plan_id, 0, &[ana, ben]).await.unwrap();
    repo::set_diners(&pool, plan_id, 3, &[ana]).await.unwrap();

    dinnerplan::family::repo::delete(&pool, ana).await.unwrap();

    let days = repo::plan_days(&pool, plan_id).await.unwrap();
    assert_eq!(days[0].diners, vec![ben]);
    assert!(days[3].diners.is_empty());
}
