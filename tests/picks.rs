mod common;

use common::{seed_meal, seed_member, test_pool};
use dinnerplan::plans::repo::{self, PlanStatus};

#[tokio::test]
async fn recording_the_same_pick_twice_leaves_one_row() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    repo::set_status(&pool, plan_id, PlanStatus::Voting)
        .await
        .unwrap();
    let ana = seed_member(&pool, "Ana").await;
    let curry = seed_meal(&pool, "Curry", "rice").await;

    repo::record_pick(&pool, plan_id, ana, curry).await.unwrap();
    repo::record_pick(&pool, plan_id, ana, curry).await.unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM weekly_picks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[tokio::test]
async fn removing_an_absent_pick_is_a_no_op() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    let ana = seed_member(&pool, "Ana").await;
    let curry = seed_meal(&pool, "Curry", "rice").await;

    repo::remove_pick(&pool, plan_id, ana, curry).await.unwrap();
}

#[tokio::test]
async fn picks_overview_includes_unvoted_meals_with_zero_counts() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    repo::set_status(&pool, plan_id, PlanStatus::Voting)
        .await
        .unwrap();
    let ana = seed_member(&pool, "Ana").await;
    let ben = seed_member(&pool, "Ben").await;
    let curry = seed_meal(&pool, "Curry", "rice").await;
    let _stew = seed_meal(&pool, "Stew", "beef").await;

    repo::record_pick(&pool, plan_id, ana, curry).await.unwrap();
    repo::record_pick(&pool, plan_id, ben, curry).await.unwrap();

    let overview = repo::picks_overview(&pool, plan_id).await.unwrap();
    assert_eq!(overview.len(), 2);

    // Most-voted first; tie-break by name handled elsewhere.
    assert_eq!(overview[0].name, "Curry");
    assert_eq!(overview[0].pick_count, 2);
    let picker_names: Vec<_> = overview[0].pickers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(picker_names, vec!["Ana", "Ben"]);

    assert_eq!(overview[1].name, "Stew");
    assert_eq!(overview[1].pick_count, 0);
    assert!(overview[1].pickers.is_empty());
}

#[tokio::test]
async fn zero_count_ties_order_by_meal_name() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    seed_meal(&pool, "Stew", "beef").await;
    seed_meal(&pool, "Curry", "rice").await;
    seed_meal(&pool, "Pie", "apples").await;

    let overview = repo::picks_overview(&pool, plan_id).await.unwrap();
    let names: Vec<_> = overview.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Curry", "Pie", "Stew"]);
}

#[tokio::test]
async fn member_picks_lists_only_that_members_meals() {
    let pool = test_pool().await;
    let plan_id = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    repo::set_status(&pool, plan_id, PlanStatus::Voting)
        .await
        .unwrap();
    let ana = seed_member(&pool, "Ana").await;
    let ben = seed_member(&pool, "Ben").await;
    let curry = seed_meal(&pool, "Curry", "rice").await;
    let stew = seed_meal(&pool, "Stew", "beef").await;

    repo::record_pick(&pool, plan_id, ana, curry).await.unwrap();
    repo::record_pick(&pool, plan_id, ben, stew).await.unwrap();

    let picks = repo::member_picks(&pool, plan_id, ana).await.unwrap();
    assert_eq!(picks, vec![curry]);
}

#[tokio::test]
async fn deleting_a_member_removes_their_picks_across_plans() {
    let pool = test_pool().await;
    let first = repo::create_plan(&pool, "2024-01-01").await.unwrap();
    let second = repo::create_plan(&pool, "2024-01-08").await.unwrap();
    let ana = seed_member(&pool, "Ana").await;
    let curry = seed_meal(&pool, "Curry", "rice").await;
    for plan in [first, second] {
        repo::set_status(&pool, plan, PlanStatus::Voting).await.unwrap();
        repo::record_pick(&pool, plan, ana, curry).await.unwrap();
    }

    dinnerplan::family::repo::delete(&pool, ana).await.unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM weekly_picks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);

    // Both plans survive untouched.
    assert!(repo::get_plan(&pool, first).await.unwrap().is_some());
    assert!(repo::get_plan(&pool, second).await.unwrap().is_some());
}
