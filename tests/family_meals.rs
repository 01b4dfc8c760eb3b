mod common;

use common::{seed_meal, seed_member, test_pool};
use dinnerplan::family::{self, dto::UpdateMemberRequest};
use dinnerplan::meals::{self, dto::UpdateMealRequest};

#[tokio::test]
async fn member_partial_update_leaves_omitted_fields_alone() {
    let pool = test_pool().await;
    let id = family::repo::create(&pool, "Ana", "🦊", "curry", "liver", "")
        .await
        .unwrap();

    let req = UpdateMemberRequest {
        name: None,
        avatar: None,
        likes: Some("curry, noodles".into()),
        dislikes: None,
        dietary: None,
    };
    family::repo::update(&pool, id, &req).await.unwrap();

    let member = family::repo::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(member.name, "Ana");
    assert_eq!(member.avatar.as_deref(), Some("🦊"));
    assert_eq!(member.likes.as_deref(), Some("curry, noodles"));
    assert_eq!(member.dislikes.as_deref(), Some("liver"));
}

#[tokio::test]
async fn meal_update_can_toggle_favourite() {
    let pool = test_pool().await;
    let id = seed_meal(&pool, "Curry", "rice").await;

    let req = UpdateMealRequest {
        name: None,
        description: None,
        ingredients: None,
        instructions: None,
        category: None,
        prep_time: None,
        cook_time: None,
        servings: None,
        is_family_favourite: Some(true),
    };
    meals::repo::update(&pool, id, &req).await.unwrap();

    let meal = meals::repo::get(&pool, id).await.unwrap().unwrap();
    assert!(meal.is_family_favourite);
    assert_eq!(meal.ingredients.as_deref(), Some("rice"));
}

#[tokio::test]
async fn meals_list_is_ordered_by_name() {
    let pool = test_pool().await;
    seed_meal(&pool, "Stew", "beef").await;
    seed_meal(&pool, "Curry", "rice").await;

    let all = meals::repo::list(&pool).await.unwrap();
    let names: Vec<_> = all.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Curry", "Stew"]);
}

#[tokio::test]
async fn members_list_is_ordered_by_id() {
    let pool = test_pool().await;
    let ben = seed_member(&pool, "Ben").await;
    let ana = seed_member(&pool, "Ana").await;

    let all = family::repo::list(&pool).await.unwrap();
    let ids: Vec<_> = all.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![ben, ana]);
}
