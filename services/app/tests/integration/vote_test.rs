use sea_orm::{EntityTrait, PaginatorTrait};

use shipkit_app::domain::repository::{FeatureRequestRepository, UserRepository};
use shipkit_app::domain::types::NewFeatureRequest;
use shipkit_app::error::{AppServiceError, StoreError};
use shipkit_app::infra::db::{DbFeatureRequestRepository, DbUserRepository};
use shipkit_app::usecase::feature_request::{UnvoteUseCase, VoteUseCase};
use shipkit_domain::status::FeatureStatus;
use shipkit_schema::vote;

use crate::helpers::{insert_user, migrated_db};

async fn seeded() -> (sea_orm::DatabaseConnection, DbFeatureRequestRepository, String, String) {
    let db = migrated_db().await;
    let author = insert_user(&db, "author@x.com").await;
    let voter = insert_user(&db, "voter@x.com").await;
    let repo = DbFeatureRequestRepository { db: db.clone() };
    let request = repo
        .create(NewFeatureRequest {
            title: "Dark mode".into(),
            description: "Easier on the eyes".into(),
            status: FeatureStatus::Planned,
            user_id: author.id,
        })
        .await
        .unwrap();
    (db, repo, voter.id, request.id)
}

async fn upvotes(repo: &DbFeatureRequestRepository, id: &str) -> i32 {
    repo.find_by_id(id).await.unwrap().unwrap().upvotes
}

#[tokio::test]
async fn should_increment_upvotes_with_vote() {
    let (db, repo, voter, request) = seeded().await;

    let vote = repo.add_vote(&voter, &request).await.unwrap();

    assert_eq!(vote.request_id, request);
    assert_eq!(upvotes(&repo, &request).await, 1);
    assert_eq!(vote::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_vote_without_counting_it() {
    let (db, repo, voter, request) = seeded().await;
    repo.add_vote(&voter, &request).await.unwrap();

    let result = repo.add_vote(&voter, &request).await;

    assert!(
        matches!(result, Err(StoreError::Duplicate(_))),
        "expected Duplicate, got {result:?}"
    );
    assert_eq!(upvotes(&repo, &request).await, 1);
    assert_eq!(vote::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_map_duplicate_vote_to_already_voted() {
    let (_db, repo, voter, request) = seeded().await;
    let usecase = VoteUseCase { repo };
    usecase.execute(&voter, &request).await.unwrap();

    let result = usecase.execute(&voter, &request).await;

    assert!(matches!(result, Err(AppServiceError::AlreadyVoted)));
}

#[tokio::test]
async fn should_reject_vote_from_unknown_user() {
    let (_db, repo, _voter, request) = seeded().await;
    let usecase = VoteUseCase { repo };

    let result = usecase.execute("ghost", &request).await;

    assert!(matches!(result, Err(AppServiceError::UserNotFound)));
    assert_eq!(upvotes(&usecase.repo, &request).await, 0);
}

#[tokio::test]
async fn should_decrement_on_unvote_and_never_go_negative() {
    let (db, repo, voter, request) = seeded().await;
    repo.add_vote(&voter, &request).await.unwrap();

    assert!(repo.remove_vote(&voter, &request).await.unwrap());
    assert!(!repo.remove_vote(&voter, &request).await.unwrap());

    assert_eq!(upvotes(&repo, &request).await, 0);
    assert_eq!(vote::Entity::find().count(&db).await.unwrap(), 0);
    let usecase = UnvoteUseCase { repo };
    let result = usecase.execute(&voter, &request).await;
    assert!(matches!(result, Err(AppServiceError::VoteNotFound)));
}

#[tokio::test]
async fn should_order_by_upvotes_descending() {
    let (_db, repo, voter, first) = seeded().await;
    let second = repo
        .create(NewFeatureRequest {
            title: "SSO".into(),
            description: "SAML support".into(),
            status: FeatureStatus::Pending,
            user_id: voter.clone(),
        })
        .await
        .unwrap();
    repo.add_vote(&voter, &second.id).await.unwrap();

    let ids: Vec<String> = repo
        .list_by_upvotes()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, [second.id, first]);
}

#[tokio::test]
async fn should_drop_upvote_when_voter_is_deleted() {
    let (db, repo, voter, request) = seeded().await;
    repo.add_vote(&voter, &request).await.unwrap();

    assert!(DbUserRepository { db: db.clone() }.delete(&voter).await.unwrap());

    assert_eq!(vote::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(upvotes(&repo, &request).await, 0);
}
