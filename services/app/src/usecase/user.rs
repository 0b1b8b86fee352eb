use shipkit_domain::email::parse_email;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::{AppServiceError, StoreError};

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    /// Key chosen by the auth provider; generated when absent.
    pub id: Option<String>,
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
    pub image: Option<String>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, AppServiceError> {
        insert_user(&self.repo, input).await
    }
}

async fn insert_user<R: UserRepository>(
    repo: &R,
    input: CreateUserInput,
) -> Result<User, AppServiceError> {
    let email = parse_email(&input.email).map_err(|_| AppServiceError::InvalidEmail)?;
    repo.create(NewUser {
        id: input.id,
        email,
        email_verified: input.email_verified,
        name: input.name,
        image: input.image,
    })
    .await
    .map_err(|e| AppServiceError::on_duplicate(e, AppServiceError::EmailTaken))
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: &str) -> Result<User, AppServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppServiceError::UserNotFound)
    }
}

// ── GetUserByEmail ───────────────────────────────────────────────────────────

pub struct GetUserByEmailUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserByEmailUseCase<R> {
    pub async fn execute(&self, email: &str) -> Result<User, AppServiceError> {
        self.repo
            .find_by_email(email.trim())
            .await?
            .ok_or(AppServiceError::UserNotFound)
    }
}

// ── SyncSessionUser ──────────────────────────────────────────────────────────

/// Make the `user` row match the session user handed over by the auth
/// provider: insert it on first sight, replace it when profile fields moved.
pub struct SyncSessionUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SyncSessionUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, AppServiceError> {
        let Some(id) = input.id.clone() else {
            return Err(AppServiceError::MissingData);
        };
        let email = parse_email(&input.email).map_err(|_| AppServiceError::InvalidEmail)?;
        let mut user = match self.repo.find_by_id(&id).await? {
            Some(user) => user,
            None => {
                tracing::info!(user_id = %id, "first sighting of session user");
                let created = self
                    .repo
                    .create(NewUser {
                        id: Some(id.clone()),
                        email: email.clone(),
                        email_verified: input.email_verified,
                        name: input.name.clone(),
                        image: input.image.clone(),
                    })
                    .await;
                match created {
                    Ok(user) => return Ok(user),
                    // A concurrent sync inserted the same id first; anything
                    // else holding the unique key is another user's email.
                    Err(StoreError::Duplicate(_)) => self
                        .repo
                        .find_by_id(&id)
                        .await?
                        .ok_or(AppServiceError::EmailTaken)?,
                    Err(e) => return Err(e.into()),
                }
            }
        };
        let unchanged = user.email == email
            && user.email_verified == input.email_verified
            && user.name == input.name
            && user.image == input.image;
        if unchanged {
            return Ok(user);
        }
        user.email = email;
        user.email_verified = input.email_verified;
        user.name = input.name;
        user.image = input.image;
        self.repo
            .replace(&user)
            .await
            .map_err(|e| AppServiceError::on_duplicate(e, AppServiceError::EmailTaken))
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    /// Sessions, accounts, requests, votes and subscriptions go with the user;
    /// metrics survive with a null owner.
    pub async fn execute(&self, user_id: &str) -> Result<(), AppServiceError> {
        if !self.repo.delete(user_id).await? {
            return Err(AppServiceError::UserNotFound);
        }
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}
