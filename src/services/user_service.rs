use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::users::{UpdateUserRequest, UserList},
    entity::users::{ActiveModel, Column, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::{ADMIN_ROLE, AuthUser, USER_ROLE, ensure_admin, ensure_self_or_admin},
    models::User,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn get_own(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let record = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .map(User::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("User", record, Some(Meta::empty())))
}

/// Lists every user, or one page of them when `_page`/`_limit` is given.
pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let finder = Users::find().order_by_asc(Column::CreatedAt).order_by_asc(Column::Id);

    if !pagination.is_requested() {
        let items: Vec<User> = finder
            .all(&state.orm)
            .await?
            .into_iter()
            .map(User::from)
            .collect();
        let total = items.len() as u64;
        return Ok(ApiResponse::success(
            "Users",
            UserList { items },
            Some(Meta {
                page: None,
                per_page: None,
                total: Some(total),
            }),
        ));
    }

    let (page, limit, offset) = pagination.normalize(state.max_page_size);
    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(limit)
        .offset(offset)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_self_or_admin(user, id)?;
    if let Some(role) = payload.role.as_deref() {
        ensure_admin(user)?;
        validate_role(role)?;
    }

    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(Some(name).filter(|n| !n.trim().is_empty()));
    }
    if let Some(email) = payload.email {
        let email = email.trim().to_lowercase();
        validate_email(&email)?;
        let taken = Users::find()
            .filter(Column::Email.eq(email.clone()))
            .filter(Column::Id.ne(id))
            .count(&state.orm)
            .await?;
        if taken > 0 {
            return Err(AppError::BadRequest("Email is already taken".into()));
        }
        active.email = Set(email);
    }
    if let Some(role) = payload.role {
        active.role = Set(role);
    }

    let updated = active.update(&state.orm).await?;
    tracing::info!(user_id = %updated.id, actor = %user.user_id, "user updated");

    Ok(ApiResponse::success(
        "User updated",
        User::from(updated),
        Some(Meta::empty()),
    ))
}

fn validate_role(role: &str) -> Result<(), AppError> {
    const VALID: [&str; 2] = [USER_ROLE, ADMIN_ROLE];
    if VALID.contains(&role) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid role".into()))
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::BadRequest("Invalid email".into())),
    }
}
