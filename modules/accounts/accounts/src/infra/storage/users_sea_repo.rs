use std::collections::HashMap;

use accounts_sdk::{AccountsError, Expand, Group, Ownership, User, UserField, View};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::{Span, debug, info, instrument, warn};

use crate::domain::repo::UsersRepository;
use crate::domain::sanitize::{normalize_email, sanitize_user};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::user::{self, Column, Entity as UserEntity};
use crate::infra::storage::entity::{group, ownership, view};

/// `SeaORM` implementation of `UsersRepository`.
#[derive(Clone)]
pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_ownerships(
        &self,
        user_id: i64,
        with_views: bool,
    ) -> Result<Vec<Ownership>, AccountsError> {
        let query = ownership::Entity::find()
            .filter(ownership::Column::UserId.eq(user_id))
            .order_by_asc(ownership::Column::Id);

        if !with_views {
            let rows = query.all(&self.db).await.map_err(db_err)?;
            return Ok(rows.into_iter().map(Ownership::from).collect());
        }

        let rows = query
            .find_also_related(view::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let group_ids: Vec<i64> = rows
            .iter()
            .filter_map(|(_, v)| v.as_ref().map(|v| v.group_id))
            .collect();
        let groups: HashMap<i64, Group> = group::Entity::find()
            .filter(group::Column::Id.is_in(group_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|g| (g.id, Group::from(g)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|(o, v)| {
                let mut ownership = Ownership::from(o);
                ownership.view = v.map(|v| {
                    let mut view = View::from(v);
                    view.group = groups.get(&view.group_id).cloned();
                    view
                });
                ownership
            })
            .collect())
    }
}

/// Column and in-memory value for one masked field.
fn assignment(user: &User, field: UserField) -> (Column, SimpleExpr) {
    match field {
        UserField::Email => (Column::Email, Expr::value(user.email.clone())),
        UserField::Password => (Column::Password, Expr::value(user.password.clone())),
        UserField::SsoId => (Column::SsoId, Expr::value(user.sso_id.clone())),
        UserField::Company => (Column::Company, Expr::value(user.company.clone())),
        UserField::Department => (Column::Department, Expr::value(user.department.clone())),
        UserField::LastLogin => (Column::LastLogin, Expr::value(user.last_login)),
        UserField::LogoutCount => (Column::LogoutCount, Expr::value(user.logout_count)),
        UserField::Active => (Column::Active, Expr::value(user.active)),
        UserField::Admin => (Column::Admin, Expr::value(user.admin)),
        UserField::Name => (Column::Name, Expr::value(user.name.clone())),
        UserField::Surname => (Column::Surname, Expr::value(user.surname.clone())),
        UserField::Gender => (Column::Gender, Expr::value(user.gender.clone())),
        UserField::Certificate => (Column::Certificate, Expr::value(user.certificate.clone())),
        UserField::DbPasswordHash => {
            (Column::DbPassword, Expr::value(user.db_password_hash.clone()))
        }
    }
}

/// Sanitize in place and restore the company default. Runs before every write.
fn prepare_for_write(user: &mut User) {
    sanitize_user(user);
    if user.company.is_empty() {
        user.company.clone_from(&user.email);
    }
}

fn log_conflict(err: AccountsError) -> AccountsError {
    if let AccountsError::Conflict { field } = &err {
        warn!(%field, "unique constraint rejected user write");
    }
    err
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    #[instrument(skip_all, fields(db.operation = "users.create", user.id = tracing::field::Empty))]
    async fn create(&self, user: &mut User) -> Result<(), AccountsError> {
        if user.is_persisted() {
            return Err(AccountsError::invalid_entity(format!(
                "user {} is already persisted",
                user.id
            )));
        }

        prepare_for_write(user);

        let am = user::ActiveModel {
            id: NotSet,
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            sso_id: Set(user.sso_id.clone()),
            company: Set(user.company.clone()),
            department: Set(user.department.clone()),
            created: Set(user.created),
            last_login: Set(user.last_login),
            logout_count: Set(user.logout_count),
            active: Set(user.active),
            admin: Set(user.admin),
            name: Set(user.name.clone()),
            surname: Set(user.surname.clone()),
            gender: Set(user.gender.clone()),
            certificate: Set(user.certificate.clone()),
            db_password: Set(user.db_password_hash.clone()),
        };

        let inserted = am
            .insert(&self.db)
            .await
            .map_err(|e| log_conflict(db_err(e)))?;
        user.id = inserted.id;

        Span::current().record("user.id", user.id);
        info!("user created");
        Ok(())
    }

    #[instrument(skip_all, fields(db.operation = "users.save", user.id = user.id, mask = ?fields))]
    async fn save(&self, user: &mut User, fields: &[UserField]) -> Result<u64, AccountsError> {
        if fields.is_empty() {
            return Ok(0);
        }
        if !user.is_persisted() {
            return Err(AccountsError::invalid_entity(
                "cannot save a user that was never persisted",
            ));
        }

        prepare_for_write(user);

        let mut mask = fields.to_vec();
        mask.sort_unstable();
        mask.dedup();

        let mut update = UserEntity::update_many();
        for field in mask {
            let (column, value) = assignment(user, field);
            update = update.col_expr(column, value);
        }

        let result = update
            .filter(Column::Id.eq(user.id))
            .exec(&self.db)
            .await
            .map_err(|e| log_conflict(db_err(e)))?;

        if result.rows_affected == 0 {
            warn!("user row no longer exists; update lost");
        } else {
            debug!(rows = result.rows_affected, "user saved");
        }
        Ok(result.rows_affected)
    }

    #[instrument(skip_all, fields(db.operation = "users.delete", user.id = user.id))]
    async fn delete(&self, user: &User) -> Result<(), AccountsError> {
        if !user.is_persisted() {
            return Err(AccountsError::invalid_entity(
                "cannot delete a user that was never persisted",
            ));
        }

        let result = UserEntity::delete_by_id(user.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        info!(rows = result.rows_affected, "user deleted");
        Ok(())
    }

    #[instrument(skip_all, fields(db.operation = "users.get_all"))]
    async fn get_all(&self) -> Result<Vec<User>, AccountsError> {
        let rows = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        debug!(count = rows.len(), "users loaded");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip_all, fields(db.operation = "users.get_administrators"))]
    async fn get_administrators(&self) -> Result<Vec<User>, AccountsError> {
        let rows = UserEntity::find()
            .filter(Column::Admin.eq(true))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip_all, fields(db.operation = "users.get_by_id", user.id = id, expand = ?expand))]
    async fn get_by_id(&self, id: i64, expand: Expand) -> Result<Option<User>, AccountsError> {
        let Some(model) = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut user = User::from(model);
        if expand.ownerships() {
            user.ownerships = self.load_ownerships(user.id, expand.groups()).await?;
        }
        Ok(Some(user))
    }

    #[instrument(skip_all, fields(db.operation = "users.get_by_email"))]
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AccountsError> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }
}
