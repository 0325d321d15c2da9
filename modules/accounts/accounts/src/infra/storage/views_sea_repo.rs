use std::collections::HashMap;

use accounts_sdk::{AccountsError, Group, Ownership, User, View};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};
use tracing::{debug, info, instrument, warn};

use crate::domain::repo::ViewsRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::{group, ownership, user, view};

/// `SeaORM` implementation of `ViewsRepository`.
#[derive(Clone)]
pub struct SeaOrmViewsRepository {
    db: DatabaseConnection,
}

impl SeaOrmViewsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ViewsRepository for SeaOrmViewsRepository {
    #[instrument(skip_all, fields(db.operation = "views.list_with_access"))]
    async fn list_with_access(&self) -> Result<Vec<View>, AccountsError> {
        let views = view::Entity::find()
            .find_also_related(group::Entity)
            .order_by_asc(view::Column::GroupId)
            .order_by_asc(view::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let grants = ownership::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(ownership::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_view: HashMap<i64, Vec<Ownership>> = HashMap::new();
        for (o, u) in grants {
            let mut ownership = Ownership::from(o);
            ownership.user = u.map(User::from);
            by_view.entry(ownership.view_id).or_default().push(ownership);
        }

        let views: Vec<View> = views
            .into_iter()
            .map(|(v, g)| {
                let mut view = View::from(v);
                view.group = g.map(Group::from);
                view.ownerships = by_view.remove(&view.id).unwrap_or_default();
                view
            })
            .collect();

        debug!(count = views.len(), "views loaded");
        Ok(views)
    }

    #[instrument(skip_all, fields(db.operation = "views.create_group", group.owner_id = ?owner_id))]
    async fn create_group(
        &self,
        name: Option<&str>,
        owner_id: Option<i64>,
    ) -> Result<Group, AccountsError> {
        let am = group::ActiveModel {
            id: NotSet,
            name: Set(name.map(ToOwned::to_owned)),
            owner_id: Set(owner_id),
        };
        let model = am.insert(&self.db).await.map_err(db_err)?;
        info!(group.id = model.id, "group created");
        Ok(model.into())
    }

    #[instrument(skip_all, fields(db.operation = "views.create_view", group.id = group_id))]
    async fn create_view(
        &self,
        group_id: i64,
        name: &str,
        filters: &str,
    ) -> Result<View, AccountsError> {
        let am = view::ActiveModel {
            id: NotSet,
            group_id: Set(group_id),
            name: Set(name.to_owned()),
            filters: Set(filters.to_owned()),
        };
        let model = am.insert(&self.db).await.map_err(db_err)?;
        info!(view.id = model.id, "view created");
        Ok(model.into())
    }

    #[instrument(skip(self), fields(db.operation = "views.grant"))]
    async fn grant(&self, user_id: i64, view_id: i64) -> Result<i64, AccountsError> {
        let am = ownership::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            view_id: Set(view_id),
        };
        let model = am.insert(&self.db).await.map_err(|e| {
            let err = db_err(e);
            if err.is_conflict() {
                warn!("ownership already granted");
            }
            err
        })?;
        debug!(ownership.id = model.id, "ownership granted");
        Ok(model.id)
    }
}
