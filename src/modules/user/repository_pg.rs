use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, UserSearch},
        repository::UserRepository,
        schema::UserEntity,
    },
};

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_"))
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.*
            FROM UNNEST($1::uuid[]) WITH ORDINALITY AS ids(id, ord)
            JOIN users u ON u.id = ids.id
            ORDER BY ids.ord
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>(
            "SELECT * FROM users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, hash_password, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.hash_password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn search(
        &self,
        search: &UserSearch,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let query = match search {
            UserSearch::Email(email) => sqlx::query_as::<_, UserEntity>(
                r#"
                SELECT * FROM users
                WHERE lower(email) = lower($1)
                ORDER BY id
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(email.clone()),
            UserSearch::Name(term) => sqlx::query_as::<_, UserEntity>(
                r#"
                SELECT * FROM users
                WHERE lower(first_name) LIKE lower($1)
                   OR lower(last_name) LIKE lower($1)
                ORDER BY id
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(like_pattern(term)),
        };

        let users = query.bind(limit).bind(offset).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn count(&self, search: &UserSearch) -> Result<i64, error::SystemError> {
        let count = match search {
            UserSearch::Email(email) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM users WHERE lower(email) = lower($1)",
                )
                .bind(email)
                .fetch_one(&self.pool)
                .await?
            }
            UserSearch::Name(term) => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COUNT(*) FROM users
                    WHERE lower(first_name) LIKE lower($1)
                       OR lower(last_name) LIKE lower($1)
                    "#,
                )
                .bind(like_pattern(term))
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(count)
    }
}
