use log::{debug, info};
use std::sync::Arc;

use crate::api::error;
use crate::modules::user::model::{InsertUser, Page, SignUpModel, UserSearch, UserSummary};
use crate::modules::user::{repository::UserRepository, schema::UserEntity};
use crate::utils::hash_password;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    page_size: u32,
}

impl UserService {
    pub fn with_dependencies(repo: Arc<dyn UserRepository + Send + Sync>, page_size: u32) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, page_size: page_size.max(1) }
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<UserEntity, error::SystemError> {
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(duplicate_email());
        }

        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser {
            email: user.email,
            hash_password,
            first_name: user.first_name,
            last_name: user.last_name,
        };

        // the unique index still catches a concurrent signup with the same email
        match self.repo.create(&new_user).await {
            Ok(user) => {
                info!("User {} signed up", user.id);
                Ok(user)
            }
            Err(error::SystemError::Conflict(_)) => Err(duplicate_email()),
            Err(e) => Err(e),
        }
    }

    pub async fn search(
        &self,
        query: &str,
        page: Option<u32>,
    ) -> Result<Page<UserSummary>, error::SystemError> {
        let search = UserSearch::parse(query);
        let page = page.unwrap_or(1).max(1);
        let limit = i64::from(self.page_size);
        let offset = i64::from(page - 1) * limit;

        let (count, users) = tokio::try_join!(
            self.repo.count(&search),
            self.repo.search(&search, limit, offset),
        )?;
        if page > 1 && offset >= count {
            return Err(error::SystemError::not_found("Invalid page."));
        }

        debug!("Search {:?} page {} matched {} of {} users", search, page, users.len(), count);

        Ok(Page {
            count,
            page,
            page_size: self.page_size,
            results: users.into_iter().map(UserSummary::from).collect(),
        })
    }
}

fn duplicate_email() -> error::SystemError {
    error::SystemError::validation("email", "user with this email already exists.")
}
