use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use zerone_core::domain::{NewUser, User};
use zerone_core::error::RepoError;
use zerone_core::ports::{BaseRepository, UserRepository};

use super::{Tables, next_id};

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn email_taken(tables: &Tables, email: &str, except: Option<i64>) -> bool {
    tables
        .users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if email_taken(&tables, &user.email, Some(user.id)) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if email_taken(&tables, &new_user.email, None) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }

        let user = User {
            id: next_id(&mut tables.user_seq),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            created_at: new_user.created_at,
            updated_at: Utc::now(),
            is_deleted: false,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::super::MemoryStore;
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser::new(
            email.to_string(),
            "hash".to_string(),
            "Ann".to_string(),
            "Smith".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let users = MemoryStore::new().users();
        let first = users.insert(new_user("a@example.com")).await.unwrap();
        let second = users.insert(new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(
            users.find_by_email("b@example.com").await.unwrap(),
            Some(second)
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let users = MemoryStore::new().users();
        users.insert(new_user("a@example.com")).await.unwrap();

        let result = users.insert(new_user("a@example.com")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
