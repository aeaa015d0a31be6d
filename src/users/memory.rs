use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;

use super::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

/// In-process [`UserStore`] with the same uniqueness rule as the `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    table: Mutex<Table>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.table.lock().unwrap().rows.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut table = self.table.lock().unwrap();
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(StoreError::ConstraintViolation);
        }
        table.next_id += 1;
        let created = User {
            id: table.next_id,
            username: user.username,
            hashed_password: user.hashed_password,
            name: user.name,
            gender: user.gender,
            birth_date: user.birth_date,
        };
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.table.lock().unwrap().rows.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .get_mut(&user.id)
            .ok_or(StoreError::RowMissing)?;
        row.name = user.name.clone();
        row.gender = user.gender;
        row.birth_date = user.birth_date;
        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        self.table
            .lock()
            .unwrap()
            .rows
            .remove(&user.id)
            .map(|_| ())
            .ok_or(StoreError::RowMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.into(),
            hashed_password: "hash".into(),
            name: "Test".into(),
            gender: None,
            birth_date: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryUserStore::default();
        let a = store.insert(new_user("a")).await.unwrap();
        let b = store.insert(new_user("b")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_username_violates_constraint() {
        let store = MemoryUserStore::default();
        store.insert(new_user("alice")).await.unwrap();
        let err = store.insert(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation));
    }

    #[tokio::test]
    async fn writes_to_a_deleted_row_report_it_missing() {
        let store = MemoryUserStore::default();
        let user = store.insert(new_user("gone")).await.unwrap();
        store.delete(&user).await.unwrap();

        assert!(matches!(
            store.update(&user).await,
            Err(StoreError::RowMissing)
        ));
        assert!(matches!(
            store.delete(&user).await,
            Err(StoreError::RowMissing)
        ));
    }
}
