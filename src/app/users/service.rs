//! 用户业务服务

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use super::model::{User, UserDraft};
use super::validation::Genders;
use crate::core::error::CoreError;

/// 内存中的用户序列，顺序即插入顺序
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// 线性查找 id 对应的位置
    pub fn find_by_id(&self, id: u64) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&User> {
        self.users.get(index)
    }

    /// 下一个 id：现有最大 id + 1，空存储时为 0；id 已用尽时为 None
    pub fn next_id(&self) -> Option<u64> {
        match self.users.iter().map(|user| user.id).max() {
            Some(id) => id.checked_add(1),
            None => Some(0),
        }
    }

    /// 分配新 id 并追加到末尾，id 用尽时不做任何修改
    pub fn append(&mut self, draft: UserDraft) -> Option<User> {
        let user = draft.into_user(self.next_id()?);
        self.users.push(user.clone());
        Some(user)
    }

    /// 整体替换指定位置的记录，保留原 id
    pub fn replace_at(&mut self, index: usize, draft: UserDraft) -> Option<User> {
        let slot = self.users.get_mut(index)?;
        *slot = draft.into_user(slot.id);
        Some(slot.clone())
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    /// 所有条件同时满足（AND）的记录
    pub fn filter(&self, filters: &[(String, String)]) -> Vec<User> {
        self.users
            .iter()
            .filter(|user| {
                filters
                    .iter()
                    .all(|(field, value)| user.field_matches(field, value))
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// 注入到处理器中的用户服务，内部共享同一个存储
#[derive(Clone)]
pub struct UserService {
    store: Arc<RwLock<UserStore>>,
    genders: Arc<Genders>,
}

impl UserService {
    /// 由种子数据创建，合法性别集合在此时固定
    pub fn new(seed: Vec<User>) -> Self {
        let genders = Genders::from_users(&seed);
        Self {
            store: Arc::new(RwLock::new(UserStore::new(seed))),
            genders: Arc::new(genders),
        }
    }

    pub fn genders(&self) -> &Genders {
        &self.genders
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserStore>, CoreError> {
        self.store
            .read()
            .map_err(|_| CoreError::InternalServerError("用户存储锁已失效".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UserStore>, CoreError> {
        self.store
            .write()
            .map_err(|_| CoreError::InternalServerError("用户存储锁已失效".to_string()))
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.len())
    }

    pub fn find_index(&self, id: u64) -> Result<Option<usize>, CoreError> {
        Ok(self.read()?.find_by_id(id))
    }

    pub fn get_user(&self, index: usize) -> Result<User, CoreError> {
        self.read()?.get(index).cloned().ok_or(CoreError::NotFound)
    }

    pub fn list_users(&self, filters: &[(String, String)]) -> Result<Vec<User>, CoreError> {
        let store = self.read()?;
        if filters.is_empty() {
            return Ok(store.all().to_vec());
        }
        Ok(store.filter(filters))
    }

    pub fn create_user(&self, draft: UserDraft) -> Result<User, CoreError> {
        let user = self.write()?.append(draft).ok_or_else(|| {
            CoreError::InternalServerError("没有可分配的用户 id".to_string())
        })?;
        info!("已创建用户 id={}", user.id);
        Ok(user)
    }

    pub fn update_user(&self, index: usize, draft: UserDraft) -> Result<User, CoreError> {
        let user = self
            .write()?
            .replace_at(index, draft)
            .ok_or(CoreError::NotFound)?;
        info!("已更新用户 id={}", user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first_name: &str, gender: &str) -> UserDraft {
        UserDraft {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            gender: gender.to_string(),
            ip_address: "192.168.1.1".to_string(),
        }
    }

    #[test]
    fn test_empty_store_starts_at_zero() {
        let mut store = UserStore::default();
        assert!(store.is_empty());
        assert_eq!(store.append(draft("Ann", "Female")).unwrap().id, 0);
        assert_eq!(store.append(draft("Bob", "Male")).unwrap().id, 1);
    }

    #[test]
    fn test_next_id_follows_max_not_len() {
        let mut store = UserStore::new(vec![
            draft("Ann", "Female").into_user(10),
            draft("Bob", "Male").into_user(3),
        ]);
        let user = store.append(draft("Cid", "Male")).unwrap();
        assert_eq!(user.id, 11);
        assert_eq!(store.find_by_id(11), Some(2));
        assert_eq!(store.all().last(), Some(&user));
    }

    #[test]
    fn test_append_when_ids_exhausted() {
        let mut store = UserStore::new(vec![draft("Max", "Male").into_user(u64::MAX)]);
        assert_eq!(store.next_id(), None);
        assert!(store.append(draft("Ann", "Female")).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_service_create_when_ids_exhausted() {
        let service = UserService::new(vec![draft("Max", "Male").into_user(u64::MAX)]);
        assert!(matches!(
            service.create_user(draft("Ann", "Female")),
            Err(CoreError::InternalServerError(_))
        ));

        // 存储仍然可用
        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(service.find_index(u64::MAX).unwrap(), Some(0));
    }

    #[test]
    fn test_replace_at_preserves_id() {
        let mut store = UserStore::new(vec![draft("Ann", "Female").into_user(5)]);
        let updated = store.replace_at(0, draft("Zoe", "Female")).unwrap();
        assert_eq!(updated.id, 5);
        assert_eq!(updated.first_name, "Zoe");
        assert_eq!(store.get(0), Some(&updated));
        assert!(store.replace_at(1, draft("Nope", "Male")).is_none());
    }

    #[test]
    fn test_find_by_id_missing() {
        let store = UserStore::new(vec![draft("Ann", "Female").into_user(1)]);
        assert_eq!(store.find_by_id(1), Some(0));
        assert_eq!(store.find_by_id(2), None);
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let store = UserStore::new(vec![
            draft("Ann", "Female").into_user(1),
            draft("Bob", "Male").into_user(2),
            draft("Ann", "Male").into_user(3),
        ]);

        let by_name = store.filter(&[("first_name".into(), "Ann".into())]);
        assert_eq!(by_name.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 3]);

        let both = store.filter(&[
            ("first_name".into(), "Ann".into()),
            ("gender".into(), "Male".into()),
        ]);
        assert_eq!(both.iter().map(|u| u.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_service_genders_do_not_grow() {
        let service = UserService::new(vec![draft("Ann", "Female").into_user(1)]);
        service.create_user(draft("Bob", "Male")).unwrap();
        assert!(!service.genders().contains("Male"));
        assert_eq!(service.count().unwrap(), 2);
    }

    #[test]
    fn test_service_clones_share_store() {
        let service = UserService::new(Vec::new());
        let other = service.clone();
        let user = service.create_user(draft("Ann", "Female")).unwrap();
        let index = other.find_index(user.id).unwrap().unwrap();
        assert_eq!(other.get_user(index).unwrap(), user);
    }
}
