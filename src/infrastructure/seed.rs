//! 种子数据加载

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::app::users::model::User;

/// 内置种子数据
const EMBEDDED_SEED: &str = include_str!("../../data/users.json");

/// 解析种子数据并确认 id 唯一
pub fn parse_seed(json: &str) -> Result<Vec<User>> {
    let users: Vec<User> = serde_json::from_str(json).context("种子数据格式错误")?;

    let mut seen = HashSet::with_capacity(users.len());
    for user in &users {
        if !seen.insert(user.id) {
            bail!("种子数据中存在重复的 id: {}", user.id);
        }
    }

    Ok(users)
}

pub fn embedded_seed() -> Result<Vec<User>> {
    parse_seed(EMBEDDED_SEED)
}

/// 指定了文件时从文件加载，否则使用内置数据
pub fn load_seed(path: Option<&Path>) -> Result<Vec<User>> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("无法读取种子数据文件: {}", path.display()))?;
            parse_seed(&content)
        }
        None => embedded_seed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_seed() {
        let users = embedded_seed().unwrap();
        assert_eq!(users.len(), 20);
        assert_eq!(users[0].id, 1);
        assert!(users.iter().any(|user| user.gender == "Male"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": 1, "first_name": "A", "last_name": "B", "email": "a@b.com", "gender": "Male", "ip_address": "1.1.1.1"},
            {"id": 1, "first_name": "C", "last_name": "D", "email": "c@d.com", "gender": "Female", "ip_address": "2.2.2.2"}
        ]"#;
        let err = parse_seed(json).unwrap_err();
        assert!(err.to_string().contains("重复"));
    }

    #[test]
    fn test_load_seed_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(
            &path,
            r#"[{"id": 0, "first_name": "A", "last_name": "B", "email": "a@b.com", "gender": "Agender", "ip_address": "1.1.1.1"}]"#,
        )
        .unwrap();

        let users = load_seed(Some(&path)).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].gender, "Agender");

        assert!(load_seed(Some(&dir.path().join("missing.json"))).is_err());
    }
}
