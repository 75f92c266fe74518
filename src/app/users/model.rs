//! 用户数据模型

use serde::{Deserialize, Serialize};

/// 用户记录可识别的全部字段
pub const USER_FIELDS: [&str; 6] = [
    "id",
    "first_name",
    "last_name",
    "email",
    "gender",
    "ip_address",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub ip_address: String,
}

/// 通过校验的请求体，id 由存储分配或取自路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub ip_address: String,
}

impl UserDraft {
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            ip_address: self.ip_address,
        }
    }
}

impl User {
    /// 查询过滤：按字段名做精确匹配，id 按数值比较
    pub fn field_matches(&self, field: &str, value: &str) -> bool {
        match field {
            "id" => value.parse::<u64>().is_ok_and(|id| id == self.id),
            "first_name" => self.first_name == value,
            "last_name" => self.last_name == value,
            "email" => self.email == value,
            "gender" => self.gender == value,
            "ip_address" => self.ip_address == value,
            _ => false,
        }
    }
}
