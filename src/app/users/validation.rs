//! 用户字段校验
//!
//! 校验函数都是纯函数，不会失败：调用方根据返回的布尔值或错误列表决定如何响应。

use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::model::{User, UserDraft, USER_FIELDS};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .unwrap()
});

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$")
        .unwrap()
});

/// 常规的 local@domain 形式，不追求完整覆盖 RFC
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// 点分十进制 IPv4，每段 0-255
pub fn validate_ipv4(ip_address: &str) -> bool {
    IPV4_RE.is_match(ip_address)
}

/// 合法的性别集合，启动时由种子数据确定，之后不再变化
#[derive(Debug, Clone, Default)]
pub struct Genders(BTreeSet<String>);

impl Genders {
    pub fn from_users(users: &[User]) -> Self {
        Self(users.iter().map(|user| user.gender.clone()).collect())
    }

    pub fn contains(&self, gender: &str) -> bool {
        self.0.contains(gender)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 只保留可识别的字段，并去掉 id；未知字段静默丢弃。
/// 非对象的请求体按空对象处理。
pub fn check_body_keys(body: Value) -> Map<String, Value> {
    match body {
        Value::Object(map) => map
            .into_iter()
            .filter(|(key, _)| key != "id" && USER_FIELDS.contains(&key.as_str()))
            .collect(),
        _ => Map::new(),
    }
}

/// 返回所有不可识别的查询参数名，按首次出现顺序去重
pub fn check_query_keys(query: &[(String, String)]) -> Vec<String> {
    let mut invalid: Vec<String> = Vec::new();
    for (key, _) in query {
        if !USER_FIELDS.contains(&key.as_str()) && !invalid.contains(key) {
            invalid.push(key.clone());
        }
    }
    invalid
}

/// 非空字符串才算字段存在
fn field<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// 逐项检查所有字段，返回全部错误信息；合法时返回空列表
pub fn check_body(body: &Map<String, Value>, genders: &Genders) -> Vec<String> {
    let mut errors = Vec::new();

    if field(body, "first_name").is_none() {
        errors.push("Missing first_name".to_string());
    }
    if field(body, "last_name").is_none() {
        errors.push("Missing last_name".to_string());
    }
    match field(body, "email") {
        None => errors.push("Missing email".to_string()),
        Some(email) if !validate_email(email) => errors.push("Email not valid".to_string()),
        Some(_) => {}
    }
    match field(body, "gender") {
        None => errors.push("Missing gender".to_string()),
        Some(gender) if !genders.contains(gender) => {
            errors.push("Gender not valid".to_string())
        }
        Some(_) => {}
    }
    match field(body, "ip_address") {
        None => errors.push("Missing ip_address".to_string()),
        Some(ip_address) if !validate_ipv4(ip_address) => {
            errors.push("ip_address not valid".to_string())
        }
        Some(_) => {}
    }

    errors
}

/// 去除多余字段并校验，成功时得到可写入存储的草稿
pub fn parse_user(body: Value, genders: &Genders) -> Result<UserDraft, Vec<String>> {
    let body = check_body_keys(body);
    let errors = check_body(&body, genders);
    if !errors.is_empty() {
        return Err(errors);
    }

    let text = |key: &str| field(&body, key).unwrap_or_default().to_string();
    Ok(UserDraft {
        first_name: text("first_name"),
        last_name: text("last_name"),
        email: text("email"),
        gender: text("gender"),
        ip_address: text("ip_address"),
    })
}
