//! Sample-user generation and insertion.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use uuid::Uuid;

use userdir_core::record::{CREATED_AT_ATTRIBUTE, ID_ATTRIBUTE};

use super::error::{DynamodbError, Result};

const SAMPLE_NAMES: &[&str] = &[
    "Ana Torres",
    "Bruno Carvalho",
    "Carla Mendes",
    "Diego Fernández",
    "Elena Rossi",
    "Felipe Souza",
    "Greta Keller",
    "Hugo Navarro",
];

const SAMPLE_CITIES: &[&str] = &[
    "Montevideo",
    "Lima",
    "Porto",
    "Valparaíso",
    "Bologna",
    "Curitiba",
];

/// A generated sample user, ready to insert.
pub type SeedUser = HashMap<String, AttributeValue>;

/// Generates `count` sample users by cycling through fixed name/city
/// pools, each with a fresh id and timestamp.
pub fn generate_seed_users(count: u32) -> Vec<SeedUser> {
    (0..count as usize)
        .map(|index| {
            let name = SAMPLE_NAMES[index % SAMPLE_NAMES.len()];
            let city = SAMPLE_CITIES[index % SAMPLE_CITIES.len()];

            let mut item = HashMap::new();
            item.insert(
                ID_ATTRIBUTE.to_string(),
                AttributeValue::S(Uuid::new_v4().to_string()),
            );
            item.insert(
                CREATED_AT_ATTRIBUTE.to_string(),
                AttributeValue::S(Utc::now().to_rfc3339()),
            );
            item.insert("name".to_string(), AttributeValue::S(name.to_string()));
            item.insert("city".to_string(), AttributeValue::S(city.to_string()));
            item.insert(
                "email".to_string(),
                AttributeValue::S(sample_email(name, index)),
            );

            item
        })
        .collect()
}

/// One-line preview of a generated user.
pub fn format_user(user: &SeedUser) -> String {
    let field = |name: &str| {
        user.get(name)
            .and_then(|attr| attr.as_s().ok())
            .map(String::as_str)
            .unwrap_or("?")
    };

    format!("{} <{}> ({})", field("name"), field("email"), field("city"))
}

/// Inserts the generated users, returning how many were written.
pub async fn seed_users(client: &Client, table_name: &str, users: &[SeedUser]) -> Result<usize> {
    for user in users {
        client
            .put_item()
            .table_name(table_name)
            .set_item(Some(user.clone()))
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
    }

    Ok(users.len())
}

fn sample_email(name: &str, index: usize) -> String {
    let local: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect::<String>()
        .to_lowercase()
        .replace(' ', ".");

    format!("{local}{index}@example.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_count_and_fields() {
        let users = generate_seed_users(10);
        assert_eq!(users.len(), 10);

        for user in &users {
            assert!(user.contains_key(ID_ATTRIBUTE));
            assert!(user.contains_key(CREATED_AT_ATTRIBUTE));
            assert!(user.contains_key("name"));
            assert!(user.contains_key("email"));
        }
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let users = generate_seed_users(4);
        let ids: std::collections::HashSet<_> = users
            .iter()
            .map(|user| user[ID_ATTRIBUTE].as_s().unwrap().clone())
            .collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_sample_email_is_ascii() {
        let email = sample_email("Diego Fernández", 3);
        assert_eq!(email, "diego.fernndez3@example.com");
    }

    #[test]
    fn test_format_user() {
        let users = generate_seed_users(1);
        let line = format_user(&users[0]);
        assert!(line.contains("Ana Torres"));
    }
}
