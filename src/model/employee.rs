use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

/// Payload for creating an employee in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewEmployee {
    #[schema(example = "John Doe", value_type = String)]
    pub full_name: String,
    #[schema(example = "john@email.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

impl NewEmployee {
    /// Trims every field and rejects blanks and malformed emails.
    pub fn normalized(self) -> Result<Self, String> {
        let full_name = self.full_name.trim().to_string();
        let email = self.email.trim().to_string();
        let department = self.department.trim().to_string();

        if full_name.is_empty() || email.is_empty() || department.is_empty() {
            return Err("full_name, email and department must not be empty".to_string());
        }

        if !is_valid_email(&email) {
            return Err(format!("'{}' is not a valid email address", email));
        }

        Ok(Self {
            full_name,
            email,
            department,
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}
