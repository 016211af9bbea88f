//! Typed HTML form payloads. Fields arrive as options so that a missing or
//! blank field turns into a flash message instead of an extractor rejection.

use serde::Deserialize;

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    pub fn validate(self) -> Result<(String, String), &'static str> {
        match (required(self.username), required(self.password)) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err("All fields are required"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub password_repeat: Option<String>,
}

impl RegisterForm {
    pub fn validate(self) -> Result<(String, String), &'static str> {
        let username = required(self.username);
        let password = required(self.password);
        let repeat = required(self.password_repeat);

        match (username, password, repeat) {
            (Some(username), Some(password), Some(repeat)) => {
                if password != repeat {
                    return Err("Password must match");
                }
                Ok((username, password))
            }
            _ => Err("All fields are required"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl PostForm {
    pub fn validate(self) -> Result<(String, String), &'static str> {
        match (required(self.title), required(self.text)) {
            (Some(title), Some(text)) => Ok((title, text)),
            _ => Err("Title and text are required"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: Option<String>,
}

impl CommentForm {
    pub fn validate(self) -> Result<String, &'static str> {
        required(self.text).ok_or("Comment text is required")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// The trimmed search term, if one was submitted.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_requires_both_fields() {
        let form = LoginForm {
            username: Some("alice".into()),
            password: None,
        };
        assert!(form.validate().is_err());

        let form = LoginForm {
            username: Some("  alice  ".into()),
            password: Some("pw".into()),
        };
        assert_eq!(form.validate().unwrap().0, "alice");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let form = LoginForm {
            username: Some("   ".into()),
            password: Some("pw".into()),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn register_form_rejects_password_mismatch() {
        let form = RegisterForm {
            username: Some("alice".into()),
            password: Some("one".into()),
            password_repeat: Some("two".into()),
        };
        assert_eq!(form.validate().unwrap_err(), "Password must match");
    }

    #[test]
    fn register_form_accepts_matching_passwords() {
        let form = RegisterForm {
            username: Some("alice".into()),
            password: Some("pw".into()),
            password_repeat: Some("pw".into()),
        };
        assert_eq!(
            form.validate().unwrap(),
            ("alice".to_string(), "pw".to_string())
        );
    }

    #[test]
    fn post_form_requires_title_and_text() {
        let form = PostForm {
            title: Some("t".into()),
            text: None,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn search_term_is_trimmed_and_optional() {
        let query = SearchQuery { q: None };
        assert!(query.term().is_none());

        let query = SearchQuery {
            q: Some("  rust  ".into()),
        };
        assert_eq!(query.term(), Some("rust"));

        let query = SearchQuery {
            q: Some("   ".into()),
        };
        assert!(query.term().is_none());
    }
}
