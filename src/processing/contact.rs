//! Contact field and display name extraction from resume text

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Contact details passed through to reports untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    linkedin_regex: Regex,
    github_regex: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\+?[\d\s-]{10,}")
            .expect("Invalid phone regex");

        let linkedin_regex = Regex::new(r"linkedin\.com/in/[a-zA-Z0-9-]+")
            .expect("Invalid LinkedIn regex");

        let github_regex = Regex::new(r"github\.com/[a-zA-Z0-9-]+")
            .expect("Invalid GitHub regex");

        Self {
            email_regex,
            phone_regex,
            linkedin_regex,
            github_regex,
        }
    }

    /// First match of each field; email and phone default to empty
    pub fn extract(&self, text: &str) -> ContactInfo {
        let first = |regex: &Regex| regex.find(text).map(|m| m.as_str().trim().to_string());

        ContactInfo {
            email: first(&self.email_regex).unwrap_or_default(),
            phone: first(&self.phone_regex).unwrap_or_default(),
            linkedin: first(&self.linkedin_regex),
            github: first(&self.github_regex),
        }
    }

    /// First non-empty line, else the capitalised email local part
    pub fn extract_name(&self, text: &str) -> String {
        if let Some(first_line) = text.lines().map(str::trim).find(|line| !line.is_empty()) {
            if !self.email_regex.is_match(first_line) {
                return first_line.to_string();
            }
        }

        if let Some(email) = self.email_regex.find(text) {
            let local = email.as_str().split('@').next().unwrap_or_default();
            let first_part = local.split('.').next().unwrap_or_default();
            let mut chars = first_part.chars();
            if let Some(initial) = chars.next() {
                return initial.to_uppercase().chain(chars).collect();
            }
        }

        "Unknown Candidate".to_string()
    }
}
