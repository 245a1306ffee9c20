//! Cover letter input and its normalized, render-ready form.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::segment::segment_paragraphs;

/// Shown instead of the candidate's website when no location is given.
pub const DEFAULT_WEBSITE: &str = "website.com";
/// Greeting used when no hiring manager is given.
pub const DEFAULT_GREETING: &str = "Dear Hiring Manager,";
/// Closing used when none is given.
pub const DEFAULT_CLOSING: &str = "Kind Regards,";

const POSITION_PLACEHOLDER: &str = "[posizione]";
const COMPANY_PLACEHOLDER: &str = "[azienda]";

/// Personal and addressee details entered by the user.
///
/// Every field is optional; empty strings count as missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub hiring_manager: Option<String>,
    pub closing: Option<String>,
    pub date: Option<String>,
}

/// Raw cover letter: the profile plus the free-form body text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetter {
    pub profile: Profile,
    pub content: Option<String>,
}

impl CoverLetter {
    /// Creates a letter from a profile and optional body text.
    pub fn new(profile: Profile, content: Option<String>) -> Self {
        Self { profile, content }
    }

    /// Parses a letter from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Normalizes the letter, using the local date when none is set.
    pub fn normalize(&self) -> NormalizedLetter {
        normalize(&self.profile, self.content.as_deref())
    }
}

/// Sender block of the letter header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

/// Addressee company.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub job_title: Option<String>,
}

/// Letter text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LetterContent {
    pub greeting: String,
    /// Body paragraphs in source order.
    pub body: Vec<String>,
    pub closing: String,
}

/// Render-ready letter with every fallback applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedLetter {
    pub personal: PersonalInfo,
    pub company: CompanyInfo,
    pub content: LetterContent,
    pub date: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn or_default(value: &Option<String>, fallback: &str) -> String {
    present(value).unwrap_or(fallback).to_owned()
}

/// Formats a date the Italian way, `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Normalizes `profile` and `content` using today's local date as the date fallback.
pub fn normalize(profile: &Profile, content: Option<&str>) -> NormalizedLetter {
    normalize_at(profile, content, Local::now().date_naive())
}

/// Normalizes `profile` and `content`, falling back to `today` for the date.
pub fn normalize_at(profile: &Profile, content: Option<&str>, today: NaiveDate) -> NormalizedLetter {
    let body = match content.filter(|content| !content.is_empty()) {
        Some(content) => segment_paragraphs(content),
        None => vec![fallback_paragraph(profile)],
    };

    NormalizedLetter {
        personal: PersonalInfo {
            name: or_default(&profile.name, ""),
            title: or_default(&profile.position, ""),
            email: or_default(&profile.email, ""),
            phone: or_default(&profile.phone, ""),
            website: or_default(&profile.location, DEFAULT_WEBSITE),
        },
        company: CompanyInfo {
            name: present(&profile.company).map(str::to_owned),
            job_title: present(&profile.position).map(str::to_owned),
        },
        content: LetterContent {
            greeting: or_default(&profile.hiring_manager, DEFAULT_GREETING),
            body,
            closing: or_default(&profile.closing, DEFAULT_CLOSING),
        },
        date: present(&profile.date)
            .map(str::to_owned)
            .unwrap_or_else(|| format_date(today)),
    }
}

fn fallback_paragraph(profile: &Profile) -> String {
    format!(
        "Scrivo per esprimere il mio forte interesse per la posizione di {} presso {}.",
        present(&profile.position).unwrap_or(POSITION_PLACEHOLDER),
        present(&profile.company).unwrap_or(COMPANY_PLACEHOLDER),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
    }

    fn profile() -> Profile {
        Profile {
            name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("+39 055 1234".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let letter = normalize_at(&profile(), Some("Body"), today());

        assert_eq!(letter.personal.title, "");
        assert_eq!(letter.personal.website, DEFAULT_WEBSITE);
        assert_eq!(letter.content.greeting, DEFAULT_GREETING);
        assert_eq!(letter.content.closing, DEFAULT_CLOSING);
        assert_eq!(letter.company.name, None);
        assert_eq!(letter.date, "05/03/2024");
    }

    #[test]
    fn provided_fields_win() {
        let profile = Profile {
            position: Some("Engineer".into()),
            location: Some("ada.dev".into()),
            company: Some("Acme".into()),
            hiring_manager: Some("Dear Ms. Byron,".into()),
            closing: Some("Best,".into()),
            date: Some("1 April 2024".into()),
            ..profile()
        };
        let letter = normalize_at(&profile, Some("Body"), today());

        assert_eq!(letter.personal.title, "Engineer");
        assert_eq!(letter.personal.website, "ada.dev");
        assert_eq!(letter.company.name.as_deref(), Some("Acme"));
        assert_eq!(letter.company.job_title.as_deref(), Some("Engineer"));
        assert_eq!(letter.content.greeting, "Dear Ms. Byron,");
        assert_eq!(letter.content.closing, "Best,");
        assert_eq!(letter.date, "1 April 2024");
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let profile = Profile {
            location: Some(String::new()),
            closing: Some(String::new()),
            date: Some(String::new()),
            ..profile()
        };
        let letter = normalize_at(&profile, Some("Body"), today());

        assert_eq!(letter.personal.website, DEFAULT_WEBSITE);
        assert_eq!(letter.content.closing, DEFAULT_CLOSING);
        assert_eq!(letter.date, "05/03/2024");
    }

    #[test]
    fn empty_content_synthesizes_a_paragraph() {
        let profile = Profile {
            position: Some("Engineer".into()),
            company: Some("Acme".into()),
            ..profile()
        };

        for content in [None, Some("")] {
            let letter = normalize_at(&profile, content, today());
            assert_eq!(letter.content.body.len(), 1);
            assert!(letter.content.body[0].contains("Engineer"));
            assert!(letter.content.body[0].contains("Acme"));
        }
    }

    #[test]
    fn fallback_paragraph_uses_placeholders() {
        let letter = normalize_at(&profile(), None, today());
        assert!(letter.content.body[0].contains("[posizione]"));
        assert!(letter.content.body[0].contains("[azienda]"));
    }

    #[test]
    fn body_is_segmented() {
        let letter = normalize_at(&profile(), Some("Hello.\n\nWorld"), today());
        assert_eq!(letter.content.body, vec!["Hello.", "World"]);
    }

    #[test]
    fn missing_date_uses_today() {
        let letter = CoverLetter::new(profile(), Some("Body".to_string())).normalize();
        assert_eq!(letter.date, format_date(Local::now().date_naive()));
        assert_eq!(letter.date.len(), 10);
    }

    #[test]
    fn parses_front_end_json() {
        let letter = CoverLetter::from_json(
            r#"{"profile": {"name": "Ada", "hiringManager": "Dear Charles,"}, "content": "Hi"}"#,
        )
        .expect("letter parse");
        assert_eq!(letter.profile.hiring_manager.as_deref(), Some("Dear Charles,"));
        assert_eq!(letter.content.as_deref(), Some("Hi"));
    }
}
