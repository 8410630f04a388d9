//! Result Presenter: turns a generation result and a selected index into
//! what the result screen shows: selectable summaries, the selected version's
//! markup, the contact header, and the copy/download payloads.
//!
//! Selecting a version only changes which markup is shown; nothing here
//! talks to the provider.

pub mod markup;

use serde::{Deserialize, Serialize};

use crate::models::cv::PersonalInfo;
use crate::models::version::{CvVersion, GenerationResult};
use crate::presenter::markup::{escape_attr, escape_text, plain_text, sanitize_fragment};

const NAME_PLACEHOLDER: &str = "YOUR NAME";

/// How provider markup is treated before display.
///
/// `Trusted` passes it through verbatim: the provider is assumed to be a
/// trusted source. `Sanitized` rebuilds it through an allow-list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HtmlPolicy {
    #[default]
    Trusted,
    Sanitized,
}

impl HtmlPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trusted" => Some(HtmlPolicy::Trusted),
            "sanitized" => Some(HtmlPolicy::Sanitized),
            _ => None,
        }
    }

    pub fn apply(&self, html: &str) -> String {
        match self {
            HtmlPolicy::Trusted => html.to_string(),
            HtmlPolicy::Sanitized => sanitize_fragment(html),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub style_slug: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinLink {
    pub href: String,
    pub display: String,
}

/// Name and contact line shown above every version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactHeader {
    pub full_name: String,
    /// Email, phone and location, in that order, skipping empty ones.
    pub contacts: Vec<String>,
    pub linkedin: Option<LinkedinLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVersion {
    pub index: usize,
    pub title: String,
    pub html_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub versions: Vec<VersionSummary>,
    pub selected: Option<SelectedVersion>,
    pub header: ContactHeader,
}

pub fn contact_header(personal: &PersonalInfo) -> ContactHeader {
    let full_name = if personal.full_name.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        personal.full_name.clone()
    };

    let contacts = [&personal.email, &personal.phone, &personal.location]
        .into_iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect();

    let linkedin = (!personal.linkedin.is_empty()).then(|| linkedin_link(&personal.linkedin));

    ContactHeader {
        full_name,
        contacts,
        linkedin,
    }
}

fn linkedin_link(raw: &str) -> LinkedinLink {
    let href = if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let without_scheme = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    let display = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme)
        .to_string();

    LinkedinLink { href, display }
}

pub fn build_result_view(
    result: &GenerationResult,
    selected_index: Option<usize>,
    personal: &PersonalInfo,
    policy: HtmlPolicy,
) -> ResultView {
    let versions = result
        .versions
        .iter()
        .enumerate()
        .map(|(index, v)| VersionSummary {
            index,
            title: v.title.clone(),
            description: v.description.clone(),
            style_slug: v.style_slug.clone(),
            selected: Some(index) == selected_index,
        })
        .collect();

    let selected = selected_index.and_then(|index| {
        result.get(index).map(|v| SelectedVersion {
            index,
            title: v.title.clone(),
            html_content: policy.apply(&v.html_content),
        })
    });

    ResultView {
        versions,
        selected,
        header: contact_header(personal),
    }
}

/// Text for the copy action: header lines followed by the version's text.
pub fn copy_text(version: &CvVersion, personal: &PersonalInfo) -> String {
    let header = contact_header(personal);
    let mut lines = vec![header.full_name];
    let mut contact_line = header.contacts;
    if let Some(link) = header.linkedin {
        contact_line.push(link.display);
    }
    if !contact_line.is_empty() {
        lines.push(contact_line.join(" | "));
    }

    let body = plain_text(&version.html_content);
    if !body.is_empty() {
        lines.push(String::new());
        lines.push(body);
    }
    lines.join("\n")
}

/// Full standalone document for the download action. The browser prints it.
pub fn printable_document(
    version: &CvVersion,
    personal: &PersonalInfo,
    policy: HtmlPolicy,
) -> String {
    let header = contact_header(personal);

    let mut contact_spans: Vec<String> = header
        .contacts
        .iter()
        .map(|c| format!("<span>{}</span>", escape_text(c)))
        .collect();
    if let Some(link) = &header.linkedin {
        contact_spans.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_attr(&link.href),
            escape_text(&link.display)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<div class="cv-content">
<header>
<h1>{name}</h1>
<div class="contacts">{contacts}</div>
</header>
<div class="cv-body">
{body}
</div>
</div>
</body>
</html>
"#,
        title = escape_text(&format!("{} - {}", header.full_name, version.title)),
        name = escape_text(&header.full_name),
        contacts = contact_spans.join(""),
        body = policy.apply(&version.html_content),
    )
}
