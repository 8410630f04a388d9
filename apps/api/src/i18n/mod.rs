//! Localized UI strings. Pure lookup data keyed by `Language`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "TR")]
    Tr,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "EN" => Some(Language::En),
            "TR" => Some(Language::Tr),
            _ => None,
        }
    }

    /// Name of the language the generated CVs are written in.
    pub fn output_language_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Turkish",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholders {
    pub full_name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub location: &'static str,
    pub linkedin: &'static str,
    pub website: &'static str,
    pub about_me: &'static str,
    pub company: &'static str,
    pub role: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub desc: &'static str,
    pub school: &'static str,
    pub degree: &'static str,
    pub year: &'static str,
    pub skills: &'static str,
    pub projects: &'static str,
    pub certs: &'static str,
    pub languages: &'static str,
    pub references: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub start_building: &'static str,
    pub personal_info: &'static str,
    pub about_me: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub projects: &'static str,
    pub certs: &'static str,
    pub languages: &'static str,
    pub references: &'static str,
    pub next: &'static str,
    pub prev: &'static str,
    pub generate: &'static str,
    pub loading: &'static str,
    pub download: &'static str,
    pub copy: &'static str,
    pub back_to_edit: &'static str,
    pub add_experience: &'static str,
    pub add_education: &'static str,
    pub remove: &'static str,
    pub generation_failed: &'static str,
    pub placeholders: Placeholders,
}

static EN: Translations = Translations {
    hero_title: "Build your perfect CV with AI precision.",
    hero_subtitle: "Generate 7 specialized versions for corporate, startups, tech, and more from a single form.",
    start_building: "Start Building",
    personal_info: "Personal Information",
    about_me: "About Me",
    experience: "Work Experience",
    education: "Education",
    skills: "Skills",
    projects: "Projects",
    certs: "Certifications",
    languages: "Languages",
    references: "References",
    next: "Next Step",
    prev: "Previous",
    generate: "Generate CV Versions",
    loading: "AI is crafting your resumes...",
    download: "Download PDF",
    copy: "Copy Text",
    back_to_edit: "Back to Edit",
    add_experience: "+ Add Experience",
    add_education: "+ Add Education",
    remove: "Remove",
    generation_failed: "Something went wrong. Please check your inputs or API connectivity.",
    placeholders: Placeholders {
        full_name: "Full Name",
        email: "Email Address",
        phone: "Phone Number",
        location: "Location (City, Country)",
        linkedin: "LinkedIn URL",
        website: "Portfolio / Website",
        about_me: "Briefly describe your professional background and goals...",
        company: "Company Name",
        role: "Job Title",
        start_date: "Start Date",
        end_date: "End Date (or Present)",
        desc: "Key responsibilities and achievements (use bullet points)",
        school: "Institution Name",
        degree: "Field of Study",
        year: "Graduation Year",
        skills: "e.g. React, Python, Project Management (comma separated)",
        projects: "e.g. E-commerce App, Open Source (comma separated)",
        certs: "e.g. AWS Certified Developer (comma separated)",
        languages: "e.g. English (Fluent), Turkish (Native) (comma separated)",
        references: "Available upon request...",
    },
};

static TR: Translations = Translations {
    hero_title: "Yapay zeka hassasiyetiyle mükemmel CV'nizi oluşturun.",
    hero_subtitle: "Tek bir formla kurumsal, startup, teknoloji ve daha fazlası için 7 farklı uzmanlaşmış versiyon oluşturun.",
    start_building: "Oluşturmaya Başla",
    personal_info: "Kişisel Bilgiler",
    about_me: "Hakkımda",
    experience: "İş Deneyimi",
    education: "Eğitim",
    skills: "Yetenekler",
    projects: "Projeler",
    certs: "Sertifikalar",
    languages: "Diller",
    references: "Referanslar",
    next: "Sonraki Adım",
    prev: "Geri",
    generate: "CV Versiyonlarını Oluştur",
    loading: "Yapay zeka özgeçmişlerinizi hazırlıyor...",
    download: "PDF İndir",
    copy: "Metni Kopyala",
    back_to_edit: "Düzenlemeye Dön",
    add_experience: "+ Deneyim Ekle",
    add_education: "+ Eğitim Ekle",
    remove: "Kaldır",
    generation_failed: "Bir şeyler ters gitti. Lütfen girdilerinizi veya API bağlantınızı kontrol edin.",
    placeholders: Placeholders {
        full_name: "Ad Soyad",
        email: "E-posta Adresi",
        phone: "Telefon Numarası",
        location: "Lokasyon (Şehir, Ülke)",
        linkedin: "LinkedIn URL",
        website: "Portfolyo / Web Sitesi",
        about_me: "Profesyonel geçmişinizi ve hedeflerinizi kısaca tanımlayın...",
        company: "Şirket Adı",
        role: "Pozisyon",
        start_date: "Başlangıç Tarihi",
        end_date: "Bitiş Tarihi (veya Günümüz)",
        desc: "Temel sorumluluklar ve başarılar (madde işaretleri kullanın)",
        school: "Kurum Adı",
        degree: "Bölüm / Alan",
        year: "Mezuniyet Yılı",
        skills: "örn. React, Python, Proje Yönetimi (virgülle ayırın)",
        projects: "örn. E-ticaret Uygulaması, Açık Kaynak (virgülle ayırın)",
        certs: "örn. AWS Certified Developer (virgülle ayırın)",
        languages: "örn. İngilizce (İleri), Türkçe (Anadil) (virgülle ayırın)",
        references: "Talep edildiğinde sağlanacaktır...",
    },
};

pub fn translations(lang: Language) -> &'static Translations {
    match lang {
        Language::En => &EN,
        Language::Tr => &TR,
    }
}

/// Looks up a string by dotted key, e.g. `"placeholders.email"`.
pub fn lookup(lang: Language, key: &str) -> Option<String> {
    let table = serde_json::to_value(translations(lang)).ok()?;
    let mut node = &table;
    for part in key.split('.') {
        node = node.get(part)?;
    }
    match node {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("tr"), Some(Language::Tr));
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::Tr.output_language_name(), "Turkish");
    }

    #[test]
    fn test_lookup_top_level_and_nested() {
        assert_eq!(lookup(Language::En, "backToEdit").as_deref(), Some("Back to Edit"));
        assert_eq!(
            lookup(Language::Tr, "placeholders.email").as_deref(),
            Some("E-posta Adresi")
        );
    }

    #[test]
    fn test_lookup_missing_or_non_leaf() {
        assert!(lookup(Language::En, "nope").is_none());
        assert!(lookup(Language::En, "placeholders").is_none());
    }

    #[test]
    fn test_language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Tr).unwrap(), "\"TR\"");
    }
}
