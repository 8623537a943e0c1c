use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub contact_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hero_title: "Belajar Coding dengan Struktur dan Panduan yang Tepat".to_string(),
            hero_subtitle: "Kaze For Developers menyediakan kurikulum terbaik untuk karir impianmu."
                .to_string(),
            contact_email: "hello@kaze.dev".to_string(),
        }
    }
}
