use crate::classifier::Classification;

/// Description used when an article has no summary.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// Picture filename used when no image could be obtained.
pub const PICTURE_PLACEHOLDER: &str = "placeholder.png";

/// Fields read straight off one stream item, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl RawArticle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: DESCRIPTION_PLACEHOLDER.to_string(),
            image_url: None,
        }
    }
}

/// One extracted and classified article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    /// Extraction date, `YYYY-MM-DD`
    pub date: String,
    pub picture_filename: String,
    pub money_mentioned: bool,
    pub search_phrase_count: usize,
}

impl NewsArticle {
    pub fn from_raw(
        raw: RawArticle,
        date: String,
        picture_filename: String,
        classification: Classification,
    ) -> Self {
        Self {
            title: raw.title,
            description: raw.description,
            date,
            picture_filename,
            money_mentioned: classification.money_mentioned,
            search_phrase_count: classification.search_phrase_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_article_defaults_to_placeholder_description() {
        let raw = RawArticle::new("Headline");
        assert_eq!(raw.description, DESCRIPTION_PLACEHOLDER);
        assert!(raw.image_url.is_none());
    }

    #[test]
    fn test_from_raw_carries_fields() {
        let mut raw = RawArticle::new("Fed holds rates");
        raw.description = "Rates unchanged".into();
        let article = NewsArticle::from_raw(
            raw,
            "2024-01-01".into(),
            PICTURE_PLACEHOLDER.into(),
            Classification {
                money_mentioned: false,
                search_phrase_count: 1,
            },
        );

        assert_eq!(article.title, "Fed holds rates");
        assert_eq!(article.description, "Rates unchanged");
        assert_eq!(article.date, "2024-01-01");
        assert_eq!(article.search_phrase_count, 1);
        assert_eq!(article.picture_filename, PICTURE_PLACEHOLDER);
    }
}
