use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A news-feed entry. The remote feed serves these as JSON; entries without
/// an id get a fresh one on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, specta::Type)]
pub struct Article {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub date: String,
    pub icon_name: String,
}

impl Article {
    fn new(title: &str, summary: &str, source: &str, date: &str, icon_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            summary: summary.to_string(),
            source: source.to_string(),
            date: date.to_string(),
            icon_name: icon_name.to_string(),
        }
    }
}

/// Articles bundled with the app, shown when the remote feed can't be
/// reached.
pub fn bundled_articles() -> Vec<Article> {
    vec![
        Article::new(
            "City Council Approves New Budget",
            "The city council has approved a new budget for the upcoming fiscal year \
             with increased funding for education and infrastructure.",
            "Local News",
            "April 5, 2023",
            "building.columns.fill",
        ),
        Article::new(
            "Election Day Polling Locations Announced",
            "The election commission has released the list of polling locations for the \
             upcoming election. Check if your polling place has changed.",
            "Election Commission",
            "April 3, 2023",
            "mappin.circle.fill",
        ),
        Article::new(
            "Candidate Smith Unveils Education Plan",
            "Mayoral candidate Jane Smith has unveiled her comprehensive education plan \
             focusing on teacher retention and school infrastructure.",
            "Campaign News",
            "April 1, 2023",
            "book.fill",
        ),
        Article::new(
            "Voter Registration Deadline Approaching",
            "The deadline to register to vote in the upcoming election is April 15. \
             Make sure you're registered to have your voice heard.",
            "Voter Information",
            "March 28, 2023",
            "calendar.badge.exclamationmark",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_articles() {
        let articles = bundled_articles();
        assert_eq!(articles.len(), 4);
        assert_eq!(articles[0].title, "City Council Approves New Budget");
    }

    #[test]
    fn test_article_deserializes_without_id() {
        let json = r#"{
            "title": "T",
            "summary": "S",
            "source": "Local News",
            "date": "April 5, 2023",
            "icon_name": "newspaper.fill"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "T");
        assert!(!article.id.is_nil());
    }
}
