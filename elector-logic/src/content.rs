//! Static informational content shown by the onboarding, town hall, voting
//! info, and "voice matters" screens. Data only, rendering is the UI's job.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct OnboardingPage {
    pub title: String,
    pub description: String,
    pub icon_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct InfoCard {
    pub title: String,
    pub description: String,
    pub icon_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct ResourceLink {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct TownHallEvent {
    pub title: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct VoterStory {
    pub title: String,
    pub story: String,
    pub impact: String,
    pub article_url: String,
}

/// A turnout statistic for one demographic group, percentage out of 100.
#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct DemographicStat {
    pub group: String,
    pub turnout_pct: f64,
    pub note: String,
}

/// Notification toggles, persisted by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, specta::Type)]
pub struct NotificationPrefs {
    pub election_reminders: bool,
    pub registration_deadlines: bool,
    pub town_hall_alerts: bool,
    pub personalized_news: bool,
    pub polling_place_updates: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            election_reminders: true,
            registration_deadlines: true,
            town_hall_alerts: false,
            personalized_news: true,
            polling_place_updates: false,
        }
    }
}

pub fn onboarding_pages() -> Vec<OnboardingPage> {
    let page = |title: &str, description: &str, icon_name: &str| OnboardingPage {
        title: title.to_string(),
        description: description.to_string(),
        icon_name: icon_name.to_string(),
    };

    vec![
        page(
            "Welcome to ConnecterElector",
            "Your platform for staying informed and engaged in the democratic process.",
            "person.3.fill",
        ),
        page(
            "Town Hall",
            "Watch live streams of candidate events and stay connected with your representatives.",
            "video.fill",
        ),
        page(
            "News Feed",
            "Get the latest news and updates about elections and candidates.",
            "newspaper.fill",
        ),
        page(
            "Voting Information",
            "Access important information about how and where to vote.",
            "info.circle.fill",
        ),
    ]
}

pub fn voting_info_cards() -> Vec<InfoCard> {
    let card = |title: &str, description: &str, icon_name: &str| InfoCard {
        title: title.to_string(),
        description: description.to_string(),
        icon_name: icon_name.to_string(),
    };

    vec![
        card(
            "How to Register",
            "Learn about the voter registration process and ensure you're eligible to \
             vote in the upcoming election.",
            "person.text.rectangle.fill",
        ),
        card(
            "Voting Requirements",
            "Understand what identification and materials you need to bring with you \
             on election day.",
            "checklist",
        ),
    ]
}

pub fn voting_resources() -> Vec<ResourceLink> {
    let link = |title: &str, description: &str, url: &str| ResourceLink {
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
    };

    vec![
        link(
            "Check Your Registration",
            "Confirm your voter registration status with the state portal.",
            "https://vote.elections.virginia.gov/VoterInformation",
        ),
        link(
            "How to Register",
            "Step-by-step registration instructions from the Department of Elections.",
            "https://www.elections.virginia.gov/registration/how-to-register/",
        ),
        link(
            "Voter ID Requirements",
            "Accepted forms of identification for election day.",
            "https://www.elections.virginia.gov/registration/voter-id/",
        ),
        link(
            "Department of Elections",
            "Official election information and announcements.",
            "https://www.elections.virginia.gov/",
        ),
    ]
}

pub fn town_hall_events() -> Vec<TownHallEvent> {
    let event = |title: &str, date: &str, time: &str| TownHallEvent {
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
    };

    vec![
        event("Mayoral Debate", "May 15, 2023", "7:00 PM"),
        event("Town Council Meeting", "May 20, 2023", "6:30 PM"),
        event("Candidate Q&A Session", "May 25, 2023", "5:00 PM"),
    ]
}

pub fn voice_matters_stories() -> Vec<VoterStory> {
    let story = |title: &str, story: &str, impact: &str, article_url: &str| VoterStory {
        title: title.to_string(),
        story: story.to_string(),
        impact: impact.to_string(),
        article_url: article_url.to_string(),
    };

    vec![
        story(
            "The Childcare Barrier to Voting",
            "In 2024, nonvoters like single moms were identified as a critical group \
             that often misses elections due to lack of childcare. Advocacy groups have \
             started targeting these caregivers, knowing their votes could influence \
             local policies such as education and family support.",
            "Voting could help reshape support systems for working parents.",
            "https://19thnews.org/2024/10/caregivers-single-moms-non-voters-2024/",
        ),
        story(
            "The Vote He Didn't Cast",
            "In 2023, Damion Green lost his city council race in Washington by a single \
             vote, his own. He skipped voting because he thought it would be \
             'narcissistic' to vote for himself. His opponent did vote and won. The \
             loss drew national attention, highlighting how one vote really can decide \
             an election.",
            "A single vote could have changed his entire career.",
            "https://www.businessinsider.com/political-candidate-didnt-vote-lost-election-one-ballot-thurston-washington-2023-12",
        ),
        story(
            "Immigrants Facing Language Barriers",
            "In 2024, language barriers continued to prevent many immigrant voters from \
             casting ballots. Without sufficient translation support or multilingual \
             resources at polling places, these eligible citizens remain \
             underrepresented in elections that directly affect their lives.",
            "Language access could unlock political power for entire communities.",
            "https://calmatters.org/california-divide/2024/03/immigrant-voter-rights/",
        ),
    ]
}

pub fn voting_demographics() -> Vec<DemographicStat> {
    let stat = |group: &str, turnout_pct: f64, note: &str| DemographicStat {
        group: group.to_string(),
        turnout_pct,
        note: note.to_string(),
    };

    vec![
        stat(
            "Age 18-29",
            50.0,
            "Young voters have increased turnout in recent years.",
        ),
        stat(
            "Women",
            68.0,
            "Women consistently vote at higher rates than men.",
        ),
        stat(
            "Hispanic Voters",
            54.0,
            "Hispanic turnout reached a record high in 2020.",
        ),
    ]
}
