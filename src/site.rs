//! Static page content.

use chrono::Datelike;

pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

pub struct Step {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { name: "Home", path: "/" },
    NavLink { name: "Daily Nuggets", path: "/daily-nuggets" },
    NavLink { name: "How it Works", path: "/how-it-works" },
    NavLink { name: "FAQs", path: "/faqs" },
];

pub const TOPICS_ROW_1: &[&str] = &[
    "Entertainment",
    "Technology",
    "Cricket",
    "Business",
    "Bollywood",
    "Stock Market",
];

pub const TOPICS_ROW_2: &[&str] = &[
    "Startups",
    "Social Media",
    "Politics",
    "Geopolitics",
    "Science",
    "Sports",
];

pub const STEPS: &[Step] = &[
    Step {
        title: "Create Your Account",
        description: "Sign up and log in to your Nugget profile in seconds. Authentication helps us save your preferences for personalized content.",
    },
    Step {
        title: "Select Your Preferences",
        description: "After logging in, choose your preferred topics and select from our curated trusted news portals that you want to follow.",
    },
    Step {
        title: "Receive Personalized Nuggets",
        description: "We'll deliver news only from your selected sources, focusing on the topics that matter to you. No more information overload.",
    },
    Step {
        title: "Stay Updated Daily",
        description: "Get fresh nuggets delivered to your feed daily. Update your preferences anytime to refine your personalized news experience.",
    },
];

pub const FAQS: &[Faq] = &[
    Faq {
        question: "What is Nugget?",
        answer: "Nugget is your personalized news feed. No clutter. Just the stories that matter to you.",
    },
    Faq {
        question: "Why do I need to log in?",
        answer: "Logging in helps us save your preferences, so you only see the news you care about from sources you trust.",
    },
    Faq {
        question: "How does it work?",
        answer: "Once you log in, you choose your preferred topics and news portals. We'll fetch and show you only the most relevant news nuggets, daily.",
    },
    Faq {
        question: "Is it free to use?",
        answer: "Absolutely! Nugget is free to use with no hidden charges.",
    },
];

pub const SUPPORT_EMAIL: &str = "team@nugget.news";

/// Navbar and footer data shared by every page.
pub struct Chrome {
    pub nav_links: &'static [NavLink],
    pub active: &'static str,
    pub year: i32,
    pub support_email: &'static str,
}

impl Chrome {
    pub fn new(active: &'static str) -> Self {
        Self {
            nav_links: NAV_LINKS,
            active,
            year: chrono::Utc::now().year(),
            support_email: SUPPORT_EMAIL,
        }
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.active == path
    }
}

/// A marquee row rendered twice so the scroll loops without a gap.
pub fn marquee(row: &[&'static str]) -> Vec<&'static str> {
    row.iter().chain(row.iter()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_links_paths_unique() {
        let mut paths: Vec<_> = NAV_LINKS.iter().map(|l| l.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), NAV_LINKS.len());
    }

    #[test]
    fn test_marquee_doubles_row() {
        let row = marquee(TOPICS_ROW_1);
        assert_eq!(row.len(), TOPICS_ROW_1.len() * 2);
        assert_eq!(row[0], row[TOPICS_ROW_1.len()]);
    }

    #[test]
    fn test_chrome_active_link() {
        let chrome = Chrome::new("/faqs");
        assert!(chrome.is_active("/faqs"));
        assert!(!chrome.is_active("/"));
        assert!(chrome.year >= 2025);
    }

    #[test]
    fn test_content_counts() {
        assert_eq!(STEPS.len(), 4);
        assert_eq!(FAQS.len(), 4);
    }
}
