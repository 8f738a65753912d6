#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Difficulty::Easy => "difficulty difficulty--easy",
            Difficulty::Moderate => "difficulty difficulty--moderate",
            Difficulty::Challenging => "difficulty difficulty--challenging",
        }
    }
}

/// Curated itinerary the trip guide can recommend.
#[derive(Clone, PartialEq, Debug)]
pub struct TripSuggestion {
    pub id: u32,
    pub title: &'static str,
    pub duration: &'static str,
    pub difficulty: Difficulty,
    pub highlights: &'static [&'static str],
    pub monasteries: &'static [&'static str],
    pub best_time: &'static str,
    pub description: &'static str,
}

impl TripSuggestion {
    /// Chat reply introducing this suggestion.
    pub fn reply(&self) -> String {
        format!(
            "Based on your interests, I recommend the \"{}\" experience. This {} journey offers {} \
             and is perfect for {} level travelers.",
            self.title,
            self.duration,
            self.highlights.join(", ").to_lowercase(),
            self.difficulty.label().to_lowercase()
        )
    }
}

pub const TRIP_SUGGESTIONS: &[TripSuggestion] = &[
    TripSuggestion {
        id: 1,
        title: "Spiritual Heritage Trail",
        duration: "3 Days",
        difficulty: Difficulty::Easy,
        highlights: &[
            "Ancient monasteries",
            "Cultural immersion",
            "Mountain views",
            "Traditional ceremonies",
        ],
        monasteries: &["Rumtek", "Enchey", "Ganesh Tok"],
        best_time: "March - May",
        description: "Perfect for first-time visitors seeking spiritual experiences. Visit the most \
                      accessible monasteries around Gangtok with comfortable accommodations and \
                      easy transportation.",
    },
    TripSuggestion {
        id: 2,
        title: "Complete Monastery Circuit",
        duration: "7 Days",
        difficulty: Difficulty::Moderate,
        highlights: &[
            "All major monasteries",
            "Festival participation",
            "Local cuisine",
            "Himalayan landscapes",
        ],
        monasteries: &["Rumtek", "Pemayangtse", "Tashiding", "Enchey", "Dubdi"],
        best_time: "September - November",
        description: "Comprehensive tour covering all major monasteries in Sikkim. Includes \
                      cultural festivals, traditional meals, and stunning Himalayan vistas.",
    },
    TripSuggestion {
        id: 3,
        title: "Adventure & Spirituality",
        duration: "10 Days",
        difficulty: Difficulty::Challenging,
        highlights: &[
            "Remote monasteries",
            "Trekking routes",
            "High altitude",
            "Rare ceremonies",
        ],
        monasteries: &["Tashiding", "Dubdi", "Pemayangtse", "Remote hermitages"],
        best_time: "October - November",
        description: "For experienced travelers seeking remote spiritual sites. Includes trekking \
                      to high-altitude monasteries and participation in rare ceremonial events.",
    },
];

/// One-click starters shown while the conversation is empty.
pub const QUICK_PROMPTS: &[&str] = &[
    "Plan a 3-day spiritual journey",
    "Best monasteries for photography",
    "Family-friendly monastery visits",
    "Festival season recommendations",
    "Budget-friendly monastery tour",
    "Adventure and spirituality combo",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_lowercases_highlights_and_difficulty() {
        let reply = TRIP_SUGGESTIONS[0].reply();
        assert!(reply.starts_with(
            "Based on your interests, I recommend the \"Spiritual Heritage Trail\" experience."
        ));
        assert!(reply.contains(
            "offers ancient monasteries, cultural immersion, mountain views, traditional ceremonies"
        ));
        assert!(reply.ends_with("perfect for easy level travelers."));
    }

    #[test]
    fn descriptions_have_single_spaces() {
        for suggestion in TRIP_SUGGESTIONS {
            assert!(!suggestion.description.contains("  "), "{}", suggestion.title);
        }
    }
}
