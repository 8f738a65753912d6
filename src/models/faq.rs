#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FaqCategory {
    General,
    Visiting,
    Culture,
    Practical,
}

impl FaqCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaqCategory::General => "general",
            FaqCategory::Visiting => "visiting",
            FaqCategory::Culture => "culture",
            FaqCategory::Practical => "practical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FaqCategory::General => "General",
            FaqCategory::Visiting => "Visiting",
            FaqCategory::Culture => "Culture",
            FaqCategory::Practical => "Practical",
        }
    }

    pub const ALL: [FaqCategory; 4] = [
        FaqCategory::General,
        FaqCategory::Visiting,
        FaqCategory::Culture,
        FaqCategory::Practical,
    ];
}

#[derive(Clone, PartialEq, Debug)]
pub struct FaqItem {
    pub id: u32,
    pub question: &'static str,
    pub answer: &'static str,
    pub category: FaqCategory,
    pub tags: &'static [&'static str],
}

pub const FAQ_ITEMS: &[FaqItem] = &[
    FaqItem {
        id: 1,
        question: "What are the visiting hours for monasteries in Sikkim?",
        answer: "Most monasteries are open from 6:00 AM to 6:00 PM, though timings vary. Rumtek is open 6:00 AM to 6:00 PM and Pemayangtse 7:00 AM to 5:00 PM. Morning visits let you witness the morning prayers.",
        category: FaqCategory::Visiting,
        tags: &["hours", "timing", "schedule"],
    },
    FaqItem {
        id: 2,
        question: "What should I wear when visiting monasteries?",
        answer: "Dress modestly: long pants or skirts covering the knees and shirts covering the shoulders. Remove your shoes before entering prayer halls. Many monasteries provide shoe storage at the entrance.",
        category: FaqCategory::Culture,
        tags: &["dress code", "etiquette", "respect"],
    },
    FaqItem {
        id: 3,
        question: "Can I take photographs inside the monasteries?",
        answer: "Photography is usually allowed in courtyards and outside areas but may be restricted inside prayer halls and near sacred artifacts. Always ask before photographing monks or ceremonies. Some monasteries charge a small photography fee.",
        category: FaqCategory::Visiting,
        tags: &["photography", "rules", "restrictions"],
    },
    FaqItem {
        id: 4,
        question: "What is the best time to visit Sikkim monasteries?",
        answer: "March to May and September to November offer pleasant, clear weather. Avoid the monsoon (June to August) because of heavy rain and landslides. Winter brings clear mountain views but is very cold.",
        category: FaqCategory::Practical,
        tags: &["weather", "season", "timing"],
    },
    FaqItem {
        id: 5,
        question: "How do I reach the major monasteries from Gangtok?",
        answer: "Rumtek is 24 km from Gangtok (about 45 minutes by taxi), Enchey 3 km (15 minutes), Pemayangtse 110 km (3 hours via Pelling) and Tashiding 118 km (3.5 hours). Local taxis and shared jeeps are available.",
        category: FaqCategory::Practical,
        tags: &["transport", "distance", "directions"],
    },
    FaqItem {
        id: 6,
        question: "What are the main Buddhist traditions in Sikkim?",
        answer: "Sikkim mainly follows the Nyingma and Kagyu traditions. Pemayangtse, Tashiding and Enchey are Nyingma monasteries. Rumtek, seat of the Karmapa, represents the Kagyu school.",
        category: FaqCategory::Culture,
        tags: &["Buddhism", "traditions", "schools"],
    },
    FaqItem {
        id: 7,
        question: "Are there any entry fees for monasteries?",
        answer: "Most monasteries do not charge entry fees, but donations are welcome. Some charge a small photography fee (usually ₹10 to ₹50).",
        category: FaqCategory::Practical,
        tags: &["fees", "donations", "cost"],
    },
    FaqItem {
        id: 8,
        question: "Can I participate in monastery ceremonies?",
        answer: "Visitors can usually observe ceremonies and prayers. Morning and evening prayers are generally open to respectful observers, and festivals may have their own rules. Ask the monks for guidance.",
        category: FaqCategory::Culture,
        tags: &["ceremonies", "participation", "prayers"],
    },
];
