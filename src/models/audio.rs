#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrackKind {
    Guide,
    Prayer,
    Ambient,
    Teaching,
}

impl TrackKind {
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Guide => "guide",
            TrackKind::Prayer => "prayer",
            TrackKind::Ambient => "ambient",
            TrackKind::Teaching => "teaching",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct AudioTrack {
    pub id: u32,
    pub title: &'static str,
    pub monastery: &'static str,
    pub kind: TrackKind,
    pub duration: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub const AUDIO_TRACKS: &[AudioTrack] = &[
    AudioTrack {
        id: 1,
        title: "Rumtek Monastery Audio Guide",
        monastery: "Rumtek",
        kind: TrackKind::Guide,
        duration: "12:45",
        url: "/audio/rumtek-guide.mp3",
        description: "Guided tour of Rumtek Monastery with historical notes",
    },
    AudioTrack {
        id: 2,
        title: "Morning Prayer Chants",
        monastery: "Pemayangtse",
        kind: TrackKind::Prayer,
        duration: "8:30",
        url: "/audio/morning-prayers.mp3",
        description: "Morning prayer chants recorded at Pemayangtse Monastery",
    },
    AudioTrack {
        id: 3,
        title: "Himalayan Meditation Sounds",
        monastery: "Tashiding",
        kind: TrackKind::Ambient,
        duration: "15:20",
        url: "/audio/meditation-ambient.mp3",
        description: "Ambient sounds for meditation and relaxation",
    },
    AudioTrack {
        id: 4,
        title: "Buddhist Philosophy Teaching",
        monastery: "Enchey",
        kind: TrackKind::Teaching,
        duration: "18:15",
        url: "/audio/philosophy-teaching.mp3",
        description: "Introduction to Buddhist philosophy and meditation practice",
    },
    AudioTrack {
        id: 5,
        title: "Evening Prayer Ceremony",
        monastery: "Dubdi",
        kind: TrackKind::Prayer,
        duration: "10:45",
        url: "/audio/evening-prayers.mp3",
        description: "Evening prayer ceremony with monks chanting",
    },
];
