//! The static badge catalog.
//!
//! Badge definitions are embedded in code; only the `earned`/`earned_at`
//! fields travel with persisted [`Stats`](crate::model::Stats).

/// A catalog entry. Identity and presentation only -- the unlock predicates
/// live in [`super::predicate_met`].
#[derive(Debug, Clone, Copy)]
pub struct BadgeDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

/// Awarded when a task is added before 08:00; has no Stats predicate.
pub const EARLY_BIRD: &str = "early-bird";

/// The meta-badge: earned once every other catalog entry is earned.
pub const PRODUCTIVITY_GURU: &str = "productivity-guru";

pub const CATALOG: [BadgeDef; 26] = [
    // Beginner
    BadgeDef {
        id: "first-step",
        title: "First Step",
        description: "Complete your first task",
        emoji: "🌱",
    },
    BadgeDef {
        id: EARLY_BIRD,
        title: "Early Bird",
        description: "Add a task before 8am",
        emoji: "🐦",
    },
    BadgeDef {
        id: "note-beginner",
        title: "Note Taker",
        description: "Create your first note",
        emoji: "📄",
    },
    BadgeDef {
        id: "three-day-streak",
        title: "Getting Started",
        description: "Maintain a 3-day streak",
        emoji: "🔥",
    },
    BadgeDef {
        id: "daily-five",
        title: "Daily Five",
        description: "Complete 5 tasks in a single day",
        emoji: "✋",
    },
    // Intermediate
    BadgeDef {
        id: "streak-hero",
        title: "5-Day Streak Hero",
        description: "Maintain a 5+ day streak",
        emoji: "🏃",
    },
    BadgeDef {
        id: "xp-earner",
        title: "100 XP Earner",
        description: "Earn 100+ total XP",
        emoji: "⭐",
    },
    BadgeDef {
        id: "pomodoro-pro",
        title: "Pomodoro Pro",
        description: "Complete 10+ Pomodoro sessions",
        emoji: "⏰",
    },
    BadgeDef {
        id: "note-taker",
        title: "Note Expert",
        description: "Create 5+ notes",
        emoji: "📝",
    },
    BadgeDef {
        id: "task-master",
        title: "Task Master",
        description: "Complete 20+ tasks",
        emoji: "✅",
    },
    BadgeDef {
        id: "hard-worker",
        title: "Hard Worker",
        description: "Complete 5+ hard difficulty tasks",
        emoji: "💪",
    },
    BadgeDef {
        id: "planner",
        title: "Planner",
        description: "Add 5+ future tasks using the calendar",
        emoji: "📅",
    },
    BadgeDef {
        id: "weekend-warrior",
        title: "Weekend Warrior",
        description: "Complete tasks on both Saturday and Sunday",
        emoji: "🏆",
    },
    // Advanced
    BadgeDef {
        id: "consistent-streak",
        title: "Consistency King",
        description: "Maintain a 10+ day streak",
        emoji: "👑",
    },
    BadgeDef {
        id: "xp-master",
        title: "XP Master",
        description: "Earn 250+ total XP",
        emoji: "🏆",
    },
    BadgeDef {
        id: "pomodoro-master",
        title: "Pomodoro Master",
        description: "Complete 25+ Pomodoro sessions",
        emoji: "⌚",
    },
    BadgeDef {
        id: "extreme-focus",
        title: "Extreme Focus",
        description: "Complete 5 Pomodoro sessions in a single day",
        emoji: "🧠",
    },
    BadgeDef {
        id: "organization-expert",
        title: "Organization Expert",
        description: "Create 15+ notes",
        emoji: "📊",
    },
    BadgeDef {
        id: "heavy-lifter",
        title: "Heavy Lifter",
        description: "Complete 15+ hard difficulty tasks",
        emoji: "🏋️",
    },
    // Elite
    BadgeDef {
        id: "month-streak",
        title: "Monthly Mastery",
        description: "Maintain a 30+ day streak",
        emoji: "🌟",
    },
    BadgeDef {
        id: "xp-legend",
        title: "XP Legend",
        description: "Earn 500+ total XP",
        emoji: "🥇",
    },
    BadgeDef {
        id: "xp-titan",
        title: "XP Titan",
        description: "Earn 1000+ total XP",
        emoji: "🔱",
    },
    BadgeDef {
        id: "xp-immortal",
        title: "XP Immortal",
        description: "Earn 5000+ total XP",
        emoji: "⚡",
    },
    BadgeDef {
        id: "task-legend",
        title: "Task Legend",
        description: "Complete 100+ tasks",
        emoji: "🌠",
    },
    BadgeDef {
        id: "ultimate-pomodoro",
        title: "Ultimate Pomodoro",
        description: "Complete 50+ Pomodoro sessions",
        emoji: "🕰️",
    },
    BadgeDef {
        id: PRODUCTIVITY_GURU,
        title: "Productivity Guru",
        description: "Earn all other badges",
        emoji: "🧘",
    },
];
