pub const TITLE: &str = "Welcome to REVA Wellness";

pub const INTRO: &str = "A compact educational app for tracking mood, reminders, and basic \
health info. Sign in to save your data to your account.";

pub const FEATURES: [&str; 4] = [
    "Track mood and symptoms daily.",
    "Set reminders for medication and appointments.",
    "Read practical educational articles.",
    "Export your data for clinicians (CSV).",
];
