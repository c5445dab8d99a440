pub struct NormalRange {
    pub name: &'static str,
    pub range: &'static str,
}

pub const NORMAL_RANGES: [NormalRange; 2] = [
    NormalRange {
        name: "Resting Heart Rate",
        range: "60–100 bpm (adults)",
    },
    NormalRange {
        name: "Body Temperature",
        range: "36.1–37.2 °C (normal)",
    },
];

pub const TIPS: [&str; 3] = [
    "Sleep: maintain bed/wake consistency and avoid screens before bed.",
    "Stress: try 4-4-4 breathing (inhale 4s, hold 4s, exhale 4s).",
    "Activity: short regular walks and hydration help mood and focus.",
];
