//! Static taxonomy tables: the closed activity-type set and the
//! category-mapping rules. Loaded once at startup, read-only afterward.

use super::CategoryRule;

/// The closed set of canonical activity types.
pub const ACTIVITY_TYPES: &[&str] = &[
    "Swimming & Aquatics",
    "Skating & Wheels",
    "Team Sports",
    "Racquet Sports",
    "Martial Arts",
    "Gymnastics & Movement",
    "Dance",
    "Music",
    "Visual Arts",
    "Performing Arts",
    "STEM & Academics",
    "Camps",
    "Fitness & Wellness",
    "Outdoor & Adventure",
    "Culinary Arts",
    "Language & Culture",
    "Early Development",
    "Leadership & Development",
    "Life Skills",
    "Special Needs Programs",
    "Other",
];

// Shared subcategory mappings for the umbrella categories ("School Age",
// "Youth", "All Ages") that bundle many unrelated activity kinds under one
// legacy label. Order matters: evaluated top-to-bottom, first match wins,
// so longer keys that contain shorter ones ("Martial Arts" vs "Art",
// "Skateboard" vs "Skate") are listed first. A None subtype falls back to
// the raw subcategory text.
const UMBRELLA_MAPPINGS: &[(&str, &str, Option<&str>)] = &[
    ("Martial Arts", "Martial Arts", None),
    ("Skateboard", "Skating & Wheels", Some("Skateboarding")),
    ("Basketball", "Team Sports", Some("Basketball")),
    ("Soccer", "Team Sports", Some("Soccer")),
    ("Hockey", "Team Sports", Some("Hockey")),
    ("Volleyball", "Team Sports", Some("Volleyball")),
    ("Baseball", "Team Sports", Some("Baseball")),
    ("Flag Football", "Team Sports", Some("Flag Football")),
    ("Lacrosse", "Team Sports", Some("Lacrosse")),
    ("Tennis", "Racquet Sports", Some("Tennis")),
    ("Badminton", "Racquet Sports", Some("Badminton")),
    ("Pickleball", "Racquet Sports", Some("Pickleball")),
    ("Swim", "Swimming & Aquatics", None),
    ("Aquatic", "Swimming & Aquatics", None),
    ("Skate", "Skating & Wheels", None),
    ("Gym", "Gymnastics & Movement", None),
    ("Tumbling", "Gymnastics & Movement", Some("Tumbling")),
    ("Ballet", "Dance", Some("Ballet")),
    ("Dance", "Dance", None),
    ("Piano", "Music", Some("Piano")),
    ("Guitar", "Music", Some("Guitar")),
    ("Music", "Music", None),
    ("Drama", "Performing Arts", Some("Drama")),
    ("Theatre", "Performing Arts", Some("Drama")),
    ("Pottery", "Visual Arts", Some("Pottery")),
    ("Paint", "Visual Arts", Some("Painting")),
    ("Art", "Visual Arts", None),
    ("Cook", "Culinary Arts", None),
    ("Baking", "Culinary Arts", Some("Baking")),
    ("Science", "STEM & Academics", Some("Science")),
    ("Coding", "STEM & Academics", Some("Coding")),
    ("Robotics", "STEM & Academics", Some("Robotics")),
    ("Chess", "STEM & Academics", Some("Chess")),
    ("Climbing", "Outdoor & Adventure", Some("Climbing")),
    ("Hiking", "Outdoor & Adventure", Some("Hiking")),
    ("Babysitting", "Life Skills", Some("Babysitting Training")),
    ("Home Alone", "Life Skills", Some("Home Alone Safety")),
    ("Leadership", "Leadership & Development", None),
    ("Camp", "Camps", None),
    ("Yoga", "Fitness & Wellness", Some("Yoga")),
    ("Fitness", "Fitness & Wellness", None),
];

/// Build the ordered category-rule table. Keys are matched
/// case-insensitively against the trimmed raw category label.
pub(super) fn category_rules() -> Vec<(&'static str, CategoryRule)> {
    vec![
        (
            "Swimming",
            CategoryRule::Direct {
                activity_type: "Swimming & Aquatics",
                subtype_keywords: &[
                    ("parent", "Parent & Tot Swim"),
                    ("beginner", "Learn to Swim"),
                    ("learn", "Learn to Swim"),
                    ("advanced", "Swim Advanced"),
                    ("competitive", "Competitive Swim Club"),
                    ("lifesaving", "Lifesaving"),
                    ("aqua", "Aquatic Fitness"),
                ],
                default_subtype: Some("Swimming Lessons"),
            },
        ),
        (
            "Aquatics",
            CategoryRule::Direct {
                activity_type: "Swimming & Aquatics",
                subtype_keywords: &[
                    ("parent", "Parent & Tot Swim"),
                    ("beginner", "Learn to Swim"),
                    ("learn", "Learn to Swim"),
                    ("lifesaving", "Lifesaving"),
                ],
                default_subtype: Some("Swimming Lessons"),
            },
        ),
        (
            "Skating",
            CategoryRule::Direct {
                activity_type: "Skating & Wheels",
                subtype_keywords: &[
                    ("learn", "Learn to Skate"),
                    ("figure", "Figure Skating"),
                    ("hockey", "Hockey Skating"),
                    ("speed", "Speed Skating"),
                ],
                default_subtype: Some("Skating"),
            },
        ),
        (
            "Camps",
            CategoryRule::Direct {
                activity_type: "Camps",
                subtype_keywords: &[
                    ("summer", "Summer Camp"),
                    ("break", "School Break Camp"),
                    ("overnight", "Overnight Camp"),
                    ("day", "Day Camp"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Dance",
            CategoryRule::Direct {
                activity_type: "Dance",
                subtype_keywords: &[
                    ("ballet", "Ballet"),
                    ("jazz", "Jazz Dance"),
                    ("hip", "Hip Hop"),
                    ("tap", "Tap Dance"),
                    ("creative", "Creative Movement"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Martial Arts",
            CategoryRule::Direct {
                activity_type: "Martial Arts",
                subtype_keywords: &[
                    ("karate", "Karate"),
                    ("taekwondo", "Taekwondo"),
                    ("judo", "Judo"),
                    ("jiu", "Jiu-Jitsu"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Music",
            CategoryRule::Direct {
                activity_type: "Music",
                subtype_keywords: &[
                    ("piano", "Piano"),
                    ("guitar", "Guitar"),
                    ("violin", "Violin"),
                    ("choir", "Choir"),
                    ("sing", "Singing"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Arts & Crafts",
            CategoryRule::Direct {
                activity_type: "Visual Arts",
                subtype_keywords: &[
                    ("paint", "Painting"),
                    ("draw", "Drawing"),
                    ("pottery", "Pottery"),
                    ("craft", "Crafts"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Gymnastics",
            CategoryRule::Direct {
                activity_type: "Gymnastics & Movement",
                subtype_keywords: &[
                    ("tumbling", "Tumbling"),
                    ("trampoline", "Trampoline"),
                    ("parkour", "Parkour"),
                ],
                default_subtype: Some("Gymnastics"),
            },
        ),
        (
            "Sports",
            CategoryRule::Direct {
                activity_type: "Team Sports",
                subtype_keywords: &[
                    ("basketball", "Basketball"),
                    ("soccer", "Soccer"),
                    ("hockey", "Hockey"),
                    ("volleyball", "Volleyball"),
                    ("baseball", "Baseball"),
                    ("multi", "Multi-Sport"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Tennis",
            CategoryRule::Direct {
                activity_type: "Racquet Sports",
                subtype_keywords: &[],
                default_subtype: Some("Tennis"),
            },
        ),
        (
            "Fitness",
            CategoryRule::Direct {
                activity_type: "Fitness & Wellness",
                subtype_keywords: &[("yoga", "Yoga"), ("spin", "Spin")],
                default_subtype: None,
            },
        ),
        (
            "Cooking",
            CategoryRule::Direct {
                activity_type: "Culinary Arts",
                subtype_keywords: &[("baking", "Baking")],
                default_subtype: Some("Cooking"),
            },
        ),
        (
            "Outdoor",
            CategoryRule::Direct {
                activity_type: "Outdoor & Adventure",
                subtype_keywords: &[
                    ("climb", "Climbing"),
                    ("hike", "Hiking"),
                    ("paddle", "Paddling"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Theatre",
            CategoryRule::Direct {
                activity_type: "Performing Arts",
                subtype_keywords: &[("musical", "Musical Theatre"), ("improv", "Improv")],
                default_subtype: Some("Drama"),
            },
        ),
        (
            "Languages",
            CategoryRule::Direct {
                activity_type: "Language & Culture",
                subtype_keywords: &[
                    ("french", "French"),
                    ("spanish", "Spanish"),
                    ("mandarin", "Mandarin"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Early Years",
            CategoryRule::Direct {
                activity_type: "Early Development",
                subtype_keywords: &[
                    ("parent", "Parent & Child"),
                    ("preschool", "Preschool Program"),
                    ("play", "Play Group"),
                ],
                default_subtype: None,
            },
        ),
        (
            "Parent Participation",
            CategoryRule::Direct {
                activity_type: "Early Development",
                subtype_keywords: &[],
                default_subtype: Some("Parent & Child"),
            },
        ),
        (
            "Adapted Programs",
            CategoryRule::Direct {
                activity_type: "Special Needs Programs",
                subtype_keywords: &[],
                default_subtype: None,
            },
        ),
        (
            "Leadership",
            CategoryRule::Direct {
                activity_type: "Leadership & Development",
                subtype_keywords: &[("babysit", "Babysitting Training")],
                default_subtype: None,
            },
        ),
        (
            "School Age",
            CategoryRule::Umbrella {
                mappings: UMBRELLA_MAPPINGS,
            },
        ),
        (
            "Youth",
            CategoryRule::Umbrella {
                mappings: UMBRELLA_MAPPINGS,
            },
        ),
        (
            "All Ages",
            CategoryRule::Umbrella {
                mappings: UMBRELLA_MAPPINGS,
            },
        ),
    ]
}
