use super::categories_model::Category;

/// The category table. Read-only at runtime.
pub const CATEGORIES: [Category; 8] = [
    Category {
        id: 1,
        name: "Food & Dining",
        icon: "utensils",
    },
    Category {
        id: 2,
        name: "Transportation",
        icon: "car",
    },
    Category {
        id: 3,
        name: "Entertainment",
        icon: "film",
    },
    Category {
        id: 4,
        name: "Utilities",
        icon: "bolt",
    },
    Category {
        id: 5,
        name: "Healthcare",
        icon: "heartbeat",
    },
    Category {
        id: 6,
        name: "Shopping",
        icon: "shopping-bag",
    },
    Category {
        id: 7,
        name: "Education",
        icon: "graduation-cap",
    },
    Category {
        id: 8,
        name: "Travel",
        icon: "plane",
    },
];

/// Free-text transaction categories written before transactions carried a
/// category id, mapped to the id they stand for. Keys are lowercase.
pub const LEGACY_CATEGORY_ALIASES: [(&str, i32); 3] = [("food", 1), ("dining", 1), ("transport", 2)];
