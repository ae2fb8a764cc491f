//! The fixed set of categories a transaction can be filed under.

/// A transaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// The identifier stored on each transaction.
    pub key: &'static str,
    /// The display name.
    pub name: &'static str,
    /// The colour used in charts and cards, as a CSS hex colour.
    pub color: &'static str,
    /// The name of the Feather icon for the category.
    pub icon: &'static str,
}

/// Every category, in display order.
pub static CATEGORIES: [Category; 6] = [
    Category {
        key: "purchases",
        name: "Compras",
        color: "#5636D3",
        icon: "shopping-bag",
    },
    Category {
        key: "food",
        name: "Alimentação",
        color: "#FF872C",
        icon: "coffee",
    },
    Category {
        key: "salary",
        name: "Salário",
        color: "#12A454",
        icon: "dollar-sign",
    },
    Category {
        key: "car",
        name: "Carro",
        color: "#E83F5B",
        icon: "crosshair",
    },
    Category {
        key: "leisure",
        name: "Lazer",
        color: "#26195C",
        icon: "heart",
    },
    Category {
        key: "studies",
        name: "Estudos",
        color: "#9C001A",
        icon: "book",
    },
];

/// Look up a category by its key.
pub fn get_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.key == key)
}
