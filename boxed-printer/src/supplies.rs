//! Label stock suggestions shown before printing

use serde::Serialize;

/// A purchasable label supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supply {
    pub title: &'static str,
    pub product: &'static str,
    pub url: &'static str,
    /// Marked as the best fit for container labels
    pub recommended: bool,
}

const SUPPLIES: [Supply; 3] = [
    Supply {
        title: "Square 2\" x 2\"",
        product: "Avery 22806",
        url: "https://www.amazon.ca/s?k=avery+22806",
        recommended: true,
    },
    Supply {
        title: "Standard Address 1\" x 2-5/8\"",
        product: "Avery 5160",
        url: "https://www.amazon.ca/s?k=avery+5160",
        recommended: false,
    },
    Supply {
        title: "Thermal Printers",
        product: "Brother QL",
        url: "https://www.amazon.ca/s?k=brother+qld+printer",
        recommended: false,
    },
];

/// Supplies listed in the buy step, best first
pub fn recommended_supplies() -> &'static [Supply] {
    &SUPPLIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplies() {
        let list = recommended_supplies();
        assert_eq!(list.len(), 3);
        assert!(list[0].recommended);
        assert_eq!(list[0].product, "Avery 22806");
        assert!(list.iter().all(|s| s.url.starts_with("https://")));
    }
}
