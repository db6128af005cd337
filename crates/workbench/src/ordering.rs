//! Stage 2: order catalog listing.

use order_check::Order;
use workbench_fixtures::Fixtures;

use crate::error::WorkbenchError;

/// The order catalog, or an error if it was not loaded.
pub fn catalog(fixtures: &Fixtures) -> Result<&[Order], WorkbenchError> {
    fixtures
        .orders
        .as_deref()
        .ok_or(WorkbenchError::CatalogUnavailable)
}

/// Orders sorted by rank, most relevant first. Equal ranks keep catalog order.
pub fn ranked_orders(catalog: &[Order]) -> Vec<&Order> {
    let mut orders: Vec<&Order> = catalog.iter().collect();
    orders.sort_by_key(|order| order.rank);
    orders
}

/// Orders whose name contains `query` literally. An empty query keeps all.
pub fn search_orders<'a>(orders: &[&'a Order], query: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .copied()
        .filter(|order| order.name.contains(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_fixture() -> Vec<Order> {
        vec![
            Order::new("血常规", 2, ""),
            Order::new("鼻内镜", 3, ""),
            Order::new("过敏原检测", 1, ""),
            Order::new("血清总IgE", 2, ""),
            Order::new("尿常规", order_check::DEFAULT_RANK, ""),
        ]
    }

    fn names<'a>(orders: &[&'a Order]) -> Vec<&'a str> {
        orders.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn test_ranked_orders_stable() {
        let catalog = catalog_fixture();
        let ranked = ranked_orders(&catalog);
        assert_eq!(
            names(&ranked),
            vec!["过敏原检测", "血常规", "血清总IgE", "鼻内镜", "尿常规"]
        );
    }

    #[test]
    fn test_search_orders() {
        let catalog = catalog_fixture();
        let ranked = ranked_orders(&catalog);
        assert_eq!(names(&search_orders(&ranked, "血")), vec!["血常规", "血清总IgE"]);
        assert_eq!(search_orders(&ranked, "").len(), 5);
        assert!(search_orders(&ranked, "CT").is_empty());
    }

    #[test]
    fn test_catalog_missing() {
        let fixtures = Fixtures::default();
        assert!(matches!(
            catalog(&fixtures),
            Err(WorkbenchError::CatalogUnavailable)
        ));
    }
}
