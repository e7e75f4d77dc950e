//! Client-side search over a fetched page of cars.

use crate::api::types::Car;

/// Cars whose brand, model, category or transmission contains `query`,
/// ignoring case. An empty query keeps every car.
pub fn filter_cars<'a>(cars: &'a [Car], query: &str) -> Vec<&'a Car> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return cars.iter().collect();
    }
    cars.iter()
        .filter(|car| {
            [&car.brand, &car.model, &car.category, &car.transmission]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// One-line summary for listings, e.g. `Toyota Corolla (2021) · $45/day · Berlin`.
pub fn describe(car: &Car, currency: &str) -> String {
    let mut line = format!("{} {}", car.brand, car.model);
    if car.year > 0 {
        line.push_str(&format!(" ({})", car.year));
    }
    line.push_str(&format!(" · {}{}/day", currency, car.price_per_day));
    if !car.location.is_empty() {
        line.push_str(&format!(" · {}", car.location));
    }
    if !car.is_available {
        line.push_str(" · unavailable");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: &str, brand: &str, model: &str, category: &str, transmission: &str) -> Car {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "brand": brand,
            "model": model,
            "category": category,
            "transmission": transmission,
            "year": 2022,
            "pricePerDay": 50.0,
            "location": "Lisbon"
        }))
        .unwrap()
    }

    fn fleet() -> Vec<Car> {
        vec![
            car("1", "Toyota", "Corolla", "Sedan", "Automatic"),
            car("2", "BMW", "X5", "SUV", "Automatic"),
            car("3", "Fiat", "Panda", "Hatchback", "Manual"),
        ]
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let cars = fleet();
        assert_eq!(filter_cars(&cars, "").len(), 3);
        assert_eq!(filter_cars(&cars, "   ").len(), 3);
    }

    #[test]
    fn test_matches_any_field_case_insensitive() {
        let cars = fleet();
        let ids = |q: &str| filter_cars(&cars, q).iter().map(|c| c.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids("bmw"), vec!["2"]);
        assert_eq!(ids("corOLLA"), vec!["1"]);
        assert_eq!(ids("suv"), vec!["2"]);
        assert_eq!(ids("auto"), vec!["1", "2"]);
        assert!(ids("tesla").is_empty());
    }

    #[test]
    fn test_describe() {
        let cars = fleet();
        assert_eq!(describe(&cars[0], "$"), "Toyota Corolla (2022) · $50/day · Lisbon");
    }
}
