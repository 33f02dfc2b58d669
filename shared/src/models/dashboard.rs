use serde::{Deserialize, Serialize};

/// Fee collection progress across the estate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionRate {
    /// Fraction in `[0, 1]`.
    pub rate: f64,
    pub paid: i64,
    pub total: i64,
}

/// One slice of the income-by-fee-type breakdown.
///
/// Inner keys come straight from the reporting SQL, hence snake_case
/// while the outer payload is camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeSlice {
    pub fee_type: String,
    pub total_amount: f64,
}

/// Unpaid-fee count for one building, worst first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrearsRow {
    pub building_no: String,
    pub unpaid_count: i64,
}

/// Payload of `/dashboard/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub collection_rate: CollectionRate,

    #[serde(default)]
    pub income_distribution: Vec<IncomeSlice>,

    #[serde(default)]
    pub arrears_by_building: Vec<ArrearsRow>,
}

/// Translate a backend fee-type tag for chart legends and labels.
pub fn translate_fee_type(fee_type: &str) -> &str {
    match fee_type {
        "PROPERTY_FEE" => "物业费",
        "HEATING_FEE" => "取暖费",
        "WATER" | "WATER_FEE" => "水费",
        "ELECTRICITY" | "ELECTRICITY_FEE" => "电费",
        "PARKING_FEE" => "停车费",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_case_payload() {
        let json = r#"{
            "collectionRate": {"rate": 0.825, "paid": 33, "total": 40},
            "incomeDistribution": [{"fee_type": "PROPERTY_FEE", "total_amount": 12000.0}],
            "arrearsByBuilding": [{"building_no": "5", "unpaid_count": 7}]
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.collection_rate.paid, 33);
        assert_eq!(stats.income_distribution[0].fee_type, "PROPERTY_FEE");
        assert_eq!(stats.arrears_by_building[0].building_no, "5");
    }

    #[test]
    fn empty_breakdowns_default() {
        let json = r#"{"collectionRate": {"rate": 0.0, "paid": 0, "total": 0}}"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert!(stats.income_distribution.is_empty());
        assert!(stats.arrears_by_building.is_empty());
    }

    #[test]
    fn fee_types_translate_with_fallback() {
        assert_eq!(translate_fee_type("PROPERTY_FEE"), "物业费");
        assert_eq!(translate_fee_type("WATER"), "水费");
        assert_eq!(translate_fee_type("WATER_FEE"), "水费");
        assert_eq!(translate_fee_type("GARDEN_FEE"), "GARDEN_FEE");
    }
}
