use serde::{Deserialize, Serialize};

/// Sale state of a property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    Sold,
    Unsold,
    Rented,
}

impl PropertyStatus {
    /// Display label for status badges.
    pub fn label(self) -> &'static str {
        match self {
            PropertyStatus::Sold => "已售",
            PropertyStatus::Unsold => "待售",
            PropertyStatus::Rented => "出租",
        }
    }

    /// Wire string, used for `<select>` option values.
    pub fn as_wire(self) -> &'static str {
        match self {
            PropertyStatus::Sold => "SOLD",
            PropertyStatus::Unsold => "UNSOLD",
            PropertyStatus::Rented => "RENTED",
        }
    }
}

/// A property row from `/property/list`, including the joined owner name
/// and utility-card ids when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub p_id: i64,
    pub building_no: String,
    pub unit_no: String,
    pub room_no: String,
    pub area: f64,
    pub p_status: PropertyStatus,

    /// Owning user, absent for unsold stock.
    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub water_card_id: Option<i64>,

    #[serde(default)]
    pub electricity_card_id: Option<i64>,
}

impl Property {
    /// `栋-单元-室` location line used in tables and card lists.
    pub fn location(&self) -> String {
        format!(
            "{}栋 {}单元 {}室",
            self.building_no, self.unit_no, self.room_no
        )
    }
}

/// Payload of `/owner/{id}`: the owner's holdings. Only the property list
/// is consumed by the console.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnerDetail {
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_keys() {
        let json = r#"{"pId":7,"buildingNo":"3","unitNo":"2","roomNo":"501",
                       "area":89.5,"pStatus":"SOLD","userId":4,"ownerName":"王强",
                       "waterCardId":11,"electricityCardId":12}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.p_id, 7);
        assert_eq!(property.p_status, PropertyStatus::Sold);
        assert_eq!(property.water_card_id, Some(11));
        assert_eq!(property.location(), "3栋 2单元 501室");
    }

    #[test]
    fn unsold_rows_have_no_owner() {
        let json = r#"{"pId":8,"buildingNo":"1","unitNo":"1","roomNo":"101",
                       "area":60.0,"pStatus":"UNSOLD"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.user_id, None);
        assert_eq!(property.owner_name, None);
    }

    #[test]
    fn status_labels_are_translated() {
        assert_eq!(PropertyStatus::Sold.label(), "已售");
        assert_eq!(PropertyStatus::Unsold.label(), "待售");
        assert_eq!(PropertyStatus::Rented.label(), "出租");
    }

    #[test]
    fn owner_detail_defaults_to_empty_holdings() {
        let detail: OwnerDetail = serde_json::from_str("{}").unwrap();
        assert!(detail.properties.is_empty());
    }
}
