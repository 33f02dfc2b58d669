use serde::{Deserialize, Serialize};

/// Kind of utility card bound to a property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Water,
    Electricity,
}

impl CardType {
    /// Display label (水卡 / 电卡).
    pub fn label(self) -> &'static str {
        match self {
            CardType::Water => "水卡",
            CardType::Electricity => "电卡",
        }
    }
}

/// A utility card row from `/utility/my-cards`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UtilityCard {
    pub card_id: i64,
    pub card_type: CardType,

    /// Current balance; freshly issued cards may not have one yet.
    #[serde(default)]
    pub balance: Option<f64>,

    pub building_no: String,
    pub unit_no: String,
    pub room_no: String,
}

impl UtilityCard {
    /// Short `b-u-r` location tag used in the card table and selector.
    pub fn location(&self) -> String {
        format!("{}-{}-{}", self.building_no, self.unit_no, self.room_no)
    }

    /// Balance with missing values displayed as zero.
    pub fn balance_or_zero(&self) -> f64 {
        self.balance.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_card_row() {
        let json = r#"{"cardId":11,"cardType":"WATER","balance":35.5,
                       "buildingNo":"3","unitNo":"2","roomNo":"501"}"#;
        let card: UtilityCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.card_id, 11);
        assert_eq!(card.card_type, CardType::Water);
        assert_eq!(card.location(), "3-2-501");
    }

    #[test]
    fn missing_balance_displays_as_zero() {
        let json = r#"{"cardId":12,"cardType":"ELECTRICITY",
                       "buildingNo":"3","unitNo":"2","roomNo":"501"}"#;
        let card: UtilityCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.balance_or_zero(), 0.0);
        assert_eq!(card.card_type.label(), "电卡");
    }
}
