use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A wallet ledger entry from `/wallet/transactions`.
///
/// `trans_type` stays a free string on purpose: the backend grows new
/// debit kinds (PAY_FEE, TOPUP_CARD, ...) without notice, and the console
/// only distinguishes recharges from everything else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub trans_id: i64,
    pub trans_type: String,
    pub amount: f64,

    #[serde(default)]
    pub description: Option<String>,

    pub trans_time: NaiveDateTime,
}

impl WalletTransaction {
    /// Whether this entry credits the wallet.
    pub fn is_recharge(&self) -> bool {
        self.trans_type == "RECHARGE"
    }

    /// `+` for credits, `-` for every debit kind.
    pub fn sign(&self) -> char {
        if self.is_recharge() { '+' } else { '-' }
    }

    /// Timestamp formatted for the ledger table.
    pub fn formatted_time(&self) -> String {
        self.trans_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(trans_type: &str) -> WalletTransaction {
        let json = format!(
            r#"{{"transId":9,"transType":"{trans_type}","amount":50.0,
                 "description":"水电卡充值","transTime":"2024-03-05T09:30:00"}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn parses_backend_timestamp() {
        assert_eq!(entry("RECHARGE").formatted_time(), "2024-03-05 09:30:00");
    }

    #[test]
    fn recharge_is_a_credit() {
        let recharge = entry("RECHARGE");
        assert!(recharge.is_recharge());
        assert_eq!(recharge.sign(), '+');
    }

    #[test]
    fn unknown_types_are_debits() {
        for kind in ["PAY_FEE", "TOPUP_CARD", "SOMETHING_NEW"] {
            assert_eq!(entry(kind).sign(), '-');
        }
    }
}
