//! The transaction type and its JSON representation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Whether money came in or went out.
///
/// Serialized as `"up"` for income and `"down"` for expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money received, e.g. a salary.
    #[serde(rename = "up")]
    Income,
    /// Money spent.
    #[serde(rename = "down")]
    Expense,
}

impl TransactionType {
    /// The value used for this type in forms and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "up",
            TransactionType::Expense => "down",
        }
    }

    /// The label shown on the type selector buttons.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Outcome",
        }
    }
}

/// A single income or expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Generated when the transaction is created.
    pub id: Uuid,
    /// A short description, e.g. "Desenvolvimento de site".
    pub name: String,
    /// The positive value of the transaction in reais.
    #[serde(deserialize_with = "amount_format::deserialize")]
    pub amount: f64,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The key of the transaction's [crate::category::Category].
    pub category: String,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Create a transaction with a fresh ID dated now.
    pub fn new(
        name: &str,
        amount: f64,
        transaction_type: TransactionType,
        category: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            amount,
            transaction_type,
            category: category.to_owned(),
            date: OffsetDateTime::now_utc(),
        }
    }

    /// Set the date of the transaction.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = date;
        self
    }
}

mod amount_format {
    //! Older records may hold the amount as a numeric string rather than a
    //! number, so both are accepted when reading.
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(amount) => amount,
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("\"{text}\" is not a number")))?,
        };

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(D::Error::custom("amount must be a finite number"))
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use uuid::Uuid;

    use super::{Transaction, TransactionType};

    #[test]
    fn deserializes_stored_transaction() {
        let json = r#"{
            "id": "5d1d5c9a-3f5e-4a53-9d4e-1f5f0b6c2a10",
            "name": "Pizza",
            "amount": 59.9,
            "type": "down",
            "category": "food",
            "date": "2022-04-13T15:04:05.123Z"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(
            transaction,
            Transaction {
                id: Uuid::parse_str("5d1d5c9a-3f5e-4a53-9d4e-1f5f0b6c2a10").unwrap(),
                name: "Pizza".to_owned(),
                amount: 59.9,
                transaction_type: TransactionType::Expense,
                category: "food".to_owned(),
                date: datetime!(2022-04-13 15:04:05.123 UTC),
            }
        );
    }

    #[test]
    fn accepts_amount_as_numeric_string() {
        let json = r#"{
            "id": "5d1d5c9a-3f5e-4a53-9d4e-1f5f0b6c2a10",
            "name": "Salário",
            "amount": "12000",
            "type": "up",
            "category": "salary",
            "date": "2022-04-01T12:00:00Z"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.amount, 12000.0);
        assert_eq!(transaction.transaction_type, TransactionType::Income);
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let json = r#"{
            "id": "5d1d5c9a-3f5e-4a53-9d4e-1f5f0b6c2a10",
            "name": "Salário",
            "amount": "muito",
            "type": "up",
            "category": "salary",
            "date": "2022-04-01T12:00:00Z"
        }"#;

        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn serializes_type_as_polarity_tag() {
        let transaction = Transaction::new("Aluguel", 1200.0, TransactionType::Expense, "purchases")
            .date(datetime!(2022-04-05 10:00 UTC));

        let value = serde_json::to_value(&transaction).unwrap();

        assert_eq!(value["type"], "down");
        assert_eq!(value["amount"], 1200.0);
        assert_eq!(value["date"], "2022-04-05T10:00:00Z");
    }
}
