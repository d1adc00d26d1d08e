//! Core record types for the customer/transaction dataset
//!
//! - `Customer`: a customer record as served by the feed
//! - `Transaction`: a single transaction owned by a customer
//! - `CustomerWithTransactions`: a customer joined with its transactions
//! - `Dataset`: the full joined dataset, built once per load

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::ident::CustomerId;

/// A customer record
///
/// Fields the viewer does not use are kept in `extra` and re-emitted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// A transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Owning customer
    pub customer_id: CustomerId,
    /// ISO-like date string, kept as served
    pub date: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    pub fn new(customer_id: impl Into<CustomerId>, date: impl Into<String>, amount: f64) -> Self {
        Self {
            customer_id: customer_id.into(),
            date: date.into(),
            amount,
            extra: Map::new(),
        }
    }
}

/// A customer extended with all of its transactions, in feed order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerWithTransactions {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(rename = "Transactions")]
    pub transactions: Vec<Transaction>,
}

impl CustomerWithTransactions {
    pub fn id(&self) -> &CustomerId {
        &self.customer.id
    }

    pub fn name(&self) -> &str {
        &self.customer.name
    }
}

/// The full joined dataset
///
/// Built once after both collections are fetched and never modified
/// afterwards. Filtered views are derived copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    customers: Vec<CustomerWithTransactions>,
    orphaned_transactions: usize,
}

impl Dataset {
    pub(crate) fn from_parts(
        customers: Vec<CustomerWithTransactions>,
        orphaned_transactions: usize,
    ) -> Self {
        Self {
            customers,
            orphaned_transactions,
        }
    }

    /// Empty dataset, used when loading failed or has not finished
    pub fn empty() -> Self {
        Self::default()
    }

    /// Customers in feed order
    pub fn customers(&self) -> &[CustomerWithTransactions] {
        &self.customers
    }

    /// Look up a customer by identity
    pub fn find(&self, id: &CustomerId) -> Option<&CustomerWithTransactions> {
        self.customers.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Number of transactions attached to customers
    pub fn transaction_count(&self) -> usize {
        self.customers.iter().map(|c| c.transactions.len()).sum()
    }

    /// Number of transactions whose `customer_id` matched no customer
    pub fn orphaned_transactions(&self) -> usize {
        self.orphaned_transactions
    }
}

/// Amounts arrive as JSON numbers, but some feeds quote them
fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a numeric amount")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| E::custom(format!("invalid amount: {:?}", v)))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}
