//! Customer/transaction join
//!
//! Groups transactions under their owning customer with one pass over each
//! collection. Transaction order within a customer follows the feed.

use std::collections::HashMap;

use super::ident::CustomerId;
use super::types::{Customer, CustomerWithTransactions, Dataset, Transaction};

/// Join customers with their transactions
///
/// Every customer appears in the result, in feed order, even with no
/// transactions. Transactions whose `customer_id` matches no customer are
/// dropped and counted in [`Dataset::orphaned_transactions`].
pub fn join(customers: Vec<Customer>, transactions: Vec<Transaction>) -> Dataset {
    let mut by_customer: HashMap<CustomerId, Vec<Transaction>> =
        HashMap::with_capacity(customers.len());
    for customer in &customers {
        by_customer.entry(customer.id.clone()).or_default();
    }

    let mut orphaned = 0;
    for transaction in transactions {
        match by_customer.get_mut(&transaction.customer_id) {
            Some(bucket) => bucket.push(transaction),
            None => orphaned += 1,
        }
    }

    // Duplicate customer ids each get the full transaction list
    let joined = customers
        .into_iter()
        .map(|customer| {
            let transactions = by_customer.get(&customer.id).cloned().unwrap_or_default();
            CustomerWithTransactions {
                customer,
                transactions,
            }
        })
        .collect();

    Dataset::from_parts(joined, orphaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let customers = vec![
            Customer::new(1, "Ann"),
            Customer::new(2, "Bo"),
            Customer::new(3, "Cy"),
        ];
        let transactions = vec![
            Transaction::new(1, "2023-01-01", 10.0),
            Transaction::new("2", "2023-01-01", 20.0),
            Transaction::new(1, "2023-01-02", 30.0),
            Transaction::new(99, "2023-01-03", 40.0),
        ];
        join(customers, transactions)
    }

    #[test]
    fn test_join_correctness() {
        let dataset = sample();

        for customer in dataset.customers() {
            for tx in &customer.transactions {
                assert_eq!(&tx.customer_id, customer.id());
            }
        }

        let ann = dataset.find(&CustomerId::from(1)).unwrap();
        let amounts: Vec<f64> = ann.transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![10.0, 30.0]);
    }

    #[test]
    fn test_customer_without_transactions_is_kept() {
        let dataset = sample();
        let cy = dataset.find(&CustomerId::from(3)).unwrap();
        assert!(cy.transactions.is_empty());
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_orphan_transaction_is_dropped() {
        let dataset = sample();
        assert_eq!(dataset.orphaned_transactions(), 1);
        assert_eq!(dataset.transaction_count(), 3);
        assert!(dataset
            .customers()
            .iter()
            .all(|c| c.transactions.iter().all(|t| t.amount != 40.0)));
    }

    #[test]
    fn test_mixed_id_representations_match() {
        let customers = vec![Customer::new("7", "Di")];
        let transactions: Vec<Transaction> = serde_json::from_str(
            r#"[{"customer_id": 7, "date": "d1", "amount": 1},
                {"customer_id": "7", "date": "d2", "amount": 2}]"#,
        )
        .unwrap();

        let dataset = join(customers, transactions);
        assert_eq!(dataset.customers()[0].transactions.len(), 2);
        assert_eq!(dataset.orphaned_transactions(), 0);
    }

    #[test]
    fn test_large_ids_do_not_collide() {
        let customers: Vec<Customer> = serde_json::from_str(
            r#"[{"id": "12345678901234567890", "name": "A"},
                {"id": "12345678901234567891", "name": "B"},
                {"id": 9007199254740993, "name": "C"}]"#,
        )
        .unwrap();
        let transactions: Vec<Transaction> = serde_json::from_str(
            r#"[{"customer_id": "12345678901234567890", "date": "d1", "amount": 1},
                {"customer_id": "9007199254740993", "date": "d2", "amount": 2}]"#,
        )
        .unwrap();

        let dataset = join(customers, transactions);
        let counts: Vec<usize> = dataset
            .customers()
            .iter()
            .map(|c| c.transactions.len())
            .collect();
        assert_eq!(counts, vec![1, 0, 1]);
        assert_eq!(dataset.orphaned_transactions(), 0);
        assert_eq!(dataset.customers()[0].id().as_str(), "12345678901234567890");
    }

    #[test]
    fn test_customer_order_preserved() {
        let dataset = sample();
        let names: Vec<&str> = dataset.customers().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Ann", "Bo", "Cy"]);
    }

    #[test]
    fn test_empty_inputs() {
        let dataset = join(Vec::new(), Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset, Dataset::empty());
    }
}
