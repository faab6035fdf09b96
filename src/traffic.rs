//! Payment traffic attached to the generated channels.
//!
//! Transactions are produced by the simulator's traffic generator; this
//! crate only reads them from disk and copies them onto channels.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::topology::NetworkMap;
use crate::utils::decimal_string;

/// A payment as seen by a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub secret: String,
    pub payment_request: String,
    #[serde(with = "decimal_string")]
    pub tokens: u64,
    #[serde(with = "decimal_string")]
    pub created_at: i64,
    #[serde(with = "decimal_string")]
    pub expired_at: i64,
}

/// Attach the full transaction list to every channel of `map`.
///
/// Each channel receives its own copy of `transactions` in caller order;
/// the list is not partitioned across channels. Any transactions a channel
/// already carried are replaced.
pub fn attach_transactions(map: &mut NetworkMap, transactions: &[Transaction]) {
    let mut channels = 0usize;
    for channel in map.channels_mut() {
        channel.transactions = transactions.to_vec();
        channels += 1;
    }
    info!("Attached {} transactions to each of {} channels", transactions.len(), channels);
}

/// Load a transaction list from a JSON array file
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    info!("Loading transactions from: {:?}", path);

    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open transaction file {}", path.display()))?;
    let transactions: Vec<Transaction> = serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("Failed to parse transaction file {}", path.display()))?;

    debug!("Loaded {} transactions", transactions.len());
    Ok(transactions)
}
