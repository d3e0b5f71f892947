// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Prepaid payment card.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A card holding a balance in cents. The balance never goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    balance: i64,
}

impl PaymentCard {
    /// A negative opening balance is raised to zero.
    pub fn new(balance: i64) -> Self {
        Self {
            balance: balance.max(0),
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Add `amount` to the card. Negative amounts are ignored.
    pub fn load(&mut self, amount: i64) {
        if amount < 0 {
            return;
        }
        self.balance += amount;
    }

    /// Take `amount` off the card if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise.
    pub fn take(&mut self, amount: i64) -> bool {
        if self.balance < amount {
            return false;
        }
        self.balance -= amount;
        true
    }
}

impl fmt::Display for PaymentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Card balance {}.{:02} euros",
            self.balance / 100,
            self.balance % 100
        )
    }
}
