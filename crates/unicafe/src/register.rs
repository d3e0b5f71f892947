// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lunch cash register.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::PaymentCard;

pub const AFFORDABLE_LUNCH_PRICE: i64 = 240;
pub const TASTY_LUNCH_PRICE: i64 = 400;

/// Cash float of a new register, in cents.
const INITIAL_CASH: i64 = 100_000;

/// Sells lunches for cash or by card and tops up cards.
///
/// Card sales never touch the cash in the register; card top-ups are paid
/// in cash and do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashRegister {
    cash: i64,
    affordable_sold: u32,
    tasty_sold: u32,
}

impl Default for CashRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl CashRegister {
    pub fn new() -> Self {
        Self {
            cash: INITIAL_CASH,
            affordable_sold: 0,
            tasty_sold: 0,
        }
    }

    pub fn cash(&self) -> i64 {
        self.cash
    }

    pub fn affordable_sold(&self) -> u32 {
        self.affordable_sold
    }

    pub fn tasty_sold(&self) -> u32 {
        self.tasty_sold
    }

    /// Sell an affordable lunch for cash. Returns the change; an
    /// insufficient payment is returned in full.
    pub fn eat_affordably_cash(&mut self, payment: i64) -> i64 {
        match self.sell_for_cash(payment, AFFORDABLE_LUNCH_PRICE) {
            Some(change) => {
                self.affordable_sold += 1;
                change
            }
            None => payment,
        }
    }

    /// Sell a tasty lunch for cash. Returns the change; an insufficient
    /// payment is returned in full.
    pub fn eat_tastily_cash(&mut self, payment: i64) -> i64 {
        match self.sell_for_cash(payment, TASTY_LUNCH_PRICE) {
            Some(change) => {
                self.tasty_sold += 1;
                change
            }
            None => payment,
        }
    }

    pub fn eat_affordably_card(&mut self, card: &mut PaymentCard) -> bool {
        let paid = card.take(AFFORDABLE_LUNCH_PRICE);
        if paid {
            self.affordable_sold += 1;
        }
        paid
    }

    pub fn eat_tastily_card(&mut self, card: &mut PaymentCard) -> bool {
        let paid = card.take(TASTY_LUNCH_PRICE);
        if paid {
            self.tasty_sold += 1;
        }
        paid
    }

    /// Top up `card` with `amount` paid in cash. Negative amounts are ignored.
    pub fn load_card(&mut self, card: &mut PaymentCard, amount: i64) {
        if amount < 0 {
            debug!(amount, "ignoring negative card top-up");
            return;
        }
        card.load(amount);
        self.cash += amount;
    }

    fn sell_for_cash(&mut self, payment: i64, price: i64) -> Option<i64> {
        if payment < price {
            return None;
        }
        self.cash += price;
        Some(payment - price)
    }
}
