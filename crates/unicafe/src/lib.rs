// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// unicafe — a student-restaurant cash register and its payment cards.
//
// All amounts are integer cents.

pub mod card;
pub mod register;

pub use card::PaymentCard;
pub use register::{AFFORDABLE_LUNCH_PRICE, CashRegister, TASTY_LUNCH_PRICE};
