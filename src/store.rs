// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use uuid::Uuid;

use crate::models::{BillStatement, CreditCard, PaymentReminder};

pub trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for CreditCard {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for PaymentReminder {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for BillStatement {
    fn key(&self) -> Uuid {
        self.id
    }
}

/// Id-keyed cache of the last fetch, preserving backend row order. Views
/// mutate it only after the corresponding remote call succeeds; a failed
/// call leaves it untouched. `replace_all` lands each refetch, dropping the
/// stale cache wholesale.
#[derive(Debug, Clone)]
pub struct Store<T: Keyed> {
    rows: Vec<T>,
}

impl<T: Keyed> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> Store<T> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn replace_all(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.rows.iter().find(|r| r.key() == id)
    }

    /// Replace the row with the same id in place, or append it.
    pub fn upsert(&mut self, row: T) {
        match self.rows.iter_mut().find(|r| r.key() == row.key()) {
            Some(slot) => *slot = row,
            None => self.rows.push(row),
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let pos = self.rows.iter().position(|r| r.key() == id)?;
        Some(self.rows.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }
}
