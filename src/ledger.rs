//! Currency balance holder.
//!
//! The ledger applies deltas and nothing else. Sufficiency checks belong to
//! the purchase protocols in [`crate::logic`], and persistence happens in the
//! engine's write-through after each mutating operation.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    balance: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(balance: f64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Add `amount` and return the new balance.
    pub fn credit(&mut self, amount: f64) -> f64 {
        self.balance += amount;
        self.balance
    }

    /// Subtract `amount` and return the new balance. Does not reject a
    /// negative result.
    pub fn debit(&mut self, amount: f64) -> f64 {
        self.balance -= amount;
        self.balance
    }

    pub fn can_afford(&self, price: f64) -> bool {
        self.balance >= price
    }

    pub fn reset(&mut self) {
        self.balance = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_and_debit_return_new_balance() {
        let mut ledger = Ledger::new();
        assert!((ledger.credit(15.0) - 15.0).abs() < f64::EPSILON);
        assert!((ledger.debit(5.0) - 10.0).abs() < f64::EPSILON);
        assert!((ledger.balance() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn debit_does_not_guard_negative() {
        let mut ledger = Ledger::with_balance(1.0);
        assert!(ledger.debit(3.0) < 0.0);
    }

    #[test]
    fn can_afford_is_inclusive() {
        let ledger = Ledger::with_balance(15.0);
        assert!(ledger.can_afford(15.0));
        assert!(!ledger.can_afford(15.000_001));
    }

    #[test]
    fn reset_zeroes_balance() {
        let mut ledger = Ledger::with_balance(1e15);
        ledger.reset();
        assert_eq!(ledger, Ledger::new());
    }

    #[test]
    fn large_balances_still_compare() {
        // Beyond 2^53 small credits are absorbed, but comparisons stay ordered.
        let mut ledger = Ledger::with_balance(2f64.powi(60));
        ledger.credit(1.0);
        assert!(ledger.can_afford(2f64.powi(60)));
        assert!(!ledger.can_afford(2f64.powi(61)));
    }
}
