//! Bitcoin amounts

use std::fmt;

/// An amount of bitcoin in satoshis
#[derive(Default, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Amount(pub i64);

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} sats", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug() {
        assert!(format!("{:?}", Amount(2381622)) == "2381622 sats");
        assert!(Amount::default() == Amount(0));
        assert!(Amount(600) < Amount(2239033));
    }
}
