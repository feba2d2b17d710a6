//! The working set of unique addresses, in first-seen order.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

/// Order-preserving set of IPv4 addresses keyed by their 32-bit value.
#[derive(Debug, Default, Clone)]
pub struct AddressSet {
    order: Vec<u32>,
    members: HashSet<u32>,
}

impl AddressSet {
    pub fn new() -> AddressSet {
        AddressSet::default()
    }

    /// Add an address, returning false if it was already present.
    pub fn insert(&mut self, addr: Ipv4Addr) -> bool {
        let bits = u32::from(addr);
        if self.members.insert(bits) {
            self.order.push(bits);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Addresses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.order.iter().map(|bits| Ipv4Addr::from(*bits))
    }

    /// Numerically sorted snapshot, used for range counting.
    pub fn sorted(&self) -> SortedAddresses {
        let mut bits = self.order.clone();
        bits.sort_unstable();
        SortedAddresses(bits)
    }
}

impl Extend<Ipv4Addr> for AddressSet {
    fn extend<T: IntoIterator<Item = Ipv4Addr>>(&mut self, iter: T) {
        for addr in iter {
            self.insert(addr);
        }
    }
}

impl FromIterator<Ipv4Addr> for AddressSet {
    fn from_iter<T: IntoIterator<Item = Ipv4Addr>>(iter: T) -> Self {
        let mut set = AddressSet::new();
        set.extend(iter);
        set
    }
}

/// Sorted, duplicate-free address values.
#[derive(Debug, Clone)]
pub struct SortedAddresses(Vec<u32>);

impl SortedAddresses {
    /// Count the members that fall inside `range`.
    pub fn count_in(&self, range: &RangeInclusive<u32>) -> u64 {
        let start = self.0.partition_point(|bits| bits < range.start());
        let end = self.0.partition_point(|bits| bits <= range.end());
        end.saturating_sub(start) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut set = AddressSet::new();
        assert!(set.insert(Ipv4Addr::new(10, 0, 0, 3)));
        assert!(set.insert(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(!set.insert(Ipv4Addr::new(10, 0, 0, 3)));
        assert!(set.insert(Ipv4Addr::new(10, 0, 0, 2)));

        assert_eq!(set.len(), 3);
        let order: Vec<Ipv4Addr> = set.iter().collect();
        assert_eq!(
            order,
            vec![
                Ipv4Addr::new(10, 0, 0, 3),
                Ipv4Addr::new(10, 0, 0, 1),
                Ipv4Addr::new(10, 0, 0, 2)
            ]
        );
    }

    #[test]
    fn test_count_in() {
        let set: AddressSet = [9u8, 10, 11, 200, 3]
            .iter()
            .map(|o| Ipv4Addr::new(192, 168, 1, *o))
            .collect();
        let sorted = set.sorted();
        let base = u32::from(Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(sorted.count_in(&((base + 9)..=(base + 10))), 2);
        assert_eq!(sorted.count_in(&((base + 1)..=(base + 254))), 5);
        assert_eq!(sorted.count_in(&((base + 12)..=(base + 199))), 0);
        assert_eq!(sorted.count_in(&(0..=u32::MAX)), 5);
    }

    #[test]
    fn test_empty() {
        let set = AddressSet::new();
        assert!(set.is_empty());
        assert_eq!(set.sorted().count_in(&(0..=u32::MAX)), 0);
    }
}
