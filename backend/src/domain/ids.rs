use chrono::Utc;

/// Hands out record ids derived from the current time in milliseconds.
///
/// Ids are strictly increasing: two calls in the same millisecond, or a clock
/// that went backwards, still produce distinct ids above every id seen before.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Generator whose ids will all be greater than `max_existing`
    pub fn starting_after(max_existing: u64) -> Self {
        Self { last: max_existing }
    }

    /// Generator seeded from the ids already present in a collection
    pub fn for_existing<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self::starting_after(ids.into_iter().max().unwrap_or(0))
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut ids = IdGenerator::starting_after(0);
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_ids_stay_above_existing_ids() {
        let far_future = u64::try_from(Utc::now().timestamp_millis()).unwrap() + 1_000_000;
        let mut ids = IdGenerator::for_existing(vec![3, far_future, 9]);
        assert_eq!(ids.next_id(), far_future + 1);
    }

    #[test]
    fn test_ids_are_timestamp_based() {
        let before = u64::try_from(Utc::now().timestamp_millis()).unwrap();
        let mut ids = IdGenerator::for_existing(vec![1, 2, 3]);
        assert!(ids.next_id() >= before);
    }
}
