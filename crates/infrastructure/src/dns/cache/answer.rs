use std::time::Instant;

/// A cached upstream response: the raw DNS message plus the byte offsets of
/// every TTL in its answer and authority sections.
///
/// Every offset points at a 32-bit field strictly inside `data`, and an
/// answer only lives in the cache while each of those TTLs survives the
/// decrement by its age.
#[derive(Debug, Clone)]
pub struct CachedAnswer {
    data: Vec<u8>,
    ttl_offsets: Vec<usize>,
    created_at: Instant,
}

impl CachedAnswer {
    pub fn new(data: Vec<u8>, ttl_offsets: Vec<usize>, created_at: Instant) -> Self {
        Self {
            data,
            ttl_offsets,
            created_at,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn ttl_offsets(&self) -> &[usize] {
        &self.ttl_offsets
    }

    /// Whole seconds elapsed since this answer was stored (or last refreshed
    /// by the reaper).
    pub fn age_secs(&self, now: Instant) -> u32 {
        now.saturating_duration_since(self.created_at).as_secs() as u32
    }

    /// Copy of the message with every TTL decremented by `seconds`, or `None`
    /// when any TTL would reach zero or underflow.
    pub fn decremented(&self, seconds: u32) -> Option<Vec<u8>> {
        let mut data = self.data.clone();
        decrement_ttls(&mut data, &self.ttl_offsets, seconds).then_some(data)
    }

    /// Reaper variant: age the stored bytes in place and restart the clock.
    /// Returns `false` when the answer is spent and should be evicted.
    pub fn refresh(&mut self, seconds: u32, now: Instant) -> bool {
        if !decrement_ttls(&mut self.data, &self.ttl_offsets, seconds) {
            return false;
        }
        self.created_at = now;
        true
    }

    /// Current TTL values, in offset order.
    pub fn ttls(&self) -> Vec<u32> {
        self.ttl_offsets
            .iter()
            .filter_map(|&offset| read_ttl(&self.data, offset))
            .collect()
    }
}

fn read_ttl(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Subtract `seconds` from each TTL. Nothing is written unless every TTL
/// survives; decrementing to zero counts as expiry.
fn decrement_ttls(data: &mut [u8], offsets: &[usize], seconds: u32) -> bool {
    for &offset in offsets {
        match read_ttl(data, offset) {
            Some(current) if seconds < current => {}
            _ => return false,
        }
    }

    for &offset in offsets {
        if let Some(current) = read_ttl(data, offset) {
            data[offset..offset + 4].copy_from_slice(&(current - seconds).to_be_bytes());
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_with_ttls(ttls: &[u32]) -> CachedAnswer {
        let mut data = vec![0u8; 12];
        let mut offsets = Vec::new();
        for &ttl in ttls {
            offsets.push(data.len());
            data.extend_from_slice(&ttl.to_be_bytes());
        }
        CachedAnswer::new(data, offsets, Instant::now())
    }

    #[test]
    fn test_decremented_leaves_stored_bytes_alone() {
        let answer = answer_with_ttls(&[31, 60]);

        let data = answer.decremented(1).unwrap();
        let offsets = answer.ttl_offsets();
        assert_eq!(&data[offsets[0]..offsets[0] + 4], &30u32.to_be_bytes());
        assert_eq!(&data[offsets[1]..offsets[1] + 4], &59u32.to_be_bytes());

        assert_eq!(answer.ttls(), vec![31, 60]);
    }

    #[test]
    fn test_decrement_to_zero_expires() {
        let answer = answer_with_ttls(&[31, 60]);

        assert!(answer.decremented(30).is_some());
        assert!(answer.decremented(31).is_none());
        assert!(answer.decremented(u32::MAX).is_none());
    }

    #[test]
    fn test_expiry_is_record_level() {
        // One short TTL takes the whole answer with it.
        let answer = answer_with_ttls(&[5, 3600]);
        assert!(answer.decremented(5).is_none());
    }

    #[test]
    fn test_refresh_ages_in_place_and_restarts_clock() {
        let mut answer = answer_with_ttls(&[31, 60]);

        let now = Instant::now();
        assert!(answer.refresh(10, now));
        assert_eq!(answer.ttls(), vec![21, 50]);
        assert_eq!(answer.age_secs(now), 0);

        assert!(!answer.refresh(21, Instant::now()));
    }
}
