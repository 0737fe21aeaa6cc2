/// The four billed token sub-counts taken from a single usage source object.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenCounts {
    pub input: u64,
    pub output: u64,
    pub cache_create: u64,
    pub cache_read: u64,
}

impl TokenCounts {
    /// Cache tokens are billed, so they count toward the total.
    pub fn total(&self) -> u64 {
        self.input
            .saturating_add(self.output)
            .saturating_add(self.cache_create)
            .saturating_add(self.cache_read)
    }

    pub fn is_zero(&self) -> bool {
        self.input == 0 && self.output == 0 && self.cache_create == 0 && self.cache_read == 0
    }
}
