/// Sink for search counters. Every hook is called from the hot path, keep them cheap.
pub trait Stats {
    fn record_node(&mut self, depth: u8);
    fn record_cutoff(&mut self);
    fn record_cache_hit(&mut self);
    fn record_cache_miss(&mut self);
}

#[derive(Debug, Default, Copy, Clone)]
pub struct NullStats;

impl Stats for NullStats {
    fn record_node(&mut self, _depth: u8) {}
    fn record_cutoff(&mut self) {}
    fn record_cache_hit(&mut self) {}
    fn record_cache_miss(&mut self) {}
}

/// Counters accumulated over every search run by one searcher.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SearchStats {
    /// Positions handed to `evaluate`, terminal ones included.
    pub nodes: u64,
    /// Times the remaining siblings of a node were skipped.
    pub cutoffs: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub max_depth: u8,
}

impl Stats for SearchStats {
    fn record_node(&mut self, depth: u8) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    fn record_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    fn record_cache_miss(&mut self) {
        self.cache_misses += 1;
    }
}
