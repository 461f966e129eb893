//! Cross-location extreme tracking with tie-set semantics

/// Precipitation below this total never earns a summary sentence
pub const MATERIALITY: f64 = 0.01;

/// Running extreme for one tracked metric.
///
/// `holders` is the insertion-ordered set of location names currently
/// achieving `value`; `metadata` carries an auxiliary value alongside the
/// winning record (the snow total paired with a precipitation max). Ties
/// append the holder and leave the metadata untouched.
#[derive(Debug, Clone)]
pub struct ExtremeRecord<T> {
    pub value: T,
    pub holders: Vec<String>,
    pub metadata: f64,
}

impl<T: PartialOrd + Copy> ExtremeRecord<T> {
    /// Start a record at its mathematical sentinel: the lowest representable
    /// value for a max tracker, the highest for a min tracker.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            holders: Vec::new(),
            metadata: 0.0,
        }
    }

    /// Fold one observation into a max record
    pub fn observe_max(&mut self, value: T, holder: &str, metadata: f64) {
        if value > self.value {
            self.replace(value, holder, metadata);
        } else if value == self.value {
            self.join(holder);
        }
    }

    /// Fold one observation into a min record
    pub fn observe_min(&mut self, value: T, holder: &str, metadata: f64) {
        if value < self.value {
            self.replace(value, holder, metadata);
        } else if value == self.value {
            self.join(holder);
        }
    }

    /// Holder names rendered for the summary: lexicographic order, commas
    /// between all but the last pair, an ampersand before the last.
    #[must_use]
    pub fn holder_list(&self) -> String {
        join_names(&self.holders)
    }

    fn replace(&mut self, value: T, holder: &str, metadata: f64) {
        self.value = value;
        self.holders.clear();
        self.holders.push(holder.to_string());
        self.metadata = metadata;
    }

    fn join(&mut self, holder: &str) {
        if !self.holders.iter().any(|h| h == holder) {
            self.holders.push(holder.to_string());
        }
    }
}

/// Join location names as prose: `A`, `A & B`, `A, B & C`
#[must_use]
pub fn join_names(names: &[String]) -> String {
    let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    match sorted.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        [head @ .., last] => format!("{} & {}", head.join(", "), last),
    }
}

/// All extremes tracked across one report build.
///
/// State is local to a single build; concurrent report builds each construct
/// their own tracker.
#[derive(Debug)]
pub struct ExtremeTracker {
    /// Highest temperature in ºF (as displayed, truncated to integer)
    pub high: ExtremeRecord<i32>,
    /// Lowest temperature in ºF
    pub low: ExtremeRecord<i32>,
    /// Highest sustained wind in mph
    pub wind: ExtremeRecord<i32>,
    /// Largest window-cumulative liquid precipitation in inches; metadata
    /// carries the holder's window-cumulative snow total
    pub precip: ExtremeRecord<f64>,
}

impl ExtremeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            high: ExtremeRecord::new(i32::MIN),
            low: ExtremeRecord::new(i32::MAX),
            wind: ExtremeRecord::new(i32::MIN),
            precip: ExtremeRecord::new(f64::NEG_INFINITY),
        }
    }

    /// Fold one rendered hour into the tracked extremes
    pub fn observe(
        &mut self,
        location: &str,
        temperature: i32,
        wind_speed: i32,
        precip_total: f64,
        snow_total: f64,
    ) {
        self.high.observe_max(temperature, location, 0.0);
        self.low.observe_min(temperature, location, 0.0);
        self.wind.observe_max(wind_speed, location, 0.0);
        self.precip.observe_max(precip_total, location, snow_total);
    }

    /// Whether any hour has been observed at all
    #[must_use]
    pub fn observed(&self) -> bool {
        !self.high.holders.is_empty()
    }
}

impl Default for ExtremeTracker {
    fn default() -> Self {
        Self::new()
    }
}
