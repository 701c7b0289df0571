/*! Single-pass descriptive statistics for a stream of samples.

Feed values into a [`StatsBuilder`] one at a time (or collect an iterator
straight into a [`Stats`]) and read off the count, mean, variance, min, and
max without ever buffering the data.

```
# use field_stats::*;
let stats = vec![1.0_f64, 2., 3., 4.].into_iter().collect::<Stats>();
assert_eq!(stats.count, 4);
assert_eq!(stats.mean, 2.5);
assert_eq!(stats.min, 1.);
assert_eq!(stats.max, 4.);
```

*/

use std::iter::FromIterator;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsBuilder {
    /// the number of samples seen so far
    count: usize,
    /// the mean of the entire dataset
    mean: f64,
    /// the squared distance from the mean
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for StatsBuilder {
    fn default() -> StatsBuilder {
        StatsBuilder {
            count: 0,
            mean: 0.,
            m2: 0.,
            min: std::f64::INFINITY,
            max: std::f64::NEG_INFINITY,
        }
    }
}

impl StatsBuilder {
    pub fn update(&mut self, x: f64) {
        // Welford's online algorithm
        self.count += 1;
        let delta1 = x - self.mean; // diff from the old mean
        self.mean += delta1 / self.count as f64;
        let delta2 = x - self.mean; // diff from the new mean
        self.m2 += delta1 * delta2;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    pub fn count(self) -> usize {
        self.count
    }

    pub fn mean(self) -> f64 {
        if self.count == 0 {
            std::f64::NAN
        } else {
            self.mean
        }
    }

    pub fn min(self) -> f64 {
        if self.count == 0 {
            std::f64::NAN
        } else {
            self.min
        }
    }

    pub fn max(self) -> f64 {
        if self.count == 0 {
            std::f64::NAN
        } else {
            self.max
        }
    }

    /// Variance with the 1/n normalisation.
    pub fn population_var(self) -> f64 {
        if self.count == 0 {
            std::f64::NAN
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Variance with Bessel's correction (1/(n-1)).
    pub fn sample_var(self) -> f64 {
        if self.count <= 1 {
            std::f64::NAN
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }
}

impl Extend<f64> for StatsBuilder {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for x in iter {
            self.update(x);
        }
    }
}

/// Frozen summary of a sample.
///
/// `std_dev` is the population standard deviation, ie. the square root of
/// [`StatsBuilder::population_var`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    /// The sample size
    pub count: usize,
    /// The sample mean
    pub mean: f64,
    /// The population standard deviation
    pub std_dev: f64,
    /// The smallest sample
    pub min: f64,
    /// The largest sample
    pub max: f64,
}

impl From<StatsBuilder> for Stats {
    fn from(x: StatsBuilder) -> Stats {
        Stats {
            count: x.count(),
            mean: x.mean(),
            std_dev: x.population_var().sqrt(),
            min: x.min(),
            max: x.max(),
        }
    }
}

impl FromIterator<f64> for Stats {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Stats {
        let mut bldr = StatsBuilder::default();
        bldr.extend(iter);
        bldr.into()
    }
}
